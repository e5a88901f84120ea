mod app;
mod config;
mod core;
mod models;
mod system;
mod ui;
mod utils;

use anyhow::{Context, Result};
use app::App;
use core::actions::find_action;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use ui::DialogKind;

/// 로그 필터 환경 변수
const LOG_ENV: &str = "BACKUP_TUI_LOG";

fn main() -> Result<()> {
    // TUI가 stdout을 쓰므로 진단 로그는 파일로
    let _log_guard = init_tracing();

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    // Create app
    let mut app = App::new();

    // Run app
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "event loop failed");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// `<data-local-dir>/backup-tui/backup-tui.log`에 기록. 디렉토리가 없으면 로그 없이 진행
fn init_tracing() -> Option<WorkerGuard> {
    let dir = dirs::data_local_dir()?.join("backup-tui");
    std::fs::create_dir_all(&dir).ok()?;

    let file_appender = tracing_appender::rolling::never(&dir, "backup-tui.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .ok()?;

    Some(guard)
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::renderer::draw(f, app))?;

        // 백업 진행 중에는 짧은 타임아웃으로 이벤트 체크
        let poll_timeout = if app.is_backup_running() {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(200)
        };

        if event::poll(poll_timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key.modifiers, key.code);
                }
            }
        }

        app.poll_backup();

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    // Ctrl+C는 어디서나 종료
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    if app.is_dialog_active() {
        handle_dialog_keys(app, modifiers, code);
    } else if let Some(action) = find_action(modifiers, code) {
        app.execute_action(action);
    }
}

/// 다이얼로그 모드 키 처리
fn handle_dialog_keys(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    if matches!(app.dialog, Some(DialogKind::Picker(_))) {
        handle_picker_keys(app, code);
    } else if matches!(app.dialog, Some(DialogKind::PathInput { .. })) {
        handle_path_input_keys(app, modifiers, code);
    } else if matches!(app.dialog, Some(DialogKind::RemoveChecklist { .. })) {
        handle_checklist_keys(app, code);
    } else if matches!(app.dialog, Some(DialogKind::Help { .. })) {
        handle_help_keys(app, code);
    }
}

/// 피커 다이얼로그 키 처리
fn handle_picker_keys(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Up | KeyCode::Char('k') => app.picker_move(-1),
        KeyCode::Down | KeyCode::Char('j') => app.picker_move(1),
        KeyCode::PageUp => app.picker_page(-1),
        KeyCode::PageDown => app.picker_page(1),
        KeyCode::Home | KeyCode::Char('g') => app.picker_top(),
        KeyCode::End | KeyCode::Char('G') => app.picker_bottom(),
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app.picker_activate(),
        KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => app.picker_go_parent(),
        KeyCode::Char('.') => app.picker_toggle_hidden(),
        KeyCode::Char('/') => app.picker_open_input(),
        _ => {}
    }
}

/// 경로 입력 다이얼로그 키 처리
fn handle_path_input_keys(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    match (modifiers, code) {
        (_, KeyCode::Esc) => app.path_input_back(),
        (_, KeyCode::Enter) => app.path_input_confirm(),
        (_, KeyCode::Tab) => app.path_input_cycle_completion(true),
        (_, KeyCode::BackTab) => app.path_input_cycle_completion(false),
        (_, KeyCode::Backspace) => app.path_input_backspace(),
        (_, KeyCode::Delete) => app.path_input_delete(),
        (_, KeyCode::Left) => app.path_input_left(),
        (_, KeyCode::Right) => app.path_input_right(),
        (_, KeyCode::Home) => app.path_input_home(),
        (_, KeyCode::End) => app.path_input_end(),
        (m, KeyCode::Char('w')) if m.contains(KeyModifiers::CONTROL) => {
            app.path_input_delete_component()
        }
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => app.path_input_char(c),
        _ => {}
    }
}

/// 제거 체크리스트 키 처리
fn handle_checklist_keys(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Up | KeyCode::Char('k') => app.checklist_move(-1),
        KeyCode::Down | KeyCode::Char('j') => app.checklist_move(1),
        KeyCode::Char(' ') => app.checklist_toggle(),
        KeyCode::Char('a') => app.checklist_toggle_all(),
        KeyCode::Enter => app.checklist_confirm(),
        _ => {}
    }
}

/// 도움말 다이얼로그 키 처리
fn handle_help_keys(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::F(1) | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.close_dialog()
        }
        KeyCode::Down | KeyCode::Char('j') => app.help_scroll(1),
        KeyCode::Up | KeyCode::Char('k') => app.help_scroll(-1),
        KeyCode::PageDown => app.help_scroll(10),
        KeyCode::PageUp => app.help_scroll(-10),
        _ => {}
    }
}
