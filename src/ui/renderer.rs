// Renderer - 한 프레임 전체 렌더링
//
// 레이아웃 계산 후 타이틀바, 액션 목록, 로그, 상태바, 커맨드바, 다이얼로그 순서로 그린다.

use crate::app::App;
use crate::ui::{
    ActionList, CommandBar, Dialog, LayoutMode, LogPanel, StatusBar, Theme, WarningScreen,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// 프레임 렌더링 (레이아웃 갱신 포함)
pub fn draw(f: &mut Frame<'_>, app: &mut App) {
    let size = f.area();
    app.layout.update(size);

    match app.layout.mode() {
        LayoutMode::TooSmall => {
            let (width, height) = app.layout.terminal_size();
            let warning = WarningScreen::new()
                .current_size(width, height)
                .theme(app.theme_manager.current());
            f.render_widget(warning, size);
        }
        LayoutMode::SideBySide | LayoutMode::Stacked => render_main_ui(f, app),
    }
}

fn render_title_bar(f: &mut Frame<'_>, theme: &Theme, area: Rect) {
    let title = format!(" Backup TUI v{}", env!("CARGO_PKG_VERSION"));
    let right = format!("{} ", theme.name);
    let padding = usize::from(area.width).saturating_sub(title.len() + right.len());

    let style = Style::default().bg(theme.title_bar_bg).fg(theme.title_bar_fg);
    let line = Line::from(vec![
        Span::styled(title, style.add_modifier(Modifier::BOLD)),
        Span::styled(" ".repeat(padding), style),
        Span::styled(right, style),
    ]);
    f.render_widget(Paragraph::new(line).style(style), area);
}

/// 메인 UI 렌더링
fn render_main_ui(f: &mut Frame<'_>, app: &App) {
    let areas = app.layout.areas();
    let theme = app.theme_manager.current();

    render_title_bar(f, theme, areas.title_bar);

    let action_list = ActionList::new()
        .selected(app.selected_action)
        .focused(!app.is_dialog_active())
        .theme(theme);
    f.render_widget(action_list, areas.action_list);

    f.render_widget(LogPanel::new(&app.log).theme(theme), areas.log_panel);

    let workspace = app.workspace.root.display().to_string();
    let status_bar = StatusBar::new()
        .entry_count(app.entry_count())
        .workspace(&workspace)
        .progress(app.backup_progress())
        .theme(theme);
    f.render_widget(status_bar, areas.status_bar);

    let command_bar = CommandBar::new().busy(app.is_backup_running()).theme(theme);
    f.render_widget(command_bar, areas.command_bar);

    if let Some(ref dialog_kind) = app.dialog {
        let dialog = Dialog::new(dialog_kind).theme(theme);
        f.render_widget(dialog, f.area());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_text;
    use ratatui::{backend::TestBackend, Terminal};
    use tempfile::TempDir;

    fn render(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_main_screen() {
        let temp = TempDir::new().unwrap();
        let mut app = App::new_for_test(temp.path());

        let text = render(&mut app, 100, 30);
        assert!(text.contains("Backup TUI v"));
        assert!(text.contains("Actions"));
        assert!(text.contains("Start Backup"));
        assert!(text.contains("INFO Backup TUI v"));
        assert!(text.contains("no backup list"));
        assert!(text.contains("F10:Quit"));
    }

    #[test]
    fn test_too_small_terminal_shows_warning() {
        let temp = TempDir::new().unwrap();
        let mut app = App::new_for_test(temp.path());

        let text = render(&mut app, 30, 10);
        assert!(text.contains("Terminal Too Small"));
    }

    #[test]
    fn test_dialog_is_drawn_over_main_screen() {
        let temp = TempDir::new().unwrap();
        let mut app = App::new_for_test(temp.path());
        app.show_help();

        let text = render(&mut app, 100, 40);
        assert!(text.contains("Keyboard Shortcuts"));
    }
}
