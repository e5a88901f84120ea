use crate::config::{Settings, Workspace};
use crate::core::actions::{backup_actions, Action};
use crate::models::{ActivityLog, PathListStore};
use crate::system::FileSystem;
use crate::ui::{DialogKind, LayoutManager, ThemeManager};
use std::path::PathBuf;

mod commands;
mod dialogs;
mod text_edit;
mod worker;

use worker::BackupWorker;

/// 목록이 없을 때 모든 목록 의존 액션이 남기는 경고
pub const LIST_MISSING_MESSAGE: &str =
    "Backup list does not exist -> first add a file or directory";

/// 앱 상태
pub struct App {
    /// 종료 플래그
    pub should_quit: bool,
    /// 레이아웃 매니저
    pub layout: LayoutManager,
    /// 테마 관리자
    pub theme_manager: ThemeManager,
    /// 파일 시스템
    pub filesystem: FileSystem,
    /// 저장된 설정
    pub settings: Settings,
    /// 목록 파일/스테이징 디렉토리 기준
    pub workspace: Workspace,
    /// 백업 목록 저장소
    pub path_list: PathListStore,
    /// 출력 로그
    pub log: ActivityLog,
    /// 액션 목록 패널 선택 위치
    pub selected_action: usize,
    /// 현재 표시 중인 다이얼로그
    pub dialog: Option<DialogKind>,
    /// 실행 중인 백업 워커
    backup_worker: Option<BackupWorker>,
    /// 테스트에서 설정 저장 경로를 격리하기 위한 override
    settings_store_override: Option<PathBuf>,
}

impl App {
    pub fn new() -> Self {
        let settings = Settings::store_path()
            .map(|path| Settings::load(&path))
            .unwrap_or_default();
        Self::with_settings(settings, None)
    }

    fn with_settings(settings: Settings, settings_store_override: Option<PathBuf>) -> Self {
        let workspace = settings.workspace();
        let path_list = PathListStore::new(workspace.list_file.clone());

        tracing::info!(
            workspace = %workspace.root.display(),
            list = %workspace.list_file.display(),
            "workspace ready"
        );

        let mut app = Self {
            should_quit: false,
            layout: LayoutManager::new(),
            theme_manager: ThemeManager::with_name(&settings.theme),
            filesystem: FileSystem::new(),
            settings,
            workspace,
            path_list,
            log: ActivityLog::new(),
            selected_action: 0,
            dialog: None,
            backup_worker: None,
            settings_store_override,
        };
        app.log
            .info(format!("Backup TUI v{}", env!("CARGO_PKG_VERSION")));
        app
    }

    /// 작업 공간을 `root`로 고정한 테스트용 앱 (설정 파일도 `root` 안에 둔다)
    #[cfg(test)]
    pub(crate) fn new_for_test(root: &std::path::Path) -> Self {
        let settings = Settings {
            workspace_root: Some(root.to_path_buf()),
            ..Settings::default()
        };
        Self::with_settings(settings, Some(root.join("settings.toml")))
    }

    fn settings_store_path(&self) -> Option<PathBuf> {
        self.settings_store_override
            .clone()
            .or_else(Settings::store_path)
    }

    pub(crate) fn save_settings(&mut self) {
        self.settings.theme = self.theme_manager.current_name().to_string();
        let Some(path) = self.settings_store_path() else {
            return;
        };
        if let Err(e) = self.settings.save(&path) {
            tracing::warn!(path = %path.display(), error = %e, "could not save settings");
        }
    }

    /// 종료 (실행 중인 백업은 취소 요청 후 정리될 때까지 기다린다)
    pub fn quit(&mut self) {
        self.shutdown_backup();
        self.save_settings();
        self.should_quit = true;
    }

    /// 종료 상태 확인
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_dialog_active(&self) -> bool {
        self.dialog.is_some()
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    /// 목록 파일 항목 수 (상태바용, 목록이 없으면 None)
    pub fn entry_count(&self) -> Option<usize> {
        self.path_list.read_all().ok().map(|entries| entries.len())
    }

    /// 액션 목록 선택 이동
    pub fn move_selection(&mut self, delta: isize) {
        let count = backup_actions().len();
        if count == 0 {
            return;
        }
        let current = self.selected_action as isize;
        self.selected_action = (current + delta).clamp(0, count as isize - 1) as usize;
    }

    /// 선택된 액션 실행 (Enter)
    pub fn activate_selected(&mut self) {
        if let Some(def) = backup_actions().get(self.selected_action) {
            self.execute_action(def.action);
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme_manager.cycle_theme();
        self.save_settings();
    }

    pub fn show_help(&mut self) {
        self.dialog = Some(DialogKind::help());
    }

    /// 액션 실행 (키 바인딩/액션 목록 공통 진입점)
    pub fn execute_action(&mut self, action: Action) {
        tracing::debug!(?action, "execute action");
        match action {
            Action::AddFile => self.start_add_file(),
            Action::AddDirectory => self.start_add_directory(),
            Action::StartBackup => self.start_backup(),
            Action::ShowList => self.show_list(),
            Action::RemoveEntries => self.start_remove(),
            Action::MoveUp => self.move_selection(-1),
            Action::MoveDown => self.move_selection(1),
            Action::Activate => self.activate_selected(),
            Action::ScrollLogUp => {
                let height = self.log_page();
                self.log.scroll_up(height, height);
            }
            Action::ScrollLogDown => {
                let height = self.log_page();
                self.log.scroll_down(height, height);
            }
            Action::ScrollLogEnd => self.log.scroll_to_end(),
            Action::CancelBackup => self.cancel_backup(),
            Action::ShowHelp => self.show_help(),
            Action::ToggleTheme => self.toggle_theme(),
            Action::Quit => self.quit(),
        }
    }

    fn log_page(&self) -> usize {
        self.layout.log_viewport_height().max(1)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
