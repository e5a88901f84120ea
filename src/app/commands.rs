//! 다섯 가지 백업 액션

use super::*;
use crate::models::{PickerMode, PickerState};
use crate::system::BackupRequest;
use crate::utils::error::{BackupError, Result};
use std::collections::HashSet;
use std::path::Path;

impl App {
    /// 파일 추가 (F2)
    pub fn start_add_file(&mut self) {
        let start = self.workspace.root.clone();
        self.open_picker(PickerMode::File, start);
    }

    /// 디렉토리 추가 (F3)
    pub fn start_add_directory(&mut self) {
        let start = self.workspace.root.clone();
        self.open_picker(PickerMode::Directory, start);
    }

    /// 백업 시작 (F5): 대상 디렉토리 선택부터
    pub fn start_backup(&mut self) {
        if self.is_backup_running() {
            self.log.warning("A backup is already running");
            return;
        }
        if !self.path_list.exists() {
            self.log.warning(LIST_MISSING_MESSAGE);
            return;
        }

        let start = self
            .settings
            .last_destination
            .clone()
            .filter(|dir| dir.is_dir())
            .unwrap_or_else(|| self.workspace.root.clone());
        self.open_picker(PickerMode::Destination, start);
    }

    /// 목록 보기 (F6): 한 개의 INFO 로그로 출력
    pub fn show_list(&mut self) {
        let Some(entries) = self.read_list() else {
            return;
        };

        let mut message = String::from("Current paths in backup list:\n");
        for entry in &entries {
            message.push_str(entry);
            message.push('\n');
        }
        self.log.info(message.trim_end());
    }

    /// 목록에서 제거 (F8): 체크리스트 다이얼로그
    pub fn start_remove(&mut self) {
        if self.is_backup_running() {
            self.log
                .warning("Cannot edit the backup list while a backup is running");
            return;
        }
        let Some(entries) = self.read_list() else {
            return;
        };
        if entries.is_empty() {
            self.log.info("Backup list is empty");
            return;
        }
        self.dialog = Some(DialogKind::remove_checklist(entries));
    }

    /// 체크된 위치의 항목 삭제. 체크가 없으면 목록을 건드리지 않는다.
    pub(super) fn remove_entries(&mut self, indices: Vec<usize>) {
        if indices.is_empty() {
            return;
        }
        let indices: HashSet<usize> = indices.into_iter().collect();
        match self.path_list.remove_indices(&indices) {
            Ok(removed) => {
                tracing::info!(count = removed.len(), "removed backup entries");
                self.log.info(format!(
                    "Removed {} from backup list",
                    crate::utils::formatter::pluralize(removed.len(), "path", "paths")
                ));
            }
            Err(e) => self.report_list_error(e),
        }
    }

    /// 목록에 경로 추가
    pub(super) fn add_entry(&mut self, path: &Path) {
        let entry = path.display().to_string();
        match self.path_list.append(&entry) {
            Ok(true) => {
                tracing::info!(list = %self.path_list.path().display(), entry = %entry, "appended entry");
                self.log
                    .info(format!("Path successfully added to backup list: {}", entry));
            }
            Ok(false) => {}
            Err(e) => self.report_list_error(e),
        }
    }

    /// 선택한 대상 디렉토리로 백업 실행
    pub(super) fn backup_to(&mut self, destination: PathBuf) {
        let Some(entries) = self.read_list() else {
            return;
        };

        self.settings.last_destination = Some(destination.clone());
        let request = BackupRequest {
            entries,
            destination,
            staging_dir: self.workspace.staging_dir.clone(),
            base_dir: self.workspace.root.clone(),
        };
        self.spawn_backup(request);
    }

    /// 목록 읽기. 실패하면 경고를 남기고 None
    fn read_list(&mut self) -> Option<Vec<String>> {
        match self.path_list.read_all() {
            Ok(entries) => Some(entries),
            Err(e) => {
                self.report_list_error(e);
                None
            }
        }
    }

    fn report_list_error(&mut self, error: BackupError) {
        match error {
            BackupError::ListMissing { .. } => self.log.warning(LIST_MISSING_MESSAGE),
            other => {
                tracing::warn!(error = %other, "backup list operation failed");
                self.log.warning(other.to_string());
            }
        }
    }

    /// 피커 다이얼로그 열기. 시작 위치를 읽을 수 없으면 작업 공간 루트에서 연다.
    pub(super) fn open_picker(&mut self, mode: PickerMode, start: PathBuf) {
        let show_hidden = self.settings.show_hidden;
        let picker = match self.load_picker(mode, start, show_hidden) {
            Ok(picker) => picker,
            Err(first) => {
                tracing::debug!(error = %first, "picker start directory unreadable");
                match self.load_picker(mode, self.workspace.root.clone(), show_hidden) {
                    Ok(picker) => picker,
                    Err(e) => {
                        self.log.warning(format!("Cannot open browser: {}", e));
                        return;
                    }
                }
            }
        };
        self.dialog = Some(DialogKind::picker(picker));
    }

    fn load_picker(&self, mode: PickerMode, start: PathBuf, show_hidden: bool) -> Result<PickerState> {
        let mut picker = PickerState::new(mode, start, show_hidden);
        picker.refresh(&self.filesystem)?;
        Ok(picker)
    }

    /// 피커에서 경로가 선택됨
    pub(super) fn finish_picker(&mut self, mode: PickerMode, path: PathBuf) {
        self.close_dialog();
        match mode {
            PickerMode::File | PickerMode::Directory => self.add_entry(&path),
            PickerMode::Destination => self.backup_to(path),
        }
    }
}
