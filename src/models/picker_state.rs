use crate::models::file_entry::FileEntry;
use crate::system::filesystem::FileSystem;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// 피커가 고르는 대상
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerMode {
    /// 백업 목록에 추가할 파일
    File,
    /// 백업 목록에 추가할 디렉토리
    Directory,
    /// 아카이브를 쓸 대상 디렉토리
    Destination,
}

impl PickerMode {
    pub fn title(&self) -> &'static str {
        match self {
            PickerMode::File => " Add File ",
            PickerMode::Directory => " Add Directory ",
            PickerMode::Destination => " Backup Destination ",
        }
    }

    /// 디렉토리를 선택 결과로 받는 모드인지
    pub fn selects_directory(&self) -> bool {
        matches!(self, PickerMode::Directory | PickerMode::Destination)
    }
}

/// 피커 선택 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerChoice {
    /// 디렉토리로 이동함 (아직 선택 아님)
    Entered,
    /// 경로 선택 완료
    Chosen(PathBuf),
    /// 선택할 수 없는 항목
    Nothing,
}

/// 파일/디렉토리 피커 상태
///
/// 목록 맨 위의 ".." 행은 `entries`에 포함되지 않고 가상 행으로 취급한다.
/// 디렉토리 선택 모드에서는 "." 행(현재 디렉토리 선택)이 추가로 붙는다.
#[derive(Debug, Clone)]
pub struct PickerState {
    pub mode: PickerMode,
    /// 현재 경로
    pub current_path: PathBuf,
    /// 디렉토리 우선, 이름순 정렬된 항목
    pub entries: Vec<FileEntry>,
    /// 선택된 행 (가상 행 포함)
    pub selected_index: usize,
    /// 스크롤 오프셋
    pub scroll_offset: usize,
    /// 숨김 파일 표시 여부
    pub show_hidden: bool,
}

impl PickerState {
    pub fn new(mode: PickerMode, path: PathBuf, show_hidden: bool) -> Self {
        Self {
            mode,
            current_path: path,
            entries: Vec::new(),
            selected_index: 0,
            scroll_offset: 0,
            show_hidden,
        }
    }

    /// 목록 위에 붙는 가상 행 수
    pub fn virtual_rows(&self) -> usize {
        let parent = usize::from(self.current_path.parent().is_some());
        let current = usize::from(self.mode.selects_directory());
        parent + current
    }

    pub fn has_parent_row(&self) -> bool {
        self.current_path.parent().is_some()
    }

    pub fn row_count(&self) -> usize {
        self.virtual_rows() + self.entries.len()
    }

    /// 현재 경로의 목록을 다시 읽는다.
    pub fn refresh(&mut self, filesystem: &FileSystem) -> Result<()> {
        let mut entries = filesystem.read_directory(&self.current_path)?;

        if !self.show_hidden {
            entries.retain(|entry| !entry.is_hidden);
        }

        entries.sort_by(|a, b| {
            b.is_directory()
                .cmp(&a.is_directory())
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });

        self.entries = entries;

        let rows = self.row_count();
        if self.selected_index >= rows {
            self.selected_index = rows.saturating_sub(1);
        }

        Ok(())
    }

    /// 경로 변경
    pub fn change_directory(&mut self, path: PathBuf, filesystem: &FileSystem) -> Result<()> {
        let previous = std::mem::replace(&mut self.current_path, path);
        self.selected_index = 0;
        self.scroll_offset = 0;
        if let Err(e) = self.refresh(filesystem) {
            self.current_path = previous;
            self.refresh(filesystem)?;
            return Err(e);
        }
        Ok(())
    }

    /// 상위 디렉토리로 이동. 떠나온 디렉토리를 선택 상태로 둔다.
    pub fn go_parent(&mut self, filesystem: &FileSystem) -> Result<()> {
        let Some(parent) = self.current_path.parent().map(Path::to_path_buf) else {
            return Ok(());
        };
        let came_from = self.current_path.clone();
        self.change_directory(parent, filesystem)?;

        if let Some(pos) = self.entries.iter().position(|e| e.path == came_from) {
            self.selected_index = self.virtual_rows() + pos;
        }
        Ok(())
    }

    pub fn toggle_hidden(&mut self, filesystem: &FileSystem) -> Result<()> {
        self.show_hidden = !self.show_hidden;
        self.refresh(filesystem)
    }

    pub fn move_selection(&mut self, delta: isize) {
        let rows = self.row_count();
        if rows == 0 {
            return;
        }
        let max = rows - 1;
        self.selected_index = if delta < 0 {
            self.selected_index.saturating_sub(delta.unsigned_abs())
        } else {
            (self.selected_index + delta as usize).min(max)
        };
    }

    pub fn move_to_top(&mut self) {
        self.selected_index = 0;
    }

    pub fn move_to_bottom(&mut self) {
        self.selected_index = self.row_count().saturating_sub(1);
    }

    /// 선택 행이 보이도록 스크롤 조정
    pub fn adjust_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected_index + 1 - visible_height;
        }
    }

    /// 선택된 실제 항목 (가상 행이면 None)
    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.selected_index
            .checked_sub(self.virtual_rows())
            .and_then(|i| self.entries.get(i))
    }

    fn is_parent_row(&self, index: usize) -> bool {
        self.has_parent_row() && index == 0
    }

    fn is_current_row(&self, index: usize) -> bool {
        self.mode.selects_directory() && index == usize::from(self.has_parent_row())
    }

    /// 선택된 행 표시 이름
    pub fn row_label(&self, index: usize) -> Option<String> {
        if self.is_parent_row(index) {
            return Some("..".to_string());
        }
        if self.is_current_row(index) {
            return Some(". (select this directory)".to_string());
        }
        let entry = self.entries.get(index.checked_sub(self.virtual_rows())?)?;
        if entry.is_directory() {
            Some(format!("{}/", entry.name))
        } else {
            Some(entry.name.clone())
        }
    }

    /// Enter: 디렉토리는 진입, 선택 가능한 항목은 선택
    ///
    /// 디렉토리 모드에서 디렉토리를 선택하려면 진입 후 "." 행을 고른다.
    pub fn activate(&mut self, filesystem: &FileSystem) -> Result<PickerChoice> {
        let index = self.selected_index;
        if self.is_parent_row(index) {
            self.go_parent(filesystem)?;
            return Ok(PickerChoice::Entered);
        }
        if self.is_current_row(index) {
            return Ok(PickerChoice::Chosen(self.current_path.clone()));
        }

        let Some(entry) = self.selected_entry().cloned() else {
            return Ok(PickerChoice::Nothing);
        };

        if entry.is_directory() {
            self.change_directory(entry.path, filesystem)?;
            Ok(PickerChoice::Entered)
        } else if self.mode == PickerMode::File {
            Ok(PickerChoice::Chosen(entry.path))
        } else {
            Ok(PickerChoice::Nothing)
        }
    }
}
