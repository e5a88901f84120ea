use crate::models::PickerState;

/// 다이얼로그 종류
#[derive(Debug, Clone)]
pub enum DialogKind {
    /// 파일/디렉토리 피커
    Picker(PickerState),
    /// 경로 직접 입력 (Esc로 피커 복귀)
    PathInput {
        picker: PickerState,
        value: String,
        cursor_pos: usize,
        completion_candidates: Vec<String>,
        completion_index: Option<usize>,
    },
    /// 백업 목록 제거 체크리스트
    RemoveChecklist {
        items: Vec<String>,
        checked: Vec<bool>,
        selected_index: usize,
        scroll_offset: usize,
    },
    /// 단축키 도움말
    Help { scroll_offset: usize },
}

impl DialogKind {
    /// 다이얼로그 제목
    pub fn title(&self) -> &'static str {
        match self {
            DialogKind::Picker(picker) => picker.mode.title(),
            DialogKind::PathInput { .. } => " Enter Path ",
            DialogKind::RemoveChecklist { .. } => " Remove from Backup List ",
            DialogKind::Help { .. } => " Keyboard Shortcuts ",
        }
    }

    /// 체크된 항목 위치
    pub fn checked_indices(&self) -> Vec<usize> {
        match self {
            DialogKind::RemoveChecklist { checked, .. } => checked
                .iter()
                .enumerate()
                .filter_map(|(i, on)| on.then_some(i))
                .collect(),
            _ => Vec::new(),
        }
    }
}
