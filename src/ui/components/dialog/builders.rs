use super::DialogKind;
use crate::models::PickerState;

impl DialogKind {
    /// 피커 다이얼로그 (목록은 호출 측에서 refresh한 상태)
    pub fn picker(state: PickerState) -> Self {
        DialogKind::Picker(state)
    }

    /// 피커의 현재 디렉토리를 초기값으로 하는 경로 입력 다이얼로그
    pub fn path_input(picker: PickerState) -> Self {
        let mut value = picker.current_path.display().to_string();
        if !value.ends_with(std::path::MAIN_SEPARATOR) {
            value.push(std::path::MAIN_SEPARATOR);
        }
        let cursor_pos = value.len();
        DialogKind::PathInput {
            picker,
            value,
            cursor_pos,
            completion_candidates: Vec::new(),
            completion_index: None,
        }
    }

    /// 제거 체크리스트 (처음에는 아무것도 체크되지 않음)
    pub fn remove_checklist(items: Vec<String>) -> Self {
        let checked = vec![false; items.len()];
        DialogKind::RemoveChecklist {
            items,
            checked,
            selected_index: 0,
            scroll_offset: 0,
        }
    }

    pub fn help() -> Self {
        DialogKind::Help { scroll_offset: 0 }
    }
}
