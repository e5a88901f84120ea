use super::text_edit::{path_completions, TextBufferEdit};
use super::*;
use crate::core::actions::generate_help_entries;
use crate::models::{PickerChoice, PickerMode};
use crate::ui::components::picker_list_height;
use ratatui::layout::Rect;
use std::path::Path;

impl App {
    // === 피커 다이얼로그 ===

    fn picker_page_height(&self) -> usize {
        let (width, height) = self.layout.terminal_size();
        picker_list_height(Rect::new(0, 0, width, height)).max(1)
    }

    fn with_picker(&mut self, f: impl FnOnce(&mut crate::models::PickerState, &FileSystem)) {
        let page = self.picker_page_height();
        if let Some(DialogKind::Picker(picker)) = &mut self.dialog {
            f(picker, &self.filesystem);
            picker.adjust_scroll(page);
        }
    }

    pub fn picker_move(&mut self, delta: isize) {
        self.with_picker(|picker, _| picker.move_selection(delta));
    }

    pub fn picker_page(&mut self, pages: isize) {
        let page = self.picker_page_height() as isize;
        self.picker_move(pages * page);
    }

    pub fn picker_top(&mut self) {
        self.with_picker(|picker, _| picker.move_to_top());
    }

    pub fn picker_bottom(&mut self) {
        self.with_picker(|picker, _| picker.move_to_bottom());
    }

    /// 상위 디렉토리 (Backspace)
    pub fn picker_go_parent(&mut self) {
        let mut failure = None;
        self.with_picker(|picker, fs| {
            if let Err(e) = picker.go_parent(fs) {
                failure = Some(e);
            }
        });
        if let Some(e) = failure {
            self.log.warning(e.to_string());
        }
    }

    /// 숨김 파일 표시 전환 (설정에 저장)
    pub fn picker_toggle_hidden(&mut self) {
        let mut shown = None;
        self.with_picker(|picker, fs| {
            if picker.toggle_hidden(fs).is_ok() {
                shown = Some(picker.show_hidden);
            }
        });
        if let Some(show_hidden) = shown {
            self.settings.show_hidden = show_hidden;
        }
    }

    /// Enter: 디렉토리 진입 또는 선택 확정
    pub fn picker_activate(&mut self) {
        let mut outcome = None;
        self.with_picker(|picker, fs| {
            outcome = Some((picker.mode, picker.activate(fs)));
        });

        match outcome {
            Some((mode, Ok(PickerChoice::Chosen(path)))) => self.finish_picker(mode, path),
            Some((_, Ok(PickerChoice::Entered | PickerChoice::Nothing))) | None => {}
            Some((_, Err(e))) => self.log.warning(e.to_string()),
        }
    }

    /// 경로 직접 입력으로 전환 ('/')
    pub fn picker_open_input(&mut self) {
        if let Some(DialogKind::Picker(picker)) = self.dialog.take() {
            self.dialog = Some(DialogKind::path_input(picker));
        }
    }

    // === 경로 입력 다이얼로그 ===

    fn edit_path_input(&mut self, f: impl FnOnce(&mut String, &mut usize)) {
        if let Some(DialogKind::PathInput {
            value,
            cursor_pos,
            completion_candidates,
            completion_index,
            ..
        }) = &mut self.dialog
        {
            f(value, cursor_pos);
            completion_candidates.clear();
            *completion_index = None;
        }
    }

    pub fn path_input_char(&mut self, c: char) {
        self.edit_path_input(|value, cursor| TextBufferEdit::insert_char(value, cursor, c));
    }

    pub fn path_input_backspace(&mut self) {
        self.edit_path_input(TextBufferEdit::backspace);
    }

    pub fn path_input_delete(&mut self) {
        self.edit_path_input(TextBufferEdit::delete);
    }

    pub fn path_input_delete_component(&mut self) {
        self.edit_path_input(TextBufferEdit::delete_prev_component);
    }

    pub fn path_input_left(&mut self) {
        self.edit_path_input(|value, cursor| TextBufferEdit::left(value, cursor));
    }

    pub fn path_input_right(&mut self) {
        self.edit_path_input(|value, cursor| TextBufferEdit::right(value, cursor));
    }

    pub fn path_input_home(&mut self) {
        self.edit_path_input(|_, cursor| TextBufferEdit::home(cursor));
    }

    pub fn path_input_end(&mut self) {
        self.edit_path_input(|value, cursor| TextBufferEdit::end(value, cursor));
    }

    /// Tab / Shift+Tab: 완성 후보 순환 + 즉시 적용
    ///
    /// 후보는 첫 Tab에서 계산되고 편집하면 초기화된다.
    pub fn path_input_cycle_completion(&mut self, forward: bool) {
        let Some(DialogKind::PathInput {
            picker,
            value,
            cursor_pos,
            completion_candidates,
            completion_index,
        }) = &mut self.dialog
        else {
            return;
        };

        if completion_candidates.is_empty() {
            *completion_candidates =
                path_completions(value, &picker.current_path, picker.mode.selects_directory());
            *completion_index = None;
        }
        let count = completion_candidates.len();
        if count == 0 {
            return;
        }

        let next = match (*completion_index, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        };
        *completion_index = Some(next);
        *value = completion_candidates[next].clone();
        *cursor_pos = value.len();
    }

    /// Esc: 피커로 복귀
    pub fn path_input_back(&mut self) {
        if let Some(DialogKind::PathInput { picker, .. }) = self.dialog.take() {
            self.dialog = Some(DialogKind::Picker(picker));
        }
    }

    /// Enter: 입력한 경로 확정
    ///
    /// 상대 경로는 피커의 현재 디렉토리 기준. 모드에 맞지 않는 경로면 경고하고
    /// 다이얼로그를 유지한다.
    pub fn path_input_confirm(&mut self) {
        let Some(DialogKind::PathInput { picker, value, .. }) = &self.dialog else {
            return;
        };
        let mode = picker.mode;
        let typed = value.trim();
        if typed.is_empty() {
            return;
        }
        let path = if Path::new(typed).is_absolute() {
            PathBuf::from(typed)
        } else {
            picker.current_path.join(typed)
        };

        let problem = if !path.exists() {
            Some(format!("{} does not exist", path.display()))
        } else if mode.selects_directory() && !path.is_dir() {
            Some(format!("{} is not a directory", path.display()))
        } else if mode == PickerMode::File && path.is_dir() {
            Some(format!("{} is a directory", path.display()))
        } else {
            None
        };

        match problem {
            Some(message) => self.log.warning(message),
            None => self.finish_picker(mode, path),
        }
    }

    // === 제거 체크리스트 ===

    pub fn checklist_move(&mut self, delta: isize) {
        let page = self.picker_page_height();
        if let Some(DialogKind::RemoveChecklist {
            items,
            selected_index,
            scroll_offset,
            ..
        }) = &mut self.dialog
        {
            if items.is_empty() {
                return;
            }
            let max = items.len() as isize - 1;
            *selected_index = (*selected_index as isize + delta).clamp(0, max) as usize;
            if *selected_index < *scroll_offset {
                *scroll_offset = *selected_index;
            } else if *selected_index >= *scroll_offset + page {
                *scroll_offset = *selected_index + 1 - page;
            }
        }
    }

    /// Space: 현재 항목 체크 전환
    pub fn checklist_toggle(&mut self) {
        if let Some(DialogKind::RemoveChecklist {
            checked,
            selected_index,
            ..
        }) = &mut self.dialog
        {
            if let Some(on) = checked.get_mut(*selected_index) {
                *on = !*on;
            }
        }
        self.checklist_move(1);
    }

    /// 'a': 전체 체크/해제
    pub fn checklist_toggle_all(&mut self) {
        if let Some(DialogKind::RemoveChecklist { checked, .. }) = &mut self.dialog {
            let all_on = checked.iter().all(|on| *on);
            checked.iter_mut().for_each(|on| *on = !all_on);
        }
    }

    /// Enter: 체크된 항목 제거
    pub fn checklist_confirm(&mut self) {
        let Some(dialog) = self.dialog.take() else {
            return;
        };
        self.remove_entries(dialog.checked_indices());
    }

    // === 도움말 ===

    pub fn help_scroll(&mut self, delta: isize) {
        // 카테고리 제목과 구분 빈 줄 포함 행 수
        let rows: usize = generate_help_entries()
            .iter()
            .map(|(_, items)| items.len() + 2)
            .sum();
        if let Some(DialogKind::Help { scroll_offset }) = &mut self.dialog {
            *scroll_offset = if delta < 0 {
                scroll_offset.saturating_sub(delta.unsigned_abs())
            } else {
                scroll_offset.saturating_add(delta as usize).min(rows)
            };
        }
    }
}
