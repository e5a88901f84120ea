use super::DialogKind;
use crate::core::actions::generate_help_entries;
use crate::models::PickerState;
use crate::ui::Theme;
use crate::utils::formatter::{format_file_size, truncate_left};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Widget},
};
use unicode_width::UnicodeWidthStr;

/// 다이얼로그 내부 좌우 패딩 (border 안쪽 여백)
const DIALOG_H_PADDING: u16 = 2;
/// 목록 외 고정 행 수: 테두리 2 + 경로 1 + 힌트 1
const PICKER_CHROME_ROWS: u16 = 4;

const PICKER_HINT: &str = "Enter:open  Bksp:up  .:hidden  /:path  Esc:cancel";
const INPUT_HINT: &str = "Enter:choose  Tab:complete  Esc:back to browser";
const CHECKLIST_HINT: &str = "Space:toggle  a:all  Enter:remove  Esc:cancel";
const HELP_HINT: &str = "Up/Down:scroll  Esc:close";

/// 피커/체크리스트 다이얼로그 크기 (화면 중앙)
fn list_dialog_area(screen: Rect) -> Rect {
    let width = ((f32::from(screen.width) * 0.7) as u16)
        .clamp(40, 90)
        .min(screen.width.saturating_sub(4));
    let height = screen
        .height
        .saturating_sub(4)
        .max(PICKER_CHROME_ROWS + 3)
        .min(screen.height);
    centered(screen, width, height)
}

fn centered(screen: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: screen.x + screen.width.saturating_sub(width) / 2,
        y: screen.y + screen.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

/// 화면 크기에 대한 피커 목록 표시 행 수 (스크롤 계산용)
pub fn picker_list_height(screen: Rect) -> usize {
    usize::from(
        list_dialog_area(screen)
            .height
            .saturating_sub(PICKER_CHROME_ROWS),
    )
}

/// 선택 행이 보이도록 하는 스크롤 위치
fn visible_offset(selected: usize, offset: usize, height: usize) -> usize {
    if height == 0 {
        return 0;
    }
    if selected < offset {
        selected
    } else if selected >= offset + height {
        selected + 1 - height
    } else {
        offset
    }
}

pub struct Dialog<'a> {
    kind: &'a DialogKind,
    bg_color: Color,
    fg_color: Color,
    muted_color: Color,
    border_color: Color,
    title_color: Color,
    selected_bg: Color,
    selected_fg: Color,
    directory_color: Color,
    symlink_color: Color,
    input_bg: Color,
    warning_color: Color,
}

impl<'a> Dialog<'a> {
    pub fn new(kind: &'a DialogKind) -> Self {
        Self {
            kind,
            bg_color: Color::Rgb(45, 45, 48),
            fg_color: Color::Rgb(212, 212, 212),
            muted_color: Color::Rgb(128, 128, 128),
            border_color: Color::Rgb(0, 120, 212),
            title_color: Color::Rgb(0, 120, 212),
            selected_bg: Color::Rgb(0, 120, 212),
            selected_fg: Color::White,
            directory_color: Color::Rgb(86, 156, 214),
            symlink_color: Color::Rgb(206, 145, 120),
            input_bg: Color::Rgb(30, 30, 30),
            warning_color: Color::Rgb(255, 165, 0),
        }
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.title_bar_bg;
        self.fg_color = theme.fg_primary;
        self.muted_color = theme.fg_dimmed;
        self.border_color = theme.border_active;
        self.title_color = theme.accent;
        self.selected_bg = theme.selected_bg;
        self.selected_fg = theme.selected_fg;
        self.directory_color = theme.directory;
        self.symlink_color = theme.symlink;
        self.input_bg = theme.bg_primary;
        self.warning_color = theme.warning;
        self
    }

    fn frame(&self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(self.kind.title())
            .title_style(
                Style::default()
                    .fg(self.title_color)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border_color))
            .style(Style::default().bg(self.bg_color))
            .render(area, buf);
    }

    fn inner_width(area: Rect) -> u16 {
        area.width.saturating_sub(DIALOG_H_PADDING * 2)
    }

    fn render_hint(&self, buf: &mut Buffer, area: Rect, hint: &str) {
        let y = area.y + area.height.saturating_sub(2);
        let width = Self::inner_width(area);
        buf.set_stringn(
            area.x + DIALOG_H_PADDING,
            y,
            hint,
            usize::from(width),
            Style::default().fg(self.muted_color),
        );
    }

    fn render_row(&self, buf: &mut Buffer, x: u16, y: u16, width: u16, text: &str, style: Style) {
        let line = format!(" {}", text);
        buf.set_stringn(x, y, &line, usize::from(width), style);
        let used = line.width().min(usize::from(width)) as u16;
        // 선택 행은 끝까지 배경 채움
        for i in used..width {
            if let Some(cell) = buf.cell_mut((x + i, y)) {
                cell.set_symbol(" ");
                cell.set_style(style);
            }
        }
    }

    fn render_picker(&self, buf: &mut Buffer, area: Rect, picker: &PickerState) {
        let x = area.x + DIALOG_H_PADDING;
        let width = Self::inner_width(area);

        let location = truncate_left(
            &picker.current_path.display().to_string(),
            usize::from(width),
        );
        buf.set_string(
            x,
            area.y + 1,
            location,
            Style::default()
                .fg(self.fg_color)
                .add_modifier(Modifier::BOLD),
        );

        let height = usize::from(area.height.saturating_sub(PICKER_CHROME_ROWS));
        let offset = visible_offset(picker.selected_index, picker.scroll_offset, height);

        for (row, index) in (offset..picker.row_count()).take(height).enumerate() {
            let Some(label) = picker.row_label(index) else {
                continue;
            };
            let entry = index
                .checked_sub(picker.virtual_rows())
                .and_then(|i| picker.entries.get(i));

            let fg = match entry {
                Some(e) if e.is_symlink() => self.symlink_color,
                Some(e) if e.is_directory() => self.directory_color,
                Some(_) => self.fg_color,
                None => self.muted_color,
            };
            let style = if index == picker.selected_index {
                Style::default().fg(self.selected_fg).bg(self.selected_bg)
            } else {
                Style::default().fg(fg).bg(self.bg_color)
            };
            let y = area.y + 2 + row as u16;
            self.render_row(buf, x, y, width, &label, style);

            // 파일 크기 (오른쪽 정렬)
            if let Some(e) = entry.filter(|e| !e.is_directory()) {
                let size = format_file_size(e.size);
                let size_width = size.width() as u16;
                if label.width() as u16 + size_width + 3 < width {
                    buf.set_string(x + width - size_width - 1, y, size, style);
                }
            }
        }

        if picker.row_count() == 0 {
            buf.set_string(
                x,
                area.y + 2,
                " (empty)",
                Style::default().fg(self.muted_color),
            );
        }

        self.render_hint(buf, area, PICKER_HINT);
    }

    fn render_path_input(
        &self,
        buf: &mut Buffer,
        area: Rect,
        value: &str,
        cursor_pos: usize,
        candidates: &[String],
        completion_index: Option<usize>,
    ) {
        let x = area.x + DIALOG_H_PADDING;
        let width = Self::inner_width(area);

        buf.set_string(x, area.y + 1, "Path:", Style::default().fg(self.fg_color));

        // 입력 필드 (커서가 보이도록 앞부분 생략)
        let field_y = area.y + 2;
        let input_style = Style::default().fg(self.fg_color).bg(self.input_bg);
        for i in 0..width {
            if let Some(cell) = buf.cell_mut((x + i, field_y)) {
                cell.set_symbol(" ");
                cell.set_style(input_style);
            }
        }
        let before_cursor = value.get(..cursor_pos).unwrap_or(value);
        let room = usize::from(width.saturating_sub(1));
        let shown_before = truncate_left(before_cursor, room);
        buf.set_stringn(x, field_y, &shown_before, room, input_style);
        let cursor_x = x + shown_before.width().min(room) as u16;
        let after_cursor = value.get(cursor_pos..).unwrap_or("");
        let cursor_char = after_cursor.chars().next().map_or(" ".to_string(), String::from);
        buf.set_string(
            cursor_x,
            field_y,
            &cursor_char,
            Style::default().fg(self.input_bg).bg(self.fg_color),
        );
        let rest_room = usize::from((x + width).saturating_sub(cursor_x + 1));
        if rest_room > 0 {
            let rest: String = after_cursor.chars().skip(1).collect();
            buf.set_stringn(cursor_x + 1, field_y, rest, rest_room, input_style);
        }

        // 완성 후보
        let list_height = usize::from(area.height.saturating_sub(6));
        let selected = completion_index.unwrap_or(0);
        let offset = visible_offset(selected, 0, list_height);
        for (row, (index, candidate)) in candidates
            .iter()
            .enumerate()
            .skip(offset)
            .take(list_height)
            .enumerate()
        {
            let style = if completion_index == Some(index) {
                Style::default().fg(self.selected_fg).bg(self.selected_bg)
            } else {
                Style::default().fg(self.muted_color).bg(self.bg_color)
            };
            let shown = truncate_left(candidate, usize::from(width.saturating_sub(1)));
            self.render_row(buf, x, area.y + 4 + row as u16, width, &shown, style);
        }

        self.render_hint(buf, area, INPUT_HINT);
    }

    fn render_checklist(
        &self,
        buf: &mut Buffer,
        area: Rect,
        items: &[String],
        checked: &[bool],
        selected_index: usize,
        scroll_offset: usize,
    ) {
        let x = area.x + DIALOG_H_PADDING;
        let width = Self::inner_width(area);

        let count = checked.iter().filter(|on| **on).count();
        buf.set_string(
            x,
            area.y + 1,
            format!("{} of {} selected", count, items.len()),
            Style::default().fg(self.warning_color),
        );

        let height = usize::from(area.height.saturating_sub(PICKER_CHROME_ROWS));
        let offset = visible_offset(selected_index, scroll_offset, height);

        for (row, (index, item)) in items.iter().enumerate().skip(offset).take(height).enumerate()
        {
            let mark = if checked.get(index).copied().unwrap_or(false) {
                "[x]"
            } else {
                "[ ]"
            };
            let path_room = usize::from(width).saturating_sub(6);
            let text = format!("{} {}", mark, truncate_left(item, path_room));
            let style = if index == selected_index {
                Style::default().fg(self.selected_fg).bg(self.selected_bg)
            } else {
                Style::default().fg(self.fg_color).bg(self.bg_color)
            };
            self.render_row(buf, x, area.y + 2 + row as u16, width, &text, style);
        }

        self.render_hint(buf, area, CHECKLIST_HINT);
    }

    fn render_help(&self, buf: &mut Buffer, area: Rect, scroll_offset: usize) {
        let x = area.x + DIALOG_H_PADDING;
        let width = usize::from(Self::inner_width(area));

        let header_style = Style::default()
            .fg(self.title_color)
            .add_modifier(Modifier::BOLD);
        let key_style = Style::default().fg(self.title_color);
        let desc_style = Style::default().fg(self.fg_color);

        // (is_header, col1, col2)
        let mut rows: Vec<(bool, &str, &str)> = Vec::new();
        for (category, items) in generate_help_entries() {
            if !rows.is_empty() {
                rows.push((false, "", ""));
            }
            rows.push((true, category, ""));
            for (key, desc) in items {
                rows.push((false, key, desc));
            }
        }

        let height = usize::from(area.height.saturating_sub(3));
        let offset = scroll_offset.min(rows.len().saturating_sub(height));
        let key_width = 16;

        for (row, (is_header, col1, col2)) in rows.iter().skip(offset).take(height).enumerate() {
            let y = area.y + 1 + row as u16;
            if *is_header {
                buf.set_stringn(x, y, col1, width, header_style);
            } else if !col1.is_empty() {
                buf.set_stringn(x + 2, y, col1, key_width, key_style);
                let desc_x = x + 2 + key_width as u16;
                let room = width.saturating_sub(key_width + 2);
                buf.set_stringn(desc_x, y, col2, room, desc_style);
            }
        }

        self.render_hint(buf, area, HELP_HINT);
    }
}

impl Widget for Dialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog_area = match self.kind {
            DialogKind::PathInput { .. } => {
                let width = ((f32::from(area.width) * 0.7) as u16)
                    .clamp(40, 90)
                    .min(area.width.saturating_sub(4));
                centered(area, width, 12u16.min(area.height))
            }
            DialogKind::Help { .. } => {
                let width = 60u16.min(area.width.saturating_sub(4)).max(36.min(area.width));
                centered(area, width, area.height.saturating_sub(4).max(10).min(area.height))
            }
            _ => list_dialog_area(area),
        };

        // 배경 클리어
        Clear.render(dialog_area, buf);
        self.frame(dialog_area, buf);

        match self.kind {
            DialogKind::Picker(picker) => self.render_picker(buf, dialog_area, picker),
            DialogKind::PathInput {
                value,
                cursor_pos,
                completion_candidates,
                completion_index,
                ..
            } => self.render_path_input(
                buf,
                dialog_area,
                value,
                *cursor_pos,
                completion_candidates,
                *completion_index,
            ),
            DialogKind::RemoveChecklist {
                items,
                checked,
                selected_index,
                scroll_offset,
            } => self.render_checklist(
                buf,
                dialog_area,
                items,
                checked,
                *selected_index,
                *scroll_offset,
            ),
            DialogKind::Help { scroll_offset } => {
                self.render_help(buf, dialog_area, *scroll_offset)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PickerMode;
    use crate::system::FileSystem;
    use crate::ui::buffer_text;
    use std::fs;
    use tempfile::TempDir;

    fn render(kind: &DialogKind, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        Dialog::new(kind).render(area, &mut buf);
        buffer_text(&buf)
    }

    #[test]
    fn test_visible_offset() {
        assert_eq!(visible_offset(0, 0, 5), 0);
        assert_eq!(visible_offset(7, 0, 5), 3);
        assert_eq!(visible_offset(2, 4, 5), 2);
        assert_eq!(visible_offset(5, 3, 5), 3);
        assert_eq!(visible_offset(5, 3, 0), 0);
    }

    #[test]
    fn test_picker_renders_rows_and_hint() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("docs")).unwrap();
        fs::write(temp.path().join("notes.txt"), b"n").unwrap();

        let mut picker =
            PickerState::new(PickerMode::Directory, temp.path().to_path_buf(), false);
        picker.refresh(&FileSystem::new()).unwrap();

        let text = render(&DialogKind::picker(picker), 80, 24);
        assert!(text.contains("Add Directory"));
        assert!(text.contains(". (select this directory)"));
        assert!(text.contains("docs/"));
        assert!(text.contains("notes.txt"));
        assert!(text.contains("1 B"));
        assert!(text.contains("Esc:cancel"));
    }

    #[test]
    fn test_checklist_marks_checked_items() {
        let mut kind = DialogKind::remove_checklist(vec!["/srv/a".into(), "/srv/b".into()]);
        if let DialogKind::RemoveChecklist { checked, .. } = &mut kind {
            checked[1] = true;
        }

        let text = render(&kind, 80, 20);
        assert!(text.contains("1 of 2 selected"));
        assert!(text.contains("[ ] /srv/a"));
        assert!(text.contains("[x] /srv/b"));
    }

    #[test]
    fn test_path_input_shows_value_and_candidates() {
        let picker = PickerState::new(PickerMode::File, "/srv".into(), false);
        let kind = DialogKind::PathInput {
            picker,
            value: "/srv/da".into(),
            cursor_pos: 7,
            completion_candidates: vec!["/srv/data/".into(), "/srv/dab".into()],
            completion_index: Some(0),
        };

        let text = render(&kind, 80, 24);
        assert!(text.contains("Path:"));
        assert!(text.contains("/srv/da"));
        assert!(text.contains("/srv/data/"));
        assert!(text.contains("/srv/dab"));
    }

    #[test]
    fn test_help_lists_registry_entries() {
        let text = render(&DialogKind::help(), 80, 40);
        assert!(text.contains("Keyboard Shortcuts"));
        assert!(text.contains("Backup"));
        assert!(text.contains("F5 / b"));
        assert!(text.contains("Start Backup"));
    }

    #[test]
    fn test_picker_list_height_matches_dialog() {
        assert_eq!(picker_list_height(Rect::new(0, 0, 80, 24)), 16);
    }
}
