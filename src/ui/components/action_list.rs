// Action list component - 액션 목록 패널
//
// 백업 액션 5개를 레지스트리 순서대로 표시하고 선택 행을 강조

use crate::core::actions::backup_actions;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Widget},
};
use unicode_width::UnicodeWidthStr;

/// 액션 목록 컴포넌트
pub struct ActionList {
    /// 선택된 액션 위치
    selected_index: usize,
    /// 포커스 여부 (다이얼로그가 열려 있으면 false)
    focused: bool,
    active_border_color: Color,
    inactive_border_color: Color,
    bg_color: Color,
    fg_color: Color,
    shortcut_color: Color,
    selected_fg: Color,
    selected_bg: Color,
}

impl Default for ActionList {
    fn default() -> Self {
        Self {
            selected_index: 0,
            focused: true,
            active_border_color: Color::Rgb(0, 120, 212),
            inactive_border_color: Color::Rgb(60, 60, 60),
            bg_color: Color::Rgb(30, 30, 30),
            fg_color: Color::Rgb(212, 212, 212),
            shortcut_color: Color::Rgb(128, 128, 128),
            selected_fg: Color::White,
            selected_bg: Color::Rgb(0, 120, 212),
        }
    }
}

impl ActionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.active_border_color = theme.border_active;
        self.inactive_border_color = theme.border_inactive;
        self.bg_color = theme.bg_primary;
        self.fg_color = theme.fg_primary;
        self.shortcut_color = theme.fg_dimmed;
        self.selected_fg = theme.selected_fg;
        self.selected_bg = theme.selected_bg;
        self
    }
}

impl Widget for ActionList {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_color = if self.focused {
            self.active_border_color
        } else {
            self.inactive_border_color
        };

        let block = Block::default()
            .title(" Actions ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(self.bg_color));
        let inner = block.inner(area);
        block.render(area, buf);

        let width = usize::from(inner.width);
        for (row, def) in backup_actions()
            .iter()
            .take(usize::from(inner.height))
            .enumerate()
        {
            let y = inner.y + row as u16;
            let is_selected = row == self.selected_index;

            let (label_style, key_style) = if is_selected {
                let style = Style::default()
                    .fg(self.selected_fg)
                    .bg(self.selected_bg)
                    .add_modifier(if self.focused {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    });
                (style, style)
            } else {
                (
                    Style::default().fg(self.fg_color).bg(self.bg_color),
                    Style::default().fg(self.shortcut_color).bg(self.bg_color),
                )
            };

            if is_selected {
                buf.set_style(Rect::new(inner.x, y, inner.width, 1), label_style);
            }

            let label = format!(" {}", def.label);
            buf.set_stringn(inner.x, y, &label, width, label_style);

            // 단축키 (F키만, 공간이 남을 때)
            let key = def
                .command_bar
                .as_ref()
                .map(|cb| cb.key)
                .unwrap_or_default();
            let key_width = key.width();
            if !key.is_empty() && label.width() + key_width + 2 <= width {
                let key_x = inner.x + (width - key_width - 1) as u16;
                buf.set_string(key_x, y, key, key_style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_text;

    #[test]
    fn test_action_list_renders_all_backup_actions() {
        let area = Rect::new(0, 0, 24, 7);
        let mut buf = Buffer::empty(area);
        ActionList::new().selected(2).render(area, &mut buf);

        let text = buffer_text(&buf);
        for label in [
            "Add File",
            "Add Directory",
            "Start Backup",
            "Show Backup List",
            "Remove",
        ] {
            assert!(text.contains(label), "missing {}", label);
        }
        assert!(text.contains("F5"));
    }

    #[test]
    fn test_selected_row_is_highlighted() {
        let theme = Theme::dark();
        let area = Rect::new(0, 0, 24, 7);
        let mut buf = Buffer::empty(area);
        ActionList::new()
            .selected(1)
            .theme(&theme)
            .render(area, &mut buf);

        // 테두리 안쪽 두 번째 행
        assert_eq!(buf.cell((2, 2)).map(|c| c.bg), Some(theme.selected_bg));
        assert_eq!(buf.cell((2, 1)).map(|c| c.bg), Some(theme.bg_primary));
    }
}
