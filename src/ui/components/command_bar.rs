// Command bar component - 하단 커맨드 바 컴포넌트
//
// 액션 레지스트리에서 생성된 F키 단축키 표시

use crate::core::actions::generate_command_bar_items;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// 커맨드 항목
#[derive(Debug, Clone)]
pub struct CommandItem {
    /// 단축키 (F1, F2, ...)
    pub key: String,
    /// 레이블 (Help, Backup, ...)
    pub label: String,
    /// 활성화 여부
    pub enabled: bool,
}

impl CommandItem {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            enabled: true,
        }
    }
}

/// 커맨드 바 컴포넌트
pub struct CommandBar {
    commands: Vec<CommandItem>,
    bg_color: Color,
    key_fg_color: Color,
    label_fg_color: Color,
    disabled_color: Color,
}

impl Default for CommandBar {
    fn default() -> Self {
        Self {
            commands: generate_command_bar_items(),
            bg_color: Color::Rgb(30, 30, 30),
            key_fg_color: Color::Rgb(0, 120, 212),
            label_fg_color: Color::Rgb(212, 212, 212),
            disabled_color: Color::Rgb(100, 100, 100),
        }
    }
}

impl CommandBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// 백업 실행 중에는 목록을 바꾸거나 새 백업을 시작하는 키를 흐리게 표시
    pub fn busy(mut self, busy: bool) -> Self {
        for cmd in &mut self.commands {
            cmd.enabled = !(busy && matches!(cmd.key.as_str(), "F5" | "F8"));
        }
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.command_bar_bg;
        self.key_fg_color = theme.command_key_fg;
        self.label_fg_color = theme.command_bar_fg;
        self.disabled_color = theme.fg_dimmed;
        self
    }
}

impl Widget for CommandBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let mut spans = vec![Span::raw(" ")];
        for (i, cmd) in self.commands.iter().enumerate() {
            let (key_style, label_style) = if cmd.enabled {
                (
                    Style::default()
                        .fg(self.key_fg_color)
                        .add_modifier(Modifier::BOLD),
                    Style::default().fg(self.label_fg_color),
                )
            } else {
                (
                    Style::default().fg(self.disabled_color),
                    Style::default().fg(self.disabled_color),
                )
            };

            spans.push(Span::styled(cmd.key.clone(), key_style));
            spans.push(Span::styled(":", label_style));
            spans.push(Span::styled(cmd.label.clone(), label_style));

            if i + 1 < self.commands.len() {
                spans.push(Span::raw(" "));
            }
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_text;

    #[test]
    fn test_command_item_creation() {
        let item = CommandItem::new("F1", "Help");
        assert_eq!(item.key, "F1");
        assert_eq!(item.label, "Help");
        assert!(item.enabled);
    }

    #[test]
    fn test_command_bar_renders_registry_items() {
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        CommandBar::new().render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.starts_with(" F1:Help F2:File F3:Dir F5:Backup"));
        assert!(text.contains("F10:Quit"));
    }

    #[test]
    fn test_busy_disables_backup_and_remove() {
        let bar = CommandBar::new().busy(true);
        let disabled: Vec<&str> = bar
            .commands
            .iter()
            .filter(|c| !c.enabled)
            .map(|c| c.key.as_str())
            .collect();
        assert_eq!(disabled, vec!["F5", "F8"]);
    }
}
