// Log panel component - 출력 로그 패널
//
// INFO/WARNING 레벨별 색상, 여러 줄 메시지는 여러 행으로 표시

use crate::models::{ActivityLog, LogLevel};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// 로그 패널 컴포넌트
pub struct LogPanel<'a> {
    log: &'a ActivityLog,
    bg_color: Color,
    fg_color: Color,
    border_color: Color,
    info_color: Color,
    warning_color: Color,
    muted_color: Color,
}

impl<'a> LogPanel<'a> {
    pub fn new(log: &'a ActivityLog) -> Self {
        Self {
            log,
            bg_color: Color::Rgb(30, 30, 30),
            fg_color: Color::Rgb(212, 212, 212),
            border_color: Color::Rgb(60, 60, 60),
            info_color: Color::Rgb(78, 201, 176),
            warning_color: Color::Rgb(255, 165, 0),
            muted_color: Color::Rgb(128, 128, 128),
        }
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.bg_primary;
        self.fg_color = theme.fg_primary;
        self.border_color = theme.border_inactive;
        self.info_color = theme.info;
        self.warning_color = theme.warning;
        self.muted_color = theme.fg_dimmed;
        self
    }

    /// 화면 행 단위로 펼친 로그
    ///
    /// 메시지 첫 행에만 레벨 라벨을 붙이고 이어지는 행은 들여쓴다.
    fn rows(&self) -> Vec<Line<'a>> {
        let mut rows = Vec::with_capacity(self.log.row_count());
        for line in self.log.lines() {
            let level_color = match line.level {
                LogLevel::Info => self.info_color,
                LogLevel::Warning => self.warning_color,
            };
            let label = line.level.label();
            let indent = " ".repeat(label.len() + 1);

            let mut parts = line.message.lines();
            let first = parts.next().unwrap_or("");
            rows.push(Line::from(vec![
                Span::styled(
                    label,
                    Style::default()
                        .fg(level_color)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(first.to_string(), Style::default().fg(self.fg_color)),
            ]));
            for part in parts {
                rows.push(Line::from(vec![
                    Span::raw(indent.clone()),
                    Span::styled(part.to_string(), Style::default().fg(self.fg_color)),
                ]));
            }
        }
        rows
    }
}

impl Widget for LogPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title_right = if self.log.is_following() {
            " follow ".to_string()
        } else {
            " scrolled (End: follow) ".to_string()
        };

        let block = Block::default()
            .title(" Output ")
            .title(
                Line::from(Span::styled(
                    title_right,
                    Style::default().fg(self.muted_color),
                ))
                .right_aligned(),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border_color))
            .style(Style::default().bg(self.bg_color));
        let inner = block.inner(area);
        block.render(area, buf);

        let height = usize::from(inner.height);
        let top = self.log.top_row(height);
        let visible: Vec<Line> = self.rows().into_iter().skip(top).take(height).collect();

        Paragraph::new(visible).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_text;

    fn render(log: &ActivityLog, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        LogPanel::new(log).render(area, &mut buf);
        buffer_text(&buf)
    }

    #[test]
    fn test_log_panel_shows_level_and_message() {
        let mut log = ActivityLog::new();
        log.info("Backup TUI v0.1.0");
        log.warning("/missing does not exist");

        let text = render(&log, 60, 6);
        assert!(text.contains("INFO Backup TUI v0.1.0"));
        assert!(text.contains("WARNING /missing does not exist"));
        assert!(text.contains("follow"));
    }

    #[test]
    fn test_multiline_message_is_indented() {
        let mut log = ActivityLog::new();
        log.info("Current paths in backup list:\n/a\n/b");

        let text = render(&log, 60, 6);
        assert!(text.contains("INFO Current paths in backup list:"));
        assert!(text.contains("     /a"));
        assert!(text.contains("     /b"));
    }

    #[test]
    fn test_follow_shows_tail() {
        let mut log = ActivityLog::new();
        for i in 0..20 {
            log.info(format!("line {:02}", i));
        }

        // 내부 높이 3
        let text = render(&log, 40, 5);
        assert!(text.contains("line 19"));
        assert!(text.contains("line 17"));
        assert!(!text.contains("line 16"));

        log.scroll_up(10, 3);
        let text = render(&log, 40, 5);
        assert!(text.contains("line 07"));
        assert!(!text.contains("line 19"));
        assert!(text.contains("End: follow"));
    }
}
