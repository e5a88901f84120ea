// Status bar component - 상태바 컴포넌트
//
// 백업 목록 항목 수, 작업 공간 경로, 실행 중인 백업 진행 상황 표시

use crate::ui::Theme;
use crate::utils::formatter::{pluralize, truncate_left};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// 상태바 컴포넌트
pub struct StatusBar<'a> {
    /// 목록 항목 수 (목록 파일이 없으면 None)
    entry_count: Option<usize>,
    /// 작업 공간 경로
    workspace: &'a str,
    /// 진행 상황 (백업 실행 중일 때)
    progress: Option<&'a str>,
    bg_color: Color,
    fg_color: Color,
    progress_color: Color,
}

impl<'a> Default for StatusBar<'a> {
    fn default() -> Self {
        Self {
            entry_count: None,
            workspace: "",
            progress: None,
            bg_color: Color::Rgb(30, 30, 30),
            fg_color: Color::Rgb(212, 212, 212),
            progress_color: Color::Yellow,
        }
    }
}

impl<'a> StatusBar<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry_count(mut self, count: Option<usize>) -> Self {
        self.entry_count = count;
        self
    }

    pub fn workspace(mut self, workspace: &'a str) -> Self {
        self.workspace = workspace;
        self
    }

    pub fn progress(mut self, progress: Option<&'a str>) -> Self {
        self.progress = progress;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.status_bar_bg;
        self.fg_color = theme.status_bar_fg;
        self.progress_color = theme.warning;
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let count_info = match self.entry_count {
            Some(count) => format!(" {}", pluralize(count, "entry", "entries")),
            None => " no backup list".to_string(),
        };
        let right_info = match self.progress {
            Some(progress) => format!("[{}] ", progress),
            None => "[Idle] ".to_string(),
        };

        // 남는 공간에 작업 공간 경로 (앞부분 생략)
        let fixed = count_info.width() + right_info.width() + 3;
        let room = usize::from(area.width).saturating_sub(fixed);
        let workspace = if room > 0 {
            format!(" | {}", truncate_left(self.workspace, room))
        } else {
            String::new()
        };

        let used = count_info.width() + workspace.width() + right_info.width();
        let padding = " ".repeat(usize::from(area.width).saturating_sub(used));

        let right_color = if self.progress.is_some() {
            self.progress_color
        } else {
            self.fg_color
        };

        let spans = vec![
            Span::styled(count_info, Style::default().fg(self.fg_color)),
            Span::styled(workspace, Style::default().fg(self.fg_color)),
            Span::raw(padding),
            Span::styled(right_info, Style::default().fg(right_color)),
        ];

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
