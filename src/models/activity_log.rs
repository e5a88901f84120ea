/// 로그 레벨
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
}

impl LogLevel {
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
        }
    }
}

/// 로그 한 줄 (타임스탬프 없음)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: LogLevel,
    pub message: String,
}

impl LogLine {
    /// `LEVEL message` 형식의 텍스트.
    /// 여러 줄 메시지는 그대로 유지된다.
    pub fn render(&self) -> String {
        format!("{} {}", self.level.label(), self.message)
    }
}

/// 출력 로그 (append-only)
///
/// `follow`가 켜져 있으면 화면은 항상 마지막 줄을 보여준다.
/// 사용자가 위로 스크롤하면 꺼지고, 끝까지 내려오면 다시 켜진다.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    lines: Vec<LogLine>,
    /// 화면 맨 위에 보이는 행 (follow가 꺼졌을 때만 의미 있음)
    scroll: usize,
    follow: bool,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            scroll: 0,
            follow: true,
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Info, message.into());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Warning, message.into());
    }

    fn push(&mut self, level: LogLevel, message: String) {
        match level {
            LogLevel::Info => tracing::info!(target: "activity", "{}", message),
            LogLevel::Warning => tracing::warn!(target: "activity", "{}", message),
        }
        self.lines.push(LogLine { level, message });
    }

    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    pub fn last(&self) -> Option<&LogLine> {
        self.lines.last()
    }

    pub fn is_following(&self) -> bool {
        self.follow
    }

    /// 화면에 표시되는 행 수 기준 총 행 수
    pub fn row_count(&self) -> usize {
        self.lines
            .iter()
            .map(|line| line.message.lines().count().max(1))
            .sum()
    }

    /// 주어진 높이에서 맨 위에 보일 행 계산
    pub fn top_row(&self, viewport_height: usize) -> usize {
        let max_top = self.row_count().saturating_sub(viewport_height);
        if self.follow {
            max_top
        } else {
            self.scroll.min(max_top)
        }
    }

    pub fn scroll_up(&mut self, rows: usize, viewport_height: usize) {
        let top = self.top_row(viewport_height);
        self.scroll = top.saturating_sub(rows);
        self.follow = false;
    }

    pub fn scroll_down(&mut self, rows: usize, viewport_height: usize) {
        let max_top = self.row_count().saturating_sub(viewport_height);
        let top = self.top_row(viewport_height).saturating_add(rows);
        if top >= max_top {
            self.scroll_to_end();
        } else {
            self.scroll = top;
        }
    }

    pub fn scroll_to_end(&mut self) {
        self.follow = true;
        self.scroll = 0;
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_level_prefix() {
        let mut log = ActivityLog::new();
        log.info("Backup TUI v0.1.0");
        log.warning("/missing does not exist");

        let rendered: Vec<String> = log.lines().iter().map(LogLine::render).collect();
        assert_eq!(
            rendered,
            vec!["INFO Backup TUI v0.1.0", "WARNING /missing does not exist"]
        );
    }

    #[test]
    fn test_row_count_counts_multiline_messages() {
        let mut log = ActivityLog::new();
        log.info("Current paths in backup list:\n/a\n/b");
        log.info("single");
        assert_eq!(log.row_count(), 4);
    }

    #[test]
    fn test_follow_tracks_tail() {
        let mut log = ActivityLog::new();
        for i in 0..10 {
            log.info(format!("line {}", i));
        }
        assert_eq!(log.top_row(4), 6);
        log.info("line 10");
        assert_eq!(log.top_row(4), 7);
    }

    #[test]
    fn test_scroll_up_disables_follow_and_scroll_down_restores_it() {
        let mut log = ActivityLog::new();
        for i in 0..10 {
            log.info(format!("line {}", i));
        }

        log.scroll_up(3, 4);
        assert!(!log.is_following());
        assert_eq!(log.top_row(4), 3);

        // 새 줄이 추가되어도 위치 유지
        log.info("line 10");
        assert_eq!(log.top_row(4), 3);

        log.scroll_down(100, 4);
        assert!(log.is_following());
        assert_eq!(log.top_row(4), 7);
    }

    #[test]
    fn test_short_log_never_scrolls() {
        let mut log = ActivityLog::new();
        log.info("one");
        log.scroll_up(5, 10);
        assert_eq!(log.top_row(10), 0);
    }
}
