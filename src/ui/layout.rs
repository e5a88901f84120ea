// Layout system - 반응형 레이아웃 시스템
//
// 터미널 크기에 따른 레이아웃 모드:
// - 60+ cols: 액션 목록 | 로그 (좌우 배치)
// - 40-59 cols: 액션 목록 위, 로그 아래 (상하 배치)
// - <40 cols 또는 <12 rows: 경고 메시지 표시

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// 최소 터미널 크기 상수
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 12;
pub const SIDE_BY_SIDE_MIN_WIDTH: u16 = 60;

/// 액션 목록 패널 너비 (좌우 배치)
const ACTION_LIST_WIDTH: u16 = 24;
/// 액션 목록 패널 높이 (상하 배치, 테두리 포함)
const ACTION_LIST_HEIGHT: u16 = 7;

/// 레이아웃 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// 좌우 배치 (60+ cols)
    SideBySide,
    /// 상하 배치 (40-59 cols)
    Stacked,
    /// 경고 모드 (터미널이 너무 작음)
    TooSmall,
}

/// 레이아웃 영역
#[derive(Debug, Clone, Default)]
pub struct LayoutAreas {
    /// 상단 타이틀바
    pub title_bar: Rect,
    /// 액션 목록 패널
    pub action_list: Rect,
    /// 출력 로그 패널
    pub log_panel: Rect,
    /// 상태바
    pub status_bar: Rect,
    /// 하단 커맨드 바
    pub command_bar: Rect,
    /// 경고 메시지 영역 (TooSmall 모드에서 사용)
    pub warning: Rect,
}

/// 레이아웃 매니저
#[derive(Debug)]
pub struct LayoutManager {
    mode: LayoutMode,
    terminal_size: (u16, u16),
    areas: LayoutAreas,
}

impl Default for LayoutManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutManager {
    pub fn new() -> Self {
        Self {
            mode: LayoutMode::SideBySide,
            terminal_size: (80, 24),
            areas: LayoutAreas::default(),
        }
    }

    /// 터미널 크기에 따라 레이아웃 모드 결정
    fn determine_mode(width: u16, height: u16) -> LayoutMode {
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            LayoutMode::TooSmall
        } else if width < SIDE_BY_SIDE_MIN_WIDTH {
            LayoutMode::Stacked
        } else {
            LayoutMode::SideBySide
        }
    }

    /// 터미널 크기 업데이트 및 레이아웃 재계산
    pub fn update(&mut self, area: Rect) {
        self.terminal_size = (area.width, area.height);
        self.mode = Self::determine_mode(area.width, area.height);
        self.areas = self.calculate_areas(area);
    }

    fn calculate_areas(&self, area: Rect) -> LayoutAreas {
        if self.mode == LayoutMode::TooSmall {
            return LayoutAreas {
                warning: area,
                ..Default::default()
            };
        }

        // 메인 수직 레이아웃: 타이틀바 | 본문 | 상태바 | 커맨드바
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let body = if self.mode == LayoutMode::SideBySide {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(ACTION_LIST_WIDTH), Constraint::Min(10)])
                .split(vertical[1])
        } else {
            Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(ACTION_LIST_HEIGHT), Constraint::Min(3)])
                .split(vertical[1])
        };

        LayoutAreas {
            title_bar: vertical[0],
            action_list: body[0],
            log_panel: body[1],
            status_bar: vertical[2],
            command_bar: vertical[3],
            warning: Rect::default(),
        }
    }

    /// 현재 레이아웃 모드 반환
    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// 레이아웃 영역 반환
    pub fn areas(&self) -> &LayoutAreas {
        &self.areas
    }

    /// 터미널 크기 반환
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// 로그 패널 내부 높이 (테두리 제외)
    pub fn log_viewport_height(&self) -> usize {
        usize::from(self.areas.log_panel.height.saturating_sub(2))
    }
}
