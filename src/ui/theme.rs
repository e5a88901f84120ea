use ratatui::style::Color;

/// 색상 테마
///
/// 이름이 붙은 미리 정의된 테마만 지원한다. 현재 테마 이름은 설정 파일에 저장된다.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,

    // 배경/전경
    pub bg_primary: Color,
    pub fg_primary: Color,
    pub fg_dimmed: Color,

    // 패널 테두리
    pub border_active: Color,
    pub border_inactive: Color,

    // 목록
    pub selected_fg: Color,
    pub selected_bg: Color,
    pub directory: Color,
    pub symlink: Color,

    // 바
    pub title_bar_bg: Color,
    pub title_bar_fg: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub command_bar_bg: Color,
    pub command_bar_fg: Color,
    pub command_key_fg: Color,

    // 강조
    pub accent: Color,
    pub info: Color,
    pub warning: Color,
    pub error: Color,
}

/// "#rrggbb" 문자열을 Color로 변환 (형식이 틀리면 Reset)
pub fn parse_hex_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return Color::Reset;
    }
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
    };
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::Reset,
    }
}

impl Theme {
    /// Dark 테마 (기본)
    pub fn dark() -> Self {
        Theme {
            name: "dark",
            bg_primary: parse_hex_color("#1e1e1e"),
            fg_primary: parse_hex_color("#d4d4d4"),
            fg_dimmed: parse_hex_color("#808080"),

            border_active: parse_hex_color("#0078d4"),
            border_inactive: parse_hex_color("#3c3c3c"),

            selected_fg: parse_hex_color("#ffffff"),
            selected_bg: parse_hex_color("#0078d4"),
            directory: parse_hex_color("#569cd6"),
            symlink: parse_hex_color("#ce9178"),

            title_bar_bg: parse_hex_color("#2d2d30"),
            title_bar_fg: parse_hex_color("#ffffff"),
            status_bar_bg: parse_hex_color("#007acc"),
            status_bar_fg: parse_hex_color("#ffffff"),
            command_bar_bg: parse_hex_color("#2d2d30"),
            command_bar_fg: parse_hex_color("#cccccc"),
            command_key_fg: parse_hex_color("#4fc1ff"),

            accent: parse_hex_color("#0078d4"),
            info: parse_hex_color("#4ec9b0"),
            warning: parse_hex_color("#ffa500"),
            error: parse_hex_color("#f44747"),
        }
    }

    /// Light 테마
    pub fn light() -> Self {
        Theme {
            name: "light",
            bg_primary: parse_hex_color("#ffffff"),
            fg_primary: parse_hex_color("#1e1e1e"),
            fg_dimmed: parse_hex_color("#6e6e6e"),

            border_active: parse_hex_color("#0078d4"),
            border_inactive: parse_hex_color("#cccccc"),

            selected_fg: parse_hex_color("#000000"),
            selected_bg: parse_hex_color("#add6ff"),
            directory: parse_hex_color("#0066cc"),
            symlink: parse_hex_color("#a65e2b"),

            title_bar_bg: parse_hex_color("#0078d4"),
            title_bar_fg: parse_hex_color("#ffffff"),
            status_bar_bg: parse_hex_color("#0078d4"),
            status_bar_fg: parse_hex_color("#ffffff"),
            command_bar_bg: parse_hex_color("#f3f3f3"),
            command_bar_fg: parse_hex_color("#1e1e1e"),
            command_key_fg: parse_hex_color("#0066cc"),

            accent: parse_hex_color("#0078d4"),
            info: parse_hex_color("#107c10"),
            warning: parse_hex_color("#ff8c00"),
            error: parse_hex_color("#e51400"),
        }
    }
}

/// 테마 관리자
///
/// 현재 활성 테마를 관리하고 런타임에 테마를 전환합니다.
pub struct ThemeManager {
    current: usize,
    available: Vec<Theme>,
}

impl ThemeManager {
    /// 기본 테마 관리자 생성 (Dark 테마)
    pub fn new() -> Self {
        Self {
            current: 0,
            available: vec![Theme::dark(), Theme::light()],
        }
    }

    /// 이름으로 초기화. 모르는 이름이면 기본 테마.
    pub fn with_name(name: &str) -> Self {
        let mut manager = Self::new();
        if manager.switch_theme(name).is_err() {
            tracing::warn!(theme = name, "unknown theme, using default");
        }
        manager
    }

    /// 현재 테마 반환
    pub fn current(&self) -> &Theme {
        &self.available[self.current]
    }

    pub fn current_name(&self) -> &'static str {
        self.current().name
    }

    /// 테마 전환 (이름으로)
    pub fn switch_theme(&mut self, name: &str) -> Result<(), String> {
        match self.available.iter().position(|t| t.name == name) {
            Some(index) => {
                self.current = index;
                Ok(())
            }
            None => Err(format!("Theme not found: {}", name)),
        }
    }

    /// 다음 테마로 순환
    pub fn cycle_theme(&mut self) {
        self.current = (self.current + 1) % self.available.len();
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_creation() {
        let theme = Theme::dark();
        assert_eq!(theme.bg_primary, Color::Rgb(30, 30, 30));
    }

    #[test]
    fn test_light_theme_creation() {
        let theme = Theme::light();
        assert_eq!(theme.bg_primary, Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_hex_color_parsing() {
        assert_eq!(parse_hex_color("#1e1e1e"), Color::Rgb(30, 30, 30));
        assert_eq!(parse_hex_color("#zzzzzz"), Color::Reset);
        assert_eq!(parse_hex_color("#fff"), Color::Reset);
    }

    #[test]
    fn test_theme_switching() {
        let mut manager = ThemeManager::new();
        assert!(manager.switch_theme("light").is_ok());
        assert_eq!(manager.current_name(), "light");
        assert!(manager.switch_theme("solarized").is_err());
        assert_eq!(manager.current_name(), "light");
    }

    #[test]
    fn test_theme_cycling_wraps() {
        let mut manager = ThemeManager::with_name("light");
        manager.cycle_theme();
        assert_eq!(manager.current_name(), "dark");
        manager.cycle_theme();
        assert_eq!(manager.current_name(), "light");
    }

    #[test]
    fn test_unknown_name_falls_back_to_dark() {
        let manager = ThemeManager::with_name("neon");
        assert_eq!(manager.current_name(), "dark");
    }
}
