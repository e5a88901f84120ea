// UI Layer
pub mod components;
pub mod layout;
pub mod renderer;
pub mod theme;

// Re-export layout types for convenience
pub use layout::{LayoutManager, LayoutMode};
pub use theme::{Theme, ThemeManager};

// Re-export components
pub use components::{
    ActionList, CommandBar, Dialog, DialogKind, LogPanel, StatusBar, WarningScreen,
};

/// 렌더링된 버퍼를 줄 단위 텍스트로 변환 (테스트용)
#[cfg(test)]
pub(crate) fn buffer_text(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area;
    let mut rendered = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell((x, y)) {
                rendered.push_str(cell.symbol());
            }
        }
        rendered.push('\n');
    }
    rendered
}
