// UI Components
pub mod action_list;
pub mod command_bar;
pub mod dialog;
pub mod log_panel;
pub mod status_bar;
pub mod warning;

// Re-export components for convenience
pub use action_list::ActionList;
pub use command_bar::CommandBar;
pub use dialog::{picker_list_height, Dialog, DialogKind};
pub use log_panel::LogPanel;
pub use status_bar::StatusBar;
pub use warning::WarningScreen;
