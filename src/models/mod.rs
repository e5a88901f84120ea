// Data Models
pub mod activity_log;
pub mod file_entry;
pub mod path_list;
pub mod picker_state;

pub use activity_log::{ActivityLog, LogLevel, LogLine};
pub use path_list::PathListStore;
pub use picker_state::{PickerChoice, PickerMode, PickerState};
