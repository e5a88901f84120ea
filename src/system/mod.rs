// System Layer
pub mod archive;
pub mod backup;
pub mod filesystem;

pub use backup::{run_backup, BackupEvent, BackupOutcome, BackupRequest};
pub use filesystem::FileSystem;
