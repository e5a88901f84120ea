use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackupError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Backup list does not exist: {path}")]
    ListMissing { path: PathBuf },

    #[error("Path not found: {path}")]
    PathNotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Staging directory already exists: {path}")]
    StagingBusy { path: PathBuf },

    #[error("Invalid destination {path}: {reason}")]
    DestinationInvalid { path: PathBuf, reason: String },

    #[error("Failed to copy {src} to {dest}: {reason}")]
    CopyFailed {
        src: PathBuf,
        dest: PathBuf,
        reason: String,
    },

    #[error("Failed to delete {path}: {reason}")]
    DeleteFailed { path: PathBuf, reason: String },

    #[error("Failed to create archive {path}: {reason}")]
    ArchiveCreateFailed { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, BackupError>;
