// src/filesystem/error.rs
//!
//! Error taxonomy for the filesystem access service.
//!
//! Errors never cross the service boundary as anything but a value of this
//! type; the UI receives the `Display` string as its human-readable message.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum FsError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Not a directory: {path}")]
    NotADirectory { path: String },

    #[error("Not a file: {path}")]
    NotAFile { path: String },

    #[error("Already exists: {path}")]
    AlreadyExists { path: String },

    #[error("Partially deleted '{path}': {reason}")]
    PartialDelete { path: String, reason: String },

    #[error("Invalid path: {reason}")]
    InvalidPath { reason: String },

    #[error("I/O error: {reason}")]
    IoError { reason: String },
}

impl FsError {
    /// Map an `std::io::Error` for an operation on `path` into the taxonomy.
    pub fn from_io(path: &str, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound {
                path: path.to_string(),
            },
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied {
                path: path.to_string(),
            },
            std::io::ErrorKind::AlreadyExists => FsError::AlreadyExists {
                path: path.to_string(),
            },
            _ => FsError::IoError {
                reason: format!("{}: {}", path, err),
            },
        }
    }
}

impl serde::Serialize for FsError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
