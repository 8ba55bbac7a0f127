// SPDX-License-Identifier: LGPL-3.0-only
//! Error types for the filesystem module.

use std::path::PathBuf;

/// Coarse classification of a failed directory read, as shown to consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingErrorKind {
    /// The directory does not exist (or is not a directory).
    NotFound,
    /// The directory exists but may not be read.
    PermissionDenied,
    /// Any other failure while enumerating.
    Other,
}

/// Errors that can occur in the filesystem model.
#[derive(Debug, thiserror::Error)]
pub enum FileSystemError {
    /// Directory not found.
    #[error("Directory does not exist")]
    DirectoryNotFound(PathBuf),

    /// The directory is not readable by this process.
    #[error("No permission to read the directory")]
    PermissionDenied(PathBuf),

    /// I/O error from std::fs operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the file watcher (notify crate).
    #[error("File watcher error: {0}")]
    Notify(#[from] notify::Error),
}

impl FileSystemError {
    /// Classify this error for display.
    pub fn kind(&self) -> ListingErrorKind {
        match self {
            FileSystemError::DirectoryNotFound(_) => ListingErrorKind::NotFound,
            FileSystemError::PermissionDenied(_) => ListingErrorKind::PermissionDenied,
            FileSystemError::Io(e) => match e.kind() {
                std::io::ErrorKind::NotFound => ListingErrorKind::NotFound,
                std::io::ErrorKind::PermissionDenied => ListingErrorKind::PermissionDenied,
                _ => ListingErrorKind::Other,
            },
            FileSystemError::Notify(_) => ListingErrorKind::Other,
        }
    }
}
