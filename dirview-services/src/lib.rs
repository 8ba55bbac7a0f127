// SPDX-License-Identifier: LGPL-3.0-only
pub mod filesystem;
pub mod settings;

// Re-export commonly used types
pub use filesystem::{DirectoryModel, FileEntry, FileRole, FileSystemError, FileSystemWatcher, ListingErrorKind};
pub use settings::{ConfigSource, SettingsRegistry};
