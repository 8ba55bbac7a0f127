// SPDX-License-Identifier: LGPL-3.0-only
//! Live directory listings.
//!
//! A [DirectoryModel] reads a directory through the [reader], keeps it in
//! sync through a [ChangeWatcher] and applies later reads with [reconcile]
//! so observers see positional edits instead of full resets.

pub mod entry;
pub mod error;
pub mod format;
pub mod icon;
pub mod model;
pub mod path;
pub mod reader;
pub mod reconcile;
pub mod watcher;

// Re-export public API
pub use entry::{EntryKey, FileEntry, FileMetadata, FileType};
pub use error::{FileSystemError, ListingErrorKind};
pub use model::{DirectoryModel, FileRole};
pub use reader::{read_directory, ListingOptions};
pub use reconcile::{reconcile, Operation};
pub use watcher::{ChangeWatcher, FileSystemChange, FileSystemWatcher};
