#![warn(missing_docs)]

//! Live, diff-aware directory listings for Rust.

pub use dirview_core as core;
pub use dirview_services as services;

/// A "prelude" for users of dirview.
///
/// Importing this module brings into scope the most common types
/// needed to list and watch a directory.
///
/// ```rust
/// use dirview::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::model::{ItemModel, ModelData};
    pub use crate::core::observer::{ListEvent, ListObserver, LoggingObserver, NullObserver};
    pub use crate::services::filesystem::{
        read_directory, ChangeWatcher, DirectoryModel, FileEntry, FileRole, FileSystemChange,
        FileSystemError, FileSystemWatcher, ListingErrorKind, ListingOptions,
    };
    pub use crate::services::settings::{ConfigSource, SettingsRegistry};
}
