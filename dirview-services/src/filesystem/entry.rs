// SPDX-License-Identifier: LGPL-3.0-only
//! File entry and metadata types.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Type of filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link. Takes precedence over the type of the link target.
    Symlink,
    /// Other type (e.g., device, socket, etc.).
    Other,
}

/// Metadata about a filesystem entry, captured when the entry was read.
///
/// For symbolic links that resolve, size and timestamps describe the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    /// Size of the file in bytes.
    pub size: u64,
    /// Last modification time.
    pub modified: SystemTime,
    /// Creation time (if available).
    pub created: Option<SystemTime>,
    /// File permissions (Unix-style).
    pub permissions: u32,
    /// Whether the file is hidden (starts with '.').
    pub is_hidden: bool,
}

/// A filesystem entry (file or directory).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Full path to the entry.
    pub path: PathBuf,
    /// Name of the entry (file or directory name).
    pub name: String,
    /// Type of the entry.
    pub file_type: FileType,
    /// Metadata about the entry.
    pub metadata: FileMetadata,
    /// Where the link points, for symbolic links.
    pub symlink_target: Option<PathBuf>,
    /// Whether this is a symbolic link resolving to a directory.
    pub symlink_to_dir: bool,
}

/// The subset of an entry that decides whether two reads saw the same thing.
///
/// Two entries with equal keys are treated as unchanged between reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryKey<'a> {
    /// The on-disk file name, which may not be valid UTF-8.
    pub name: &'a OsStr,
    pub size: u64,
    pub permissions: u32,
    pub modified: SystemTime,
    pub is_symlink: bool,
    pub is_dir: bool,
}

impl FileEntry {
    /// Create a new file entry.
    pub fn new(path: PathBuf, name: String, file_type: FileType, metadata: FileMetadata) -> Self {
        Self {
            path,
            name,
            file_type,
            metadata,
            symlink_target: None,
            symlink_to_dir: false,
        }
    }

    /// Read an entry from disk without following a final symbolic link.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let link_meta = fs::symlink_metadata(path)?;
        let is_symlink = link_meta.file_type().is_symlink();

        // Dangling links keep their own metadata.
        let target_meta = if is_symlink { fs::metadata(path).ok() } else { None };
        let meta = target_meta.as_ref().unwrap_or(&link_meta);

        let file_type = if is_symlink {
            FileType::Symlink
        } else if meta.is_dir() {
            FileType::Directory
        } else if meta.is_file() {
            FileType::File
        } else {
            FileType::Other
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let metadata = FileMetadata {
            size: meta.len(),
            modified: meta.modified().unwrap_or(UNIX_EPOCH),
            created: meta.created().ok(),
            permissions: meta.permissions().mode() & 0o7777,
            is_hidden: name.starts_with('.'),
        };

        Ok(Self {
            path: path.to_path_buf(),
            name,
            file_type,
            metadata,
            symlink_target: if is_symlink { fs::read_link(path).ok() } else { None },
            symlink_to_dir: target_meta.as_ref().is_some_and(|m| m.is_dir()),
        })
    }

    /// Check if this entry is a file.
    pub fn is_file(&self) -> bool {
        self.file_type == FileType::File
    }

    /// Check if this entry is a directory, following symbolic links.
    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory || self.symlink_to_dir
    }

    /// Check if this entry is a symbolic link.
    pub fn is_symlink(&self) -> bool {
        self.file_type == FileType::Symlink
    }

    pub fn is_symlink_to_dir(&self) -> bool {
        self.symlink_to_dir
    }

    pub fn is_hidden(&self) -> bool {
        self.metadata.is_hidden
    }

    /// Get the file extension (if any).
    pub fn extension(&self) -> Option<&str> {
        self.path.extension()?.to_str()
    }

    /// Get the parent directory path.
    pub fn parent_path(&self) -> Option<&Path> {
        self.path.parent()
    }

    /// The raw file name. Unlike [name](Self::name) it is never lossily converted.
    pub fn file_name(&self) -> &OsStr {
        self.path.file_name().unwrap_or_else(|| OsStr::new(&self.name))
    }

    /// The equality key used when reconciling two reads of a directory.
    pub fn key(&self) -> EntryKey<'_> {
        EntryKey {
            name: self.file_name(),
            size: self.metadata.size,
            permissions: self.metadata.permissions,
            modified: self.metadata.modified,
            is_symlink: self.is_symlink(),
            is_dir: self.is_dir(),
        }
    }

    /// Whether `other` describes the same, unchanged directory member.
    pub fn same_as(&self, other: &FileEntry) -> bool {
        self.key() == other.key()
    }
}
