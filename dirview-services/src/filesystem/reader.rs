// SPDX-License-Identifier: LGPL-3.0-only
//! Directory enumeration into [FileEntry] snapshots.

use crate::filesystem::entry::FileEntry;
use crate::filesystem::error::FileSystemError;
use crate::filesystem::path::absolute_file_path;
use crate::settings::{ConfigSource, SHOW_DIRS_FIRST, SHOW_HIDDEN_FILES};
use std::ffi::CString;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

/// Filter and sort options for a directory read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingOptions {
    /// Include entries whose name starts with a dot.
    pub show_hidden: bool,
    /// Group directories (and links to directories) before everything else.
    pub dirs_first: bool,
}

impl ListingOptions {
    /// Resolve the options from a configuration source, defaulting to `false`.
    pub fn from_config(config: &dyn ConfigSource) -> Self {
        Self {
            show_hidden: config.get_bool_or(SHOW_HIDDEN_FILES, false),
            dirs_first: config.get_bool_or(SHOW_DIRS_FIRST, false),
        }
    }
}

/// Read the members of `path`.
///
/// Fails with [FileSystemError::DirectoryNotFound] when `path` is not an
/// existing directory and with [FileSystemError::PermissionDenied] when it is
/// not readable, so an unreadable directory is never mistaken for an empty
/// one. Entries that vanish between enumeration and `stat` are skipped.
pub fn read_directory(path: &Path, options: &ListingOptions) -> Result<Vec<FileEntry>, FileSystemError> {
    if !path.is_dir() {
        return Err(FileSystemError::DirectoryNotFound(path.to_path_buf()));
    }
    if !is_readable(path) {
        return Err(FileSystemError::PermissionDenied(path.to_path_buf()));
    }

    let base = absolute_file_path(path, Path::new("."));
    let mut entries = Vec::new();

    // read_dir never yields "." or "..".
    for dir_entry in fs::read_dir(path)? {
        let dir_entry = dir_entry?;
        let name = dir_entry.file_name();
        if !options.show_hidden && name.as_bytes().starts_with(b".") {
            continue;
        }

        match FileEntry::from_path(&base.join(&name)) {
            Ok(entry) => entries.push(entry),
            Err(e) => log::debug!("Skipping {:?} in {:?}: {}", name, path, e),
        }
    }

    if options.dirs_first {
        sort_dirs_first(&mut entries);
    }

    Ok(entries)
}

/// Stable sort: directories first, then by name within each group.
pub fn sort_dirs_first(entries: &mut [FileEntry]) {
    entries.sort_by(|a, b| {
        b.is_dir()
            .cmp(&a.is_dir())
            .then_with(|| a.name.cmp(&b.name))
    });
}

fn is_readable(path: &Path) -> bool {
    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: `c_path` is a valid NUL-terminated string that outlives the call.
    unsafe { libc::access(c_path.as_ptr(), libc::R_OK) == 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::entry::{FileMetadata, FileType};
    use std::path::PathBuf;
    use std::time::UNIX_EPOCH;
    use tempfile::tempdir;

    fn names(entries: &[FileEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    fn placeholder(name: &str, file_type: FileType) -> FileEntry {
        FileEntry::new(
            PathBuf::from("/d").join(name),
            name.to_string(),
            file_type,
            FileMetadata {
                size: 0,
                modified: UNIX_EPOCH,
                created: None,
                permissions: 0o644,
                is_hidden: false,
            },
        )
    }

    #[test]
    fn test_sort_dirs_first() {
        let mut entries = vec![
            placeholder("b.txt", FileType::File),
            placeholder("a_dir", FileType::Directory),
            placeholder("c_dir", FileType::Directory),
        ];
        sort_dirs_first(&mut entries);
        assert_eq!(names(&entries), vec!["a_dir", "c_dir", "b.txt"]);
    }

    #[test]
    fn test_sort_groups_linked_dirs_with_dirs() {
        let mut link = placeholder("m_link", FileType::Symlink);
        link.symlink_to_dir = true;
        let mut entries = vec![
            placeholder("a.txt", FileType::File),
            link,
            placeholder("z_dir", FileType::Directory),
            placeholder("b_link", FileType::Symlink),
        ];
        sort_dirs_first(&mut entries);
        assert_eq!(names(&entries), vec!["m_link", "z_dir", "a.txt", "b_link"]);
    }

    #[test]
    fn test_read_filters_hidden() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("visible.txt"), "x").unwrap();
        fs::write(temp.path().join(".hidden"), "x").unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();

        let mut entries = read_directory(temp.path(), &ListingOptions::default()).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(names(&entries), vec!["sub", "visible.txt"]);

        let options = ListingOptions {
            show_hidden: true,
            dirs_first: false,
        };
        let entries = read_directory(temp.path(), &options).unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.name != "." && e.name != ".."));
    }

    #[test]
    fn test_read_entries_have_absolute_paths() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a"), "").unwrap();

        let entries = read_directory(temp.path(), &ListingOptions::default()).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].path.is_absolute());
        assert_eq!(entries[0].path.file_name().unwrap(), "a");
    }

    #[test]
    fn test_read_missing_directory() {
        let temp = tempdir().unwrap();
        let err = read_directory(&temp.path().join("missing"), &ListingOptions::default()).unwrap_err();
        assert!(matches!(err, FileSystemError::DirectoryNotFound(_)));
    }

    #[test]
    fn test_read_file_is_not_a_directory() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("plain");
        fs::write(&file, "").unwrap();
        let err = read_directory(&file, &ListingOptions::default()).unwrap_err();
        assert!(matches!(err, FileSystemError::DirectoryNotFound(_)));
    }

    #[test]
    fn test_empty_directory_is_ok() {
        let temp = tempdir().unwrap();
        let entries = read_directory(temp.path(), &ListingOptions::default()).unwrap();
        assert!(entries.is_empty());
    }
}
