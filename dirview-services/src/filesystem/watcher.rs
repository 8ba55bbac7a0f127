// SPDX-License-Identifier: LGPL-3.0-only
//! File system change watcher.

use crate::filesystem::error::FileSystemError;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc;

/// A change detected in the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSystemChange {
    /// A new file or directory was created.
    Created(PathBuf),
    /// An existing file or directory was modified.
    Modified(PathBuf),
    /// A file or directory was removed.
    Removed(PathBuf),
    /// A file or directory was renamed.
    Renamed {
        /// Old path.
        old: PathBuf,
        /// New path.
        new: PathBuf,
    },
}

impl FileSystemChange {
    /// The path the change is reported for (the new path for renames).
    pub fn path(&self) -> &Path {
        match self {
            FileSystemChange::Created(p)
            | FileSystemChange::Modified(p)
            | FileSystemChange::Removed(p) => p,
            FileSystemChange::Renamed { new, .. } => new,
        }
    }
}

/// Subscription side of a change notification service.
///
/// Paths are watched non-recursively: a watched directory reports changes
/// to its direct members, a watched file reports changes to itself.
pub trait ChangeWatcher {
    /// Start watching a path for changes.
    fn watch(&mut self, path: &Path) -> Result<(), FileSystemError>;

    /// Stop watching a path.
    fn unwatch(&mut self, path: &Path) -> Result<(), FileSystemError>;

    /// Drain the changes delivered since the last call (non-blocking).
    fn poll_events(&mut self) -> Vec<FileSystemChange>;
}

/// Watches the filesystem for changes through the platform's native
/// notification API.
pub struct FileSystemWatcher {
    watcher: RecommendedWatcher,
    event_rx: mpsc::Receiver<notify::Result<Event>>,
}

impl FileSystemWatcher {
    /// Create a new file system watcher.
    pub fn new() -> Result<Self, FileSystemError> {
        let (tx, rx) = mpsc::channel();
        let watcher = notify::recommended_watcher(tx)?;

        Ok(Self {
            watcher,
            event_rx: rx,
        })
    }

    /// Convert a notify Event into FileSystemChange events.
    fn convert_event(event: Event) -> Vec<FileSystemChange> {
        let mut changes = Vec::new();

        match event.kind {
            EventKind::Create(_) => {
                for path in event.paths {
                    changes.push(FileSystemChange::Created(path));
                }
            },
            EventKind::Modify(kind) => {
                use notify::event::ModifyKind;
                match kind {
                    ModifyKind::Name(_) if event.paths.len() >= 2 => {
                        // Rename events have two paths: old and new
                        let mut paths = event.paths.into_iter();
                        if let (Some(old), Some(new)) = (paths.next(), paths.next()) {
                            changes.push(FileSystemChange::Renamed { old, new });
                        }
                    },
                    _ => {
                        for path in event.paths {
                            changes.push(FileSystemChange::Modified(path));
                        }
                    },
                }
            },
            EventKind::Remove(_) => {
                for path in event.paths {
                    changes.push(FileSystemChange::Removed(path));
                }
            },
            // Reading a file does not change the listing.
            EventKind::Access(_) => {},
            EventKind::Other | EventKind::Any => {
                for path in event.paths {
                    changes.push(FileSystemChange::Modified(path));
                }
            },
        }

        changes
    }
}

impl ChangeWatcher for FileSystemWatcher {
    fn watch(&mut self, path: &Path) -> Result<(), FileSystemError> {
        self.watcher.watch(path, RecursiveMode::NonRecursive)?;
        Ok(())
    }

    fn unwatch(&mut self, path: &Path) -> Result<(), FileSystemError> {
        self.watcher.unwatch(path)?;
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<FileSystemChange> {
        let mut changes = Vec::new();

        while let Ok(result) = self.event_rx.try_recv() {
            match result {
                Ok(event) => changes.extend(Self::convert_event(event)),
                Err(e) => log::warn!("File watcher error: {}", e),
            }
        }

        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind, RemoveKind, RenameMode};

    fn event(kind: EventKind, paths: &[&str]) -> Event {
        let mut event = Event::new(kind);
        for p in paths {
            event = event.add_path(PathBuf::from(p));
        }
        event
    }

    #[test]
    fn test_convert_create_and_remove() {
        let changes = FileSystemWatcher::convert_event(event(
            EventKind::Create(CreateKind::File),
            &["/d/a", "/d/b"],
        ));
        assert_eq!(
            changes,
            vec![
                FileSystemChange::Created(PathBuf::from("/d/a")),
                FileSystemChange::Created(PathBuf::from("/d/b")),
            ]
        );

        let changes =
            FileSystemWatcher::convert_event(event(EventKind::Remove(RemoveKind::Any), &["/d/a"]));
        assert_eq!(changes, vec![FileSystemChange::Removed(PathBuf::from("/d/a"))]);
    }

    #[test]
    fn test_convert_rename() {
        let changes = FileSystemWatcher::convert_event(event(
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)),
            &["/d/old", "/d/new"],
        ));
        assert_eq!(
            changes,
            vec![FileSystemChange::Renamed {
                old: PathBuf::from("/d/old"),
                new: PathBuf::from("/d/new"),
            }]
        );
        assert_eq!(changes[0].path(), Path::new("/d/new"));

        // Half of a rename pair is only known to have changed.
        let changes = FileSystemWatcher::convert_event(event(
            EventKind::Modify(ModifyKind::Name(RenameMode::From)),
            &["/d/old"],
        ));
        assert_eq!(changes, vec![FileSystemChange::Modified(PathBuf::from("/d/old"))]);
    }

    #[test]
    fn test_access_is_ignored() {
        let changes =
            FileSystemWatcher::convert_event(event(EventKind::Access(AccessKind::Any), &["/d/a"]));
        assert!(changes.is_empty());
    }
}
