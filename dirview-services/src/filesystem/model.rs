// SPDX-License-Identifier: LGPL-3.0-only
//! Live directory listing model.
//!
//! [DirectoryModel] holds the listing of one directory and keeps it in sync
//! with the filesystem. Change notifications are gated behind an active
//! flag: while the consumer is inactive they only mark the model dirty, and
//! the next activation performs a single full reload. While active, a
//! change triggers a fresh read that is [reconciled](reconcile) into the
//! held listing so observers see positional inserts and removals instead
//! of a reset.

use crate::filesystem::entry::FileEntry;
use crate::filesystem::error::{FileSystemError, ListingErrorKind};
use crate::filesystem::format::{datetime_to_string, filesize_to_string, permissions_to_string};
use crate::filesystem::icon::icon_name_for;
use crate::filesystem::path::absolute_file_path;
use crate::filesystem::reader::{read_directory, ListingOptions};
use crate::filesystem::reconcile::reconcile;
use crate::filesystem::watcher::ChangeWatcher;
use crate::settings::{ConfigSource, SHOW_DIRS_FIRST, SHOW_HIDDEN_FILES};
use dirview_core::model::{ItemModel, ModelData};
use dirview_core::observer::{ListObserver, NullObserver};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::TryRecvError};

/// Per-entry values exposed to views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileRole {
    /// Base file name. Also reachable as `display`.
    Filename,
    /// `"l"`, `"d"`, `"-"` or `"?"`.
    FileKind,
    /// Icon name.
    FileIcon,
    /// `rwxr-xr-x` style permission string.
    Permissions,
    /// Human readable size, or `"dir"` / `"dir-link"`.
    Size,
    /// Formatted modification time.
    Modified,
    /// Formatted creation time, empty when unknown.
    Created,
    /// Whether the entry is a directory, following links.
    IsDir,
    /// Whether the entry is a symbolic link.
    IsLink,
    /// Link target, empty for non-links.
    SymlinkTarget,
}

impl FileRole {
    /// Every role, in presentation order.
    pub const ALL: [FileRole; 10] = [
        FileRole::Filename,
        FileRole::FileKind,
        FileRole::FileIcon,
        FileRole::Permissions,
        FileRole::Size,
        FileRole::Modified,
        FileRole::Created,
        FileRole::IsDir,
        FileRole::IsLink,
        FileRole::SymlinkTarget,
    ];

    /// The name views use to address this role.
    pub fn name(self) -> &'static str {
        match self {
            FileRole::Filename => "filename",
            FileRole::FileKind => "filekind",
            FileRole::FileIcon => "fileIcon",
            FileRole::Permissions => "permissions",
            FileRole::Size => "size",
            FileRole::Modified => "modified",
            FileRole::Created => "created",
            FileRole::IsDir => "isDir",
            FileRole::IsLink => "isLink",
            FileRole::SymlinkTarget => "symLinkTarget",
        }
    }

    /// Look a role up by name.
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "display" {
            return Some(FileRole::Filename);
        }
        Self::ALL.into_iter().find(|role| role.name() == name)
    }

    /// The value of this role for `entry`.
    pub fn data(self, entry: &FileEntry) -> ModelData {
        match self {
            FileRole::Filename => entry.name.clone().into(),
            FileRole::FileKind => file_kind(entry).into(),
            FileRole::FileIcon => icon_name_for(entry).into(),
            FileRole::Permissions => permissions_to_string(entry.metadata.permissions).into(),
            FileRole::Size => {
                if entry.is_symlink_to_dir() {
                    "dir-link".into()
                } else if entry.is_dir() {
                    "dir".into()
                } else {
                    filesize_to_string(entry.metadata.size).into()
                }
            },
            FileRole::Modified => datetime_to_string(entry.metadata.modified).into(),
            FileRole::Created => entry
                .metadata
                .created
                .map(datetime_to_string)
                .unwrap_or_default()
                .into(),
            FileRole::IsDir => entry.is_dir().into(),
            FileRole::IsLink => entry.is_symlink().into(),
            FileRole::SymlinkTarget => entry
                .symlink_target
                .as_ref()
                .map(|target| target.to_string_lossy().into_owned())
                .unwrap_or_default()
                .into(),
        }
    }
}

fn file_kind(entry: &FileEntry) -> &'static str {
    if entry.is_symlink() {
        "l"
    } else if entry.is_dir() {
        "d"
    } else if entry.is_file() {
        "-"
    } else {
        "?"
    }
}

/// A live, diff-aware listing of a single directory.
///
/// The model is single-threaded and driven by its owner: call
/// [process_pending_changes](Self::process_pending_changes) whenever the
/// watcher may have delivered events.
pub struct DirectoryModel {
    dir: PathBuf,
    entries: Vec<FileEntry>,
    active: bool,
    dirty: bool,
    error: Option<(ListingErrorKind, String)>,
    watcher: Box<dyn ChangeWatcher>,
    config: Arc<dyn ConfigSource>,
    observer: Box<dyn ListObserver>,
    settings_rx: Option<broadcast::Receiver<String>>,
    watched_files: Vec<PathBuf>,
}

impl DirectoryModel {
    /// Create an inactive model with an empty path.
    pub fn new(watcher: Box<dyn ChangeWatcher>, config: Arc<dyn ConfigSource>) -> Self {
        Self {
            dir: PathBuf::new(),
            entries: Vec::new(),
            active: false,
            dirty: false,
            error: None,
            watcher,
            config,
            observer: Box::new(NullObserver),
            settings_rx: None,
            watched_files: Vec::new(),
        }
    }

    /// Attach the observer receiving structural change notifications.
    pub fn with_observer(mut self, observer: impl ListObserver + 'static) -> Self {
        self.set_observer(observer);
        self
    }

    /// Replace the observer.
    pub fn set_observer(&mut self, observer: impl ListObserver + 'static) {
        self.observer = Box::new(observer);
    }

    /// Listen for configuration changes on `rx`.
    ///
    /// Only keys affecting the listing trigger a reload.
    pub fn watch_settings(&mut self, rx: broadcast::Receiver<String>) {
        self.settings_rx = Some(rx);
    }

    /// List `path` instead of the current directory.
    ///
    /// Does nothing if `path` is the current directory. Otherwise the watch
    /// subscription moves to `path` (extra file subscriptions are dropped)
    /// and the listing is fully reloaded, even while inactive.
    pub fn set_directory(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if path == self.dir {
            return;
        }

        if !self.dir.as_os_str().is_empty() {
            if let Err(e) = self.watcher.unwatch(&self.dir) {
                log::debug!("Failed to unwatch {:?}: {}", self.dir, e);
            }
        }
        for file in self.watched_files.drain(..) {
            if let Err(e) = self.watcher.unwatch(&file) {
                log::debug!("Failed to unwatch {:?}: {}", file, e);
            }
        }
        if !path.as_os_str().is_empty() {
            if let Err(e) = self.watcher.watch(&path) {
                log::warn!("Failed to watch {:?}: {}", path, e);
            }
        }

        self.dir = path;
        self.reload();
        self.observer.directory_changed(&self.dir);
    }

    /// Set whether the consumer is currently showing the listing.
    ///
    /// Activating a dirty model reloads it in full.
    pub fn set_active(&mut self, active: bool) {
        if active == self.active {
            return;
        }

        self.active = active;
        self.observer.active_changed(active);

        if active && self.dirty {
            log::debug!("Reloading {:?} on activation", self.dir);
            self.reload();
        }
    }

    /// Subscribe to changes of an individual file in addition to the directory.
    pub fn watch_file(&mut self, path: impl Into<PathBuf>) -> Result<(), FileSystemError> {
        let path = path.into();
        if self.watched_files.contains(&path) {
            return Ok(());
        }
        self.watcher.watch(&path)?;
        self.watched_files.push(path);
        Ok(())
    }

    /// The directory has changed on disk.
    pub fn on_filesystem_change(&mut self) {
        if !self.active {
            log::debug!("Marking {:?} dirty", self.dir);
            self.dirty = true;
            return;
        }
        self.refresh();
    }

    /// A setting affecting the listing has changed.
    pub fn on_configuration_changed(&mut self) {
        if !self.active {
            log::debug!("Marking {:?} dirty after settings change", self.dir);
            self.dirty = true;
            return;
        }
        self.reload();
    }

    /// Drain the watcher and the settings channel, reacting once to each.
    ///
    /// A settings change reloads in full, which covers any filesystem
    /// changes drained in the same call. Returns whether anything arrived.
    pub fn process_pending_changes(&mut self) -> bool {
        let changes = self.watcher.poll_events();
        let settings_changed = self.drain_settings();

        if settings_changed {
            self.on_configuration_changed();
        } else if !changes.is_empty() {
            log::debug!("{} change(s) in {:?}", changes.len(), self.dir);
            self.on_filesystem_change();
        }

        settings_changed || !changes.is_empty()
    }

    fn drain_settings(&mut self) -> bool {
        let Some(rx) = self.settings_rx.as_mut() else {
            return false;
        };

        let mut changed = false;
        let mut closed = false;
        loop {
            match rx.try_recv() {
                Ok(key) => changed |= key == SHOW_HIDDEN_FILES || key == SHOW_DIRS_FIRST,
                Err(TryRecvError::Lagged(skipped)) => {
                    log::debug!("Missed {} settings notification(s)", skipped);
                    changed = true;
                },
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Closed) => {
                    closed = true;
                    break;
                },
            }
        }

        if closed {
            self.settings_rx = None;
        }
        changed
    }

    /// Replace the listing with a fresh read, notifying observers with a reset.
    pub fn reload(&mut self) {
        self.dirty = false;
        self.observer.begin_reset();
        self.entries.clear();

        match self.read() {
            Ok(entries) => {
                self.entries = entries;
                self.error = None;
            },
            Err(e) => self.set_error(&e),
        }

        self.observer.end_reset();
        self.observer.count_changed(self.entries.len());
        let message = self.last_error().to_string();
        self.observer.error_changed(&message);
    }

    /// Bring the listing up to date with minimal positional edits.
    fn refresh(&mut self) {
        self.dirty = false;

        let fresh = match self.read() {
            Ok(fresh) => fresh,
            Err(e) => {
                // Fall back to a reset so the failure is reported like any other read.
                self.observer.begin_reset();
                self.entries.clear();
                self.set_error(&e);
                self.observer.end_reset();
                self.observer.count_changed(0);
                let message = self.last_error().to_string();
                self.observer.error_changed(&message);
                return;
            },
        };

        let operations = reconcile(&mut self.entries, &fresh, self.observer.as_mut());
        log::debug!("Reconciled {:?}: {} operation(s)", self.dir, operations.len());

        if !operations.is_empty() {
            self.observer.count_changed(self.entries.len());
        }
        if self.error.take().is_some() {
            self.observer.error_changed("");
        }
    }

    fn read(&self) -> Result<Vec<FileEntry>, FileSystemError> {
        if self.dir.as_os_str().is_empty() {
            return Ok(Vec::new());
        }
        let options = ListingOptions::from_config(self.config.as_ref());
        read_directory(&self.dir, &options)
    }

    fn set_error(&mut self, error: &FileSystemError) {
        log::warn!("Failed to read {:?}: {}", self.dir, error);
        self.error = Some((error.kind(), error.to_string()));
    }

    /// The directory being listed (empty if none).
    pub fn current_directory(&self) -> &Path {
        &self.dir
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// The message of the last failed read, empty if the last read succeeded.
    pub fn last_error(&self) -> &str {
        self.error.as_ref().map(|(_, message)| message.as_str()).unwrap_or("")
    }

    pub fn error_kind(&self) -> Option<ListingErrorKind> {
        self.error.as_ref().map(|(kind, _)| *kind)
    }

    /// Absolute path of the entry at `index`.
    pub fn absolute_path_at(&self, index: usize) -> Option<PathBuf> {
        self.entries.get(index).map(|entry| entry.path.clone())
    }

    /// Resolve `name` relative to the current directory into a clean absolute path.
    pub fn resolve_child_path(&self, name: impl AsRef<Path>) -> PathBuf {
        absolute_file_path(&self.dir, name.as_ref())
    }

    /// The clean absolute path of the parent of the current directory.
    pub fn parent_path(&self) -> PathBuf {
        self.resolve_child_path("..")
    }

    pub fn entry_at(&self, index: usize) -> Option<&FileEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether changes arrived while inactive and are not yet reflected.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl ItemModel for DirectoryModel {
    type Role = FileRole;

    fn row_count(&self) -> usize {
        self.entries.len()
    }

    fn data(&self, row: usize, role: FileRole) -> ModelData {
        match self.entries.get(row) {
            Some(entry) => role.data(entry),
            None => ModelData::None,
        }
    }

    fn role_names(&self) -> Vec<(FileRole, &'static str)> {
        FileRole::ALL.into_iter().map(|role| (role, role.name())).collect()
    }
}
