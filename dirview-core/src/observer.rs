//! Ordered-list observer protocol.
//!
//! A model holding an ordered list reports every structural change through
//! a [ListObserver]. Removals and insertions are bracketed: the `begin_*`
//! call arrives before the model mutates its list and the matching `end_*`
//! call right after, so index-based views stay consistent mid-sequence.

use std::path::{Path, PathBuf};
use std::sync::mpsc;

/// Receives structural change notifications from a list model.
///
/// Every method has an empty default so observers only implement what they
/// care about.
pub trait ListObserver {
    /// The whole list is about to be replaced.
    fn begin_reset(&mut self) {}

    /// The list has been replaced.
    fn end_reset(&mut self) {}

    /// Rows `first..=last` are about to be removed.
    fn begin_remove_rows(&mut self, _first: usize, _last: usize) {}

    /// The rows announced by the last `begin_remove_rows` are gone.
    fn end_remove_rows(&mut self) {}

    /// Rows will be inserted so that they occupy `first..=last`.
    fn begin_insert_rows(&mut self, _first: usize, _last: usize) {}

    /// The rows announced by the last `begin_insert_rows` are in place.
    fn end_insert_rows(&mut self) {}

    /// The number of rows changed.
    fn count_changed(&mut self, _count: usize) {}

    /// The current error message changed. An empty message means no error.
    fn error_changed(&mut self, _message: &str) {}

    /// The model now lists a different directory.
    fn directory_changed(&mut self, _path: &Path) {}

    /// The consumer's active flag flipped.
    fn active_changed(&mut self, _active: bool) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl ListObserver for NullObserver {}

/// An owned record of one observer callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    /// [ListObserver::begin_reset]
    BeginReset,
    /// [ListObserver::end_reset]
    EndReset,
    /// [ListObserver::begin_remove_rows]
    BeginRemoveRows {
        /// First removed row.
        first: usize,
        /// Last removed row (inclusive).
        last: usize,
    },
    /// [ListObserver::end_remove_rows]
    EndRemoveRows,
    /// [ListObserver::begin_insert_rows]
    BeginInsertRows {
        /// First inserted row.
        first: usize,
        /// Last inserted row (inclusive).
        last: usize,
    },
    /// [ListObserver::end_insert_rows]
    EndInsertRows,
    /// [ListObserver::count_changed] with the new row count.
    CountChanged(usize),
    /// [ListObserver::error_changed] with the new message.
    ErrorChanged(String),
    /// [ListObserver::directory_changed] with the new directory.
    DirectoryChanged(PathBuf),
    /// [ListObserver::active_changed] with the new flag.
    ActiveChanged(bool),
}

/// Forwards every callback as a [ListEvent] over a channel.
///
/// Send failures (receiver dropped) are ignored.
impl ListObserver for mpsc::Sender<ListEvent> {
    fn begin_reset(&mut self) {
        let _ = self.send(ListEvent::BeginReset);
    }

    fn end_reset(&mut self) {
        let _ = self.send(ListEvent::EndReset);
    }

    fn begin_remove_rows(&mut self, first: usize, last: usize) {
        let _ = self.send(ListEvent::BeginRemoveRows { first, last });
    }

    fn end_remove_rows(&mut self) {
        let _ = self.send(ListEvent::EndRemoveRows);
    }

    fn begin_insert_rows(&mut self, first: usize, last: usize) {
        let _ = self.send(ListEvent::BeginInsertRows { first, last });
    }

    fn end_insert_rows(&mut self) {
        let _ = self.send(ListEvent::EndInsertRows);
    }

    fn count_changed(&mut self, count: usize) {
        let _ = self.send(ListEvent::CountChanged(count));
    }

    fn error_changed(&mut self, message: &str) {
        let _ = self.send(ListEvent::ErrorChanged(message.to_string()));
    }

    fn directory_changed(&mut self, path: &Path) {
        let _ = self.send(ListEvent::DirectoryChanged(path.to_path_buf()));
    }

    fn active_changed(&mut self, active: bool) {
        let _ = self.send(ListEvent::ActiveChanged(active));
    }
}

/// Writes every callback to the `log` facade at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl ListObserver for LoggingObserver {
    fn end_reset(&mut self) {
        log::debug!("list reset");
    }

    fn begin_remove_rows(&mut self, first: usize, last: usize) {
        log::debug!("removing rows {}..={}", first, last);
    }

    fn begin_insert_rows(&mut self, first: usize, last: usize) {
        log::debug!("inserting rows {}..={}", first, last);
    }

    fn count_changed(&mut self, count: usize) {
        log::debug!("row count is now {}", count);
    }

    fn error_changed(&mut self, message: &str) {
        if !message.is_empty() {
            log::debug!("error: {}", message);
        }
    }

    fn directory_changed(&mut self, path: &Path) {
        log::debug!("directory changed to {:?}", path);
    }

    fn active_changed(&mut self, active: bool) {
        log::debug!("active: {}", active);
    }
}
