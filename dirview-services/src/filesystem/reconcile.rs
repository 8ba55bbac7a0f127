// SPDX-License-Identifier: LGPL-3.0-only
//! Incremental reconciliation of a held listing against a fresh read.
//!
//! Instead of replacing the whole list, which makes views lose their scroll
//! position and selection, the held listing is turned into the fresh one by
//! removing what disappeared and inserting what appeared. Entries whose
//! [key](FileEntry::key) did not change are left alone.

use crate::filesystem::entry::{EntryKey, FileEntry};
use dirview_core::observer::ListObserver;
use std::collections::HashMap;

/// One positional edit applied to the held listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// The entry at `index` was removed.
    Remove {
        /// Index at the moment of removal.
        index: usize,
    },
    /// `entry` was inserted at `index`.
    Insert {
        /// Index at the moment of insertion.
        index: usize,
        /// The inserted entry.
        entry: FileEntry,
    },
}

/// Transform `listing` into `fresh` in place, reporting each edit to `observer`.
///
/// Runs in two phases:
/// 1. Walk `listing` back to front and remove every entry with no equal
///    counterpart in `fresh`. Going backwards keeps the indices of entries
///    not yet visited valid.
/// 2. Walk `fresh` front to back and insert every entry with no equal
///    counterpart in the working list at its index in `fresh`.
///
/// Each edit is applied between the matching `begin_*`/`end_*` observer
/// calls. A changed entry shows up as a removal followed by an insertion.
/// The returned operations are in the order they were applied.
pub fn reconcile(
    listing: &mut Vec<FileEntry>,
    fresh: &[FileEntry],
    observer: &mut dyn ListObserver,
) -> Vec<Operation> {
    let mut operations = Vec::new();

    // Equal keys are paired one to one, so duplicates never multiply.
    let mut fresh_index: HashMap<EntryKey<'_>, Vec<usize>> = HashMap::with_capacity(fresh.len());
    for (i, entry) in fresh.iter().enumerate() {
        fresh_index.entry(entry.key()).or_default().push(i);
    }
    // Which fresh entries already have an equal counterpart in `listing`.
    let mut present = vec![false; fresh.len()];

    for index in (0..listing.len()).rev() {
        let counterpart = fresh_index
            .get(&listing[index].key())
            .and_then(|candidates| candidates.iter().rev().copied().find(|&i| !present[i]));
        if let Some(i) = counterpart {
            present[i] = true;
            continue;
        }

        observer.begin_remove_rows(index, index);
        listing.remove(index);
        observer.end_remove_rows();
        operations.push(Operation::Remove { index });
    }

    for (index, entry) in fresh.iter().enumerate() {
        if present[index] {
            continue;
        }

        // Every kept entry is also in `fresh`, so `index <= listing.len()`.
        observer.begin_insert_rows(index, index);
        listing.insert(index, entry.clone());
        observer.end_insert_rows();
        operations.push(Operation::Insert {
            index,
            entry: entry.clone(),
        });
    }

    operations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::entry::{FileMetadata, FileType};
    use dirview_core::observer::{ListEvent, NullObserver};
    use std::path::PathBuf;
    use std::sync::mpsc;
    use std::time::{Duration, UNIX_EPOCH};

    fn file(name: &str, size: u64) -> FileEntry {
        FileEntry::new(
            PathBuf::from("/d").join(name),
            name.to_string(),
            FileType::File,
            FileMetadata {
                size,
                modified: UNIX_EPOCH + Duration::from_secs(1_000),
                created: None,
                permissions: 0o644,
                is_hidden: false,
            },
        )
    }

    fn names(entries: &[FileEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_identical_listing_yields_nothing() {
        let mut listing = vec![file("a", 1), file("b", 2), file("c", 3)];
        let fresh = listing.clone();
        let (tx, rx) = mpsc::channel();
        let mut observer = tx;

        let ops = reconcile(&mut listing, &fresh, &mut observer);
        assert!(ops.is_empty());
        assert_eq!(names(&listing), vec!["a", "b", "c"]);
        assert_eq!(rx.try_iter().count(), 0);
    }

    #[test]
    fn test_single_removal() {
        let mut listing = vec![file("a", 1), file("b", 2), file("c", 3)];
        let fresh = vec![file("a", 1), file("c", 3)];

        let ops = reconcile(&mut listing, &fresh, &mut NullObserver);
        assert_eq!(ops, vec![Operation::Remove { index: 1 }]);
        assert_eq!(names(&listing), vec!["a", "c"]);
    }

    #[test]
    fn test_single_insertion() {
        let mut listing = vec![file("a", 1), file("c", 3)];
        let fresh = vec![file("a", 1), file("b", 2), file("c", 3)];

        let ops = reconcile(&mut listing, &fresh, &mut NullObserver);
        assert_eq!(
            ops,
            vec![Operation::Insert {
                index: 1,
                entry: file("b", 2)
            }]
        );
        assert_eq!(listing, fresh);
    }

    #[test]
    fn test_changed_entry_is_removed_then_inserted() {
        let mut listing = vec![file("a", 1), file("b", 2), file("c", 3)];
        let fresh = vec![file("a", 1), file("b", 20), file("c", 3)];
        let (tx, rx) = mpsc::channel();
        let mut observer = tx;

        let ops = reconcile(&mut listing, &fresh, &mut observer);
        assert_eq!(
            ops,
            vec![
                Operation::Remove { index: 1 },
                Operation::Insert {
                    index: 1,
                    entry: file("b", 20)
                },
            ]
        );
        assert_eq!(listing, fresh);

        let events: Vec<ListEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                ListEvent::BeginRemoveRows { first: 1, last: 1 },
                ListEvent::EndRemoveRows,
                ListEvent::BeginInsertRows { first: 1, last: 1 },
                ListEvent::EndInsertRows,
            ]
        );
    }

    #[test]
    fn test_removals_run_back_to_front() {
        let mut listing = vec![file("a", 1), file("b", 2), file("c", 3), file("d", 4)];
        let fresh = vec![file("b", 2), file("d", 4)];

        let ops = reconcile(&mut listing, &fresh, &mut NullObserver);
        assert_eq!(
            ops,
            vec![Operation::Remove { index: 2 }, Operation::Remove { index: 0 }]
        );
        assert_eq!(names(&listing), vec!["b", "d"]);
    }

    #[test]
    fn test_mixed_changes_reach_fresh_listing() {
        let mut listing = vec![file("a", 1), file("b", 2), file("c", 3)];
        let fresh = vec![file("new", 9), file("a", 1), file("c", 30), file("z", 5)];

        let ops = reconcile(&mut listing, &fresh, &mut NullObserver);
        assert_eq!(listing, fresh);
        let removes = ops.iter().filter(|op| matches!(op, Operation::Remove { .. })).count();
        let inserts = ops.iter().filter(|op| matches!(op, Operation::Insert { .. })).count();
        assert_eq!(removes, 2);
        assert_eq!(inserts, 3);
    }

    #[test]
    fn test_duplicate_keys_are_matched_one_to_one() {
        let mut listing = vec![file("a", 1), file("a", 1)];
        let fresh = listing.clone();

        for _ in 0..3 {
            let ops = reconcile(&mut listing, &fresh, &mut NullObserver);
            assert!(ops.is_empty());
            assert_eq!(listing.len(), 2);
        }

        // One of two equal entries disappears: exactly one removal.
        let ops = reconcile(&mut listing, &fresh[..1], &mut NullObserver);
        assert_eq!(ops, vec![Operation::Remove { index: 0 }]);
        assert_eq!(listing.len(), 1);
    }

    #[test]
    fn test_non_utf8_names_stay_distinct() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = |bytes: &[u8]| {
            let mut entry = file("placeholder", 1);
            entry.path = PathBuf::from("/d").join(OsStr::from_bytes(bytes));
            entry.name = entry.path.file_name().unwrap().to_string_lossy().into_owned();
            entry
        };
        let mut listing = vec![raw(b"a\xff"), raw(b"a\xfe")];
        let fresh = listing.clone();
        assert_eq!(listing[0].name, listing[1].name);

        let ops = reconcile(&mut listing, &fresh, &mut NullObserver);
        assert!(ops.is_empty());

        let ops = reconcile(&mut listing, &fresh[1..], &mut NullObserver);
        assert_eq!(ops, vec![Operation::Remove { index: 0 }]);
        assert_eq!(listing, fresh[1..].to_vec());
    }

    #[test]
    fn test_from_empty_and_to_empty() {
        let mut listing = Vec::new();
        let fresh = vec![file("a", 1), file("b", 2)];
        let ops = reconcile(&mut listing, &fresh, &mut NullObserver);
        assert_eq!(ops.len(), 2);
        assert_eq!(listing, fresh);

        let ops = reconcile(&mut listing, &[], &mut NullObserver);
        assert_eq!(
            ops,
            vec![Operation::Remove { index: 1 }, Operation::Remove { index: 0 }]
        );
        assert!(listing.is_empty());
    }
}
