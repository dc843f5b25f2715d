//! Run statistics for a sort.
//!
//! A single [`Stats`] value is created by the driver, threaded by mutable
//! reference through the sort pass and the sweep pass, and read once at the
//! end to render the summary.

use crate::file_category::Category;
use std::collections::BTreeMap;

/// Count and total size of the files moved into one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryStats {
    /// Number of files moved.
    pub count: usize,
    /// Total size of those files in bytes.
    pub bytes: u64,
}

/// Aggregated effects of a run.
///
/// `files_moved` and `bytes_moved` always equal the sums over
/// `category_stats`; they are only ever changed together by
/// [`Stats::record_move`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    /// Total files moved.
    pub files_moved: usize,
    /// Total bytes moved.
    pub bytes_moved: u64,
    /// Directories deleted by the sweep pass.
    pub empty_folders_removed: usize,
    /// Directories the user agreed to sort.
    pub folders_sorted: usize,
    /// Directories the user declined (each prunes its whole subtree).
    pub folders_skipped: usize,
    /// Per-category counters. Only categories with a moved file have an entry.
    pub category_stats: BTreeMap<Category, CategoryStats>,
    /// Name of the largest file moved, empty if none has been.
    pub largest_file_name: String,
    /// Size of the largest file moved, zero if none has been.
    pub largest_file_bytes: u64,
}

impl Stats {
    /// Creates an empty set of statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successfully moved file.
    ///
    /// The largest-file record is replaced only by a strictly larger file, so
    /// the first of several equally large files keeps the record.
    pub fn record_move(&mut self, category: Category, file_name: &str, bytes: u64) {
        self.files_moved += 1;
        self.bytes_moved += bytes;

        let entry = self.category_stats.entry(category).or_default();
        entry.count += 1;
        entry.bytes += bytes;

        if bytes > self.largest_file_bytes {
            self.largest_file_bytes = bytes;
            self.largest_file_name = file_name.to_string();
        }
    }

    pub fn record_folder_sorted(&mut self) {
        self.folders_sorted += 1;
    }

    pub fn record_folder_skipped(&mut self) {
        self.folders_skipped += 1;
    }

    pub fn record_empty_folder_removed(&mut self) {
        self.empty_folders_removed += 1;
    }

    /// Returns the counters for one category, if any file was moved into it.
    pub fn category(&self, category: Category) -> Option<&CategoryStats> {
        self.category_stats.get(&category)
    }

    /// Returns true once at least one file has been moved.
    pub fn has_largest_file(&self) -> bool {
        !self.largest_file_name.is_empty()
    }
}
