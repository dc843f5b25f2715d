//! The sort pass.
//!
//! A single depth-first, pre-order walk from the root. Every subdirectory is
//! put to the confirmation gate before anything inside it is looked at; a
//! declined directory is pruned with its whole subtree. Files whose extension
//! classifies are handed to [`FileOrganizer`]. Per-entry failures are logged
//! and skipped, only an unreadable root aborts the pass.

use crate::config::CompiledFilters;
use crate::file_category::{classify, extension_of};
use crate::file_organizer::{FileOrganizer, MoveOutcome, OrganizeError, OrganizeResult};
use crate::prompt::{Confirm, folder_question};
use crate::stats::Stats;
use std::fs::{self, DirEntry};
use std::path::Path;
use tracing::{debug, trace, warn};

/// Lists a directory, sorted by file name.
///
/// The listing is taken once, so entries created while it is being processed
/// are not part of it.
pub(crate) fn read_sorted_entries(dir: &Path) -> OrganizeResult<Vec<DirEntry>> {
    let read_err = |e| OrganizeError::ReadDirFailed {
        path: dir.to_path_buf(),
        source: e,
    };
    let mut entries = fs::read_dir(dir)
        .map_err(read_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_err)?;
    entries.sort_by_key(|entry| entry.file_name());
    Ok(entries)
}

/// Lists the root, reporting failure as an invalid base path.
pub(crate) fn read_root(root: &Path) -> OrganizeResult<Vec<DirEntry>> {
    read_sorted_entries(root).map_err(|e| match e {
        OrganizeError::ReadDirFailed { path, source } => {
            OrganizeError::InvalidBasePath { path, source }
        }
        other => other,
    })
}

/// Logs an error for an item that is being skipped.
pub(crate) fn log_skipped(err: &OrganizeError) {
    warn!(operation = err.operation(), "{}", err);
}

/// Walks a tree and sorts the files of every confirmed directory.
pub struct SortWalker<'a, C: Confirm + ?Sized> {
    root: &'a Path,
    filters: &'a CompiledFilters,
    gate: &'a mut C,
}

impl<'a, C: Confirm + ?Sized> SortWalker<'a, C> {
    /// Creates a walker over `root`.
    ///
    /// `gate` is asked once per subdirectory; `filters` selects files to leave
    /// alone even when they classify.
    pub fn new(root: &'a Path, filters: &'a CompiledFilters, gate: &'a mut C) -> Self {
        Self {
            root,
            filters,
            gate,
        }
    }

    /// Runs the sort pass, recording its effects in `stats`.
    ///
    /// The root itself is never put to the gate.
    ///
    /// # Errors
    ///
    /// Returns [`OrganizeError::InvalidBasePath`] if the root cannot be listed.
    /// Every other failure is logged and the affected entry skipped.
    pub fn run(&mut self, stats: &mut Stats) -> OrganizeResult<()> {
        let entries = read_root(self.root)?;
        self.process_entries(entries, stats);
        Ok(())
    }

    fn process_entries(&mut self, entries: Vec<DirEntry>, stats: &mut Stats) {
        for entry in entries {
            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(e) => {
                    log_skipped(&OrganizeError::MetadataFailed { path, source: e });
                    continue;
                }
            };

            if file_type.is_dir() {
                self.visit_dir(&path, stats);
            } else {
                self.sort_file(&entry, stats);
            }
        }
    }

    fn visit_dir(&mut self, dir: &Path, stats: &mut Stats) {
        if !self.gate.confirm(&folder_question(dir)) {
            stats.record_folder_skipped();
            debug!(dir = %dir.display(), "skipped folder");
            return;
        }
        stats.record_folder_sorted();

        match read_sorted_entries(dir) {
            Ok(entries) => self.process_entries(entries, stats),
            Err(e) => log_skipped(&e),
        }
    }

    fn sort_file(&mut self, entry: &DirEntry, stats: &mut Stats) {
        let path = entry.path();
        let os_name = entry.file_name();
        let Some(file_name) = os_name.to_str() else {
            debug!(path = %path.display(), "skipping file with non UTF-8 name");
            return;
        };

        let Some(category) = extension_of(file_name).and_then(classify) else {
            trace!(path = %path.display(), "unrecognized extension, left in place");
            return;
        };

        let relative = path.strip_prefix(self.root).unwrap_or(&path);
        if !self.filters.should_include(relative) {
            trace!(path = %path.display(), "excluded by filters, left in place");
            return;
        }

        let size = match entry.metadata() {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                log_skipped(&OrganizeError::MetadataFailed { path, source: e });
                return;
            }
        };

        match FileOrganizer::move_to_category(&path, file_name, size, self.root, category, stats) {
            Ok(MoveOutcome::Moved { .. }) => {}
            Ok(MoveOutcome::AlreadyInPlace) => {
                trace!(path = %path.display(), "already sorted");
            }
            Err(e) => log_skipped(&e),
        }
    }
}
