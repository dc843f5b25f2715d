//! Removal of empty directories after sorting.
//!
//! The sweep is post-order: a directory is checked only after all of its
//! subdirectories have been swept, so a chain of directories that only
//! contained empty directories is removed in one run. The root is never
//! removed.

use crate::file_organizer::{OrganizeError, OrganizeResult};
use crate::stats::Stats;
use crate::walker::{log_skipped, read_root, read_sorted_entries};
use std::fs;
use std::path::Path;
use tracing::info;

/// Deletes every empty directory below a root.
pub struct EmptyFolderSweeper<'a> {
    root: &'a Path,
}

impl<'a> EmptyFolderSweeper<'a> {
    pub fn new(root: &'a Path) -> Self {
        Self { root }
    }

    /// Runs the sweep pass, counting removed directories in `stats`.
    ///
    /// # Errors
    ///
    /// Returns [`OrganizeError::InvalidBasePath`] if the root cannot be listed.
    /// Failures below the root are logged and the directory left in place.
    pub fn run(&self, stats: &mut Stats) -> OrganizeResult<()> {
        for entry in read_root(self.root)? {
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                self.sweep(&entry.path(), stats);
            }
        }
        Ok(())
    }

    fn sweep(&self, dir: &Path, stats: &mut Stats) {
        let entries = match read_sorted_entries(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log_skipped(&e);
                return;
            }
        };

        let mut remaining = 0usize;
        for entry in entries {
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                let child = entry.path();
                self.sweep(&child, stats);
                if child.exists() {
                    remaining += 1;
                }
            } else {
                remaining += 1;
            }
        }

        if remaining > 0 {
            return;
        }

        match fs::remove_dir(dir) {
            Ok(()) => {
                stats.record_empty_folder_removed();
                info!("Deleted empty folder: {}", dir.display());
            }
            Err(e) => log_skipped(&OrganizeError::RemoveDirFailed {
                path: dir.to_path_buf(),
                source: e,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn mkdirs(root: &Path, rels: &[&str]) {
        for rel in rels {
            fs::create_dir_all(root.join(rel)).expect("Failed to create directory");
        }
    }

    #[test]
    fn test_removes_all_empty_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        mkdirs(root, &["a", "b/c", "b/d/e"]);

        let mut stats = Stats::new();
        EmptyFolderSweeper::new(root)
            .run(&mut stats)
            .expect("Sweep failed");

        // a, b, b/c, b/d, b/d/e
        assert_eq!(stats.empty_folders_removed, 5);
        assert!(root.exists(), "root must never be removed");
        assert_eq!(fs::read_dir(root).unwrap().count(), 0);
    }

    #[test]
    fn test_keeps_directories_with_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        mkdirs(root, &["keep/empty", "Misc"]);
        fs::write(root.join("keep/file.xyz"), b"data").unwrap();

        let mut stats = Stats::new();
        EmptyFolderSweeper::new(root)
            .run(&mut stats)
            .expect("Sweep failed");

        assert_eq!(stats.empty_folders_removed, 2);
        assert!(root.join("keep/file.xyz").is_file());
        assert!(!root.join("keep/empty").exists());
        assert!(!root.join("Misc").exists());
    }

    #[test]
    fn test_empty_root_is_left_alone() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mut stats = Stats::new();
        EmptyFolderSweeper::new(temp_dir.path())
            .run(&mut stats)
            .expect("Sweep failed");

        assert!(temp_dir.path().is_dir());
        assert_eq!(stats.empty_folders_removed, 0);
    }

    #[test]
    fn test_unreadable_folder_is_left_and_sweep_continues() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        mkdirs(root, &["b_empty"]);

        let mut stats = Stats::new();
        let sweeper = EmptyFolderSweeper::new(root);
        sweeper.sweep(&root.join("a_missing"), &mut stats);
        assert_eq!(stats.empty_folders_removed, 0);

        sweeper.sweep(&root.join("b_empty"), &mut stats);
        assert_eq!(stats.empty_folders_removed, 1);
        assert!(!root.join("b_empty").exists());
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let mut stats = Stats::new();
        let result = EmptyFolderSweeper::new(Path::new("/non/existent/root")).run(&mut stats);
        assert!(matches!(result, Err(OrganizeError::InvalidBasePath { .. })));
    }
}
