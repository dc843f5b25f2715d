//! Moving classified files into their category folders.
//!
//! A recognized file ends up at `<root>/<Category>/<ext>/<file name>`, where
//! `<ext>` is the lowercase extension without the dot. The category and
//! extension directories are created on demand. Statistics are updated only
//! after the move has succeeded, and an existing file at the destination is
//! never replaced.

use crate::file_category::{Category, extension_of};
use crate::stats::Stats;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while sorting a tree.
///
/// The file mover produces the first group; the walker and the sweeper add
/// the directory-level variants.
#[derive(Debug, Error)]
pub enum OrganizeError {
    /// The root directory path is invalid or doesn't exist.
    #[error("Invalid base path {}: {source}", .path.display())]
    InvalidBasePath { path: PathBuf, source: io::Error },

    /// Failed to create a category or extension directory.
    #[error("Failed to create directory {}: {source}", .path.display())]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },

    /// Failed to move a file into its extension directory.
    #[error("Failed to move {} to {}: {source}", .from.display(), .to.display())]
    FileMoveFailure {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    /// A different file with the same name already sits at the destination.
    #[error("Failed to move {}: {} already exists", .from.display(), .to.display())]
    DestinationExists { from: PathBuf, to: PathBuf },

    /// The file name has no extension to build the destination from.
    #[error("Cannot sort {}: file name has no extension", .path.display())]
    MissingExtension { path: PathBuf },

    /// Failed to list a directory.
    #[error("Failed to read directory {}: {source}", .path.display())]
    ReadDirFailed { path: PathBuf, source: io::Error },

    /// Failed to read an entry's metadata.
    #[error("Failed to get file info for {}: {source}", .path.display())]
    MetadataFailed { path: PathBuf, source: io::Error },

    /// Failed to delete an empty directory.
    #[error("Failed to remove empty directory {}: {source}", .path.display())]
    RemoveDirFailed { path: PathBuf, source: io::Error },
}

impl OrganizeError {
    /// Short name of the filesystem operation that failed, used as a log field.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::InvalidBasePath { .. } => "access_root",
            Self::DirectoryCreationFailed { .. } => "create_dir",
            Self::FileMoveFailure { .. } | Self::DestinationExists { .. } => "rename",
            Self::MissingExtension { .. } => "classify",
            Self::ReadDirFailed { .. } => "read_dir",
            Self::MetadataFailed { .. } => "metadata",
            Self::RemoveDirFailed { .. } => "remove_dir",
        }
    }
}

/// Result type for sorting operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// What happened to a file handed to [`FileOrganizer::move_to_category`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The file was renamed to `destination` and counted.
    Moved { destination: PathBuf },
    /// The file already sits at its sorted location; nothing was done.
    AlreadyInPlace,
}

/// Moves files into `<root>/<Category>/<ext>/` directories.
pub struct FileOrganizer;

impl FileOrganizer {
    /// Returns the directory a file with this name and category belongs in.
    ///
    /// Returns `None` if the name has no extension.
    pub fn destination_dir(root: &Path, file_name: &str, category: Category) -> Option<PathBuf> {
        let ext = extension_of(file_name)?;
        Some(root.join(category.dir_name()).join(ext.to_lowercase()))
    }

    /// Moves a file into its category/extension directory under `root`.
    ///
    /// Missing directories are created. On success the move is recorded in
    /// `stats`; on any failure `stats` is left untouched and the file stays
    /// where it was.
    ///
    /// A file that is already at its destination is reported as
    /// [`MoveOutcome::AlreadyInPlace`] and not counted. A destination occupied
    /// by another file is never overwritten: the move fails with
    /// [`OrganizeError::DestinationExists`].
    ///
    /// # Arguments
    ///
    /// * `file_path` - Full path of the file to move
    /// * `file_name` - The file's name, used for the extension and the destination
    /// * `size_bytes` - Size recorded in the statistics
    /// * `root` - The root folder the category directories live under
    /// * `category` - Category the file was classified as
    /// * `stats` - Statistics to update on success
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use filesorter::file_category::Category;
    /// use filesorter::file_organizer::{FileOrganizer, MoveOutcome};
    /// use filesorter::stats::Stats;
    /// use std::path::Path;
    ///
    /// let mut stats = Stats::new();
    /// let outcome = FileOrganizer::move_to_category(
    ///     Path::new("/data/inbox/photo.JPG"),
    ///     "photo.JPG",
    ///     10,
    ///     Path::new("/data/inbox"),
    ///     Category::Images,
    ///     &mut stats,
    /// );
    ///
    /// match outcome {
    ///     Ok(MoveOutcome::Moved { destination }) => println!("Moved to {}", destination.display()),
    ///     Ok(MoveOutcome::AlreadyInPlace) => {}
    ///     Err(e) => eprintln!("{}", e),
    /// }
    /// ```
    pub fn move_to_category(
        file_path: &Path,
        file_name: &str,
        size_bytes: u64,
        root: &Path,
        category: Category,
        stats: &mut Stats,
    ) -> OrganizeResult<MoveOutcome> {
        if !root.is_dir() {
            return Err(OrganizeError::InvalidBasePath {
                path: root.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "base path is not a directory"),
            });
        }

        let target_dir = Self::destination_dir(root, file_name, category).ok_or_else(|| {
            OrganizeError::MissingExtension {
                path: file_path.to_path_buf(),
            }
        })?;
        let destination = target_dir.join(file_name);

        if destination == file_path {
            return Ok(MoveOutcome::AlreadyInPlace);
        }

        fs::create_dir_all(&target_dir).map_err(|e| OrganizeError::DirectoryCreationFailed {
            path: target_dir.clone(),
            source: e,
        })?;

        match place_new(file_path, &destination) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(OrganizeError::DestinationExists {
                    from: file_path.to_path_buf(),
                    to: destination,
                });
            }
            Err(e) => {
                return Err(OrganizeError::FileMoveFailure {
                    from: file_path.to_path_buf(),
                    to: destination,
                    source: e,
                });
            }
        }

        stats.record_move(category, file_name, size_bytes);
        debug!(
            from = %file_path.display(),
            to = %destination.display(),
            category = %category,
            bytes = size_bytes,
            "moved file"
        );

        Ok(MoveOutcome::Moved { destination })
    }
}

/// Moves `from` to `to`, failing with `AlreadyExists` if anything is at `to`.
///
/// The hard link claims `to` atomically, so a file that appears there
/// concurrently is never replaced. Filesystems without hard links get a
/// checked rename, which has a window between the check and the rename.
fn place_new(from: &Path, to: &Path) -> io::Result<()> {
    match fs::hard_link(from, to) {
        Ok(()) => fs::remove_file(from).inspect_err(|_| {
            // undo the link so the file is not left under two names
            let _ = fs::remove_file(to);
        }),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Err(e),
        Err(_) => {
            // symlink_metadata so a dangling link at the destination still counts as taken
            if fs::symlink_metadata(to).is_ok() {
                return Err(io::ErrorKind::AlreadyExists.into());
            }
            fs::rename(from, to)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(path: &Path, content: &[u8]) {
        fs::write(path, content).expect("Failed to write test file");
    }

    #[test]
    fn test_move_creates_category_and_extension_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        let file_path = root.join("photo.JPG");
        write_file(&file_path, b"0123456789");

        let mut stats = Stats::new();
        let outcome = FileOrganizer::move_to_category(
            &file_path,
            "photo.JPG",
            10,
            root,
            Category::Images,
            &mut stats,
        )
        .expect("Failed to move file");

        let expected = root.join("Images").join("jpg").join("photo.JPG");
        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                destination: expected.clone()
            }
        );
        assert!(root.join("Images").is_dir());
        assert!(root.join("Images").join("jpg").is_dir());
        assert!(expected.is_file());
        assert!(!file_path.exists());

        assert_eq!(stats.files_moved, 1);
        assert_eq!(stats.bytes_moved, 10);
        assert_eq!(stats.largest_file_name, "photo.JPG");
    }

    #[test]
    fn test_move_uses_existing_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        let ext_dir = root.join("Documents").join("txt");
        fs::create_dir_all(&ext_dir).expect("Failed to create extension directory");
        write_file(&ext_dir.join("old.txt"), b"old");

        let file_path = root.join("notes.txt");
        write_file(&file_path, b"hello");

        let mut stats = Stats::new();
        FileOrganizer::move_to_category(
            &file_path,
            "notes.txt",
            5,
            root,
            Category::Documents,
            &mut stats,
        )
        .expect("Failed to move file");

        assert!(ext_dir.join("notes.txt").is_file());
        assert!(ext_dir.join("old.txt").is_file());
        assert_eq!(stats.files_moved, 1);
    }

    #[test]
    fn test_move_from_nested_directory_goes_under_root() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        let nested = root.join("a").join("b");
        fs::create_dir_all(&nested).expect("Failed to create nested directory");
        let file_path = nested.join("song.mp3");
        write_file(&file_path, b"la");

        let mut stats = Stats::new();
        FileOrganizer::move_to_category(&file_path, "song.mp3", 2, root, Category::Music, &mut stats)
            .expect("Failed to move file");

        assert!(root.join("Music").join("mp3").join("song.mp3").is_file());
        assert!(!file_path.exists());
    }

    #[test]
    fn test_move_collision_fails_without_overwriting() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        let ext_dir = root.join("Codes").join("json");
        fs::create_dir_all(&ext_dir).expect("Failed to create extension directory");
        write_file(&ext_dir.join("data.json"), b"existing");

        let sub = root.join("sub");
        fs::create_dir(&sub).expect("Failed to create subdirectory");
        let file_path = sub.join("data.json");
        write_file(&file_path, b"incoming");

        let mut stats = Stats::new();
        let result = FileOrganizer::move_to_category(
            &file_path,
            "data.json",
            8,
            root,
            Category::Codes,
            &mut stats,
        );

        assert!(matches!(
            result,
            Err(OrganizeError::DestinationExists { .. })
        ));
        assert!(file_path.is_file(), "source must stay in place");
        assert_eq!(
            fs::read(ext_dir.join("data.json")).expect("Failed to read destination"),
            b"existing"
        );
        assert_eq!(stats, Stats::new());
    }

    #[test]
    fn test_move_already_in_place_is_noop() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        let ext_dir = root.join("Archives").join("zip");
        fs::create_dir_all(&ext_dir).expect("Failed to create extension directory");
        let file_path = ext_dir.join("bundle.zip");
        write_file(&file_path, b"PK");

        let mut stats = Stats::new();
        let outcome = FileOrganizer::move_to_category(
            &file_path,
            "bundle.zip",
            2,
            root,
            Category::Archives,
            &mut stats,
        )
        .expect("Same-path move should not fail");

        assert_eq!(outcome, MoveOutcome::AlreadyInPlace);
        assert!(file_path.is_file());
        assert_eq!(stats.files_moved, 0);
    }

    #[test]
    fn test_move_blocked_by_file_named_like_category() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        write_file(&root.join("Books"), b"not a directory");
        let file_path = root.join("novel.epub");
        write_file(&file_path, b"epub");

        let mut stats = Stats::new();
        let result = FileOrganizer::move_to_category(
            &file_path,
            "novel.epub",
            4,
            root,
            Category::Books,
            &mut stats,
        );

        let err = result.expect_err("Directory creation should fail");
        assert_eq!(err.operation(), "create_dir");
        assert!(file_path.is_file());
        assert_eq!(stats.files_moved, 0);
    }

    #[test]
    fn test_move_invalid_base_path() {
        let mut stats = Stats::new();
        let result = FileOrganizer::move_to_category(
            Path::new("/non/existent/root/file.txt"),
            "file.txt",
            1,
            Path::new("/non/existent/root"),
            Category::Documents,
            &mut stats,
        );
        assert!(matches!(result, Err(OrganizeError::InvalidBasePath { .. })));
    }

    #[test]
    fn test_move_of_vanished_source_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        let file_path = root.join("gone.pdf");

        let mut stats = Stats::new();
        let result = FileOrganizer::move_to_category(
            &file_path,
            "gone.pdf",
            1,
            root,
            Category::Documents,
            &mut stats,
        );

        let err = result.expect_err("Moving a missing file should fail");
        assert!(matches!(err, OrganizeError::FileMoveFailure { .. }));
        assert_eq!(err.operation(), "rename");
        assert!(!root.join("Documents/pdf/gone.pdf").exists());
        assert_eq!(stats, Stats::new());
    }

    #[test]
    fn test_place_new_never_replaces_destination() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let from = temp_dir.path().join("incoming.txt");
        let to = temp_dir.path().join("taken.txt");
        write_file(&from, b"incoming");
        write_file(&to, b"taken");

        let err = place_new(&from, &to).expect_err("Occupied destination should fail");
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read(&from).expect("Failed to read source"), b"incoming");
        assert_eq!(fs::read(&to).expect("Failed to read destination"), b"taken");
    }

    #[test]
    fn test_place_new_moves_into_free_destination() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let from = temp_dir.path().join("a.txt");
        let to = temp_dir.path().join("b.txt");
        write_file(&from, b"content");

        place_new(&from, &to).expect("Failed to place file");
        assert!(!from.exists());
        assert_eq!(fs::read(&to).expect("Failed to read destination"), b"content");
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_blocks_move() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        let ext_dir = root.join("Images").join("gif");
        fs::create_dir_all(&ext_dir).expect("Failed to create extension directory");
        std::os::unix::fs::symlink(root.join("nowhere"), ext_dir.join("anim.gif"))
            .expect("Failed to create symlink");
        let file_path = root.join("anim.gif");
        write_file(&file_path, b"GIF89a");

        let mut stats = Stats::new();
        let result = FileOrganizer::move_to_category(
            &file_path,
            "anim.gif",
            6,
            root,
            Category::Images,
            &mut stats,
        );

        assert!(matches!(result, Err(OrganizeError::DestinationExists { .. })));
        assert!(file_path.is_file());
        assert!(fs::symlink_metadata(ext_dir.join("anim.gif")).is_ok());
    }

    #[test]
    fn test_destination_dir_lowercases_extension() {
        let dir = FileOrganizer::destination_dir(Path::new("/r"), "Clip.MOV", Category::Videos);
        assert_eq!(dir, Some(PathBuf::from("/r/Videos/mov")));
        assert_eq!(
            FileOrganizer::destination_dir(Path::new("/r"), "README", Category::Documents),
            None
        );
    }
}
