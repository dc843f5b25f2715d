//! filesorter - interactive category-based folder sorting
//!
//! This library sorts the files of a directory tree into
//! `<root>/<Category>/<ext>/` folders by file extension, asking before it
//! descends into each subdirectory, then removes the directories left empty
//! and reports what it did.

pub mod cli;
pub mod config;
pub mod file_category;
pub mod file_organizer;
pub mod output;
pub mod prompt;
pub mod stats;
pub mod sweeper;
pub mod walker;

pub use cli::{CliError, run_cli, sort_folder};
pub use config::{CompiledFilters, ConfigError, SortConfig};
pub use file_category::{Category, classify};
pub use file_organizer::{FileOrganizer, MoveOutcome, OrganizeError};
pub use prompt::{Confirm, SortMode, TerminalPrompter};
pub use stats::{CategoryStats, Stats};
pub use sweeper::EmptyFolderSweeper;
pub use walker::SortWalker;
