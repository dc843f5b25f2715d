//! Command-line driver.
//!
//! This module wires the pieces together for one run:
//! - obtain the root folder (argument or interactive prompt)
//! - optionally ask for the sorting mode
//! - run the sort pass, then the empty-folder sweep, over the root
//! - print the summary
//!
//! A pass that cannot access the root is logged and the run continues with
//! the next pass, so the summary is always printed once a root was given.

use crate::config::{CompiledFilters, SortConfig};
use crate::output::OutputFormatter;
use crate::prompt::{Confirm, SortMode, TerminalPrompter};
use crate::stats::Stats;
use crate::sweeper::EmptyFolderSweeper;
use crate::walker::SortWalker;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::error;

/// Errors that end a run before any pass starts.
#[derive(Debug, Error)]
pub enum CliError {
    /// The mode menu was answered with something that is not a listed mode.
    #[error("Invalid choice: please select one of the listed sorting modes")]
    InvalidModeSelection,
    /// No folder path was given on the command line or at the prompt.
    #[error("No folder path given")]
    MissingRootPath,
}

impl CliError {
    /// Process exit status for this error.
    ///
    /// Only an invalid mode selection is a failure; a missing path ends the
    /// run without touching anything.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::InvalidModeSelection => 1,
            CliError::MissingRootPath => 0,
        }
    }
}

/// Loads the configuration, falling back to defaults on error.
pub fn load_config(config_path: Option<&Path>) -> SortConfig {
    SortConfig::load(config_path).unwrap_or_else(|e| {
        OutputFormatter::warning(&format!("{}; using default settings", e));
        SortConfig::default()
    })
}

fn compile_filters(config: &SortConfig) -> CompiledFilters {
    config.compile_filters().unwrap_or_else(|e| {
        OutputFormatter::warning(&format!("{}; no files will be excluded", e));
        CompiledFilters::allow_all()
    })
}

/// Runs the sort pass and then the sweep pass over `root`.
///
/// Neither pass is fatal: if the root cannot be accessed, the failure is
/// logged and the statistics gathered so far are returned.
///
/// # Examples
///
/// ```no_run
/// use filesorter::cli::sort_folder;
/// use filesorter::config::CompiledFilters;
/// use std::path::Path;
///
/// let mut always_yes = |_: &str| true;
/// let stats = sort_folder(Path::new("/data/inbox"), &CompiledFilters::allow_all(), &mut always_yes);
/// println!("moved {} files", stats.files_moved);
/// ```
pub fn sort_folder<C: Confirm + ?Sized>(
    root: &Path,
    filters: &CompiledFilters,
    gate: &mut C,
) -> Stats {
    let mut stats = Stats::new();

    if let Err(e) = SortWalker::new(root, filters, gate).run(&mut stats) {
        error!(operation = e.operation(), "Sort pass aborted: {}", e);
    }

    if let Err(e) = EmptyFolderSweeper::new(root).run(&mut stats) {
        error!(operation = e.operation(), "Empty folder sweep aborted: {}", e);
    }

    stats
}

/// Runs one interactive session with the given prompter and configuration.
///
/// Returns the final statistics after printing the summary.
///
/// # Errors
///
/// Returns [`CliError::MissingRootPath`] if no root was given and none was
/// entered, and [`CliError::InvalidModeSelection`] if the mode menu got an
/// invalid answer. Nothing on disk is touched in either case.
pub fn run_with_prompter<R: BufRead, W: Write>(
    root_arg: Option<PathBuf>,
    config: &SortConfig,
    prompter: &mut TerminalPrompter<R, W>,
) -> Result<Stats, CliError> {
    let root = match root_arg {
        Some(path) => path,
        None => prompter.ask_root_path().ok_or(CliError::MissingRootPath)?,
    };
    OutputFormatter::info(&format!("Path: {}", root.display()));

    if config.menu.show_mode_menu {
        match prompter.select_mode() {
            Some(SortMode::Traditional) => {}
            None => return Err(CliError::InvalidModeSelection),
        }
    }

    let filters = compile_filters(config);
    let stats = sort_folder(&root, &filters, prompter);

    OutputFormatter::summary(&stats);
    OutputFormatter::success("Sorting complete.");
    Ok(stats)
}

/// Runs the CLI on the controlling terminal.
///
/// Configuration is looked up in the usual places (see [`SortConfig::load`]).
pub fn run_cli(root_arg: Option<PathBuf>) -> Result<Stats, CliError> {
    let config = load_config(None);
    let mut prompter = TerminalPrompter::stdio();
    run_with_prompter(root_arg, &config, &mut prompter)
}
