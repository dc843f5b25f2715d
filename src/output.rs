//! Output formatting and styling module.
//!
//! All user-facing output goes through [`OutputFormatter`]. Diagnostics
//! (moves, skipped items, deleted folders) are `tracing` events instead and
//! end up on stderr.
//!
//! The run summary is built by [`render_summary`] as plain text so it can be
//! checked without a terminal.

use crate::stats::Stats;
use colored::*;
use humansize::{BINARY, format_size};
use std::fmt;

/// Header line of the run summary.
pub const SUMMARY_HEADER: &str = "--- Analytics Summary ---";

/// Manages CLI output with consistent styling.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints the startup banner.
    pub fn banner() {
        println!("{}", "Welcome to File Sorter Pro!".bold());
        println!("Sort a folder into category subfolders by file extension.\n");
    }

    /// Prints the run summary.
    pub fn summary(stats: &Stats) {
        Self::header(SUMMARY_HEADER);
        print!("{}", render_summary(stats));
    }
}

/// Formats a byte count in binary units ("1.50 KiB").
pub fn human_size(bytes: u64) -> String {
    format_size(bytes, BINARY)
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}

/// Renders the body of the run summary (everything below the header).
///
/// Categories are listed in their declaration order; categories without a
/// moved file are omitted.
///
/// # Example
///
/// ```
/// use filesorter::file_category::Category;
/// use filesorter::output::render_summary;
/// use filesorter::stats::Stats;
///
/// let mut stats = Stats::new();
/// stats.record_move(Category::Images, "photo.JPG", 10);
/// let text = render_summary(&stats);
/// assert!(text.contains("Total files moved: 1"));
/// assert!(text.contains("- Images: 1 file, 10 B"));
/// ```
pub fn render_summary(stats: &Stats) -> String {
    Summary(stats).to_string()
}

struct Summary<'a>(&'a Stats);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.0;
        writeln!(f, "Total files moved: {}", stats.files_moved)?;
        writeln!(f, "Total size moved: {}", human_size(stats.bytes_moved))?;
        if stats.has_largest_file() {
            writeln!(
                f,
                "Largest file: {} ({})",
                stats.largest_file_name,
                human_size(stats.largest_file_bytes)
            )?;
        } else {
            writeln!(f, "Largest file: none")?;
        }
        writeln!(f, "Total empty folders removed: {}", stats.empty_folders_removed)?;
        writeln!(f, "Folders sorted: {}", stats.folders_sorted)?;
        writeln!(f, "Folders skipped: {}", stats.folders_skipped)?;

        let mut active = stats.category_stats.iter().filter(|(_, c)| c.count > 0).peekable();
        if active.peek().is_some() {
            writeln!(f, "\nFiles moved by category:")?;
        }
        for (category, counts) in active {
            writeln!(
                f,
                "- {}: {} {}, {}",
                category,
                counts.count,
                plural(counts.count),
                human_size(counts.bytes)
            )?;
        }
        Ok(())
    }
}
