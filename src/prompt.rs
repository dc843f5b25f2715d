//! Interactive collaborators: the per-folder confirmation gate, the
//! sorting-mode menu and the root path prompt.
//!
//! The sort pass only needs [`Confirm`], so tests can drive it with a closure
//! instead of a terminal.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Answers yes/no questions.
///
/// Any `FnMut(&str) -> bool` is a `Confirm`, which is how tests script
/// answers.
pub trait Confirm {
    /// Asks `question` and returns true for "yes".
    fn confirm(&mut self, question: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, question: &str) -> bool {
        self(question)
    }
}

/// Question asked before descending into a subdirectory.
pub fn folder_question(path: &std::path::Path) -> String {
    format!("Do you want to sort files in the folder: {}?", path.display())
}

/// Sorting strategies offered by the startup menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// Sort by extension into `<Category>/<ext>/` folders.
    Traditional,
}

impl SortMode {
    /// Every selectable mode, in menu order (menu numbers start at 1).
    pub const ALL: [SortMode; 1] = [SortMode::Traditional];

    pub fn label(&self) -> &'static str {
        match self {
            SortMode::Traditional => "Traditional Sorting",
        }
    }

    /// Maps a 1-based menu number to a mode.
    pub fn from_choice(choice: usize) -> Option<Self> {
        choice
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx).copied())
    }
}

/// Reads answers from a line-oriented input and writes prompts to an output.
///
/// [`TerminalPrompter::stdio`] binds it to the process's stdin and stdout.
/// Every read blocks until a full line (or end of input) arrives.
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompter<io::StdinLock<'static>, io::Stdout> {
    /// A prompter on the controlling terminal.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Reads one line, returning `None` at end of input or on a read error.
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line),
        }
    }

    fn prompt(&mut self, text: &str) {
        // a broken stdout must not stop the prompt from reading its answer
        let _ = write!(self.output, "{}", text);
        let _ = self.output.flush();
    }

    /// Asks for the root folder. Returns `None` on end of input or a blank line.
    pub fn ask_root_path(&mut self) -> Option<PathBuf> {
        self.prompt("Enter the path to the folder:\n");
        let line = self.read_line()?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(PathBuf::from(trimmed))
        }
    }

    /// Shows the numbered mode menu and reads one choice.
    ///
    /// Returns `None` if the answer is not the number of a listed mode.
    pub fn select_mode(&mut self) -> Option<SortMode> {
        let mut menu = String::from("Select sorting mode:\n");
        for (idx, mode) in SortMode::ALL.iter().enumerate() {
            menu.push_str(&format!("{}. {}\n", idx + 1, mode.label()));
        }
        menu.push_str(&format!("Enter your choice (1-{}): ", SortMode::ALL.len()));
        self.prompt(&menu);

        let line = self.read_line()?;
        line.trim()
            .parse::<usize>()
            .ok()
            .and_then(SortMode::from_choice)
    }
}

impl<R: BufRead, W: Write> Confirm for TerminalPrompter<R, W> {
    /// Only `y` (any case, surrounding whitespace ignored) is a yes.
    fn confirm(&mut self, question: &str) -> bool {
        self.prompt(&format!("{} (y/n): ", question));
        self.read_line()
            .map(|answer| answer.trim().eq_ignore_ascii_case("y"))
            .unwrap_or(false)
    }
}
