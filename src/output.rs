//! Output formatting and styling module.
//!
//! Provides the run summaries printed after a rename or copy, the coloured
//! message helpers used by the CLI, and the progress bar shown during bulk
//! operations.

use crate::transfer::{Report, TransferCounts};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// The kind of transfer a summary describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Rename,
    Copy,
}

impl Action {
    /// Past participle used in summaries ("renamed", "copied").
    pub fn done(self) -> &'static str {
        match self {
            Action::Rename => "renamed",
            Action::Copy => "copied",
        }
    }

    /// Label for files left untouched ("unchanged", "not copied").
    pub fn not_done(self) -> &'static str {
        match self {
            Action::Rename => "unchanged",
            Action::Copy => "not copied",
        }
    }
}

/// Three-way classification of a bulk run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
    /// No file was renamed or copied.
    NoneProcessed,
    /// Every candidate was renamed or copied.
    AllProcessed,
    /// Some files were processed, some were not.
    Partial,
}

impl SummaryKind {
    /// Classifies `counts`. An empty run counts as [`SummaryKind::NoneProcessed`].
    pub fn of(counts: &TransferCounts) -> Self {
        if counts.succeeded == 0 {
            SummaryKind::NoneProcessed
        } else if counts.succeeded == counts.total() {
            SummaryKind::AllProcessed
        } else {
            SummaryKind::Partial
        }
    }
}

/// Builds the one-line summary of a bulk run.
///
/// # Example
///
/// ```
/// use mrename::output::{Action, summary_line};
/// use mrename::transfer::TransferCounts;
///
/// let counts = TransferCounts { succeeded: 2, skipped: 1 };
/// assert_eq!(
///     summary_line(Action::Rename, &counts),
///     "3 files processed. 2 renamed. 1 unchanged."
/// );
/// ```
pub fn summary_line(action: Action, counts: &TransferCounts) -> String {
    let detail = match SummaryKind::of(counts) {
        SummaryKind::NoneProcessed => format!("No file {}.", action.done()),
        SummaryKind::AllProcessed => format!("All files {}.", action.done()),
        SummaryKind::Partial => format!(
            "{} {}. {} {}.",
            counts.succeeded,
            action.done(),
            counts.skipped,
            action.not_done()
        ),
    };
    format!("{} files processed. {}", counts.total(), detail)
}

/// Builds the message for a top-level report, if there is anything to say.
///
/// A single file that was processed produces no message.
pub fn report_message(action: Action, report: &Report) -> Option<String> {
    match report {
        Report::Bulk(counts) => Some(summary_line(action, counts)),
        Report::Single(outcome) if outcome.is_success() => None,
        Report::Single(_) => Some(format!("File not {}.", action.done())),
    }
}

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mrename::output::OutputFormatter;
    /// OutputFormatter::error("Please provide a prefix");
    /// ```
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message.red());
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints the outcome of a top-level rename or copy.
    ///
    /// Full success is green, partial runs are yellow warnings, and runs
    /// that changed nothing are plain.
    pub fn report(action: Action, report: &Report) {
        let Some(message) = report_message(action, report) else {
            return;
        };
        match report {
            Report::Bulk(counts) => match SummaryKind::of(counts) {
                SummaryKind::AllProcessed => Self::success(&message),
                SummaryKind::Partial => Self::warning(&message),
                SummaryKind::NoneProcessed => Self::plain(&message),
            },
            Report::Single(_) => Self::plain(&message),
        }
    }

    /// Creates a progress bar for a bulk run over `total` files.
    ///
    /// The bar draws to stderr and stays hidden when stderr is not a terminal.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        pb.set_style(style);
        pb
    }
}
