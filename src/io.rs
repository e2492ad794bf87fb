//! File input/output and reporting.

pub mod utils;

use indicatif::{ProgressBar, ProgressStyle};

/// How to handle existing files when writing output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverwriteMode {
    Ask,
    Always,
    Never,
}

/// How much non-critical information to print while working.
#[derive(Clone, Debug)]
pub enum Verbosity {
    Quiet,
    Messages,
    Progress(ProgressStyle),
}

impl Verbosity {
    /// Whether status messages should be printed.
    pub fn print_messages(&self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Creates a progress bar for the given number of items, which is hidden
    /// unless progress should be shown.
    pub fn create_progress_bar(&self, len: usize) -> ProgressBar {
        match self {
            Self::Progress(style) => ProgressBar::new(len as u64).with_style(style.clone()),
            _ => ProgressBar::hidden(),
        }
    }
}
