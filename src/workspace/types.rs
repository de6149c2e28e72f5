//! Workspace type definitions.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::MatcherError;
use crate::lint::{
    CheckReport,
    LintError,
};

#[derive(Error, Debug)]
pub enum WorkspaceError {
    /// A path given on the command line does not exist
    #[error("No such file or directory: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error(transparent)]
    Matcher(#[from] MatcherError),

    /// The semaphore limiting parallel checks was closed
    #[error("Check scheduler closed: {0}")]
    SchedulerClosed(#[from] tokio::sync::AcquireError),

    /// A check task panicked or was cancelled
    #[error("Check task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result of checking one file.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<CheckReport, LintError>,
}

/// Totals over every checked file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub errors: usize,
    pub warnings: usize,
    /// Files whose check aborted.
    pub failures: usize,
}

impl RunSummary {
    #[must_use]
    pub fn from_outcomes(outcomes: &[FileOutcome]) -> Self {
        outcomes.iter().fold(Self::default(), |mut summary, outcome| {
            summary.files += 1;
            match &outcome.result {
                Ok(report) => {
                    summary.errors += report.errors;
                    summary.warnings += report.warnings;
                }
                Err(_) => summary.failures += 1,
            }
            summary
        })
    }

    /// Process exit status: every finding and failure counts one, capped at 255.
    #[must_use]
    pub fn exit_status(&self) -> u8 {
        let total = self.errors.saturating_add(self.warnings).saturating_add(self.failures);
        u8::try_from(total).unwrap_or(u8::MAX)
    }
}
