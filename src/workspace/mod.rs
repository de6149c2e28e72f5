//! Multi-file runs: discovery and parallel checking.

mod discovery;
mod runner;
mod types;

pub use discovery::discover_catalogs;
pub use runner::check_files;
pub use types::{
    FileOutcome,
    RunSummary,
    WorkspaceError,
};
