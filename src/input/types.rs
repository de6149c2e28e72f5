use std::path::PathBuf;

use thiserror::Error;

/// Failures while preparing a catalog file for parsing.
#[derive(Error, Debug)]
pub enum InputError {
    /// The file could not be read.
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog tool rejected the file.
    #[error("'{}' is not a valid catalog:\n{stderr}", path.display())]
    BrokenCatalog { path: PathBuf, stderr: String },

    /// The catalog tool could not be run or produced unusable output.
    #[error("Failed to run '{program}': {message}")]
    Preprocess { program: String, message: String },
}
