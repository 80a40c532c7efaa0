//! Error handling for the dotforge importer.
//! Defines custom error types and results used throughout the application.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::transpile::TranspileError;

/// Custom error types for importer operations.
///
/// Entry-level failures (a single file that cannot be read, written or
/// transpiled) are caught by the tree walker and converted into counters;
/// the variants here surface either those per-entry causes or run-level
/// failures that terminate the command.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// The source root is missing or is not a directory; fatal for the run
    #[error("source directory '{}' does not exist or is not a directory.", .0.display())]
    SourceRootError(PathBuf),

    /// A single file's template could not be transpiled
    #[error("transpile error in '{}': {}.", .path.display(), .source)]
    TranspileFailed {
        path: PathBuf,
        #[source]
        source: TranspileError,
    },

    /// Represents errors loading or parsing the variable table
    #[error("variable table error: {0}.")]
    VarsError(String),

    /// Represents importer-internal failures outside the other categories
    #[error("import error: {0}.")]
    ImportError(String),
}

/// Convenience type alias for Results with the importer's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
