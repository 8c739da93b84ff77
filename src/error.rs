//! Error types shared across the crate.

use crate::edit::EditError;
use crate::file::FileError;

/// Errors surfaced by comparison, merge, conversion and edit operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A source or edit target could not be opened.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A source file had no lines left after blank lines were dropped.
    #[error("The file \"{0}\" is empty")]
    EmptyFile(String),

    /// A source file was not valid UTF-8.
    #[error("Invalid UTF-8 in file: {0}")]
    InvalidUtf8(String),

    /// The external converter could not be started or exited non-zero.
    #[error("Failed to convert file: {path}: {reason}")]
    ConversionFailed { path: String, reason: String },

    /// A fixed-capacity output area cannot hold the text plus its terminator.
    #[error("Buffer size too small: need {needed} bytes, have {capacity}")]
    BufferTooSmall { needed: usize, capacity: usize },

    /// The output path could not be written.
    #[error("Unable to open file \"{path}\" for writing: {reason}")]
    WriteError { path: String, reason: String },

    /// A merge choice other than the two accepted tokens.
    #[error("Invalid choice: {0:?}")]
    InvalidSelection(String),

    /// A line edit was rejected before touching the file.
    #[error(transparent)]
    Edit(#[from] EditError),

    /// The input stream ended while an answer was still required.
    #[error("Input closed while waiting for: {0}")]
    InputClosed(String),

    /// The configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<FileError> for Error {
    fn from(err: FileError) -> Self {
        match err {
            FileError::NotFound(path) => Error::FileNotFound(path),
            FileError::Empty(path) => Error::EmptyFile(path),
            FileError::InvalidUtf8(path) => Error::InvalidUtf8(path),
        }
    }
}

/// Convenience alias for crate results.
pub type Result<T> = std::result::Result<T, Error>;
