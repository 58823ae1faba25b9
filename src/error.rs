//! Error types for carkeep.
//!
//! Missing cars and out-of-range task positions are not errors: the
//! operations report them as "nothing changed". What ends up here is I/O,
//! a persisted document that does not parse, and terminal failures.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for carkeep operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The persisted dataset exists but is not a valid document.
    #[error("failed to parse dataset at {path}: {source}")]
    Parse {
        /// Path to the dataset file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The dataset could not be serialized.
    #[error("failed to serialize dataset: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Reading a source image or writing it into the uploads directory failed.
    #[error("failed to store image {path}: {source}")]
    Upload {
        /// The file that could not be read or written.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Setting up or drawing the interactive view failed.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for carkeep operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new terminal error.
    #[must_use]
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal(message.into())
    }

    /// Check if this error means the dataset file is corrupt.
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let source = serde_json::from_str::<i32>("{").unwrap_err();
        let err = Error::Parse {
            path: PathBuf::from("/tmp/garage.json"),
            source,
        };
        assert!(err.is_parse_error());
        assert!(err.to_string().contains("/tmp/garage.json"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(!err.is_parse_error());
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_terminal_error() {
        let err = Error::terminal("raw mode unavailable");
        assert_eq!(err.to_string(), "terminal error: raw mode unavailable");
    }
}
