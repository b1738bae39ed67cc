//! Error types for slabdex-sheet operations.

use std::io;
use thiserror::Error;

/// The error type for slabdex-sheet operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading or writing a tab snapshot.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A range reference that does not follow `Tab!A1:W` notation.
    #[error("Malformed range: {0}")]
    MalformedRange(String),

    /// A snapshot line that is not a JSON array of strings.
    #[error("Invalid snapshot line {line} in tab '{tab}': {reason}")]
    InvalidFormat {
        /// The tab whose snapshot file contains the bad line.
        tab: String,
        /// 1-based line number of the bad line.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
}

/// A specialized Result type for slabdex-sheet operations.
pub type Result<T> = std::result::Result<T, Error>;
