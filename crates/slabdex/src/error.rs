//! Error types for slabdex operations.
//!
//! The taxonomy follows the request lifecycle: queries the caller can
//! fix map to 4xx statuses, backend failures map to 500. Handlers turn
//! any of these into a JSON error payload; no partial results are ever
//! returned alongside an error.

use thiserror::Error;

/// The error type for slabdex operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A malformed or incomplete query, rejected before any fetch.
    #[error("{0}")]
    InvalidQuery(String),

    /// The backing sheet was unreachable or returned undecodable data.
    #[error("Failed to fetch rows from the backing sheet")]
    DataUnavailable(#[from] slabdex_sheet::Error),

    /// Missing or invalid caller identity.
    #[error("{0}")]
    Unauthorized(String),

    /// Username/password pair did not match a stored user.
    ///
    /// Deliberately indistinguishable between "no such user" and
    /// "wrong password".
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Registration attempted with a username or email already taken.
    #[error("Username or email already exists")]
    UserExists,

    /// Handler invoked with an HTTP method it does not serve.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status this error projects to at the handler boundary.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Error::InvalidQuery(_) | Error::UserExists => 400,
            Error::Unauthorized(_) | Error::InvalidCredentials => 401,
            Error::MethodNotAllowed => 405,
            Error::DataUnavailable(_) | Error::Json(_) | Error::Config(_) | Error::Io(_) => 500,
        }
    }
}

/// A specialized Result type for slabdex operations.
pub type Result<T> = std::result::Result<T, Error>;
