use std::path::PathBuf;

use crate::manager::WriteOutcome;

/// Errors related to configuration loading and parsing.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config at {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Errors surfaced by enrollment operations (reload, submit, delete).
///
/// The view layer renders these in the status bar; headless commands print
/// them and exit non-zero.
#[derive(Debug, thiserror::Error)]
pub enum EnrollmentError {
    /// Transport failure, non-2xx status, or an undecodable response body.
    #[error("Request {method} {url} failed: {message}")]
    Network {
        method: String,
        url: String,
        message: String,
    },

    /// A selection or id references something absent from the loaded data.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// The form is incomplete or holds a malformed value.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The write was committed but the reload that follows it failed.
    #[error("{outcome}; reload failed: {source}")]
    ReloadAfterWrite {
        outcome: WriteOutcome,
        source: Box<EnrollmentError>,
    },
}

impl EnrollmentError {
    /// The committed write, if this error came from the reload after it.
    pub fn committed_write(&self) -> Option<WriteOutcome> {
        match self {
            EnrollmentError::ReloadAfterWrite { outcome, .. } => Some(*outcome),
            _ => None,
        }
    }
}
