//! Error types for veer

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised at the fallible edges of the crate: candidate sources,
/// configuration files and argument validation.
///
/// The swipe engine itself never returns these; abnormal engine inputs are
/// absorbed as no-ops.
#[derive(Error, Debug)]
pub enum VeerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    InvalidConfig { field: String, message: String },

    #[error("Duplicate candidate identity: {0}")]
    DuplicateCandidate(String),

    #[error("Candidate source contains no candidates: {}", .0.display())]
    EmptySource(PathBuf),
}

pub type Result<T, E = VeerError> = std::result::Result<T, E>;
