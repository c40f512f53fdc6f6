//! Error types for vigil-deps

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using vigil-deps Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading manifests or building candidate sets
#[derive(Debug, Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Manifest file not found
    #[error("Manifest file not found: {0}")]
    FileNotFound(PathBuf),

    /// Allow-list contains an empty or blank entry
    #[error("Allow-list entries must be non-empty package names")]
    EmptyAllowListEntry,
}
