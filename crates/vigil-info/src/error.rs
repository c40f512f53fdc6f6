//! Error types for vigil-info

use thiserror::Error;

/// Result type alias for vigil-info operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from upstream metric providers
///
/// The enum is `Clone` so the response cache can hand the same failure
/// to every caller sharing a cached fetch; transport errors are
/// captured as text at the HTTP boundary for that reason.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Package name is empty or blank
    #[error("Invalid package name: {0:?}")]
    InvalidPackageName(String),

    /// Package not found upstream (HTTP 404)
    #[error("Package '{0}' not found upstream")]
    PackageNotFound(String),

    /// Network failure, non-2xx response, or malformed payload
    #[error("Upstream request for '{package}' failed: {reason}")]
    Upstream {
        /// Package the request was issued for
        package: String,
        /// Human-readable failure description
        reason: String,
    },

    /// Well-formed response lacking an expected field
    #[error("Upstream response for '{package}' is missing field '{field}'")]
    MissingField {
        /// Package the response belongs to
        package: String,
        /// Dotted path of the absent field
        field: String,
    },

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl Error {
    pub(crate) fn upstream(package: &str, reason: impl std::fmt::Display) -> Self {
        Self::Upstream {
            package: package.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn missing_field(package: &str, field: &str) -> Self {
        Self::MissingField {
            package: package.to_string(),
            field: field.to_string(),
        }
    }
}
