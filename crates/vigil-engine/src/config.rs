//! Engine configuration with documented defaults
//!
//! Configuration is validated once, at construction, with typed errors
//! raised before any network call is made.

use crate::indicator::IndicatorId;
use serde_json::Value;
use std::num::NonZeroU32;
use std::time::Duration;
use thiserror::Error;
use vigil_deps::AllowList;
use vigil_info::Endpoints;

/// Result alias for configuration validation
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Errors raised while validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Indicator configuration is not a JSON object
    #[error("Indicator configuration must be a JSON object")]
    NotAnObject,

    /// Threshold for a known indicator is missing or not numeric
    #[error("Threshold for indicator '{0}' must be a number")]
    InvalidThreshold(String),

    /// Allow-list is malformed
    #[error(transparent)]
    AllowList(#[from] vigil_deps::Error),

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// Ordered indicator-to-threshold configuration
///
/// Evaluation order is the insertion order of this mapping; later
/// indicators only examine packages not already flagged, so the order
/// determines which indicator a package is attributed to.
#[derive(Debug, Clone, Default)]
pub struct IndicatorConfig {
    entries: Vec<(IndicatorId, f64)>,
}

impl IndicatorConfig {
    /// Build from typed pairs; a duplicate indicator keeps its first
    /// threshold
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (IndicatorId, f64)>,
    {
        let mut config = Self::default();
        for (id, threshold) in entries {
            config.push(id, threshold);
        }
        config
    }

    /// Build from a JSON object mapping identifier strings to thresholds
    ///
    /// Unknown identifiers are ignored. A known identifier with a
    /// non-numeric threshold is a configuration error. Key order is the
    /// document's order.
    pub fn from_json(value: &Value) -> ConfigResult<Self> {
        let object = value.as_object().ok_or(ConfigError::NotAnObject)?;

        let mut config = Self::default();
        for (key, threshold) in object {
            let Ok(id) = key.parse::<IndicatorId>() else {
                tracing::warn!(indicator = %key, "ignoring unknown indicator");
                continue;
            };
            let threshold = threshold
                .as_f64()
                .ok_or_else(|| ConfigError::InvalidThreshold(key.clone()))?;
            config.push(id, threshold);
        }
        Ok(config)
    }

    fn push(&mut self, id: IndicatorId, threshold: f64) {
        if !self.entries.iter().any(|(existing, _)| *existing == id) {
            self.entries.push((id, threshold));
        }
    }

    /// Configured entries in evaluation order
    pub fn entries(&self) -> &[(IndicatorId, f64)] {
        &self.entries
    }

    /// The threshold configured for `id`, if any
    pub fn threshold(&self, id: IndicatorId) -> Option<f64> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, threshold)| *threshold)
    }

    /// Number of configured indicators
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no indicators are configured
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Engine construction options
///
/// Every field except `indicators` has a default: the allow-list
/// defaults to the tool's own package names, endpoints to production,
/// the timeout to 30 seconds, and rate limiting to off.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Indicators to evaluate, in evaluation order
    pub indicators: IndicatorConfig,
    /// Packages never evaluated
    pub allow_list: AllowList,
    /// Upstream base URLs
    pub endpoints: Endpoints,
    /// Per-request timeout
    pub timeout: Duration,
    /// Optional client-side cap on the upstream request rate
    pub requests_per_second: Option<NonZeroU32>,
}

impl EngineConfig {
    /// Configuration with defaults for everything but the indicators
    pub fn new(indicators: IndicatorConfig) -> Self {
        Self {
            indicators,
            allow_list: AllowList::default(),
            endpoints: Endpoints::default(),
            timeout: vigil_info::DEFAULT_TIMEOUT,
            requests_per_second: None,
        }
    }
}
