//! Indicator identifiers and comparison directions

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A single trust signal a package can be evaluated against
///
/// The enumeration is closed; evaluation order comes from the
/// configured indicator mapping, not from declaration order here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndicatorId {
    /// Last-month download count
    Downloads,
    /// Fractional months since last publish
    LastUpdate,
    /// Number of registry maintainers
    Maintainers,
    /// Open issue count on the linked repository
    OpenIssues,
    /// Star count on the linked repository
    Stars,
    /// Watcher count on the linked repository
    Watchers,
    /// Fork count on the linked repository
    Forks,
}

impl IndicatorId {
    /// Every known indicator
    pub const ALL: [IndicatorId; 7] = [
        IndicatorId::Downloads,
        IndicatorId::LastUpdate,
        IndicatorId::Maintainers,
        IndicatorId::OpenIssues,
        IndicatorId::Stars,
        IndicatorId::Watchers,
        IndicatorId::Forks,
    ];

    /// The identifier string used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorId::Downloads => "downloads",
            IndicatorId::LastUpdate => "last-update",
            IndicatorId::Maintainers => "maintainers",
            IndicatorId::OpenIssues => "open-issues",
            IndicatorId::Stars => "stars",
            IndicatorId::Watchers => "watchers",
            IndicatorId::Forks => "forks",
        }
    }

    /// Which side of the threshold flags a package
    ///
    /// Too many open issues or too long since the last publish is the
    /// bad direction for those two; every other indicator measures a
    /// positive signal, where too little is bad.
    pub fn direction(&self) -> Direction {
        match self {
            IndicatorId::OpenIssues | IndicatorId::LastUpdate => Direction::FlagAbove,
            IndicatorId::Downloads
            | IndicatorId::Maintainers
            | IndicatorId::Stars
            | IndicatorId::Watchers
            | IndicatorId::Forks => Direction::FlagBelow,
        }
    }
}

impl std::fmt::Display for IndicatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IndicatorId {
    type Err = UnknownIndicator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IndicatorId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownIndicator(s.to_string()))
    }
}

/// Error for unrecognized indicator identifiers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown indicator: {0}")]
pub struct UnknownIndicator(pub String);

/// Comparison direction for an indicator threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    /// Flag when the observed value is strictly below the threshold
    FlagBelow,
    /// Flag when the observed value is strictly above the threshold
    FlagAbove,
}

impl Direction {
    /// Whether `observed` crosses `threshold` in the unfavorable direction
    pub fn flags(self, observed: f64, threshold: f64) -> bool {
        match self {
            Direction::FlagBelow => observed < threshold,
            Direction::FlagAbove => observed > threshold,
        }
    }
}
