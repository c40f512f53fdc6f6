//! Evaluation output handed to report consumers

use crate::indicator::{Direction, IndicatorId};
use serde::Serialize;

/// A package flagged by one indicator, with the observed metric value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlaggedPackage {
    /// Package name
    pub name: String,
    /// The metric value that crossed the threshold
    pub observed: f64,
}

/// The packages that failed one indicator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorReport {
    /// Indicator this report belongs to
    pub indicator: IndicatorId,
    /// Configured threshold
    pub threshold: f64,
    /// Flagged packages in discovery order
    pub flagged: Vec<FlaggedPackage>,
}

/// A metric fetch that failed for one (package, indicator) pair
///
/// A failed fetch never flags a package; it is reported separately so
/// consumers can tell "trusted" from "unknown".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchFailure {
    /// Package the fetch was issued for
    pub package: String,
    /// Indicator whose pass the failure occurred in
    pub indicator: IndicatorId,
    /// Failure description
    pub error: String,
}

/// Complete output of one evaluation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    /// Suspicious packages in discovery order, duplicate-free
    pub suspicious: Vec<String>,
    /// Per-indicator breakdown; a package appears under at most one
    /// indicator (the first one that flagged it)
    pub breakdown: Vec<IndicatorReport>,
    /// Fetch failures, isolated per (package, indicator) pair
    pub failures: Vec<FetchFailure>,
}

impl EvaluationResult {
    /// Whether `name` was flagged by any indicator
    pub fn is_suspicious(&self, name: &str) -> bool {
        self.suspicious.iter().any(|n| n == name)
    }

    /// One-line summary of the suspicious set
    pub fn summary_line(&self) -> String {
        if self.suspicious.is_empty() {
            "No suspicious packages found".to_string()
        } else {
            format!(
                "{} suspicious package{}: {}",
                self.suspicious.len(),
                if self.suspicious.len() == 1 { "" } else { "s" },
                self.suspicious.join(", ")
            )
        }
    }

    /// Per-indicator lines showing observed value vs. threshold
    ///
    /// e.g. `stars: left-pad (3 < 10)`
    pub fn verbose_lines(&self) -> Vec<String> {
        self.breakdown
            .iter()
            .flat_map(|report| {
                report.flagged.iter().map(move |entry| {
                    let comparison = match report.indicator.direction() {
                        Direction::FlagBelow => '<',
                        Direction::FlagAbove => '>',
                    };
                    format!(
                        "{}: {} ({} {} {})",
                        report.indicator,
                        entry.name,
                        format_metric(entry.observed),
                        comparison,
                        format_metric(report.threshold),
                    )
                })
            })
            .collect()
    }
}

/// Format a metric without a trailing fraction when it is integral
fn format_metric(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
