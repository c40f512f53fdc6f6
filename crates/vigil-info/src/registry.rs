//! npm registry client: months since last publish

use crate::client::{encode_package_name, HttpClient};
use crate::endpoints::Endpoints;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Approximate month length in milliseconds, kept from the original
/// audit tooling so thresholds expressed in months keep their meaning
const APPROX_MONTH_MS: f64 = 2_500_000_000.0;

#[derive(Debug, Deserialize)]
struct RegistryResponse {
    #[serde(default)]
    time: Option<TimeInfo>,
}

#[derive(Debug, Deserialize)]
struct TimeInfo {
    #[serde(default)]
    modified: Option<String>,
}

/// Fetch the fractional months elapsed since `name` was last published
///
/// Not cached: only the `last-update` indicator consumes this endpoint.
pub async fn fetch_months_since_update(
    client: &HttpClient,
    endpoints: &Endpoints,
    name: &str,
) -> Result<f64> {
    let encoded = encode_package_name(name)?;
    let url = format!("{}/{}", endpoints.registry, encoded);
    let response: RegistryResponse = client.get_json(&url, name).await?;

    let modified = response
        .time
        .and_then(|time| time.modified)
        .ok_or_else(|| Error::missing_field(name, "time.modified"))?;

    let modified_at: DateTime<Utc> = modified
        .parse()
        .map_err(|e| Error::upstream(name, format!("invalid time.modified '{modified}': {e}")))?;

    Ok(months_since(modified_at, Utc::now()))
}

/// Elapsed time between `then` and `now` in approximate months
pub fn months_since(then: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let elapsed_ms = (now - then).num_milliseconds() as f64;
    elapsed_ms / APPROX_MONTH_MS
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_months_since_one_31_day_month() {
        let now = Utc::now();
        let then = now - Duration::days(31);
        // 31 days against the approximate month constant: the same
        // ~1.07 the original tooling produced.
        let months = months_since(then, now);
        assert!((months - 1.071).abs() < 0.005, "got {months}");
    }

    #[test]
    fn test_months_since_is_fractional() {
        let now = Utc::now();
        let then = now - Duration::days(14);
        let months = months_since(then, now);
        assert!(months > 0.0 && months < 1.0, "got {months}");
    }
}
