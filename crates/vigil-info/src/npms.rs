//! npms.io metadata aggregator client and per-indicator extractors
//!
//! One aggregator response feeds five indicators (stars, maintainers,
//! open issues, watchers, forks), which is why [`fetch_collected`] is
//! the call the response cache wraps.

use crate::client::{encode_package_name, HttpClient};
use crate::endpoints::Endpoints;
use crate::error::{Error, Result};
use serde::Deserialize;

/// Envelope returned by `GET /package/{name}`
#[derive(Debug, Deserialize)]
struct NpmsResponse {
    collected: CollectedMetadata,
}

/// The `collected` section of an npms.io package response
#[derive(Debug, Clone, Deserialize)]
pub struct CollectedMetadata {
    /// GitHub-derived signals; absent when the package has no linked repo
    #[serde(default)]
    pub github: Option<GithubStats>,
    /// Registry metadata collected by npms.io
    #[serde(default)]
    pub metadata: Option<NpmsMetadata>,
}

/// GitHub signals for a package's linked repository
#[derive(Debug, Clone, Deserialize)]
pub struct GithubStats {
    /// Star count
    #[serde(default, rename = "starsCount")]
    pub stars_count: Option<f64>,
    /// Fork count
    #[serde(default, rename = "forksCount")]
    pub forks_count: Option<f64>,
    /// Watcher (subscriber) count
    #[serde(default, rename = "subscribersCount")]
    pub subscribers_count: Option<f64>,
    /// Open-issue statistics
    #[serde(default)]
    pub issues: Option<IssueStats>,
}

/// Open-issue statistics from the GitHub section
#[derive(Debug, Clone, Deserialize)]
pub struct IssueStats {
    /// Open issue count
    #[serde(default)]
    pub count: Option<f64>,
}

/// Registry metadata from the npms.io payload
#[derive(Debug, Clone, Deserialize)]
pub struct NpmsMetadata {
    /// Maintainer entries; only the length is used
    #[serde(default)]
    pub maintainers: Option<Vec<Maintainer>>,
}

/// A single maintainer entry
#[derive(Debug, Clone, Deserialize)]
pub struct Maintainer {
    /// npm username
    #[serde(default)]
    pub username: Option<String>,
}

/// Fetch the aggregated metadata payload for `name`
pub async fn fetch_collected(
    client: &HttpClient,
    endpoints: &Endpoints,
    name: &str,
) -> Result<CollectedMetadata> {
    let encoded = encode_package_name(name)?;
    let url = format!("{}/package/{}", endpoints.npms_api, encoded);
    let response: NpmsResponse = client.get_json(&url, name).await?;
    Ok(response.collected)
}

fn github<'a>(collected: &'a CollectedMetadata, package: &str) -> Result<&'a GithubStats> {
    collected
        .github
        .as_ref()
        .ok_or_else(|| Error::missing_field(package, "collected.github"))
}

/// GitHub star count
pub fn stars(collected: &CollectedMetadata, package: &str) -> Result<f64> {
    github(collected, package)?
        .stars_count
        .ok_or_else(|| Error::missing_field(package, "collected.github.starsCount"))
}

/// GitHub fork count
pub fn forks(collected: &CollectedMetadata, package: &str) -> Result<f64> {
    github(collected, package)?
        .forks_count
        .ok_or_else(|| Error::missing_field(package, "collected.github.forksCount"))
}

/// GitHub watcher count
pub fn watchers(collected: &CollectedMetadata, package: &str) -> Result<f64> {
    github(collected, package)?
        .subscribers_count
        .ok_or_else(|| Error::missing_field(package, "collected.github.subscribersCount"))
}

/// GitHub open-issue count
pub fn open_issue_count(collected: &CollectedMetadata, package: &str) -> Result<f64> {
    github(collected, package)?
        .issues
        .as_ref()
        .and_then(|issues| issues.count)
        .ok_or_else(|| Error::missing_field(package, "collected.github.issues.count"))
}

/// Number of registry maintainers
pub fn maintainer_count(collected: &CollectedMetadata, package: &str) -> Result<f64> {
    collected
        .metadata
        .as_ref()
        .ok_or_else(|| Error::missing_field(package, "collected.metadata"))?
        .maintainers
        .as_ref()
        .map(|maintainers| maintainers.len() as f64)
        .ok_or_else(|| Error::missing_field(package, "collected.metadata.maintainers"))
}
