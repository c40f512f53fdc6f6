//! # vigil-info
//!
//! Upstream metric providers for the vigil suspicious-dependency audit.
//!
//! Three upstream services are consumed:
//! - the npms.io metadata aggregator (stars, forks, watchers, open
//!   issues, maintainers — one response feeds all five, memoized per
//!   run through [`PackageDataCache`])
//! - the npm download statistics API (last-month download count)
//! - the npm registry (months since last publish)
//!
//! # Example
//!
//! ```no_run
//! use vigil_info::{MetricsClient, PackageDataCache};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MetricsClient::new()?;
//!     let cache = PackageDataCache::new();
//!
//!     let collected = client.collected(&cache, "left-pad").await?;
//!     println!("stars: {}", vigil_info::npms::stars(&collected, "left-pad")?);
//!     println!("downloads: {}", client.download_count("left-pad").await?);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod client;
pub mod downloads;
pub mod endpoints;
pub mod error;
pub mod npms;
pub mod registry;

pub use cache::PackageDataCache;
pub use client::{HttpClient, DEFAULT_TIMEOUT};
pub use endpoints::Endpoints;
pub use error::{Error, Result};
pub use npms::{CollectedMetadata, GithubStats, IssueStats, Maintainer, NpmsMetadata};

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// Facade over the three upstream services
#[derive(Debug, Clone)]
pub struct MetricsClient {
    http: HttpClient,
    endpoints: Endpoints,
}

impl MetricsClient {
    /// Create a client against the production endpoints, without rate
    /// limiting (an audit run is a short burst)
    pub fn new() -> Result<Self> {
        Ok(Self {
            http: HttpClient::new()?,
            endpoints: Endpoints::default(),
        })
    }

    /// Create a client with explicit transport options
    pub fn with_options(
        endpoints: Endpoints,
        timeout: Duration,
        requests_per_second: Option<NonZeroU32>,
    ) -> Result<Self> {
        Ok(Self {
            http: HttpClient::with_options(timeout, requests_per_second)?,
            endpoints,
        })
    }

    /// Aggregated npms.io payload for `name`, memoized through `cache`
    pub async fn collected(
        &self,
        cache: &PackageDataCache,
        name: &str,
    ) -> Result<Arc<CollectedMetadata>> {
        cache.get_or_fetch(&self.http, &self.endpoints, name).await
    }

    /// Last-month download count for `name`
    pub async fn download_count(&self, name: &str) -> Result<f64> {
        downloads::fetch_download_count(&self.http, &self.endpoints, name).await
    }

    /// Fractional months since `name` was last published
    pub async fn months_since_update(&self, name: &str) -> Result<f64> {
        registry::fetch_months_since_update(&self.http, &self.endpoints, name).await
    }
}
