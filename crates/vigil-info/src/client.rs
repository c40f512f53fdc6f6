//! HTTP client wrapper with optional rate limiting

use crate::error::{Error, Result};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Rate limiter shared by all requests of one client
type DirectRateLimiter = Arc<
    RateLimiter<
        governor::state::NotKeyed,
        governor::state::InMemoryState,
        governor::clock::DefaultClock,
    >,
>;

/// HTTP client wrapper for upstream metric requests
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    rate_limiter: Option<DirectRateLimiter>,
}

impl HttpClient {
    /// Create a client with the default timeout and no rate limiting
    pub fn new() -> Result<Self> {
        Self::with_options(DEFAULT_TIMEOUT, None)
    }

    /// Create a client capped at `requests_per_second` upstream calls
    pub fn with_rate_limit(requests_per_second: NonZeroU32) -> Result<Self> {
        Self::with_options(DEFAULT_TIMEOUT, Some(requests_per_second))
    }

    /// Create a client with an explicit timeout and optional rate cap
    pub fn with_options(
        timeout: Duration,
        requests_per_second: Option<NonZeroU32>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!("vigil/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| Error::ClientBuild(e.to_string()))?;

        let rate_limiter = requests_per_second
            .map(|rps| Arc::new(RateLimiter::direct(Quota::per_second(rps))));

        Ok(Self {
            client,
            rate_limiter,
        })
    }

    /// Wait for the rate limiter if one is configured
    async fn wait_for_rate_limit(&self) {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }
    }

    /// Make a GET request and deserialize the JSON response
    ///
    /// `package` is only used for error context. A 404 maps to
    /// [`Error::PackageNotFound`]; any other non-2xx status, transport
    /// failure, or undecodable body maps to [`Error::Upstream`].
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        package: &str,
    ) -> Result<T> {
        self.wait_for_rate_limit().await;

        tracing::debug!(%url, package, "fetching upstream metric");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::upstream(package, e))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::PackageNotFound(package.to_string()));
        }
        if !response.status().is_success() {
            return Err(Error::upstream(
                package,
                format!("HTTP status {} from {url}", response.status()),
            ));
        }

        response.json().await.map_err(|e| Error::upstream(package, e))
    }
}

/// Validate a package name and URL-encode it
///
/// Scoped names (`@scope/name`) contain a slash that must be encoded
/// before it lands in a path segment.
pub(crate) fn encode_package_name(name: &str) -> Result<String> {
    if name.trim().is_empty() {
        return Err(Error::InvalidPackageName(name.to_string()));
    }
    Ok(if name.starts_with('@') {
        name.replace('/', "%2F")
    } else {
        name.to_string()
    })
}
