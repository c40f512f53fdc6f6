//! npm download statistics client

use crate::client::{encode_package_name, HttpClient};
use crate::endpoints::Endpoints;
use crate::error::{Error, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct DownloadsResponse {
    #[serde(default)]
    downloads: Option<f64>,
}

/// Fetch the last-month download count for `name`
///
/// Not cached: only one indicator consumes this endpoint, so each
/// package needs exactly one call per run.
pub async fn fetch_download_count(
    client: &HttpClient,
    endpoints: &Endpoints,
    name: &str,
) -> Result<f64> {
    let encoded = encode_package_name(name)?;
    let url = format!(
        "{}/downloads/point/last-month/{}",
        endpoints.downloads_api, encoded
    );
    let response: DownloadsResponse = client.get_json(&url, name).await?;
    response
        .downloads
        .ok_or_else(|| Error::missing_field(name, "downloads"))
}
