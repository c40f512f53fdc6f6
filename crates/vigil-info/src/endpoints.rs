//! Upstream endpoint configuration

/// Base URLs for the three upstream services
///
/// Defaults point at production. Tests point everything at a mock
/// server via [`Endpoints::with_base`].
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// npms.io package metadata aggregator (includes the API version path)
    pub npms_api: String,
    /// npm download statistics API
    pub downloads_api: String,
    /// npm registry
    pub registry: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            npms_api: "https://api.npms.io/v2".to_string(),
            downloads_api: "https://api.npmjs.org".to_string(),
            registry: "https://registry.npmjs.org".to_string(),
        }
    }
}

impl Endpoints {
    /// Point every endpoint at a single base URL
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            npms_api: base.clone(),
            downloads_api: base.clone(),
            registry: base,
        }
    }
}
