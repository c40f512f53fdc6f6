//! Per-run memoization of the aggregator response

use crate::client::HttpClient;
use crate::endpoints::Endpoints;
use crate::error::Result;
use crate::npms::{self, CollectedMetadata};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

type CacheCell = Arc<OnceCell<Result<Arc<CollectedMetadata>>>>;

/// Single-flight cache for aggregator payloads, keyed by package name
///
/// The first caller for a name starts the fetch; concurrent callers for
/// the same name attach to the same in-flight request instead of
/// issuing duplicates. Failures are cached like successes, so every
/// package is fetched at most once per run and no automatic retry
/// happens at this layer.
#[derive(Debug, Default)]
pub struct PackageDataCache {
    entries: Mutex<HashMap<String, CacheCell>>,
}

impl PackageDataCache {
    /// Create an empty cache for one evaluation run
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached payload for `name`, fetching it on first use
    pub async fn get_or_fetch(
        &self,
        client: &HttpClient,
        endpoints: &Endpoints,
        name: &str,
    ) -> Result<Arc<CollectedMetadata>> {
        let cell = {
            let mut entries = self.entries.lock().await;
            Arc::clone(entries.entry(name.to_string()).or_default())
        };

        cell.get_or_init(|| async {
            npms::fetch_collected(client, endpoints, name)
                .await
                .map(Arc::new)
        })
        .await
        .clone()
    }
}
