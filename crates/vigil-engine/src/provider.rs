//! Per-indicator metric providers
//!
//! Each indicator is bound to one [`MetricProvider`] implementation,
//! registered in a table keyed by [`IndicatorId`]. The five
//! aggregator-derived indicators share one cached payload per package;
//! downloads and last-update go straight to their own endpoints.

use crate::indicator::IndicatorId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use vigil_info::{npms, MetricsClient, PackageDataCache, Result};

/// Shared per-run fetch state every provider goes through
#[derive(Debug)]
pub struct FetchContext {
    client: MetricsClient,
    cache: PackageDataCache,
}

impl FetchContext {
    /// Fresh fetch state for one evaluation run
    pub fn new(client: MetricsClient) -> Self {
        Self {
            client,
            cache: PackageDataCache::new(),
        }
    }
}

/// One metric lookup for one indicator
#[async_trait]
pub trait MetricProvider: Send + Sync {
    /// Fetch the metric value for `package`
    async fn fetch(&self, package: &str) -> Result<f64>;
}

struct DownloadsProvider {
    ctx: Arc<FetchContext>,
}

#[async_trait]
impl MetricProvider for DownloadsProvider {
    async fn fetch(&self, package: &str) -> Result<f64> {
        self.ctx.client.download_count(package).await
    }
}

struct LastUpdateProvider {
    ctx: Arc<FetchContext>,
}

#[async_trait]
impl MetricProvider for LastUpdateProvider {
    async fn fetch(&self, package: &str) -> Result<f64> {
        self.ctx.client.months_since_update(package).await
    }
}

struct MaintainersProvider {
    ctx: Arc<FetchContext>,
}

#[async_trait]
impl MetricProvider for MaintainersProvider {
    async fn fetch(&self, package: &str) -> Result<f64> {
        let collected = self.ctx.client.collected(&self.ctx.cache, package).await?;
        npms::maintainer_count(&collected, package)
    }
}

struct OpenIssuesProvider {
    ctx: Arc<FetchContext>,
}

#[async_trait]
impl MetricProvider for OpenIssuesProvider {
    async fn fetch(&self, package: &str) -> Result<f64> {
        let collected = self.ctx.client.collected(&self.ctx.cache, package).await?;
        npms::open_issue_count(&collected, package)
    }
}

struct StarsProvider {
    ctx: Arc<FetchContext>,
}

#[async_trait]
impl MetricProvider for StarsProvider {
    async fn fetch(&self, package: &str) -> Result<f64> {
        let collected = self.ctx.client.collected(&self.ctx.cache, package).await?;
        npms::stars(&collected, package)
    }
}

struct WatchersProvider {
    ctx: Arc<FetchContext>,
}

#[async_trait]
impl MetricProvider for WatchersProvider {
    async fn fetch(&self, package: &str) -> Result<f64> {
        let collected = self.ctx.client.collected(&self.ctx.cache, package).await?;
        npms::watchers(&collected, package)
    }
}

struct ForksProvider {
    ctx: Arc<FetchContext>,
}

#[async_trait]
impl MetricProvider for ForksProvider {
    async fn fetch(&self, package: &str) -> Result<f64> {
        let collected = self.ctx.client.collected(&self.ctx.cache, package).await?;
        npms::forks(&collected, package)
    }
}

/// Build the provider table for one evaluation run
pub fn provider_table(ctx: &Arc<FetchContext>) -> HashMap<IndicatorId, Box<dyn MetricProvider>> {
    let mut table: HashMap<IndicatorId, Box<dyn MetricProvider>> = HashMap::new();
    table.insert(
        IndicatorId::Downloads,
        Box::new(DownloadsProvider { ctx: Arc::clone(ctx) }),
    );
    table.insert(
        IndicatorId::LastUpdate,
        Box::new(LastUpdateProvider { ctx: Arc::clone(ctx) }),
    );
    table.insert(
        IndicatorId::Maintainers,
        Box::new(MaintainersProvider { ctx: Arc::clone(ctx) }),
    );
    table.insert(
        IndicatorId::OpenIssues,
        Box::new(OpenIssuesProvider { ctx: Arc::clone(ctx) }),
    );
    table.insert(
        IndicatorId::Stars,
        Box::new(StarsProvider { ctx: Arc::clone(ctx) }),
    );
    table.insert(
        IndicatorId::Watchers,
        Box::new(WatchersProvider { ctx: Arc::clone(ctx) }),
    );
    table.insert(
        IndicatorId::Forks,
        Box::new(ForksProvider { ctx: Arc::clone(ctx) }),
    );
    table
}
