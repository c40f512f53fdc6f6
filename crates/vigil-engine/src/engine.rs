//! The evaluation engine: sequential indicator passes with concurrent
//! per-package fan-out

use crate::config::{ConfigError, ConfigResult, EngineConfig};
use crate::provider::{provider_table, FetchContext};
use crate::result::{EvaluationResult, FetchFailure, FlaggedPackage, IndicatorReport};
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};
use vigil_deps::{CandidateSet, PackageManifest};
use vigil_info::MetricsClient;

/// The indicator evaluation engine
///
/// Construction validates the configuration and builds the HTTP client;
/// each [`evaluate`](Engine::evaluate) call is one run with its own
/// response cache.
pub struct Engine {
    config: EngineConfig,
    client: MetricsClient,
}

impl Engine {
    /// Validate configuration and build the upstream client
    ///
    /// Fails with a typed error before any network call is made.
    pub fn new(config: EngineConfig) -> ConfigResult<Self> {
        let client = MetricsClient::with_options(
            config.endpoints.clone(),
            config.timeout,
            config.requests_per_second,
        )
        .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Evaluate every configured indicator against the manifest's
    /// dependencies
    ///
    /// Indicator passes run strictly in configuration order; within a
    /// pass all candidate fetches run concurrently and the pass joins
    /// on all of them. Packages flagged by an earlier pass are excluded
    /// from every later pass, so each suspicious package is attributed
    /// to the first indicator that flagged it. A fetch failure never
    /// flags a package and never aborts the run.
    pub async fn evaluate(&self, manifest: &PackageManifest) -> EvaluationResult {
        let candidates = CandidateSet::collect(manifest, &self.config.allow_list);
        let ctx = Arc::new(FetchContext::new(self.client.clone()));
        let providers = provider_table(&ctx);

        let mut suspicious: Vec<String> = Vec::new();
        let mut flagged_names: HashSet<String> = HashSet::new();
        let mut breakdown = Vec::new();
        let mut failures = Vec::new();

        for &(indicator, threshold) in self.config.indicators.entries() {
            let remaining = candidates.remaining(&flagged_names);
            if remaining.is_empty() {
                debug!(%indicator, "no candidates left, skipping pass");
                continue;
            }

            let Some(provider) = providers.get(&indicator) else {
                continue;
            };

            debug!(
                %indicator,
                threshold,
                candidates = remaining.len(),
                "starting indicator pass"
            );

            let observations =
                join_all(remaining.iter().map(|name| provider.fetch(name))).await;

            let mut report = IndicatorReport {
                indicator,
                threshold,
                flagged: Vec::new(),
            };

            for (name, observation) in remaining.iter().zip(observations) {
                match observation {
                    Ok(observed) => {
                        if indicator.direction().flags(observed, threshold) {
                            report.flagged.push(FlaggedPackage {
                                name: (*name).to_string(),
                                observed,
                            });
                        }
                    }
                    Err(error) => {
                        warn!(
                            package = *name,
                            %indicator,
                            %error,
                            "metric fetch failed; package not flagged"
                        );
                        failures.push(FetchFailure {
                            package: (*name).to_string(),
                            indicator,
                            error: error.to_string(),
                        });
                    }
                }
            }

            // The suspicious set only grows between passes, never
            // mid-pass, so candidate exclusion is well-defined.
            for entry in &report.flagged {
                if flagged_names.insert(entry.name.clone()) {
                    suspicious.push(entry.name.clone());
                }
            }
            breakdown.push(report);
        }

        EvaluationResult {
            suspicious,
            breakdown,
            failures,
        }
    }
}
