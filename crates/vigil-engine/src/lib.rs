//! # vigil-engine
//!
//! Indicator evaluation engine for the vigil suspicious-dependency
//! audit: given a project's dependency manifest and a set of configured
//! trust indicators with thresholds, produce the packages that fail any
//! indicator, a per-indicator breakdown with observed values, and the
//! fetch failures encountered along the way.
//!
//! # Example
//!
//! ```no_run
//! use vigil_deps::PackageManifest;
//! use vigil_engine::{Engine, EngineConfig, IndicatorConfig, IndicatorId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manifest = PackageManifest::from_json(
//!         r#"{ "dependencies": { "left-pad": "1.0.0" } }"#,
//!     )?;
//!
//!     let indicators = IndicatorConfig::from_entries([
//!         (IndicatorId::Stars, 10.0),
//!         (IndicatorId::Downloads, 1000.0),
//!     ]);
//!     let engine = Engine::new(EngineConfig::new(indicators))?;
//!
//!     let result = engine.evaluate(&manifest).await;
//!     println!("{}", result.summary_line());
//!     for line in result.verbose_lines() {
//!         println!("  {line}");
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod engine;
pub mod indicator;
pub mod provider;
pub mod result;

pub use config::{ConfigError, ConfigResult, EngineConfig, IndicatorConfig};
pub use engine::Engine;
pub use indicator::{Direction, IndicatorId, UnknownIndicator};
pub use provider::{FetchContext, MetricProvider};
pub use result::{EvaluationResult, FetchFailure, FlaggedPackage, IndicatorReport};
