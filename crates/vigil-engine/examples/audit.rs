//! Audit a package.json for suspicious dependencies
//!
//! Run with: cargo run --package vigil-engine --example audit -- path/to/package.json

use std::path::PathBuf;
use vigil_deps::PackageManifest;
use vigil_engine::{Engine, EngineConfig, IndicatorConfig, IndicatorId};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("package.json"));

    println!("Auditing {}...\n", path.display());
    let manifest = PackageManifest::load(&path).await?;

    let indicators = IndicatorConfig::from_entries([
        (IndicatorId::Stars, 50.0),
        (IndicatorId::Downloads, 10_000.0),
        (IndicatorId::Maintainers, 1.0),
        (IndicatorId::LastUpdate, 12.0),
    ]);
    let engine = Engine::new(EngineConfig::new(indicators))?;

    let result = engine.evaluate(&manifest).await;

    println!("{}", result.summary_line());
    for line in result.verbose_lines() {
        println!("  {line}");
    }

    if !result.failures.is_empty() {
        println!("\n{} metric(s) could not be fetched:", result.failures.len());
        for failure in &result.failures {
            println!("  {} ({}): {}", failure.package, failure.indicator, failure.error);
        }
    }

    Ok(())
}
