//! End-to-end engine tests against a mock upstream

use std::time::Duration;
use vigil_deps::{AllowList, PackageManifest};
use vigil_engine::{Engine, EngineConfig, IndicatorConfig, IndicatorId};
use vigil_info::Endpoints;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn manifest(json: &str) -> PackageManifest {
    PackageManifest::from_json(json).unwrap()
}

fn engine_for(server: &MockServer, indicators: IndicatorConfig) -> Engine {
    let mut config = EngineConfig::new(indicators);
    config.endpoints = Endpoints::with_base(&server.uri());
    config.timeout = Duration::from_secs(5);
    Engine::new(config).unwrap()
}

fn npms_body(stars: f64, forks: f64) -> serde_json::Value {
    serde_json::json!({
        "collected": {
            "github": {
                "starsCount": stars,
                "forksCount": forks,
                "subscribersCount": 50,
                "issues": { "count": 5 }
            },
            "metadata": {
                "maintainers": [ { "username": "someone" } ]
            }
        }
    })
}

async fn mount_npms(server: &MockServer, package: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/package/{package}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_stars_below_threshold_flags_package() {
    let server = MockServer::start().await;
    mount_npms(&server, "left-pad", npms_body(3.0, 100.0)).await;

    let engine = engine_for(
        &server,
        IndicatorConfig::from_entries([(IndicatorId::Stars, 10.0)]),
    );
    let result = engine
        .evaluate(&manifest(r#"{ "dependencies": { "left-pad": "1.0.0" } }"#))
        .await;

    assert_eq!(result.suspicious, ["left-pad"]);
    assert_eq!(result.breakdown.len(), 1);
    assert_eq!(result.breakdown[0].indicator, IndicatorId::Stars);
    assert_eq!(result.breakdown[0].threshold, 10.0);
    assert_eq!(result.breakdown[0].flagged[0].name, "left-pad");
    assert_eq!(result.breakdown[0].flagged[0].observed, 3.0);
    assert!(result.failures.is_empty());
}

#[tokio::test]
async fn test_flagged_package_excluded_from_later_passes() {
    let server = MockServer::start().await;
    mount_npms(&server, "left-pad", npms_body(3.0, 100.0)).await;
    mount_npms(&server, "chalk", npms_body(5000.0, 100.0)).await;

    // The downloads pass must only ever see chalk; a request for
    // left-pad here would mean the exclusion failed.
    Mock::given(method("GET"))
        .and(path("/downloads/point/last-month/chalk"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "downloads": 2000 })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/downloads/point/last-month/left-pad"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "downloads": 1 })),
        )
        .expect(0)
        .mount(&server)
        .await;

    let engine = engine_for(
        &server,
        IndicatorConfig::from_entries([
            (IndicatorId::Stars, 10.0),
            (IndicatorId::Downloads, 1000.0),
        ]),
    );
    let result = engine
        .evaluate(&manifest(
            r#"{ "dependencies": { "left-pad": "1.0.0", "chalk": "5.0.0" } }"#,
        ))
        .await;

    assert_eq!(result.suspicious, ["left-pad"]);
    assert_eq!(result.breakdown.len(), 2);
    assert_eq!(result.breakdown[1].indicator, IndicatorId::Downloads);
    assert!(result.breakdown[1].flagged.is_empty());
}

#[tokio::test]
async fn test_package_attributed_to_first_flagging_indicator() {
    let server = MockServer::start().await;
    // Fails both stars and forks thresholds; only stars may claim it.
    mount_npms(&server, "left-pad", npms_body(3.0, 2.0)).await;

    let engine = engine_for(
        &server,
        IndicatorConfig::from_entries([
            (IndicatorId::Stars, 10.0),
            (IndicatorId::Forks, 10.0),
        ]),
    );
    let result = engine
        .evaluate(&manifest(r#"{ "dependencies": { "left-pad": "1.0.0" } }"#))
        .await;

    assert_eq!(result.suspicious, ["left-pad"]);
    assert_eq!(result.breakdown[0].indicator, IndicatorId::Stars);
    assert_eq!(result.breakdown[0].flagged.len(), 1);
    // The forks pass had no candidates left and was skipped.
    assert_eq!(result.breakdown.len(), 1);
}

#[tokio::test]
async fn test_aggregator_fetched_once_across_indicators() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/package/chalk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(npms_body(5000.0, 400.0)))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine_for(
        &server,
        IndicatorConfig::from_entries([
            (IndicatorId::Stars, 10.0),
            (IndicatorId::Forks, 10.0),
            (IndicatorId::Watchers, 10.0),
        ]),
    );
    let result = engine
        .evaluate(&manifest(r#"{ "dependencies": { "chalk": "5.0.0" } }"#))
        .await;

    assert!(result.suspicious.is_empty());
    assert!(result.failures.is_empty());
}

#[tokio::test]
async fn test_upstream_failure_is_recorded_not_flagged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/package/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine_for(
        &server,
        IndicatorConfig::from_entries([
            (IndicatorId::Stars, 10.0),
            (IndicatorId::Forks, 10.0),
        ]),
    );
    let result = engine
        .evaluate(&manifest(r#"{ "dependencies": { "flaky": "1.0.0" } }"#))
        .await;

    assert!(result.suspicious.is_empty());
    // One failure per indicator pass, but only one upstream request:
    // the forks pass sees the cached failure.
    assert_eq!(result.failures.len(), 2);
    assert_eq!(result.failures[0].package, "flaky");
    assert_eq!(result.failures[0].indicator, IndicatorId::Stars);
    assert_eq!(result.failures[1].indicator, IndicatorId::Forks);
}

#[tokio::test]
async fn test_missing_github_section_is_a_failure_not_a_pass() {
    let server = MockServer::start().await;
    mount_npms(
        &server,
        "repo-less",
        serde_json::json!({
            "collected": { "metadata": { "maintainers": [] } }
        }),
    )
    .await;

    let engine = engine_for(
        &server,
        IndicatorConfig::from_entries([(IndicatorId::Stars, 10.0)]),
    );
    let result = engine
        .evaluate(&manifest(r#"{ "dependencies": { "repo-less": "1.0.0" } }"#))
        .await;

    assert!(result.suspicious.is_empty());
    assert_eq!(result.failures.len(), 1);
    assert!(result.failures[0].error.contains("collected.github"));
}

#[tokio::test]
async fn test_allow_listed_package_is_never_evaluated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/package/left-pad"))
        .respond_with(ResponseTemplate::new(200).set_body_json(npms_body(0.0, 0.0)))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = EngineConfig::new(IndicatorConfig::from_entries([(
        IndicatorId::Stars,
        10.0,
    )]));
    config.endpoints = Endpoints::with_base(&server.uri());
    config.allow_list = AllowList::with_names(["left-pad"]).unwrap();
    let engine = Engine::new(config).unwrap();

    let result = engine
        .evaluate(&manifest(r#"{ "dependencies": { "left-pad": "1.0.0" } }"#))
        .await;

    assert!(result.suspicious.is_empty());
    assert!(result.breakdown.iter().all(|r| r.flagged.is_empty()));
}

#[tokio::test]
async fn test_unconfigured_indicators_are_not_evaluated() {
    let server = MockServer::start().await;
    // No aggregator-backed indicator is configured, so the aggregator
    // must never be hit.
    Mock::given(method("GET"))
        .and(path("/package/chalk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(npms_body(5000.0, 400.0)))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/downloads/point/last-month/chalk"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "downloads": 500000 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine_for(
        &server,
        IndicatorConfig::from_entries([(IndicatorId::Downloads, 1000.0)]),
    );
    let result = engine
        .evaluate(&manifest(r#"{ "dependencies": { "chalk": "5.0.0" } }"#))
        .await;

    assert!(result.suspicious.is_empty());
}

#[tokio::test]
async fn test_last_update_flags_stale_package() {
    let server = MockServer::start().await;
    let modified = (chrono::Utc::now() - chrono::Duration::days(365)).to_rfc3339();
    Mock::given(method("GET"))
        .and(path("/stale-lib"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "time": { "modified": modified }
        })))
        .mount(&server)
        .await;

    let engine = engine_for(
        &server,
        IndicatorConfig::from_entries([(IndicatorId::LastUpdate, 6.0)]),
    );
    let result = engine
        .evaluate(&manifest(r#"{ "dependencies": { "stale-lib": "1.0.0" } }"#))
        .await;

    assert_eq!(result.suspicious, ["stale-lib"]);
    let observed = result.breakdown[0].flagged[0].observed;
    assert!(observed > 6.0, "got {observed}");
}

#[tokio::test]
async fn test_evaluation_is_deterministic() {
    let server = MockServer::start().await;
    mount_npms(&server, "left-pad", npms_body(3.0, 1.0)).await;
    mount_npms(&server, "tiny-lib", npms_body(4.0, 1.0)).await;

    let engine = engine_for(
        &server,
        IndicatorConfig::from_entries([(IndicatorId::Stars, 10.0)]),
    );
    let manifest = manifest(
        r#"{ "dependencies": { "left-pad": "1.0.0", "tiny-lib": "0.1.0" } }"#,
    );

    let first = engine.evaluate(&manifest).await;
    let second = engine.evaluate(&manifest).await;

    assert_eq!(first, second);
    assert_eq!(first.suspicious, ["left-pad", "tiny-lib"]);
}
