//! Runtime configuration loading tests.
//!
//! This module tests the full fetch-combine-publish path:
//! - Successful loads publish to the cell and return the combined value
//! - Every failure layer surfaces as a loading-failure error
//! - Cache-busting and cache-control request behavior
//!
//! # Invariants
//! - A failed load never publishes a partial value
//! - The loading-failure wrapper text appears in every error message
//!
//! # What this does NOT handle
//! - Schema validation details (covered by unit tests in `entry.rs`)

use dynconf_runtime::{ConfigCell, ConfigSources, InitOptions, LoadError, init_config};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq)]
struct Parsed {
    parsed: String,
}

fn parse_marker(sources: &ConfigSources) -> Result<Parsed, String> {
    let json = sources.json.as_ref().ok_or("missing json payload")?;
    Ok(Parsed {
        parsed: json
            .get("test")
            .and_then(|v| v.as_str())
            .unwrap_or("absent")
            .to_string(),
    })
}

#[tokio::test]
async fn test_successful_load_publishes_and_returns() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/env.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"test": "data"})))
        .mount(&mock_server)
        .await;

    let cell = ConfigCell::new();
    let options = InitOptions::new().with_base_url(mock_server.uri());
    let loaded = init_config(&cell, parse_marker, options).await.unwrap();

    assert_eq!(loaded.parsed, "data");
    // subsequent reads observe the same published value
    assert_eq!(*cell.get().unwrap(), *loaded);
}

#[tokio::test]
async fn test_connection_failure_wraps_into_load_error() {
    // nothing listens on port 1
    let cell: ConfigCell<Parsed> = ConfigCell::new();
    let options = InitOptions::new().with_base_url("http://127.0.0.1:1");
    let err = init_config(&cell, parse_marker, options).await.unwrap_err();

    assert!(matches!(err, LoadError::Request { .. }));
    assert!(err.to_string().contains("Configuration loading failed"));
    assert!(!cell.is_loaded());
}

#[tokio::test]
async fn test_non_success_status_fails_the_load() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/env.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let cell: ConfigCell<Parsed> = ConfigCell::new();
    let options = InitOptions::new().with_base_url(mock_server.uri());
    let err = init_config(&cell, parse_marker, options).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("Configuration loading failed"));
    assert!(!cell.is_loaded());
}

#[tokio::test]
async fn test_invalid_json_fails_the_load() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/env.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("definitely not json"))
        .mount(&mock_server)
        .await;

    let cell: ConfigCell<Parsed> = ConfigCell::new();
    let options = InitOptions::new().with_base_url(mock_server.uri());
    let err = init_config(&cell, parse_marker, options).await.unwrap_err();

    assert!(matches!(err, LoadError::InvalidJson { .. }));
    assert!(!cell.is_loaded());
}

#[tokio::test]
async fn test_combining_failure_publishes_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/env.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"test": "data"})))
        .mount(&mock_server)
        .await;

    let cell: ConfigCell<Parsed> = ConfigCell::new();
    let options = InitOptions::new().with_base_url(mock_server.uri());
    let err = init_config(
        &cell,
        |_: &ConfigSources| Err::<Parsed, _>("bad combination".to_string()),
        options,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, LoadError::Generate { .. }));
    assert!(err.to_string().contains("bad combination"));
    assert!(!cell.is_loaded());
}

#[tokio::test]
async fn test_cache_busting_appends_timestamp_parameter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/env.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let cell: ConfigCell<Parsed> = ConfigCell::new();
    let options = InitOptions::new().with_base_url(mock_server.uri());
    init_config(&cell, parse_marker, options).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let query = requests[0].url.query().unwrap_or_default();
    assert!(query.contains("t="), "expected cache-busting query: {query}");
}

#[tokio::test]
async fn test_cache_busting_can_be_disabled() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/env.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let cell: ConfigCell<Parsed> = ConfigCell::new();
    let options = InitOptions::new()
        .with_base_url(mock_server.uri())
        .with_cache_busting(false);
    init_config(&cell, parse_marker, options).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_fetch_disables_intermediate_caches() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/env.json"))
        .and(header("Cache-Control", "no-store"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"test": "data"})))
        .mount(&mock_server)
        .await;

    let cell: ConfigCell<Parsed> = ConfigCell::new();
    let options = InitOptions::new().with_base_url(mock_server.uri());
    // the mock only matches when the header is present
    let loaded = init_config(&cell, parse_marker, options).await.unwrap();
    assert_eq!(loaded.parsed, "data");
}

#[tokio::test]
async fn test_extra_headers_are_forwarded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/env.json"))
        .and(header("X-Config-Token", "sesame"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"test": "data"})))
        .mount(&mock_server)
        .await;

    let cell: ConfigCell<Parsed> = ConfigCell::new();
    let options = InitOptions::new()
        .with_base_url(mock_server.uri())
        .with_header("X-Config-Token", "sesame");
    assert!(init_config(&cell, parse_marker, options).await.is_ok());
}

#[tokio::test]
async fn test_explicit_env_payload_reaches_combiner() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/env.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let cell = ConfigCell::new();
    let options = InitOptions::new()
        .with_base_url(mock_server.uri())
        .with_env(json!({"VITE_FLAG": "enabled"}));
    let loaded = init_config(
        &cell,
        |sources: &ConfigSources| {
            let flag = sources
                .env
                .as_ref()
                .and_then(|env| env.get("VITE_FLAG"))
                .and_then(|v| v.as_str())
                .ok_or("missing flag")?
                .to_string();
            Ok::<_, String>(flag)
        },
        options,
    )
    .await
    .unwrap();

    assert_eq!(*loaded, "enabled");
}

#[tokio::test]
async fn test_later_load_replaces_earlier_value() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/env.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"test": "first"})))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/env.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"test": "second"})))
        .mount(&mock_server)
        .await;

    let cell = ConfigCell::new();
    let options = InitOptions::new().with_base_url(mock_server.uri());
    init_config(&cell, parse_marker, options.clone()).await.unwrap();
    assert_eq!(cell.get().unwrap().parsed, "first");

    init_config(&cell, parse_marker, options).await.unwrap();
    assert_eq!(cell.get().unwrap().parsed, "second");
}
