//! Standalone watch service tests.
//!
//! This module tests the native watcher end to end against a real
//! temporary tree:
//! - Qualifying creations and modifications regenerate the manifest
//! - Generator output inside the watched tree never feeds back
//! - Dropping the service stops reactions
//!
//! # Invariants
//! - Waits are bounded; a hung watcher fails the test instead of the suite
//!
//! # What this does NOT handle
//! - Reaction qualification rules (covered by unit tests in `reactor.rs`)

mod common;

use common::*;
use dynconf_plugin::WatchService;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

async fn wait_until(deadline: Duration, predicate: impl Fn() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < deadline {
        if predicate() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    predicate()
}

fn watched_options(root: &Path) -> PluginOptions {
    PluginOptions {
        definition_dirs: vec![root.to_path_buf()],
        ..Default::default()
    }
}

#[tokio::test]
async fn test_created_declaration_regenerates_manifest() {
    let tmp = TempDir::new().unwrap();
    let manifest = tmp.path().join("config.gen.json");

    let service = WatchService::start(Arc::new(Scanner::new()), watched_options(tmp.path()))
        .expect("watcher should start");

    write_file(
        tmp.path(),
        "db.ts",
        "export const db = defineConfigEntry({ name: 'database' });",
    );

    assert!(
        wait_until(Duration::from_secs(10), || manifest.exists()).await,
        "manifest never appeared"
    );
    let body = fs::read_to_string(&manifest).unwrap();
    assert!(body.contains("\"database\""));
    drop(service);
}

#[tokio::test]
async fn test_modified_declaration_regenerates_manifest() {
    let tmp = TempDir::new().unwrap();
    let manifest = tmp.path().join("config.gen.json");
    let file = write_file(tmp.path(), "flags.ts", "export const placeholder = 1;");

    let service = WatchService::start(Arc::new(Scanner::new()), watched_options(tmp.path()))
        .expect("watcher should start");

    fs::write(
        &file,
        "export const flags = defineConfigEntry({ name: 'flags' });",
    )
    .unwrap();

    assert!(
        wait_until(Duration::from_secs(10), || manifest.exists()).await,
        "manifest never appeared"
    );
    let body = fs::read_to_string(&manifest).unwrap();
    assert!(body.contains("\"flags\""));
    drop(service);
}

#[tokio::test]
async fn test_generator_output_in_watched_tree_does_not_feed_back() {
    let tmp = TempDir::new().unwrap();
    let manifest = tmp.path().join("config.gen.json");

    let service = WatchService::start(Arc::new(Scanner::new()), watched_options(tmp.path()))
        .expect("watcher should start");

    // generated artifacts carry the marker but must never trigger a scan
    write_file(
        tmp.path(),
        "stale.gen.ts",
        "export const stale = defineConfigEntry({ name: 'stale' });",
    );

    assert!(
        !wait_until(Duration::from_millis(700), || manifest.exists()).await,
        "generated artifact triggered a rescan"
    );
    drop(service);
}

#[tokio::test]
async fn test_dropped_service_stops_reacting() {
    let tmp = TempDir::new().unwrap();
    let manifest = tmp.path().join("config.gen.json");

    let service = WatchService::start(Arc::new(Scanner::new()), watched_options(tmp.path()))
        .expect("watcher should start");
    drop(service);

    write_file(
        tmp.path(),
        "late.ts",
        "export const late = defineConfigEntry({ name: 'late' });",
    );

    assert!(
        !wait_until(Duration::from_millis(700), || manifest.exists()).await,
        "dropped watcher still reacted"
    );
}
