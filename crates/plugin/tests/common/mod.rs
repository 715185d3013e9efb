//! Common test utilities for integration tests.
//!
//! This module provides shared fakes and filesystem helpers for testing the
//! plugin against temporary source trees.
//!
//! # Invariants
//! - Helpers never touch paths outside the temp directory they are given
//! - Fakes record calls verbatim; assertions live in the tests
//!
//! # What this does NOT handle
//! - Watcher setup (tests drive `WatchService` directly)

use std::fs;
use std::path::{Path, PathBuf};

#[allow(unused_imports)]
pub use dynconf_plugin::{
    AssetSink, DevServer, DynamicConfigPlugin, EmittedAsset, PluginOptions, Scanner, WatcherHandle,
};
#[allow(unused_imports)]
pub use tempfile::TempDir;

/// Write a file under `dir`, creating intermediate directories.
#[allow(dead_code)]
pub fn write_file(dir: &Path, rel: &str, content: &str) -> PathBuf {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Asset sink that records every emission.
#[derive(Default)]
pub struct RecordingSink {
    pub assets: Vec<EmittedAsset>,
}

impl AssetSink for RecordingSink {
    fn emit_file(&mut self, asset: EmittedAsset) {
        self.assets.push(asset);
    }
}

/// Watcher fake that records added glob patterns.
#[derive(Default)]
pub struct RecordingWatcher {
    pub patterns: Vec<String>,
}

impl WatcherHandle for RecordingWatcher {
    fn add(&mut self, pattern: &str) {
        self.patterns.push(pattern.to_string());
    }
}

/// Dev-server fake: a recording watcher plus the registered change handler.
#[derive(Default)]
pub struct FakeDevServer {
    pub watcher: RecordingWatcher,
    pub handler: Option<Box<dyn FnMut(&Path) + Send>>,
}

impl FakeDevServer {
    /// Deliver a change notification to the registered handler.
    #[allow(dead_code)]
    pub fn notify_change(&mut self, path: &Path) {
        if let Some(handler) = self.handler.as_mut() {
            handler(path);
        }
    }
}

impl DevServer for FakeDevServer {
    fn watcher(&mut self) -> &mut dyn WatcherHandle {
        &mut self.watcher
    }

    fn on_change(&mut self, handler: Box<dyn FnMut(&Path) + Send>) {
        self.handler = Some(handler);
    }
}

/// Restore the process working directory when dropped.
///
/// Only for `#[serial]` tests; the working directory is process-global.
#[allow(dead_code)]
pub struct CwdGuard {
    original: PathBuf,
}

#[allow(dead_code)]
impl CwdGuard {
    pub fn change_to(dir: &Path) -> Self {
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir).unwrap();
        Self { original }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}
