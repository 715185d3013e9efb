//! Host build-tool interfaces, as consumed by the plugin.
//!
//! Only the surface the plugin actually uses is modeled here: asset
//! emission during bundling and the dev server's watcher. The host's own
//! lifecycle (hook ordering, module graph, serving) stays on the host's
//! side of these traits.

use std::path::Path;

/// An in-memory build artifact registered with the host bundler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedAsset {
    /// Output-relative filename.
    pub file_name: String,
    /// Literal string content.
    pub source: String,
}

/// Receives generated assets during bundle generation.
pub trait AssetSink {
    /// Register an asset with a filename and literal string content.
    fn emit_file(&mut self, asset: EmittedAsset);
}

/// The host dev server's file watcher.
pub trait WatcherHandle {
    /// Watch an additional glob pattern.
    fn add(&mut self, pattern: &str);
}

/// The host dev server, as seen at server-start time.
pub trait DevServer {
    /// Access the server's file watcher to register extra patterns.
    fn watcher(&mut self) -> &mut dyn WatcherHandle;

    /// Subscribe to file-change events; the handler receives the changed
    /// path. The host serializes notifications, so the handler needs no
    /// internal synchronization.
    fn on_change(&mut self, handler: Box<dyn FnMut(&Path) + Send>);
}
