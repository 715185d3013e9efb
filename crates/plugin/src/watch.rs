//! Standalone watch service for development without a host dev server.
//!
//! Responsibilities:
//! - Watch the definition directories with a native file watcher and feed
//!   qualifying changes through the reactor.
//!
//! Invariants / Assumptions:
//! - A single consumer task serializes regenerations, so rapid successive
//!   changes never produce interleaved manifest writes.
//! - Events are not debounced; each qualifying change triggers its own
//!   rescan.
//! - Dropping the service stops both the watcher and the consumer task.

use std::path::PathBuf;
use std::sync::Arc;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::error::PluginError;
use crate::options::PluginOptions;
use crate::reactor::handle_file_change;
use crate::scanner::Scanner;

/// Owns a native file watcher and the task draining its events.
pub struct WatchService {
    // kept alive for its side effect; dropping it unsubscribes
    _watcher: RecommendedWatcher,
    consumer: JoinHandle<()>,
}

impl WatchService {
    /// Watch the configured definition directories and regenerate on
    /// qualifying changes.
    ///
    /// Must be called from within a tokio runtime; the consumer task is
    /// spawned on it. Directories that do not exist yet are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Watch`] when the native watcher cannot be
    /// created or a directory cannot be watched.
    pub fn start(scanner: Arc<Scanner>, options: PluginOptions) -> Result<Self, PluginError> {
        let (tx, mut rx) = mpsc::unbounded_channel::<PathBuf>();

        let mut watcher = RecommendedWatcher::new(
            move |result: notify::Result<Event>| match result {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    for path in event.paths {
                        let _ = tx.send(path);
                    }
                }
                Ok(_) => {}
                Err(error) => error!(%error, "file watch error"),
            },
            Config::default(),
        )
        .map_err(|source| PluginError::Watch { source })?;

        for dir in &options.definition_dirs {
            let resolved = std::path::absolute(dir).unwrap_or_else(|_| dir.clone());
            if resolved.is_dir() {
                watcher
                    .watch(&resolved, RecursiveMode::Recursive)
                    .map_err(|source| PluginError::Watch { source })?;
                info!(dir = %resolved.display(), "watching definition directory");
            } else {
                debug!(dir = %resolved.display(), "definition directory absent; not watching");
            }
        }

        let consumer = tokio::spawn(async move {
            while let Some(path) = rx.recv().await {
                handle_file_change(&scanner, &path, &options);
            }
        });

        Ok(Self {
            _watcher: watcher,
            consumer,
        })
    }
}

impl Drop for WatchService {
    fn drop(&mut self) {
        self.consumer.abort();
    }
}
