//! Error types for the build plugin.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during plugin operations.
///
/// Scan-time file problems are deliberately absent here: the scanner absorbs
/// them per file (logged, degrade to zero entries) so one bad file never
/// aborts a build.
#[derive(Error, Debug)]
pub enum PluginError {
    /// Failed to write a generated artifact.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the scan manifest.
    #[error("Failed to serialize config manifest: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },

    /// The file watcher backend reported an error.
    #[error("File watcher error: {source}")]
    Watch {
        #[source]
        source: notify::Error,
    },
}
