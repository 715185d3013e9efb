//! Error types for runtime configuration loading.

use std::fmt;
use thiserror::Error;

/// Boxed error produced by caller-supplied mapping and combining functions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised when reading the shared configuration cell.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The cell was read before any successful load completed.
    #[error("Configuration has not been loaded yet; call init_config() first")]
    NotLoaded,
}

/// Which raw payload a schema was validating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// The fetched JSON document.
    Json,
    /// The environment-variable snapshot.
    Env,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Json => write!(f, "json"),
            SourceKind::Env => write!(f, "env"),
        }
    }
}

/// Errors raised while parsing a declared configuration entry.
#[derive(Error, Debug)]
pub enum EntryError {
    /// A payload was rejected by its validation schema.
    #[error("Schema validation failed for {kind} payload of '{entry}': {source}")]
    Validation {
        entry: String,
        kind: SourceKind,
        #[source]
        source: serde_json::Error,
    },

    /// The mapping function rejected the merged payload.
    #[error("Config mapping failed for '{entry}': {source}")]
    Generate {
        entry: String,
        #[source]
        source: BoxError,
    },
}

/// Errors raised by `init_config`.
///
/// Every variant carries the same loading-failure prefix so callers can treat
/// any load error uniformly without matching on the root layer.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The config URL could not be parsed or resolved against a base.
    #[error("Configuration loading failed: invalid config URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The HTTP request itself failed (connection refused, DNS, timeout).
    #[error("Configuration loading failed: request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("Configuration loading failed: failed to fetch {url}: {status}")]
    Status { url: String, status: u16 },

    /// The response body was not valid JSON.
    #[error("Configuration loading failed: invalid JSON from {url}: {source}")]
    InvalidJson {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The combining function rejected the fetched sources.
    #[error("Configuration loading failed: {source}")]
    Generate {
        #[source]
        source: BoxError,
    },
}

impl LoadError {
    /// HTTP status of the failed load, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            LoadError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
