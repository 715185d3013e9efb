//! Runtime configuration loading over HTTP.
//!
//! Responsibilities:
//! - Fetch the configuration JSON document, snapshot the environment, hand
//!   both to a caller-supplied combining function, and publish the result.
//! - Wrap every failure layer into a single descriptive [`LoadError`].
//!
//! Does NOT handle:
//! - Schema validation or merging (callers use `ConfigEntry::parse` inside
//!   their combining function).
//!
//! Invariants / Assumptions:
//! - A failed load publishes nothing; the cell keeps its previous state.
//! - Each call performs exactly one request attempt; retries are the
//!   caller's policy.
//! - Concurrent overlapping loads race on the final publish with last writer
//!   winning; callers wanting stricter ordering serialize their own calls.

use std::sync::Arc;

use chrono::Utc;
use reqwest::header::CACHE_CONTROL;
use tracing::debug;
use url::Url;

use crate::env::environment_snapshot;
use crate::error::{BoxError, LoadError};
use crate::sources::ConfigSources;
use crate::store::ConfigCell;

/// Default path fetched when no config URL is supplied.
pub const DEFAULT_CONFIG_URL: &str = "/env.json";

/// Options controlling a single `init_config` call.
#[derive(Debug, Clone)]
pub struct InitOptions {
    config_url: String,
    base_url: Option<String>,
    cache_busting: bool,
    headers: Vec<(String, String)>,
    client: Option<reqwest::Client>,
    env: Option<serde_json::Value>,
    env_prefix: Option<String>,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl InitOptions {
    pub fn new() -> Self {
        Self {
            config_url: DEFAULT_CONFIG_URL.to_string(),
            base_url: None,
            cache_busting: true,
            headers: Vec::new(),
            client: None,
            env: None,
            env_prefix: None,
        }
    }

    /// Set the URL of the configuration document. May be relative, in which
    /// case [`with_base_url`](Self::with_base_url) must supply the origin.
    pub fn with_config_url(mut self, url: impl Into<String>) -> Self {
        self.config_url = url.into();
        self
    }

    /// Set the origin that relative config URLs resolve against.
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.base_url = Some(base.into());
        self
    }

    /// Toggle the cache-busting timestamp query parameter (on by default).
    pub fn with_cache_busting(mut self, enabled: bool) -> Self {
        self.cache_busting = enabled;
        self
    }

    /// Add a header to the fetch request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Use a caller-owned HTTP client instead of a per-call one.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Supply the environment payload explicitly instead of snapshotting the
    /// process environment. Intended for tests and embedding hosts.
    pub fn with_env(mut self, env: serde_json::Value) -> Self {
        self.env = Some(env);
        self
    }

    /// Restrict the environment snapshot to variables with this prefix.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }
}

/// Fetch, combine, and publish the runtime configuration.
///
/// Performs an HTTP GET against the configured URL (with `Cache-Control:
/// no-store` and, unless disabled, a `t=<millis>` cache-busting parameter),
/// parses the body as JSON, snapshots the environment, and hands both raw
/// payloads to `generate`. On success the result is published to `cell` and
/// a shared handle to it is returned.
///
/// # Errors
///
/// Any failure (unresolvable URL, network failure, non-success status,
/// invalid JSON, `generate` rejecting) aborts the load without publishing
/// and surfaces as a [`LoadError`].
pub async fn init_config<T, F, E>(
    cell: &ConfigCell<T>,
    generate: F,
    options: InitOptions,
) -> Result<Arc<T>, LoadError>
where
    F: FnOnce(&ConfigSources) -> Result<T, E>,
    E: Into<BoxError>,
{
    let mut url = resolve_config_url(&options)?;
    if options.cache_busting {
        let millis = Utc::now().timestamp_millis().to_string();
        url.query_pairs_mut().append_pair("t", &millis);
    }

    debug!(url = %url, "fetching runtime configuration");
    let client = options.client.clone().unwrap_or_default();
    let json = fetch_json_source(&client, &url, &options.headers).await?;

    let env = match options.env.clone() {
        Some(env) => env,
        None => environment_snapshot(options.env_prefix.as_deref()),
    };

    let sources = ConfigSources::new(Some(json), Some(env));
    let value = generate(&sources).map_err(|source| LoadError::Generate {
        source: source.into(),
    })?;
    debug!("runtime configuration loaded");
    Ok(cell.set(value))
}

/// GET the configuration document and parse it as JSON.
async fn fetch_json_source(
    client: &reqwest::Client,
    url: &Url,
    headers: &[(String, String)],
) -> Result<serde_json::Value, LoadError> {
    let mut builder = client.get(url.as_str()).header(CACHE_CONTROL, "no-store");
    for (name, value) in headers {
        builder = builder.header(name, value);
    }

    let response = builder.send().await.map_err(|source| LoadError::Request {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response
        .json()
        .await
        .map_err(|source| LoadError::InvalidJson {
            url: url.to_string(),
            source,
        })
}

/// Resolve the configured URL, joining relative paths onto the base origin.
fn resolve_config_url(options: &InitOptions) -> Result<Url, LoadError> {
    match Url::parse(&options.config_url) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = options
                .base_url
                .as_deref()
                .ok_or_else(|| LoadError::InvalidUrl {
                    url: options.config_url.clone(),
                    reason: "relative URL requires a base_url".to_string(),
                })?;
            let base = Url::parse(base).map_err(|error| LoadError::InvalidUrl {
                url: base.to_string(),
                reason: error.to_string(),
            })?;
            base.join(&options.config_url)
                .map_err(|error| LoadError::InvalidUrl {
                    url: options.config_url.clone(),
                    reason: error.to_string(),
                })
        }
        Err(error) => Err(LoadError::InvalidUrl {
            url: options.config_url.clone(),
            reason: error.to_string(),
        }),
    }
}
