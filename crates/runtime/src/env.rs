//! Environment-variable snapshot helpers.
//!
//! Responsibilities:
//! - Capture the current process environment as a JSON object payload.
//! - Enforce the `DOTENV_DISABLED` gate to prevent accidental dotenv loading
//!   in tests.
//!
//! Invariants / Assumptions:
//! - Snapshot values are pass-through strings; no parsing or coercion happens
//!   here (schemas downstream decide what a value means).
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

use serde_json::{Map, Value};

/// Capture the process environment as a JSON object of string values.
///
/// With a `prefix`, only variables whose names start with it are included,
/// which keeps unrelated host variables out of schema validation.
pub fn environment_snapshot(prefix: Option<&str>) -> Value {
    let mut vars = Map::new();
    for (key, value) in std::env::vars() {
        if let Some(prefix) = prefix
            && !key.starts_with(prefix)
        {
            continue;
        }
        vars.insert(key, Value::String(value));
    }
    Value::Object(vars)
}

/// Load environment variables from a `.env` file if present.
///
/// If the `DOTENV_DISABLED` environment variable is set to "true" or "1",
/// the `.env` file will not be loaded (useful for testing).
pub fn load_dotenv() {
    if std::env::var("DOTENV_DISABLED").ok().as_deref() != Some("true")
        && std::env::var("DOTENV_DISABLED").ok().as_deref() != Some("1")
    {
        dotenvy::dotenv().ok();
    }
}
