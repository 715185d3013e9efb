//! Raw configuration payloads and their merge discipline.

use serde_json::{Map, Value};

/// The two raw inputs handed to a combining function.
///
/// `json` is the fetched document, `env` the environment-variable snapshot.
/// Either may be absent; merge order is fixed so that environment values win
/// over JSON values when keys collide.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSources {
    pub json: Option<Value>,
    pub env: Option<Value>,
}

impl ConfigSources {
    pub fn new(json: Option<Value>, env: Option<Value>) -> Self {
        Self { json, env }
    }
}

/// Shallow-merge two optional JSON payloads into one object.
///
/// Top-level keys of `overlay` overwrite keys of `base`. Payloads that are
/// absent or not objects contribute nothing; the result is always an object.
pub fn shallow_merge(base: Option<Value>, overlay: Option<Value>) -> Value {
    let mut merged = Map::new();
    if let Some(Value::Object(map)) = base {
        merged.extend(map);
    }
    if let Some(Value::Object(map)) = overlay {
        merged.extend(map);
    }
    Value::Object(merged)
}
