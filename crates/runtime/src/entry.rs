//! Declarative configuration entry definitions.
//!
//! Responsibilities:
//! - Pair a logical entry name with optional per-source validation schemas
//!   and a mapping function producing the final typed value.
//! - Validate, merge, and map raw payloads on `parse`.
//!
//! Does NOT handle:
//! - Fetching payloads (see `loader.rs`) or storing results (see `store.rs`).
//!
//! Invariants / Assumptions:
//! - Absent payloads validate as an empty object, so schemas with defaults or
//!   optional fields still produce a value.
//! - A source with no schema contributes nothing to the merge; only validated
//!   payloads reach the mapping function.
//! - Environment keys override JSON keys on collision; the merge is shallow.
//! - Validation failures propagate; no fallback value is ever substituted.

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{BoxError, EntryError, SourceKind};
use crate::sources::{ConfigSources, shallow_merge};

/// Validates a raw payload and returns the accepted value.
pub trait Schema: Send + Sync {
    fn validate(&self, payload: Value) -> Result<Value, serde_json::Error>;
}

/// Schema backed by a serde type.
///
/// A payload is accepted iff it deserializes into `S`; the accepted value is
/// `S` re-serialized, so keys unknown to `S` are stripped and defaults are
/// filled in before merging. Optional fields in `S` should carry
/// `#[serde(skip_serializing_if = "Option::is_none")]` so an absent value
/// does not serialize as `null` and clobber the other source on merge.
pub struct TypedSchema<S> {
    _marker: PhantomData<fn() -> S>,
}

impl<S> TypedSchema<S> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<S> Default for TypedSchema<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Schema for TypedSchema<S>
where
    S: DeserializeOwned + Serialize,
{
    fn validate(&self, payload: Value) -> Result<Value, serde_json::Error> {
        let typed: S = serde_json::from_value(payload)?;
        serde_json::to_value(typed)
    }
}

type GenerateFn<T> = Box<dyn Fn(Value) -> Result<T, BoxError> + Send + Sync>;

/// One declared configuration entry: a name, optional schemas for the two
/// payload sources, and a mapping from the merged payload to `T`.
pub struct ConfigEntry<T> {
    name: String,
    schema_json: Option<Box<dyn Schema>>,
    schema_env: Option<Box<dyn Schema>>,
    generate: GenerateFn<T>,
}

impl<T> ConfigEntry<T> {
    /// Start building an entry with the given logical name.
    pub fn builder(name: impl Into<String>) -> ConfigEntryBuilder {
        ConfigEntryBuilder {
            name: name.into(),
            schema_json: None,
            schema_env: None,
        }
    }

    /// The declared logical name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validate both payloads, merge them, and map to the final value.
    ///
    /// Each schema sees its own payload (an empty object when absent); a
    /// source with no schema is dropped. The validated objects are
    /// shallow-merged with environment keys winning, then handed to the
    /// mapping function.
    pub fn parse(&self, sources: &ConfigSources) -> Result<T, EntryError> {
        let json = self.validate_source(&self.schema_json, &sources.json, SourceKind::Json)?;
        let env = self.validate_source(&self.schema_env, &sources.env, SourceKind::Env)?;
        let merged = shallow_merge(json, env);
        (self.generate)(merged).map_err(|source| EntryError::Generate {
            entry: self.name.clone(),
            source,
        })
    }

    fn validate_source(
        &self,
        schema: &Option<Box<dyn Schema>>,
        payload: &Option<Value>,
        kind: SourceKind,
    ) -> Result<Option<Value>, EntryError> {
        let Some(schema) = schema else {
            return Ok(None);
        };
        let raw = payload
            .clone()
            .unwrap_or_else(|| Value::Object(Map::new()));
        schema
            .validate(raw)
            .map(Some)
            .map_err(|source| EntryError::Validation {
                entry: self.name.clone(),
                kind,
                source,
            })
    }
}

/// Builder for [`ConfigEntry`], finalized by [`ConfigEntryBuilder::generate`].
pub struct ConfigEntryBuilder {
    name: String,
    schema_json: Option<Box<dyn Schema>>,
    schema_env: Option<Box<dyn Schema>>,
}

impl ConfigEntryBuilder {
    /// Validate the JSON payload against the serde type `S`.
    pub fn schema_json<S>(mut self) -> Self
    where
        S: DeserializeOwned + Serialize + 'static,
    {
        self.schema_json = Some(Box::new(TypedSchema::<S>::new()));
        self
    }

    /// Validate the environment payload against the serde type `S`.
    pub fn schema_env<S>(mut self) -> Self
    where
        S: DeserializeOwned + Serialize + 'static,
    {
        self.schema_env = Some(Box::new(TypedSchema::<S>::new()));
        self
    }

    /// Validate the JSON payload with a custom schema.
    pub fn schema_json_with(mut self, schema: impl Schema + 'static) -> Self {
        self.schema_json = Some(Box::new(schema));
        self
    }

    /// Validate the environment payload with a custom schema.
    pub fn schema_env_with(mut self, schema: impl Schema + 'static) -> Self {
        self.schema_env = Some(Box::new(schema));
        self
    }

    /// Finish the entry with the mapping from the merged payload to `T`.
    pub fn generate<T, F, E>(self, generate: F) -> ConfigEntry<T>
    where
        F: Fn(Value) -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        ConfigEntry {
            name: self.name,
            schema_json: self.schema_json,
            schema_env: self.schema_env,
            generate: Box::new(move |merged| generate(merged).map_err(Into::into)),
        }
    }
}

/// Declare a configuration entry.
///
/// Shorthand for [`ConfigEntry::builder`]; the name doubles as the marker the
/// build plugin scans source trees for.
pub fn define_config_entry(name: impl Into<String>) -> ConfigEntryBuilder {
    ConfigEntry::<()>::builder(name)
}
