//! Runtime configuration loading for applications.
//!
//! This crate fetches a JSON configuration document over HTTP at startup,
//! merges it with an environment-variable snapshot, and publishes the
//! combined result to an explicit [`ConfigCell`] that the rest of the
//! application reads from. Entries are declared with [`define_config_entry`],
//! pairing per-source validation schemas with a mapping to the final typed
//! value.
//!
//! ```no_run
//! use dynconf_runtime::{ConfigCell, InitOptions, define_config_entry, init_config};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Deserialize, Serialize)]
//! struct ApiShape {
//!     api_url: String,
//! }
//!
//! #[derive(Debug, Deserialize)]
//! struct AppConfig {
//!     api_url: String,
//! }
//!
//! static CONFIG: ConfigCell<AppConfig> = ConfigCell::new();
//!
//! # async fn example() -> Result<(), dynconf_runtime::LoadError> {
//! let entry = define_config_entry("app")
//!     .schema_json::<ApiShape>()
//!     .generate(|merged| serde_json::from_value::<AppConfig>(merged));
//!
//! let options = InitOptions::new().with_base_url("https://app.example.com");
//! let loaded = init_config(&CONFIG, |sources| entry.parse(sources), options).await?;
//! println!("api: {}", loaded.api_url);
//!
//! // later reads go through the cell
//! assert!(CONFIG.get().is_ok());
//! # Ok(())
//! # }
//! ```

pub mod entry;
pub mod env;
pub mod error;
pub mod loader;
pub mod sources;
pub mod store;

pub use entry::{ConfigEntry, ConfigEntryBuilder, Schema, TypedSchema, define_config_entry};
pub use env::{environment_snapshot, load_dotenv};
pub use error::{BoxError, EntryError, LoadError, SourceKind, StoreError};
pub use loader::{DEFAULT_CONFIG_URL, InitOptions, init_config};
pub use sources::{ConfigSources, shallow_merge};
pub use store::ConfigCell;
