//! Build-plugin companion for runtime configuration.
//!
//! This crate scans source trees for `defineConfigEntry` declarations,
//! writes a scan manifest at build start, embeds or copies the runtime
//! configuration JSON document into build output, and regenerates when
//! watched declaration files change. It plugs into a host build tool
//! through the narrow interfaces in [`host`], or runs standalone in
//! development through [`watch::WatchService`].
//!
//! The companion `dynconf-runtime` crate consumes the configuration this
//! plugin materializes; the two share only the entry naming convention and
//! never call each other at runtime.

pub mod adapter;
pub mod constants;
pub mod env_file;
pub mod error;
pub mod generator;
pub mod host;
pub mod options;
pub mod reactor;
pub mod scanner;
pub mod watch;

pub use adapter::DynamicConfigPlugin;
pub use env_file::{EnvFileConfig, copy_env_file, handle_env_file_bundle, normalize_env_file_config};
pub use error::PluginError;
pub use generator::{ConfigManifest, generate_config_file};
pub use host::{AssetSink, DevServer, EmittedAsset, WatcherHandle};
pub use options::PluginOptions;
pub use reactor::{handle_file_change, should_regenerate};
pub use scanner::{ConfigEntryRecord, Scanner, file_contains_create_config};
pub use watch::WatchService;
