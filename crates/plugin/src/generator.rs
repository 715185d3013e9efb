//! Scan-manifest generation.
//!
//! Responsibilities:
//! - Run a full scan and write the resulting manifest into the first
//!   definition directory.
//! - Mirror the runtime JSON document into the build output directory when
//!   one is configured.
//!
//! Invariants / Assumptions:
//! - Every generation starts from a fresh scan; nothing persists across
//!   runs.
//! - The manifest is a `.json` artifact, so neither the scanner nor the
//!   reactor ever treats it as a declaration source.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::constants::PLUGIN_NAME;
use crate::env_file::{copy_env_file, normalize_env_file_config, normalized_json_path};
use crate::error::PluginError;
use crate::options::PluginOptions;
use crate::scanner::{ConfigEntryRecord, Scanner};

/// Manifest describing one full scan.
#[derive(Debug, Serialize)]
pub struct ConfigManifest {
    pub generated_by: &'static str,
    pub entries: Vec<ConfigEntryRecord>,
}

/// Scan the definition directories and write the manifest.
///
/// Returns the manifest that was written. When `out_dir` is configured the
/// runtime JSON document is copied there as well; that copy absorbs its own
/// failures so a missing document never fails generation.
pub fn generate_config_file(
    scanner: &Scanner,
    options: &PluginOptions,
) -> Result<ConfigManifest, PluginError> {
    let entries = scanner.find_define_config_calls(options);
    let manifest = ConfigManifest {
        generated_by: PLUGIN_NAME,
        entries,
    };

    let path = manifest_path(options);
    let body = serde_json::to_string_pretty(&manifest)
        .map_err(|source| PluginError::Serialize { source })?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| PluginError::Write {
            path: path.clone(),
            source,
        })?;
    }
    fs::write(&path, body).map_err(|source| PluginError::Write {
        path: path.clone(),
        source,
    })?;
    info!(
        manifest = %path.display(),
        entries = manifest.entries.len(),
        "wrote config manifest"
    );

    if let Some(out_dir) = &options.out_dir {
        let json_path = normalized_json_path(options);
        if let Some(env_config) = normalize_env_file_config(Some(&json_path)) {
            copy_env_file(&env_config, out_dir);
        }
    }

    Ok(manifest)
}

/// Where the manifest lands: inside the first definition directory, or the
/// invocation root if none is configured.
fn manifest_path(options: &PluginOptions) -> PathBuf {
    options
        .definition_dirs
        .first()
        .map(|dir| dir.join(&options.manifest_file_name))
        .unwrap_or_else(|| PathBuf::from(&options.manifest_file_name))
}
