//! Env-file artifact handling.
//!
//! Responsibilities:
//! - Resolve the configured JSON document to a source path and target
//!   basename.
//! - Copy it into build output, or embed it as an in-memory bundle asset.
//!
//! Invariants / Assumptions:
//! - An absent source file is a logged, non-fatal condition; the build
//!   continues without the artifact.
//! - Copies preserve exact byte content; nothing is re-serialized.

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::host::{AssetSink, EmittedAsset};
use crate::options::PluginOptions;

/// One file to copy or embed into build output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvFileConfig {
    /// Path of the source file, resolvable from the invocation root.
    pub source: String,
    /// Output-relative filename, the basename of `source` by default.
    pub target: String,
}

/// Derive source and target from a configured path, if any.
pub fn normalize_env_file_config(env_file: Option<&str>) -> Option<EnvFileConfig> {
    let env_file = env_file?;
    if env_file.is_empty() {
        return None;
    }
    let target = Path::new(env_file)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| env_file.to_string());
    Some(EnvFileConfig {
        source: env_file.to_string(),
        target,
    })
}

/// The configured JSON document location as a single concatenated path.
///
/// The directory keeps its string form and is normalized to end with a
/// separator before the filename is appended.
pub(crate) fn normalized_json_path(options: &PluginOptions) -> String {
    format!(
        "{}{}",
        ensure_trailing_slash(&options.config_json_dir),
        options.config_json_file_name
    )
}

fn ensure_trailing_slash(dir: &str) -> String {
    if dir.ends_with('/') {
        dir.to_string()
    } else {
        format!("{dir}/")
    }
}

/// Copy the configured file into the build output directory.
///
/// Failures are absorbed: a missing source, an unwritable target directory,
/// or a failed copy each log and leave the build output unchanged.
pub fn copy_env_file(env_config: &EnvFileConfig, out_dir: &Path) {
    let source = match std::path::absolute(&env_config.source) {
        Ok(source) => source,
        Err(error) => {
            warn!(source = %env_config.source, %error, "could not resolve env file source");
            return;
        }
    };
    if !source.is_file() {
        warn!(source = %source.display(), "env file not found, skipping copy");
        return;
    }

    let target = out_dir.join(&env_config.target);
    if let Some(parent) = target.parent()
        && let Err(error) = fs::create_dir_all(parent)
    {
        warn!(target = %target.display(), %error, "could not create output directory");
        return;
    }
    match fs::copy(&source, &target) {
        Ok(_) => info!(source = %source.display(), target = %target.display(), "copied env file"),
        Err(error) => warn!(target = %target.display(), %error, "failed to copy env file"),
    }
}

/// Embed the configured JSON document as an in-memory bundle asset.
///
/// Called at bundle-generation time; an absent or unreadable source emits
/// nothing and never aborts the bundle.
pub fn handle_env_file_bundle(sink: &mut dyn AssetSink, options: &PluginOptions) {
    let json_path = normalized_json_path(options);
    let Some(env_config) = normalize_env_file_config(Some(&json_path)) else {
        debug!("no env file configured; skipping bundle step");
        return;
    };
    debug!(source = %env_config.source, target = %env_config.target, "processing env file for bundle");

    let source = match std::path::absolute(&env_config.source) {
        Ok(source) => source,
        Err(error) => {
            warn!(source = %env_config.source, %error, "could not resolve env file source");
            return;
        }
    };
    if !source.is_file() {
        warn!(source = %source.display(), "env file not found, skipping bundle asset");
        return;
    }
    let content = match fs::read_to_string(&source) {
        Ok(content) => content,
        Err(error) => {
            warn!(source = %source.display(), %error, "failed to read env file");
            return;
        }
    };

    sink.emit_file(EmittedAsset {
        file_name: env_config.target,
        source: content,
    });
    info!(file = %json_path, "added env file to bundle");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_uses_basename_as_target() {
        let config = normalize_env_file_config(Some("./a/b/c.json")).unwrap();
        assert_eq!(config.source, "./a/b/c.json");
        assert_eq!(config.target, "c.json");
    }

    #[test]
    fn test_normalize_absent_input_is_none() {
        assert_eq!(normalize_env_file_config(None), None);
        assert_eq!(normalize_env_file_config(Some("")), None);
    }

    #[test]
    fn test_normalize_bare_filename() {
        let config = normalize_env_file_config(Some("env.json")).unwrap();
        assert_eq!(config.source, "env.json");
        assert_eq!(config.target, "env.json");
    }

    #[test]
    fn test_normalized_json_path_adds_separator_once() {
        let mut options = PluginOptions::default();
        assert_eq!(normalized_json_path(&options), "./env.json");

        options.config_json_dir = "public".to_string();
        assert_eq!(normalized_json_path(&options), "public/env.json");

        options.config_json_dir = "public/".to_string();
        assert_eq!(normalized_json_path(&options), "public/env.json");
    }
}
