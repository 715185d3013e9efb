//! Per-instance plugin options.

use std::path::PathBuf;

use crate::constants::{
    DEFAULT_CONFIG_JSON_DIR, DEFAULT_CONFIG_JSON_NAME, DEFAULT_DEFINITION_DIRS,
    DEFAULT_MANIFEST_NAME,
};

/// Options accepted when constructing the plugin.
///
/// All fields have working defaults; construct with a struct literal over
/// `..Default::default()` to override a subset.
#[derive(Debug, Clone)]
pub struct PluginOptions {
    /// Directories scanned for configuration declarations, relative to the
    /// invocation root unless absolute.
    pub definition_dirs: Vec<PathBuf>,
    /// Directory holding the runtime configuration JSON document. Kept as a
    /// string because it is normalized with a trailing separator before
    /// concatenation, not path-joined.
    pub config_json_dir: String,
    /// Filename of the runtime configuration JSON document.
    pub config_json_file_name: String,
    /// Filename of the scan manifest written into the first definition
    /// directory.
    pub manifest_file_name: String,
    /// Build output directory. When set, successful generation also copies
    /// the runtime JSON document there.
    pub out_dir: Option<PathBuf>,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            definition_dirs: DEFAULT_DEFINITION_DIRS.iter().map(PathBuf::from).collect(),
            config_json_dir: DEFAULT_CONFIG_JSON_DIR.to_string(),
            config_json_file_name: DEFAULT_CONFIG_JSON_NAME.to_string(),
            manifest_file_name: DEFAULT_MANIFEST_NAME.to_string(),
            out_dir: None,
        }
    }
}
