//! File-change qualification and regeneration triggering.
//!
//! Responsibilities:
//! - Decide cheaply whether a changed file can affect the generated config.
//! - Trigger a full rescan+regenerate cycle only when it can.
//!
//! Invariants / Assumptions:
//! - Generator output never qualifies, which breaks the
//!   regenerate-detect-regenerate feedback loop.
//! - Qualification reads at most the one changed file; the full tree rescan
//!   happens only after the marker substring is found in it.

use std::path::Path;

use tracing::{debug, warn};

use crate::constants::{DEPENDENCY_DIR, GENERATED_SUFFIXES};
use crate::generator::generate_config_file;
use crate::options::PluginOptions;
use crate::scanner::{Scanner, file_contains_create_config, is_source_file};

/// Whether a changed file is even a candidate for regeneration.
///
/// A file qualifies only if it has a recognized source extension, does not
/// live under the dependency directory, and is not generator output.
pub fn should_regenerate(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    is_source_file(path)
        && !path_str.contains(DEPENDENCY_DIR)
        && !is_generated_artifact(&path_str)
}

/// React to one file-change notification.
///
/// Unqualified paths and files without the declaration marker return
/// without scanning; qualified changes trigger a full rescan of the
/// configured definition directories.
pub fn handle_file_change(scanner: &Scanner, path: &Path, options: &PluginOptions) {
    if !should_regenerate(path) {
        return;
    }
    if !file_contains_create_config(path) {
        return;
    }
    debug!(file = %path.display(), "config declaration changed; regenerating");
    if let Err(error) = generate_config_file(scanner, options) {
        warn!(%error, "config regeneration failed");
    }
}

/// Whether a path names generator output.
fn is_generated_artifact(path_str: &str) -> bool {
    GENERATED_SUFFIXES
        .iter()
        .any(|suffix| path_str.ends_with(suffix))
}
