//! Directory scanning for configuration-entry declarations.
//!
//! Responsibilities:
//! - Walk the configured definition directories, skipping excluded names.
//! - Pattern-match eligible source files for entry-definition calls and
//!   extract each declaration's export and logical names.
//!
//! Does NOT handle:
//! - Writing the manifest (see `generator.rs`) or deciding when to rescan
//!   (see `reactor.rs`).
//!
//! Invariants / Assumptions:
//! - A missing directory or unreadable file contributes zero entries, never
//!   an error; a partial scan beats a broken build.
//! - Matchers carry no per-call state, so one file's scan can never skip or
//!   duplicate matches in the next file.
//! - The pattern match is a best-effort text scan, not a parser; declarations
//!   reformatted beyond what the patterns tolerate are not found.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, PoisonError};

use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::constants::{DEFINE_CALL_MARKER, EXCLUDED_DIRS, SOURCE_EXTENSIONS};
use crate::options::PluginOptions;

/// Matches `export const <ident> = defineConfigEntry({` declarations.
static DEFINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+const\s+(\w+)\s*=\s*defineConfigEntry\s*\(\s*\{")
        .expect("declaration pattern is valid")
});

/// One discovered configuration declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigEntryRecord {
    /// Declared logical name; falls back to the export name when the
    /// declaration has no parseable `name:` field.
    pub name: String,
    /// Path relative to the invocation root when the file lies under it,
    /// absolute otherwise.
    pub file_path: PathBuf,
    /// Identifier the declaration is exported as.
    pub export_name: String,
}

/// Scans source trees for entry-definition declarations.
///
/// Holds a per-export-name cache of compiled lookup patterns; the key space
/// is bounded by the distinct export names encountered, so the cache is
/// never evicted.
pub struct Scanner {
    name_patterns: Mutex<HashMap<String, Regex>>,
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            name_patterns: Mutex::new(HashMap::new()),
        }
    }

    /// Scan every configured definition directory, in listed order.
    ///
    /// Directories resolve against the current working directory; a
    /// directory that does not exist contributes zero entries.
    pub fn find_define_config_calls(&self, options: &PluginOptions) -> Vec<ConfigEntryRecord> {
        let mut records = Vec::new();
        for dir in &options.definition_dirs {
            let resolved = match std::path::absolute(dir) {
                Ok(resolved) => resolved,
                Err(error) => {
                    warn!(dir = %dir.display(), %error, "could not resolve scan directory");
                    continue;
                }
            };
            records.extend(self.scan_directory(&resolved));
        }
        records
    }

    /// Recursively scan one directory for declarations.
    ///
    /// Entries come back in file-system enumeration order (stabilized by
    /// name) and, within a file, in source order of appearance.
    pub fn scan_directory(&self, root: &Path) -> Vec<ConfigEntryRecord> {
        if !root.is_dir() {
            debug!(dir = %root.display(), "definition directory absent; skipping");
            return Vec::new();
        }

        let mut records = Vec::new();
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_excluded_dir(entry));
        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(error) => {
                    warn!(%error, "skipping unreadable directory entry");
                    continue;
                }
            };
            if entry.file_type().is_file() && is_source_file(entry.path()) {
                records.extend(self.scan_file(entry.path()));
            }
        }
        records
    }

    /// Extract every declaration from one file, in source order.
    fn scan_file(&self, path: &Path) -> Vec<ConfigEntryRecord> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) => {
                warn!(file = %path.display(), %error, "skipping unreadable source file");
                return Vec::new();
            }
        };

        let file_path = relative_to_cwd(path);
        DEFINE_PATTERN
            .captures_iter(&content)
            .filter_map(|captures| captures.get(1))
            .map(|export| {
                let export_name = export.as_str().to_string();
                let name = self.extract_config_name(&content, &export_name);
                ConfigEntryRecord {
                    name,
                    file_path: file_path.clone(),
                    export_name,
                }
            })
            .collect()
    }

    /// Find the declared `name:` for an export, falling back to the export
    /// name itself when the declaration has none the pattern can see.
    fn extract_config_name(&self, content: &str, export_name: &str) -> String {
        self.name_pattern(export_name)
            .and_then(|pattern| {
                pattern
                    .captures(content)
                    .and_then(|captures| captures.get(1))
                    .map(|name| name.as_str().to_string())
            })
            .unwrap_or_else(|| export_name.to_string())
    }

    /// Compiled lookup pattern for one export name, from the cache when hot.
    fn name_pattern(&self, export_name: &str) -> Option<Regex> {
        let mut cache = self
            .name_patterns
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(pattern) = cache.get(export_name) {
            return Some(pattern.clone());
        }
        // [^}] spans newlines, so the options block may wrap freely up to
        // its first closing brace
        let source = format!(
            r#"{}\s*=\s*defineConfigEntry\s*\(\s*\{{[^}}]*name:\s*['"](\w+)['"]"#,
            regex::escape(export_name)
        );
        match Regex::new(&source) {
            Ok(pattern) => {
                cache.insert(export_name.to_string(), pattern.clone());
                Some(pattern)
            }
            Err(error) => {
                debug!(%export_name, %error, "name lookup pattern failed to compile");
                None
            }
        }
    }

    #[cfg(test)]
    fn cached_pattern_count(&self) -> usize {
        self.name_patterns
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a file's content references an entry-definition call at all.
///
/// Byte substring check, case-sensitive; a file that cannot be read counts
/// as not containing the marker (it may have been deleted mid-notification).
pub fn file_contains_create_config(path: &Path) -> bool {
    match fs::read(path) {
        Ok(bytes) => bytes
            .windows(DEFINE_CALL_MARKER.len())
            .any(|window| window == DEFINE_CALL_MARKER.as_bytes()),
        Err(error) => {
            debug!(file = %path.display(), %error, "file temporarily unavailable");
            false
        }
    }
}

/// Whether a path has one of the recognized source extensions.
pub(crate) fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| SOURCE_EXTENSIONS.contains(&extension))
}

/// Whether a directory entry's name matches an exclusion substring.
fn is_excluded_dir(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| EXCLUDED_DIRS.iter().any(|token| name.contains(token)))
}

/// Express a path relative to the current working directory when it lies
/// under it; otherwise keep it as-is.
fn relative_to_cwd(path: &Path) -> PathBuf {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(&cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
}
