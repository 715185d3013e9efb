//! Centralized constants for the build plugin.
//!
//! This module contains the scan, artifact, and naming defaults shared by
//! the scanner, reactor, and bundler to avoid magic value duplication.

// =============================================================================
// Scan Defaults
// =============================================================================

/// Directories scanned for configuration declarations by default.
pub const DEFAULT_DEFINITION_DIRS: &[&str] = &["src/env"];

/// Directory name marking vendored dependencies; never scanned and never a
/// valid origin for change-triggered regeneration.
pub const DEPENDENCY_DIR: &str = "node_modules";

/// Directory name substrings excluded from scans. A directory whose name
/// contains any of these tokens is skipped without descending into it.
pub const EXCLUDED_DIRS: &[&str] = &[DEPENDENCY_DIR, ".git", "dist", "build", "__tests__", "test"];

/// Source file extensions eligible for scanning and change reactions.
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx"];

/// Literal substring identifying an entry-definition call site.
pub const DEFINE_CALL_MARKER: &str = "defineConfigEntry";

// =============================================================================
// Artifact Defaults
// =============================================================================

/// Filename suffixes of generator output; changes to these files never
/// trigger regeneration, which breaks the regenerate-detect loop.
pub const GENERATED_SUFFIXES: &[&str] = &[".gen.ts", ".gen.tsx"];

/// Default filename of the runtime configuration JSON document.
pub const DEFAULT_CONFIG_JSON_NAME: &str = "env.json";

/// Default directory (relative to the invocation root) holding the runtime
/// configuration JSON document.
pub const DEFAULT_CONFIG_JSON_DIR: &str = "./";

/// Filename of the scan manifest written into the first definition
/// directory.
pub const DEFAULT_MANIFEST_NAME: &str = "config.gen.json";

// =============================================================================
// Plugin Identity
// =============================================================================

/// Name the plugin registers under with the host build tool.
pub const PLUGIN_NAME: &str = "dynamic-config";
