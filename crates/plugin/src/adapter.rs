//! Build-tool lifecycle adapter.
//!
//! Responsibilities:
//! - Wire scanning, bundling, and change reactions into the host's hooks:
//!   build start, bundle generation, and dev-server start.
//!
//! Invariants / Assumptions:
//! - One plugin instance owns one scanner, so the compiled-pattern cache is
//!   shared between the initial scan and later change-triggered rescans.
//! - Hook failures degrade to logs; a scan problem must not fail the
//!   host's build.

use std::path::Path;
use std::sync::Arc;

use tracing::warn;

use crate::constants::{PLUGIN_NAME, SOURCE_EXTENSIONS};
use crate::env_file::handle_env_file_bundle;
use crate::generator::generate_config_file;
use crate::host::{AssetSink, DevServer};
use crate::options::PluginOptions;
use crate::reactor::handle_file_change;
use crate::scanner::Scanner;

/// The plugin: construct once, hand each hook to the host.
pub struct DynamicConfigPlugin {
    options: PluginOptions,
    scanner: Arc<Scanner>,
}

impl DynamicConfigPlugin {
    pub fn new(options: PluginOptions) -> Self {
        Self {
            options,
            scanner: Arc::new(Scanner::new()),
        }
    }

    /// Name the plugin registers under.
    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    /// Build-start hook: scan and write the manifest.
    pub fn build_start(&self) {
        if let Err(error) = generate_config_file(&self.scanner, &self.options) {
            warn!(%error, "config generation failed at build start");
        }
    }

    /// Bundle-generation hook: embed the runtime JSON document as an asset.
    pub fn generate_bundle(&self, sink: &mut dyn AssetSink) {
        handle_env_file_bundle(sink, &self.options);
    }

    /// Dev-server hook: widen the watcher to the definition directories and
    /// react to change notifications.
    pub fn configure_server(&self, server: &mut dyn DevServer) {
        for dir in &self.options.definition_dirs {
            let resolved = std::path::absolute(dir).unwrap_or_else(|_| dir.clone());
            for extension in SOURCE_EXTENSIONS {
                server
                    .watcher()
                    .add(&format!("{}/**/*.{extension}", resolved.display()));
            }
        }

        let scanner = Arc::clone(&self.scanner);
        let options = self.options.clone();
        server.on_change(Box::new(move |path: &Path| {
            handle_file_change(&scanner, path, &options);
        }));
    }
}
