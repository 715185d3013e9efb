//! Shared configuration cell.
//!
//! Responsibilities:
//! - Hold at most one parsed configuration value, set after a successful load.
//! - Fail loudly on reads that happen before the first load.
//!
//! Does NOT handle:
//! - Fetching or merging configuration (see `loader.rs`).
//!
//! Invariants / Assumptions:
//! - A later `set` replaces the previous value wholesale; values are never
//!   merged across loads.
//! - Readers holding an `Arc` from `get` keep observing the value they read,
//!   even after a replacement lands.

use arc_swap::ArcSwapOption;
use std::sync::Arc;

use crate::error::StoreError;

/// Single-assignment-style cell for the loaded configuration.
///
/// The cell starts empty and can be declared `static`; `set` publishes a new
/// value atomically and `get` hands out cheap shared references. Reading an
/// empty cell is an error, never a silent default.
#[derive(Debug)]
pub struct ConfigCell<T> {
    inner: ArcSwapOption<T>,
}

impl<T> ConfigCell<T> {
    /// Create an empty cell. Usable in `static` context.
    pub const fn new() -> Self {
        Self {
            inner: ArcSwapOption::const_empty(),
        }
    }

    /// Publish a value, replacing any previous one. Returns the stored handle.
    pub fn set(&self, value: T) -> Arc<T> {
        let shared = Arc::new(value);
        self.inner.store(Some(Arc::clone(&shared)));
        shared
    }

    /// Read the current value.
    pub fn get(&self) -> Result<Arc<T>, StoreError> {
        self.inner.load_full().ok_or(StoreError::NotLoaded)
    }

    /// Whether a value has been published.
    pub fn is_loaded(&self) -> bool {
        self.inner.load().is_some()
    }
}

impl<T> Default for ConfigCell<T> {
    fn default() -> Self {
        Self::new()
    }
}
