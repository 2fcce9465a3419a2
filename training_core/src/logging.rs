//! Logging infrastructure for the training tracker.
//!
//! The core only emits `tracing` events. The shell that embeds it (desktop,
//! mobile, or web front end) installs the subscriber once at startup, before
//! opening the tracker:
//!
//! ```no_run
//! use std::sync::Arc;
//! use training_core::{logging, Config, FileBlobStore, Tracker};
//!
//! fn main() -> training_core::Result<()> {
//!     logging::init();
//!
//!     let config = Config::load()?;
//!     let store = Arc::new(FileBlobStore::new(config.data.data_dir.clone()));
//!     let tracker = Tracker::open(store, config)?;
//!     println!("Current streak: {}", tracker.stats().streak);
//!     Ok(())
//! }
//! ```

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Entry point for shells: INFO and above, RUST_LOG overrides
pub fn init() {
    init_with_level("info");
}

/// Install a compact subscriber filtered at `default_level`
///
/// RUST_LOG still wins when set, e.g. `RUST_LOG=training_core::storage=debug`
/// to trace every save. Returns `false` if a subscriber was already
/// installed, in which case that one stays in place.
pub fn init_with_level(default_level: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_thread_names(true))
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("Logging initialized at {}", default_level);
    }
    installed
}

/// Initialize logging for testing (captures logs for test output)
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
