//! # Marker Overlay
//!
//! Scores how closely a photo matches a printed marker image, and drives the
//! overlay video that plays while a marker is in view.
//!
//! ## Architecture
//! The library is split into a core engine (UI-agnostic) and presentation layers:
//! - `core` - Similarity scoring, catalog matching and the marker media lifecycle
//! - `events` - Event-driven progress reporting
//! - `error` - User-friendly error types
//! - `cli` - Command-line interface (binary only)

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{MarkerOverlayError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point. `default_level` is
/// used when `RUST_LOG` is not set.
pub fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    // A subscriber may already be installed (tests, embedding hosts)
    let _ = tracing::subscriber::set_global_default(subscriber);
}
