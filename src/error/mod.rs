//! # Error Module
//!
//! User-friendly error types for the marker overlay engine.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - which image source, what went wrong
//! - **No silent retries** - the caller decides whether to try another image

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum MarkerOverlayError {
    #[error("Scoring error: {0}")]
    Score(#[from] ScoreError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that abort a similarity comparison
#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("Failed to decode image {source_id}: {reason}")]
    Decode { source_id: String, reason: String },

    #[error("Image {source_id} has no pixels")]
    EmptyInput { source_id: String },

    #[error("Failed to read image file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid scorer configuration: {0}")]
    InvalidConfig(String),
}

/// Errors from matching a candidate against a catalog of targets
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("The catalog has no targets to compare against")]
    EmptyCatalog,

    #[error("Failed to discover targets in {path}: {reason}")]
    Discover { path: PathBuf, reason: String },

    #[error("Candidate image could not be prepared: {0}")]
    Candidate(#[source] ScoreError),
}

/// Refusal from an overlay media element's `play()`.
///
/// Handled inside the marker controller; it never reaches
/// [`MarkerOverlayError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("Playback was rejected: {reason}")]
    Rejected { reason: String },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, MarkerOverlayError>;
