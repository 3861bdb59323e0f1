//! # Core Module
//!
//! The UI-agnostic engine.
//!
//! ## Modules
//! - `scorer` - Pixel-similarity scoring of two images
//! - `catalog` - Ranks a candidate against a catalog of targets
//! - `marker` - Overlay media lifecycle driven by marker found/lost signals

pub mod catalog;
pub mod marker;
pub mod scorer;

// Re-export commonly used types
pub use catalog::{CatalogMatcher, CatalogReport, CatalogTarget};
pub use marker::{MarkerMediaController, MarkerSession, MarkerSignal, MarkerState, MarkerView};
pub use scorer::{ImageSource, MatchBand, MatchResult, ScorerConfig, SimilarityScorer};
