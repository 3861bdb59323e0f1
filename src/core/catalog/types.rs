//! Types for catalog matching.

use crate::core::scorer::{ImageSource, MatchResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Options for building and ranking a catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// File extensions treated as target images
    pub extensions: Vec<String>,
    /// Include files and directories starting with '.'
    pub include_hidden: bool,
    /// Maximum directory depth (None = unlimited)
    pub max_depth: Option<usize>,
    /// Keep only the best N entries in a report (None = all)
    pub limit: Option<usize>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            extensions: ["jpg", "jpeg", "png", "webp", "gif", "bmp", "tiff", "tif"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            include_hidden: false,
            max_depth: None,
            limit: None,
        }
    }
}

/// A reference image a candidate can be matched against
#[derive(Debug, Clone)]
pub struct CatalogTarget {
    pub id: String,
    pub source: ImageSource,
}

impl CatalogTarget {
    pub fn new(id: impl Into<String>, source: ImageSource) -> Self {
        Self {
            id: id.into(),
            source,
        }
    }
}

/// The candidate's score against one target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub target_id: String,
    pub result: MatchResult,
}

/// A target that could not be scored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetFailure {
    pub target_id: String,
    pub message: String,
}

/// Outcome of matching one candidate against a catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogReport {
    pub id: Uuid,
    /// Source id of the candidate
    pub candidate: String,
    /// Scored targets, best first
    pub entries: Vec<CatalogEntry>,
    /// Targets skipped because they failed to decode
    pub errors: Vec<TargetFailure>,
    pub duration_ms: u64,
}

impl CatalogReport {
    /// The highest-scoring target, if any target could be scored
    pub fn best(&self) -> Option<&CatalogEntry> {
        self.entries.first()
    }

    /// Entries whose score clears the match threshold
    pub fn matched(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(|e| e.result.matched)
    }
}
