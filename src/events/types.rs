//! Event type definitions for progress and lifecycle reporting.

use serde::{Deserialize, Serialize};

/// All events emitted by the core library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Single comparison events
    Score(ScoreEvent),
    /// Catalog matching events
    Catalog(CatalogEvent),
    /// Marker media lifecycle events
    Marker(MarkerEvent),
}

/// Events from a single target/candidate comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScoreEvent {
    /// Comparison has started
    Started { target: String, candidate: String },
    /// Comparison produced a result
    Completed { score: f64, matched: bool },
    /// Comparison was aborted
    Failed { message: String },
}

/// Events while matching a candidate against a catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CatalogEvent {
    /// Matching has started
    Started { total_targets: usize },
    /// A target was scored
    Progress(CatalogProgress),
    /// A target could not be scored; matching continues
    TargetFailed { target_id: String, message: String },
    /// Matching completed
    Completed {
        best_target: Option<String>,
        best_score: Option<f64>,
    },
}

/// Progress information during catalog matching
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogProgress {
    /// Number of targets processed so far
    pub completed: usize,
    /// Total number of targets
    pub total: usize,
    /// Target that was just processed
    pub current_target: String,
}

/// Events from the marker media controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarkerEvent {
    /// The AR view was mounted and the controller attached
    Mounted,
    /// The marker came into view
    Found,
    /// The marker left the view
    Lost,
    /// The overlay refused to play; tracking state is unaffected
    PlaybackFailed { reason: String },
    /// The AR view was torn down
    Unmounted,
}

impl std::fmt::Display for MarkerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkerEvent::Mounted => write!(f, "Mounted"),
            MarkerEvent::Found => write!(f, "Marker found"),
            MarkerEvent::Lost => write!(f, "Marker lost"),
            MarkerEvent::PlaybackFailed { reason } => write!(f, "Playback failed: {}", reason),
            MarkerEvent::Unmounted => write!(f, "Unmounted"),
        }
    }
}
