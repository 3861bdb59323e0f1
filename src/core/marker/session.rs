//! Detection and overlay state for one marker.

use serde::{Deserialize, Serialize};

/// Whether the tracker currently sees the marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerState {
    Found,
    Lost,
}

impl Default for MarkerState {
    fn default() -> Self {
        MarkerState::Lost
    }
}

impl std::fmt::Display for MarkerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkerState::Found => write!(f, "FOUND"),
            MarkerState::Lost => write!(f, "LOST"),
        }
    }
}

/// Current state of the marker and its overlay.
///
/// Invariants: `overlay_playing` implies `state == Found`, and the overlay is
/// muted whenever the marker is lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerSession {
    state: MarkerState,
    overlay_muted: bool,
    overlay_playing: bool,
}

impl MarkerSession {
    /// A fresh session: marker lost, overlay muted and stopped
    pub fn new() -> Self {
        Self {
            state: MarkerState::Lost,
            overlay_muted: true,
            overlay_playing: false,
        }
    }

    pub fn state(&self) -> MarkerState {
        self.state
    }

    pub fn overlay_muted(&self) -> bool {
        self.overlay_muted
    }

    pub fn overlay_playing(&self) -> bool {
        self.overlay_playing
    }

    pub fn is_found(&self) -> bool {
        self.state == MarkerState::Found
    }

    pub(super) fn mark_found(&mut self) {
        self.state = MarkerState::Found;
        self.overlay_muted = false;
        self.overlay_playing = true;
    }

    pub(super) fn mark_lost(&mut self) {
        self.state = MarkerState::Lost;
        self.overlay_playing = false;
        self.overlay_muted = true;
    }
}

impl Default for MarkerSession {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MarkerSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (overlay {}, {})",
            self.state,
            if self.overlay_playing { "playing" } else { "paused" },
            if self.overlay_muted { "muted" } else { "audible" }
        )
    }
}
