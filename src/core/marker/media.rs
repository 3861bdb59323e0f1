//! Capabilities the controller needs from the host UI.
//!
//! Any rendering engine or video element can sit behind these traits; the
//! controller never decodes, buffers or draws anything itself.

use crate::error::PlaybackError;

/// An externally owned overlay video
pub trait MediaHandle: Send {
    /// Start or resume playback. May be refused (e.g. autoplay policy).
    fn play(&mut self) -> Result<(), PlaybackError>;

    /// Pause playback
    fn pause(&mut self);

    /// Mute or unmute the audio track
    fn set_muted(&mut self, muted: bool);

    /// Restart from the beginning when playback reaches the end
    fn set_looping(&mut self, looping: bool);
}

/// The "point your camera at the marker" instruction
pub trait HintElement: Send {
    fn set_visible(&mut self, visible: bool);
}

/// A hint element for hosts that have none
#[derive(Debug, Default)]
pub struct NoHint;

impl HintElement for NoHint {
    fn set_visible(&mut self, _visible: bool) {}
}

/// Media handle that only logs what it is asked to do.
///
/// Used when replaying tracker signals without a real video element.
#[derive(Debug, Default)]
pub struct LoggingMedia {
    label: String,
}

impl LoggingMedia {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl MediaHandle for LoggingMedia {
    fn play(&mut self) -> Result<(), PlaybackError> {
        tracing::info!(media = %self.label, "play");
        Ok(())
    }

    fn pause(&mut self) {
        tracing::info!(media = %self.label, "pause");
    }

    fn set_muted(&mut self, muted: bool) {
        tracing::info!(media = %self.label, muted, "set muted");
    }

    fn set_looping(&mut self, looping: bool) {
        tracing::info!(media = %self.label, looping, "set looping");
    }
}
