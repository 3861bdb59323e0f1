//! The found/lost state machine driving the overlay.

use super::media::{HintElement, MediaHandle};
use super::session::{MarkerSession, MarkerState};
use super::MarkerSignal;
use crate::error::PlaybackError;
use crate::events::{Event, EventSender, MarkerEvent, null_sender};
use tracing::{debug, trace, warn};

/// Starts, mutes, pauses and loops the overlay as the marker comes and goes.
///
/// Redundant signals are no-ops. After [`teardown`](Self::teardown) the
/// controller holds no media or hint and ignores every further signal.
pub struct MarkerMediaController {
    session: MarkerSession,
    media: Option<Box<dyn MediaHandle>>,
    hint: Option<Box<dyn HintElement>>,
    events: EventSender,
    last_playback_error: Option<PlaybackError>,
}

impl MarkerMediaController {
    /// Attach to an overlay and hint with no event reporting
    pub fn new(media: Box<dyn MediaHandle>, hint: Box<dyn HintElement>) -> Self {
        Self::with_events(media, hint, null_sender())
    }

    /// Attach to an overlay and hint, reporting transitions through `events`.
    ///
    /// The overlay starts muted and looping; the hint starts visible.
    pub fn with_events(
        mut media: Box<dyn MediaHandle>,
        mut hint: Box<dyn HintElement>,
        events: EventSender,
    ) -> Self {
        media.set_muted(true);
        media.set_looping(true);
        hint.set_visible(true);
        events.send(Event::Marker(MarkerEvent::Mounted));

        Self {
            session: MarkerSession::new(),
            media: Some(media),
            hint: Some(hint),
            events,
            last_playback_error: None,
        }
    }

    pub fn session(&self) -> &MarkerSession {
        &self.session
    }

    /// The error from the most recent `play()` attempt, if it failed
    pub fn last_playback_error(&self) -> Option<&PlaybackError> {
        self.last_playback_error.as_ref()
    }

    /// Whether the controller still holds its media and hint
    pub fn is_attached(&self) -> bool {
        self.media.is_some()
    }

    /// Dispatch a tracker signal
    pub fn handle(&mut self, signal: MarkerSignal) {
        match signal {
            MarkerSignal::Found => self.on_marker_found(),
            MarkerSignal::Lost => self.on_marker_lost(),
        }
    }

    /// The tracker sees the marker: unmute, play, hide the hint.
    pub fn on_marker_found(&mut self) {
        if !self.is_attached() {
            trace!("marker found after teardown, ignoring");
            return;
        }
        if self.session.state() == MarkerState::Found {
            return;
        }

        self.session.mark_found();
        debug!(session = %self.session, "marker found");
        self.events.send(Event::Marker(MarkerEvent::Found));

        if let Some(media) = self.media.as_mut() {
            media.set_muted(false);
            // Tracking state stands even if the platform refuses playback
            match media.play() {
                Ok(()) => self.last_playback_error = None,
                Err(e) => {
                    warn!(error = %e, "overlay playback failed");
                    self.events.send(Event::Marker(MarkerEvent::PlaybackFailed {
                        reason: e.to_string(),
                    }));
                    self.last_playback_error = Some(e);
                }
            }
        }

        if let Some(hint) = self.hint.as_mut() {
            hint.set_visible(false);
        }
    }

    /// The tracker lost the marker: pause, mute, show the hint.
    pub fn on_marker_lost(&mut self) {
        if !self.is_attached() {
            trace!("marker lost after teardown, ignoring");
            return;
        }
        if self.session.state() == MarkerState::Lost {
            return;
        }

        self.session.mark_lost();
        debug!(session = %self.session, "marker lost");
        self.events.send(Event::Marker(MarkerEvent::Lost));

        if let Some(media) = self.media.as_mut() {
            media.pause();
            media.set_muted(true);
        }

        if let Some(hint) = self.hint.as_mut() {
            hint.set_visible(true);
        }
    }

    /// Release the overlay and hint. Safe to call more than once.
    pub fn teardown(&mut self) {
        let Some(mut media) = self.media.take() else {
            return;
        };

        if self.session.overlay_playing() {
            media.pause();
        }
        self.session.mark_lost();
        drop(media);
        self.hint = None;

        debug!("marker controller torn down");
        self.events.send(Event::Marker(MarkerEvent::Unmounted));
    }
}

impl Drop for MarkerMediaController {
    fn drop(&mut self) {
        self.teardown();
    }
}
