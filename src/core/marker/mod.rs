//! # Marker Module
//!
//! Plays the overlay video while a marker is in view.
//!
//! ## States
//! | State | Overlay            | Hint    |
//! |-------|--------------------|---------|
//! | LOST  | paused, muted      | shown   |
//! | FOUND | playing, unmuted   | hidden  |
//!
//! The tracking engine sends `Found`/`Lost` signals through a
//! [`SignalSender`]; the [`MarkerView`] handles them one at a time. Repeated
//! signals for the current state do nothing. A refused `play()` is logged and
//! reported but the marker still counts as found.
//!
//! ## Example
//! ```rust,ignore
//! let (mut view, tracker) = MarkerView::mount(Box::new(video), Box::new(hint), events);
//! engine.on_found(move || tracker.found());
//! // ...
//! view.pump();
//! view.unmount();
//! ```

mod controller;
mod media;
mod session;
#[cfg(test)]
mod testing;
mod view;

pub use controller::MarkerMediaController;
pub use media::{HintElement, LoggingMedia, MediaHandle, NoHint};
pub use session::{MarkerSession, MarkerState};
pub use view::{MarkerView, SignalSender};

use serde::{Deserialize, Serialize};

/// A detection edge reported by the tracking engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerSignal {
    Found,
    Lost,
}

impl std::str::FromStr for MarkerSignal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "found" => Ok(MarkerSignal::Found),
            "lost" => Ok(MarkerSignal::Lost),
            other => Err(format!("unknown marker signal '{}', expected 'found' or 'lost'", other)),
        }
    }
}
