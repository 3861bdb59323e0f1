//! Recording fakes for controller tests.

use super::media::{HintElement, MediaHandle};
use crate::error::PlaybackError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Play,
    Pause,
    SetMuted(bool),
    SetLooping(bool),
    HintVisible(bool),
    Released,
}

/// Shared log of calls made on the fakes, in order
#[derive(Debug, Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Call>>>);

impl Recorder {
    pub fn record(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

pub struct FakeMedia {
    recorder: Recorder,
    refuse: Arc<AtomicBool>,
}

impl FakeMedia {
    pub fn new(recorder: Recorder) -> Self {
        Self {
            recorder,
            refuse: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A media element whose `play()` is rejected until the switch is cleared
    pub fn refusing(recorder: Recorder) -> Self {
        Self {
            recorder,
            refuse: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn refusal_switch(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.refuse)
    }
}

impl MediaHandle for FakeMedia {
    fn play(&mut self) -> Result<(), PlaybackError> {
        self.recorder.record(Call::Play);
        if self.refuse.load(Ordering::SeqCst) {
            return Err(PlaybackError::Rejected {
                reason: "autoplay blocked".to_string(),
            });
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.recorder.record(Call::Pause);
    }

    fn set_muted(&mut self, muted: bool) {
        self.recorder.record(Call::SetMuted(muted));
    }

    fn set_looping(&mut self, looping: bool) {
        self.recorder.record(Call::SetLooping(looping));
    }
}

impl Drop for FakeMedia {
    fn drop(&mut self) {
        self.recorder.record(Call::Released);
    }
}

pub struct FakeHint {
    recorder: Recorder,
}

impl FakeHint {
    pub fn new(recorder: Recorder) -> Self {
        Self { recorder }
    }
}

impl HintElement for FakeHint {
    fn set_visible(&mut self, visible: bool) {
        self.recorder.record(Call::HintVisible(visible));
    }
}
