//! Event transport between the engine and its listeners.
//!
//! The scorer, catalog matcher and marker controller emit from whatever
//! thread they run on; a CLI progress bar or a UI bridge reads on another.

use crossbeam_channel::{Receiver, Sender};

use super::Event;

/// Emitting half, handed to the scorer, catalog matcher and controller.
///
/// Clones share one queue. Emitting never fails: with nobody listening the
/// event is dropped and a trace line is written instead.
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<Event>,
}

impl EventSender {
    pub fn send(&self, event: Event) {
        if self.inner.send(event).is_err() {
            tracing::trace!("no event listener, dropping event");
        }
    }
}

/// Listening half, owned by the CLI or an embedding UI
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Wait for the next event; `None` once all senders are gone
    pub fn recv(&self) -> Option<Event> {
        self.inner.recv().ok()
    }

    /// Next event if one is waiting
    pub fn try_recv(&self) -> Option<Event> {
        self.inner.try_recv().ok()
    }

    /// Everything queued right now, oldest first
    pub fn drain(&self) -> Vec<Event> {
        self.inner.try_iter().collect()
    }

    /// Events until the last sender hangs up
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.inner.iter()
    }
}

fn wrap((inner, rx): (Sender<Event>, Receiver<Event>)) -> (EventSender, EventReceiver) {
    (EventSender { inner }, EventReceiver { inner: rx })
}

/// Constructors for a connected sender/receiver pair
#[derive(Debug, Default, Clone, Copy)]
pub struct EventChannel;

impl EventChannel {
    /// Pair with no capacity limit; emitters never wait
    pub fn new() -> (EventSender, EventReceiver) {
        wrap(crossbeam_channel::unbounded())
    }

    /// Pair holding at most `capacity` events; emitters wait for the
    /// listener once it is full
    pub fn bounded(capacity: usize) -> (EventSender, EventReceiver) {
        wrap(crossbeam_channel::bounded(capacity))
    }
}

/// Sender whose receiver is already gone, for callers with no listener
pub fn null_sender() -> EventSender {
    EventChannel::new().0
}
