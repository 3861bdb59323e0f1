//! Mount/unmount lifecycle and the signal queue between tracker and controller.

use super::controller::MarkerMediaController;
use super::media::{HintElement, MediaHandle};
use super::session::MarkerSession;
use super::MarkerSignal;
use crate::events::EventSender;
use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::trace;

/// Handed to the tracking engine at mount; delivers found/lost signals.
///
/// Cheap to clone. Once the view is unmounted, sends are silently dropped.
#[derive(Clone)]
pub struct SignalSender {
    inner: Sender<MarkerSignal>,
}

impl SignalSender {
    pub fn send(&self, signal: MarkerSignal) {
        if self.inner.send(signal).is_err() {
            trace!(?signal, "marker view unmounted, dropping signal");
        }
    }

    pub fn found(&self) {
        self.send(MarkerSignal::Found);
    }

    pub fn lost(&self) {
        self.send(MarkerSignal::Lost);
    }
}

/// One mounted AR view: a controller plus the queue feeding it.
///
/// Signals are handled one at a time, in arrival order, each to completion
/// before the next is taken off the queue.
pub struct MarkerView {
    controller: MarkerMediaController,
    signals: Option<Receiver<MarkerSignal>>,
}

impl MarkerView {
    /// Mount a view over the given overlay and hint
    pub fn mount(
        media: Box<dyn MediaHandle>,
        hint: Box<dyn HintElement>,
        events: EventSender,
    ) -> (Self, SignalSender) {
        let (sender, receiver) = unbounded();
        let view = Self {
            controller: MarkerMediaController::with_events(media, hint, events),
            signals: Some(receiver),
        };
        (view, SignalSender { inner: sender })
    }

    pub fn session(&self) -> &MarkerSession {
        self.controller.session()
    }

    pub fn controller(&self) -> &MarkerMediaController {
        &self.controller
    }

    pub fn is_mounted(&self) -> bool {
        self.signals.is_some()
    }

    /// Handle every signal already queued, without blocking.
    ///
    /// Returns the number of signals handled.
    pub fn pump(&mut self) -> usize {
        let Some(signals) = self.signals.as_ref() else {
            return 0;
        };

        let mut handled = 0;
        for signal in signals.try_iter() {
            self.controller.handle(signal);
            handled += 1;
        }
        handled
    }

    /// Handle signals until every `SignalSender` has been dropped.
    pub fn run(&mut self) {
        let Some(signals) = self.signals.as_ref() else {
            return;
        };

        for signal in signals.iter() {
            self.controller.handle(signal);
        }
    }

    /// Detach from the tracker and release the overlay.
    ///
    /// Signals still queued are discarded; later sends are dropped.
    pub fn unmount(&mut self) {
        if let Some(signals) = self.signals.take() {
            let discarded = signals.try_iter().count();
            if discarded > 0 {
                trace!(discarded, "discarding queued signals on unmount");
            }
        }
        self.controller.teardown();
    }
}

impl Drop for MarkerView {
    fn drop(&mut self) {
        self.unmount();
    }
}
