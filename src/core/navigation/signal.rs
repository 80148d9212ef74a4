//=========================================================================
// Navigation Signals
//=========================================================================
//
// Messages flowing from views (and their completion callbacks) back to
// the navigator.
//
// Architecture:
//   View / callback → SignalSender::send() → crossbeam channel
//                                                 ↓
//   Navigator::pump() → SignalCollector::next() (bounded) → handle each
//
// Every signal is stamped with a sequence number at send time. The
// navigator uses it to ignore visibility notifications emitted before it
// started watching a view.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::Cell;
use std::rc::Rc;

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::ShowRequest;
use crate::core::layers::Layer;
use crate::core::view::{ViewKey, ViewKind};

//=== Identifiers =========================================================

/// Identifies one transition run by the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct TransitionId(pub(crate) u64);

/// Asynchronous step a transition waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// The displaced occupant finished its animated hide.
    Hidden,

    /// The target finished its animated show.
    Shown,
}

//=== Signal ==============================================================

/// Navigation requests views can issue through their context.
pub(crate) enum NavigationCommand<K: ViewKind> {
    Show(ShowRequest<K>),
    GoBack(Layer),
}

/// Payload of one message on the signal channel.
pub(crate) enum Signal<K: ViewKind> {
    StepFinished { transition: TransitionId, step: Step },
    Visibility { key: ViewKey<K>, visible: bool },
    Destroyed { key: ViewKey<K> },
    Command(NavigationCommand<K>),
}

/// Signal plus its send-order stamp.
pub(crate) struct Envelope<K: ViewKind> {
    pub(crate) seq: u64,
    pub(crate) signal: Signal<K>,
}

//=== SignalSender ========================================================

/// Stamping sender half of the signal channel.
pub(crate) struct SignalSender<K: ViewKind> {
    sender: Sender<Envelope<K>>,
    sequence: Rc<Cell<u64>>,
}

impl<K: ViewKind> SignalSender<K> {
    /// Sends a signal; a closed channel only logs.
    pub(crate) fn send(&self, signal: Signal<K>) {
        let seq = self.sequence.get();
        self.sequence.set(seq + 1);

        if self.sender.send(Envelope { seq, signal }).is_err() {
            warn!("Navigator is gone, dropping signal #{}", seq);
        }
    }

    /// Stamp the next signal will carry.
    pub(crate) fn next_seq(&self) -> u64 {
        self.sequence.get()
    }
}

impl<K: ViewKind> Clone for SignalSender<K> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            sequence: Rc::clone(&self.sequence),
        }
    }
}

//=== SignalCollector =====================================================

/// Navigator-side receiving half with bounded draining.
pub(crate) struct SignalCollector<K: ViewKind> {
    receiver: Receiver<Envelope<K>>,
    max_per_update: usize,
}

impl<K: ViewKind> SignalCollector<K> {
    /// Takes the next pending signal.
    pub(crate) fn next(&self) -> Option<Envelope<K>> {
        match self.receiver.try_recv() {
            Ok(envelope) => {
                trace!("Received signal #{}", envelope.seq);
                Some(envelope)
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Upper bound on signals handled per navigator update.
    pub(crate) fn max_per_update(&self) -> usize {
        self.max_per_update
    }

    /// Number of signals waiting.
    pub(crate) fn pending(&self) -> usize {
        self.receiver.len()
    }
}

/// Creates a connected sender/collector pair.
pub(crate) fn signal_channel<K: ViewKind>(max_per_update: usize) -> (SignalSender<K>, SignalCollector<K>) {
    let (sender, receiver) = unbounded();

    (
        SignalSender {
            sender,
            sequence: Rc::new(Cell::new(0)),
        },
        SignalCollector {
            receiver,
            max_per_update,
        },
    )
}

//=========================================================================
// Unit Tests
//=========================================================================
