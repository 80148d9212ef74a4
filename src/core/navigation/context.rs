//=========================================================================
// Navigation Context
//=========================================================================
//
// Handle the navigator gives every registered view.
//
// Views cannot borrow the navigator while it is driving them, so all
// view → navigator traffic goes through this handle as queued signals:
// visibility notifications, destruction reports and navigation requests.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::gate::{Gate, GateOpen};
use super::signal::{NavigationCommand, Signal, SignalSender};
use super::ShowRequest;
use crate::core::layers::Layer;
use crate::core::view::{ViewKey, ViewKind};

//=== NavigationContext ===================================================

/// Cloneable link from a view back to its navigator.
pub struct NavigationContext<K: ViewKind> {
    signals: SignalSender<K>,
    gate: Gate,
}

impl<K: ViewKind> NavigationContext<K> {
    pub(crate) fn new(signals: SignalSender<K>, gate: Gate) -> Self {
        Self { signals, gate }
    }

    //--- Notifications ----------------------------------------------------

    /// Reports that the view settled into a visible or hidden state.
    pub fn notify_visibility(&self, key: ViewKey<K>, visible: bool) {
        self.signals.send(Signal::Visibility { key, visible });
    }

    /// Reports that the view object was destroyed.
    pub fn notify_destroyed(&self, key: ViewKey<K>) {
        self.signals.send(Signal::Destroyed { key });
    }

    //--- Navigation Requests ----------------------------------------------

    /// Queues a show request, handled on the navigator's next update.
    pub fn request(&self, request: ShowRequest<K>) {
        self.signals.send(Signal::Command(NavigationCommand::Show(request)));
    }

    /// Shorthand for showing `kind` on the main layer with default modes.
    pub fn show(&self, kind: K) {
        self.request(ShowRequest::new(kind));
    }

    /// Queues a return to the previous view of `layer`.
    pub fn go_back(&self, layer: Layer) {
        self.signals.send(Signal::Command(NavigationCommand::GoBack(layer)));
    }

    //--- Gate -------------------------------------------------------------

    /// True when no transition is in flight.
    pub fn can_be_shown(&self) -> bool {
        self.gate.is_open()
    }

    /// Future resolving once no transition is in flight.
    pub fn wait_until_can_be_shown(&self) -> GateOpen {
        self.gate.wait()
    }
}

impl<K: ViewKind> Clone for NavigationContext<K> {
    fn clone(&self) -> Self {
        Self {
            signals: self.signals.clone(),
            gate: self.gate.clone(),
        }
    }
}

impl<K: ViewKind> std::fmt::Debug for NavigationContext<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationContext")
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}
