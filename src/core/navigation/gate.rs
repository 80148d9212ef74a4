//=========================================================================
// Transition Gate
//=========================================================================
//
// Global "can be shown" flag serializing navigation transitions.
//
// The navigator closes the gate when a transition begins and reopens it
// once the new view is shown. Anyone holding a `Gate` can check it or
// await its reopening:
//
//   gate.wait().await   ← resolves on the next open()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::{Cell, RefCell};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

//=== Gate ================================================================

struct GateState {
    open: Cell<bool>,
    waiters: RefCell<Vec<Waker>>,
}

/// Shared handle to the navigator's transition gate.
#[derive(Clone)]
pub struct Gate {
    state: Rc<GateState>,
}

impl Gate {
    /// Creates an open gate.
    pub(crate) fn new() -> Self {
        Self {
            state: Rc::new(GateState {
                open: Cell::new(true),
                waiters: RefCell::new(Vec::new()),
            }),
        }
    }

    /// True when no transition is in flight.
    pub fn is_open(&self) -> bool {
        self.state.open.get()
    }

    /// Future resolving once the gate is open.
    ///
    /// Resolves immediately if it already is.
    pub fn wait(&self) -> GateOpen {
        GateOpen { gate: self.clone() }
    }

    pub(crate) fn close(&self) {
        self.state.open.set(false);
    }

    pub(crate) fn open(&self) {
        self.state.open.set(true);

        let waiters = std::mem::take(&mut *self.state.waiters.borrow_mut());
        for waker in waiters {
            waker.wake();
        }
    }

    fn register(&self, waker: &Waker) {
        let mut waiters = self.state.waiters.borrow_mut();
        if !waiters.iter().any(|w| w.will_wake(waker)) {
            waiters.push(waker.clone());
        }
    }
}

impl fmt::Debug for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gate").field("open", &self.is_open()).finish()
    }
}

//=== GateOpen ============================================================

/// Future returned by [`Gate::wait`].
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct GateOpen {
    gate: Gate,
}

impl Future for GateOpen {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.gate.is_open() {
            return Poll::Ready(());
        }

        self.gate.register(cx.waker());
        Poll::Pending
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::task::Wake;

    struct CountingWaker(AtomicUsize);

    impl Wake for CountingWaker {
        fn wake(self: Arc<Self>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn new_gate_is_open() {
        assert!(Gate::new().is_open());
    }

    #[test]
    fn wait_on_open_gate_is_ready() {
        let gate = Gate::new();
        let waker = Waker::from(Arc::new(CountingWaker(AtomicUsize::new(0))));
        let mut cx = Context::from_waker(&waker);

        let mut fut = gate.wait();
        assert_eq!(Pin::new(&mut fut).poll(&mut cx), Poll::Ready(()));
    }

    #[test]
    fn wait_resolves_after_reopen() {
        let gate = Gate::new();
        gate.close();

        let counter = Arc::new(CountingWaker(AtomicUsize::new(0)));
        let waker = Waker::from(Arc::clone(&counter));
        let mut cx = Context::from_waker(&waker);

        let mut fut = gate.wait();
        assert_eq!(Pin::new(&mut fut).poll(&mut cx), Poll::Pending);
        assert_eq!(Pin::new(&mut fut).poll(&mut cx), Poll::Pending);

        gate.open();
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
        assert_eq!(Pin::new(&mut fut).poll(&mut cx), Poll::Ready(()));
    }
}
