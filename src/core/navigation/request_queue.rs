//=========================================================================
// Request Queue
//=========================================================================
//
// FIFO of show requests waiting for the transition gate.
//
// Requests are resolved before they are queued. The navigator pops the
// front entry whenever the gate is open, so exactly one transition is in
// flight at a time.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;

//=== Internal Dependencies ===============================================

use super::ShowRequest;
use crate::core::view::{ViewHandle, ViewKind};

//=== Pending Request =====================================================

/// Show request paired with the view it resolved to.
pub(crate) struct PendingRequest<K: ViewKind> {
    pub(crate) request: ShowRequest<K>,
    pub(crate) target: ViewHandle<K>,
}

//=== Request Queue =======================================================

/// Queue of resolved show requests.
pub(crate) struct RequestQueue<K: ViewKind> {
    queue: VecDeque<PendingRequest<K>>,
}

impl<K: ViewKind> RequestQueue<K> {
    /// Creates a new empty request queue.
    pub(crate) fn new() -> Self {
        Self { queue: VecDeque::new() }
    }

    /// Queues a request behind every request already waiting.
    pub(crate) fn push(&mut self, pending: PendingRequest<K>) {
        self.queue.push_back(pending);
    }

    /// Takes the oldest waiting request.
    pub(crate) fn pop(&mut self) -> Option<PendingRequest<K>> {
        self.queue.pop_front()
    }

    /// Returns true if the queue is empty.
    pub(crate) fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the number of waiting requests.
    pub(crate) fn len(&self) -> usize {
        self.queue.len()
    }

    /// Drops every waiting request, returning how many were dropped.
    pub(crate) fn clear(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        dropped
    }
}

impl<K: ViewKind> Default for RequestQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================
