//! Pinned-config change broadcast
//!
//! Owned by the composition root and handed to every dock. Lives on the
//! logic thread only, so plain `Rc`/`Cell` is enough.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

#[derive(Default)]
struct BusInner {
    next_id: u64,
    subscribers: Vec<(u64, Rc<Cell<bool>>)>,
}

#[derive(Clone, Default)]
pub struct PinnedConfigBus {
    inner: Rc<RefCell<BusInner>>,
}

/// A dock's registration on the bus; dropping it unsubscribes
pub struct Subscription {
    id: u64,
    pending: Rc<Cell<bool>>,
    bus: Weak<RefCell<BusInner>>,
}

impl Subscription {
    /// True once per notification received since the last call
    pub fn take_pending(&self) -> bool {
        self.pending.replace(false)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.bus.upgrade() {
            inner
                .borrow_mut()
                .subscribers
                .retain(|(id, _)| *id != self.id);
        }
    }
}

impl PinnedConfigBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let pending = Rc::new(Cell::new(false));
        inner.subscribers.push((id, Rc::clone(&pending)));
        Subscription {
            id,
            pending,
            bus: Rc::downgrade(&self.inner),
        }
    }

    /// Ask every subscribed dock to re-read the pinned list on its next
    /// turn. Returns the number of docks notified.
    pub fn notify_pinned_config_changed(&self) -> usize {
        let inner = self.inner.borrow();
        for (_, pending) in &inner.subscribers {
            pending.set(true);
        }
        inner.subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}
