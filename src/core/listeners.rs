//! Click listener registry.
//!
//! `ClickBus::subscribe` hands back a `Subscription` bound to the exact
//! callback it registered. Dropping or disposing the subscription removes that
//! callback, exactly once. Listeners may dispose subscriptions (their own
//! included) while a click is being dispatched.

use crate::game::FlappyGame;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Callback invoked for every click.
pub type ClickListener = Box<dyn FnMut(&mut FlappyGame)>;

/// Identifies one registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(ListenerId, ClickListener)>,
    dispatching: bool,
    /// Removals requested while `listeners` was checked out for dispatch.
    pending_removals: Vec<ListenerId>,
}

enum Removal {
    /// Dropped by the caller once the registry borrow is released.
    Removed(ClickListener),
    Deferred,
    Missing,
}

impl Registry {
    fn remove(&mut self, id: ListenerId) -> Removal {
        if let Some(pos) = self.listeners.iter().position(|(lid, _)| *lid == id) {
            let (_, listener) = self.listeners.remove(pos);
            return Removal::Removed(listener);
        }
        if self.dispatching && !self.pending_removals.contains(&id) {
            self.pending_removals.push(id);
            return Removal::Deferred;
        }
        Removal::Missing
    }
}

/// Global click event stream.
#[derive(Clone, Default)]
pub struct ClickBus {
    registry: Rc<RefCell<Registry>>,
}

impl ClickBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` until the returned subscription is dropped.
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&mut FlappyGame) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry.listeners.push((id, Box::new(listener)));
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
            disposed: false,
        }
    }

    /// Deliver one click to every registered listener, in registration order.
    pub fn dispatch(&self, game: &mut FlappyGame) {
        let mut active = {
            let mut registry = self.registry.borrow_mut();
            registry.dispatching = true;
            std::mem::take(&mut registry.listeners)
        };

        for (_, listener) in active.iter_mut() {
            listener(game);
        }

        let mut registry = self.registry.borrow_mut();
        registry.dispatching = false;
        let removed = std::mem::take(&mut registry.pending_removals);
        let (disposed, mut kept): (Vec<_>, Vec<_>) = active
            .into_iter()
            .partition(|(id, _)| removed.contains(id));
        // Listeners registered during dispatch go after the existing ones
        kept.append(&mut registry.listeners);
        registry.listeners = kept;
        drop(registry);
        // Disposed closures may own subscriptions of their own
        drop(disposed);
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// Disposer for one registered listener.
#[derive(Debug)]
pub struct Subscription {
    id: ListenerId,
    registry: Weak<RefCell<Registry>>,
    disposed: bool,
}

impl Subscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Unregister now. Returns whether the listener was still registered.
    pub fn dispose(mut self) -> bool {
        self.release()
    }

    fn release(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        self.disposed = true;
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let removal = registry.borrow_mut().remove(self.id);
        match removal {
            Removal::Removed(listener) => {
                drop(listener);
                true
            }
            Removal::Deferred => true,
            Removal::Missing => false,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
