//! Single-threaded listener registry with explicit unsubscribe handles.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener<T> = Box<dyn FnMut(&T)>;

struct Registry<T> {
    next_id: u64,
    listeners: Vec<(u64, Listener<T>)>,
    // Ids unsubscribed while their listener was taken out for an emit
    removed: Vec<u64>,
    // Nesting depth of running emits
    emitting: usize,
    // Set by a clear() issued from inside an emit
    cleared: bool,
}

impl<T> Registry<T> {
    fn remove(&mut self, id: u64) {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        if self.listeners.len() == before && self.emitting > 0 && !self.removed.contains(&id) {
            self.removed.push(id);
        }
    }
}

/// Broadcasts values to every subscribed listener.
pub struct Emitter<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T: 'static> Emitter<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
                removed: Vec::new(),
                emitting: 0,
                cleared: false,
            })),
        }
    }

    pub fn subscribe(&self, listener: impl FnMut(&T) + 'static) -> Subscription {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.push((id, Box::new(listener)));
            id
        };

        let weak: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    registry.borrow_mut().remove(id);
                }
            })),
        }
    }

    /// Call every listener with `value`. Listeners may subscribe or
    /// unsubscribe from inside the callback.
    pub fn emit(&self, value: &T) {
        let mut listeners = {
            let mut registry = self.registry.borrow_mut();
            registry.emitting += 1;
            std::mem::take(&mut registry.listeners)
        };
        for (id, listener) in listeners.iter_mut() {
            let skip = {
                let registry = self.registry.borrow();
                registry.cleared || registry.removed.contains(id)
            };
            if !skip {
                listener(value);
            }
        }

        let mut registry = self.registry.borrow_mut();
        registry.emitting -= 1;
        let added = std::mem::take(&mut registry.listeners);
        if registry.cleared {
            listeners.clear();
        } else {
            let removed = &registry.removed;
            listeners.retain(|(id, _)| !removed.contains(id));
        }
        listeners.extend(added);
        registry.listeners = listeners;
        if registry.emitting == 0 {
            registry.removed.clear();
            registry.cleared = false;
        }
    }

    /// Drop every listener at once.
    pub fn clear(&self) {
        let mut registry = self.registry.borrow_mut();
        registry.listeners.clear();
        registry.removed.clear();
        if registry.emitting > 0 {
            registry.cleared = true;
        }
    }

    #[cfg(test)]
    fn pending_removals(&self) -> usize {
        self.registry.borrow().removed.len()
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

impl<T: 'static> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle returned by [`Emitter::subscribe`]. Dropping it unsubscribes;
/// call [`Subscription::detach`] to keep the listener for the emitter's
/// whole lifetime.
#[must_use = "dropping a subscription unsubscribes it"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn dispose(mut self) {
        self.release();
    }

    pub fn detach(mut self) {
        self.unsubscribe = None;
    }

    fn release(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
