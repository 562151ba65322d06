//! Observable State Store
//!
//! Holds a single value, merges partial updates into it and notifies
//! subscribers synchronously, in subscription order.
//!
//! Three rules keep notification predictable:
//!
//! - A listener that panics is caught and logged; the remaining listeners
//!   still run and the store stays usable.
//! - A `set` issued from inside a listener is queued. It is applied and
//!   delivered after the current round finishes, before the outermost
//!   `set` returns, so every update gets exactly one delivery round.
//! - A `set` from any other thread waits for the delivery in progress,
//!   then applies and delivers its own patch before returning.

use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

/// Shallow merge of a partial update into a value
pub trait Merge {
    /// Partial update; fields it carries overwrite, the rest persist
    type Patch;

    fn merge(&mut self, patch: Self::Patch);
}

/// Callback invoked with the value after each update
pub type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Token returned by [`Store::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

impl Subscription {
    /// Numeric id, used in logs
    pub fn id(&self) -> u64 {
        self.0
    }

    /// Deregister this subscription from `store`
    pub fn cancel<T: Merge + Clone>(self, store: &Store<T>) -> bool {
        store.unsubscribe(self)
    }
}

/// Observable value container
pub struct Store<T: Merge> {
    value: Mutex<T>,
    listeners: Mutex<Vec<(Subscription, Listener<T>)>>,
    pending: Mutex<VecDeque<T::Patch>>,
    /// Held for a whole apply-and-deliver cycle
    dispatch: Mutex<()>,
    /// Thread currently delivering, if any
    dispatcher: Mutex<Option<ThreadId>>,
    next_id: AtomicU64,
}

/// Marks the current thread as the dispatcher until dropped
struct DispatchGuard<'a> {
    dispatcher: &'a Mutex<Option<ThreadId>>,
    _dispatch: MutexGuard<'a, ()>,
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        *lock(self.dispatcher) = None;
    }
}

impl<T: Merge + Clone> Store<T> {
    /// Create a store holding `initial`
    pub fn new(initial: T) -> Self {
        Self {
            value: Mutex::new(initial),
            listeners: Mutex::new(Vec::new()),
            pending: Mutex::new(VecDeque::new()),
            dispatch: Mutex::new(()),
            dispatcher: Mutex::new(None),
            next_id: AtomicU64::new(1),
        }
    }

    /// Owned copy of the current value
    pub fn get(&self) -> T {
        lock(&self.value).clone()
    }

    /// Merge `patch` into the value and notify every listener.
    ///
    /// Called from inside a listener, the patch is queued behind the round
    /// in progress instead of recursing. Called from another thread while a
    /// round is in progress, it blocks until that round ends; either way
    /// the patch is applied and delivered when the outermost call returns.
    pub fn set(&self, patch: T::Patch) {
        self.update(move |_| patch);
    }

    /// Compute a patch from the current value and apply it atomically.
    ///
    /// No other thread's update lands between reading the value and
    /// applying the patch. From inside a listener the patch is computed
    /// against the value that listener is seeing, then queued like `set`.
    pub fn update<F>(&self, build: F)
    where
        F: FnOnce(&T) -> T::Patch,
    {
        if self.is_dispatching_thread() {
            let patch = build(&self.get());
            lock(&self.pending).push_back(patch);
            return;
        }

        let _guard = self.begin_dispatch();
        let patch = build(&self.get());
        lock(&self.pending).push_back(patch);
        self.drain();
    }

    /// Register a listener, called after every subsequent update
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let subscription = Subscription(self.next_id.fetch_add(1, Ordering::Relaxed));
        lock(&self.listeners).push((subscription, Arc::new(listener)));

        tracing::trace!(subscription = subscription.0, "Listener subscribed");
        subscription
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut listeners = lock(&self.listeners);
        let before = listeners.len();
        listeners.retain(|(s, _)| *s != subscription);
        let removed = listeners.len() != before;

        if removed {
            tracing::trace!(subscription = subscription.0, "Listener unsubscribed");
        }
        removed
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).len()
    }

    fn is_dispatching_thread(&self) -> bool {
        *lock(&self.dispatcher) == Some(thread::current().id())
    }

    fn begin_dispatch(&self) -> DispatchGuard<'_> {
        let dispatch = lock(&self.dispatch);
        *lock(&self.dispatcher) = Some(thread::current().id());
        DispatchGuard {
            dispatcher: &self.dispatcher,
            _dispatch: dispatch,
        }
    }

    fn drain(&self) {
        loop {
            let Some(patch) = lock(&self.pending).pop_front() else {
                break;
            };

            let snapshot = {
                let mut value = lock(&self.value);
                value.merge(patch);
                value.clone()
            };

            self.notify(&snapshot);
        }
    }

    fn notify(&self, value: &T) {
        let listeners: Vec<(Subscription, Listener<T>)> = lock(&self.listeners)
            .iter()
            .map(|(s, l)| (*s, Arc::clone(l)))
            .collect();

        for (subscription, listener) in listeners {
            if let Err(panic) = catch_unwind(AssertUnwindSafe(|| listener(value))) {
                tracing::error!(
                    subscription = subscription.0,
                    reason = %panic_message(panic.as_ref()),
                    "State listener panicked"
                );
            }
        }
    }
}

impl<T: Merge + Clone + Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
