//! Thread-safe store container.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use super::action::Action;
use super::reducer::Reducer;
use super::state::{AppState, RootReducer};

type Listener = Box<dyn Fn(&Action) + Send + Sync>;

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

/// Shared state container with a single dispatch path.
///
/// All writes go through [`Store::dispatch`], which runs the root reducer
/// under a lock and then notifies listeners outside it. Concurrent
/// dispatches are serialized; the last one to reach a slice wins.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    state: Mutex<AppState>,
    listeners: RwLock<Vec<(u64, Listener)>>,
    next_id: Mutex<u64>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: Mutex::new(state),
                listeners: RwLock::new(Vec::new()),
                next_id: Mutex::new(0),
            }),
        }
    }

    pub fn dispatch(&self, action: Action) {
        {
            let mut guard = self.inner.state.lock();
            let current = std::mem::take(&mut *guard);
            *guard = RootReducer.reduce(current, &action);
        }
        tracing::trace!(action = %action, "Dispatched");

        for (_, listener) in self.inner.listeners.read().iter() {
            listener(&action);
        }
    }

    /// Snapshot of the whole tree.
    pub fn state(&self) -> AppState {
        self.inner.state.lock().clone()
    }

    /// Read part of the tree without cloning all of it.
    pub fn select<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.inner.state.lock())
    }

    /// Restore the initial state without dispatching anything.
    pub fn reset_all(&self) {
        *self.inner.state.lock() = AppState::default();
        tracing::debug!("Store reset to initial state");
    }

    /// Register a listener called after every dispatch.
    ///
    /// Listeners must not subscribe or unsubscribe from inside the callback.
    pub fn subscribe(&self, listener: impl Fn(&Action) + Send + Sync + 'static) -> Subscription {
        let id = {
            let mut next = self.inner.next_id.lock();
            *next += 1;
            *next
        };
        self.inner.listeners.write().push((id, Box::new(listener)));
        Subscription(id)
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.inner
            .listeners
            .write()
            .retain(|(id, _)| *id != subscription.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::action::Verb;
    use crate::store::Domain;

    #[test]
    fn dispatch_reduces_and_notifies() {
        let store = Store::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |a| sink.lock().push(a.type_name()));

        store.dispatch(Action::request(Domain::Courts, Verb::Read));
        assert!(store.select(|s| s.spinner.is_loading));

        store.dispatch(Action::complete(Domain::Courts));
        assert!(!store.state().spinner.is_loading);

        assert_eq!(
            *seen.lock(),
            vec!["COURTS_READ_REQUEST".to_string(), "COURTS_COMPLETE".to_string()]
        );
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let store = Store::new();
        let count = Arc::new(Mutex::new(0));
        let sink = count.clone();
        let sub = store.subscribe(move |_| *sink.lock() += 1);

        store.dispatch(Action::set_spinner());
        store.unsubscribe(sub);
        store.dispatch(Action::reset_spinner());
        assert_eq!(*count.lock(), 1);
    }

    #[test]
    fn reset_all_restores_initial_state() {
        let store = Store::new();
        store.dispatch(Action::set_spinner());
        store.reset_all();
        assert_eq!(store.state(), AppState::default());
    }

    #[test]
    fn listeners_can_read_state() {
        let store = Store::new();
        let observed = Arc::new(Mutex::new(None));
        let (sink, handle) = (observed.clone(), store.clone());
        store.subscribe(move |_| *sink.lock() = Some(handle.state().spinner.is_loading));

        store.dispatch(Action::set_spinner());
        assert_eq!(*observed.lock(), Some(true));
    }
}
