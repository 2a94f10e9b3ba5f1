//! Deduplication of identical concurrent requests.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;

/// Outcome of [`InFlight::join`].
pub enum Ticket<K: Hash + Eq + Clone, V: Clone> {
    /// First caller for the key: performs the work and publishes the result.
    Leader(Leader<K, V>),
    /// Later caller: waits for the leader's result.
    Follower(broadcast::Receiver<V>),
}

/// Map of pending requests keyed by resource and parameters.
pub struct InFlight<K, V> {
    pending: Arc<Mutex<HashMap<K, broadcast::Sender<V>>>>,
}

impl<K, V> Default for InFlight<K, V> {
    fn default() -> Self {
        Self {
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<K: Hash + Eq + Clone, V: Clone> InFlight<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn join(&self, key: K) -> Ticket<K, V> {
        let mut pending = self.pending.lock();
        if let Some(sender) = pending.get(&key) {
            return Ticket::Follower(sender.subscribe());
        }
        let (sender, _) = broadcast::channel(1);
        pending.insert(key.clone(), sender.clone());
        Ticket::Leader(Leader {
            key,
            sender,
            pending: self.pending.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}

/// Held by the caller doing the work. Dropping it without
/// [`finish`](Leader::finish) releases the key and wakes followers with a
/// closed channel.
pub struct Leader<K: Hash + Eq + Clone, V: Clone> {
    key: K,
    sender: broadcast::Sender<V>,
    pending: Arc<Mutex<HashMap<K, broadcast::Sender<V>>>>,
}

impl<K: Hash + Eq + Clone, V: Clone> Leader<K, V> {
    /// Release the key, then publish `value` to everyone who joined.
    pub fn finish(self, value: V) {
        self.pending.lock().remove(&self.key);
        // No receivers is fine: nobody joined.
        let _ = self.sender.send(value);
    }
}

impl<K: Hash + Eq + Clone, V: Clone> Drop for Leader<K, V> {
    fn drop(&mut self) {
        let mut pending = self.pending.lock();
        if pending
            .get(&self.key)
            .is_some_and(|s| s.same_channel(&self.sender))
        {
            pending.remove(&self.key);
        }
    }
}
