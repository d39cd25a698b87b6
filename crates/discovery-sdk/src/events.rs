//! Subscription registry for platform events.
//!
//! Several listeners of different payload types may share one wire event name;
//! `discovery.onNavigateTo` carries nine intent types, for example. Each
//! listener owns a decoder, so a dispatched payload only reaches the listeners
//! whose type it decodes into.
//!
//! Listeners are cloned out of the lock before they run, so a callback may
//! subscribe or unsubscribe on the same registry.
//!
//! Each event also owns a [`ListenGate`]: an async lock over whether the
//! platform has accepted `{"listen": true}`. Holding it across the listen or
//! unlisten round trip keeps those transitions in order per event.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Whether the platform is currently sending an event, locked across the round trip
pub(crate) type ListenGate = Arc<tokio::sync::Mutex<bool>>;

/// Identifies one registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle returned by the `on_*` subscriptions, consumed by `unsubscribe`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subscription {
    event: &'static str,
    id: ListenerId,
}

impl Subscription {
    pub(crate) fn new(event: &'static str, id: ListenerId) -> Self {
        Self { event, id }
    }

    #[must_use]
    pub fn event(&self) -> &'static str {
        self.event
    }

    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

/// Decodes and handles one payload; returns false when the payload is not its type
type Listener = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

#[derive(Default)]
pub struct EventRegistry {
    listeners: Mutex<HashMap<String, Vec<(ListenerId, Listener)>>>,
    gates: Mutex<HashMap<String, ListenGate>>,
    next_id: AtomicU64,
}

impl fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<String, usize> = self
            .lock()
            .iter()
            .map(|(event, listeners)| (event.clone(), listeners.len()))
            .collect();
        f.debug_struct("EventRegistry")
            .field("listeners", &counts)
            .finish_non_exhaustive()
    }
}

impl EventRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<(ListenerId, Listener)>>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The listen gate for `event`, created on first use.
    pub(crate) fn listen_gate(&self, event: &str) -> ListenGate {
        self.gates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(event.to_string())
            .or_default()
            .clone()
    }

    /// Register a listener that receives payloads decoding as `T`.
    pub fn subscribe<T, F>(&self, event: &str, callback: F) -> ListenerId
    where
        T: DeserializeOwned + 'static,
        F: Fn(T) + Send + Sync + 'static,
    {
        let decode = |payload: &Value| serde_json::from_value::<T>(payload.clone()).ok();
        self.subscribe_with(event, decode, callback).0
    }

    /// Register a listener with a custom decoder.
    ///
    /// Returns the new id and whether it is the first listener on `event`.
    pub fn subscribe_with<T, D, F>(&self, event: &str, decode: D, callback: F) -> (ListenerId, bool)
    where
        T: 'static,
        D: Fn(&Value) -> Option<T> + Send + Sync + 'static,
        F: Fn(T) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let listener: Listener = Arc::new(move |payload| match decode(payload) {
            Some(value) => {
                callback(value);
                true
            }
            None => false,
        });

        let mut listeners = self.lock();
        let entry = listeners.entry(event.to_string()).or_default();
        entry.push((id, listener));
        let first = entry.len() == 1;
        debug!("Listener {} subscribed to {}", id, event);
        (id, first)
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, event: &str, id: ListenerId) -> bool {
        self.remove(event, id).is_some()
    }

    /// Remove a listener and report how many remain on `event`.
    pub(crate) fn remove(&self, event: &str, id: ListenerId) -> Option<usize> {
        let mut listeners = self.lock();
        let entry = listeners.get_mut(event)?;
        let position = entry.iter().position(|(listener_id, _)| *listener_id == id)?;
        entry.remove(position);
        let remaining = entry.len();
        if remaining == 0 {
            listeners.remove(event);
        }
        debug!("Listener {} unsubscribed from {}", id, event);
        Some(remaining)
    }

    /// Deliver `payload` to every listener on `event` whose type matches.
    ///
    /// Returns the number of listeners invoked.
    pub fn dispatch(&self, event: &str, payload: &Value) -> usize {
        let snapshot: Vec<Listener> = match self.lock().get(event) {
            Some(listeners) => listeners.iter().map(|(_, l)| l.clone()).collect(),
            None => Vec::new(),
        };

        let delivered = snapshot.iter().filter(|listener| listener(payload)).count();
        if delivered == 0 {
            debug!("No listener accepted {} payload, dropping", event);
        }
        delivered
    }

    #[must_use]
    pub fn listener_count(&self, event: &str) -> usize {
        self.lock().get(event).map_or(0, Vec::len)
    }
}
