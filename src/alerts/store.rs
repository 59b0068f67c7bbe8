//! Bounded, observable in-memory alert list.

use super::{Alert, AlertSink};
use std::sync::{Arc, Mutex};

/// Alerts kept before the oldest are dropped.
pub const DEFAULT_ALERT_CAPACITY: usize = 100;

/// Handle returned by [`AlertStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&[Alert]) + Send>;

/// Newest-first alert list with change listeners.
///
/// A push prepends the batch (keeping the batch's own order) and truncates
/// to capacity. Listeners run after every push or clear with the current
/// contents.
pub struct AlertStore {
    alerts: Vec<Alert>,
    capacity: usize,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl Default for AlertStore {
    fn default() -> Self {
        Self::new(DEFAULT_ALERT_CAPACITY)
    }
}

impl std::fmt::Debug for AlertStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertStore")
            .field("alerts", &self.alerts.len())
            .field("capacity", &self.capacity)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl AlertStore {
    /// Create a store holding at most `capacity` alerts (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            alerts: Vec::new(),
            capacity: capacity.max(1),
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Prepend `batch` and notify listeners.
    ///
    /// An empty batch leaves the contents alone but still notifies.
    pub fn push(&mut self, batch: &[Alert]) {
        let mut next = Vec::with_capacity((batch.len() + self.alerts.len()).min(self.capacity));
        next.extend(batch.iter().take(self.capacity).cloned());
        let room = self.capacity - next.len();
        next.extend(self.alerts.drain(..).take(room));
        self.alerts = next;
        self.notify();
    }

    /// Current alerts, newest first.
    #[must_use]
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every alert and notify listeners.
    pub fn clear(&mut self) {
        self.alerts.clear();
        self.notify();
    }

    /// Register a change listener.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&[Alert]) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener(&self.alerts);
        }
    }
}

impl AlertSink for AlertStore {
    fn push_alerts(&mut self, alerts: &[Alert]) -> anyhow::Result<()> {
        self.push(alerts);
        Ok(())
    }
}

/// [`AlertStore`] shared between the scheduler thread and readers.
#[derive(Debug, Clone, Default)]
pub struct SharedAlertStore(Arc<Mutex<AlertStore>>);

impl SharedAlertStore {
    #[must_use]
    pub fn new(store: AlertStore) -> Self {
        Self(Arc::new(Mutex::new(store)))
    }

    /// Run `f` with the store locked.
    pub fn with<R>(&self, f: impl FnOnce(&mut AlertStore) -> R) -> anyhow::Result<R> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| anyhow::anyhow!("alert store lock poisoned"))?;
        Ok(f(&mut guard))
    }

    /// Copy of the current alerts, newest first.
    pub fn snapshot(&self) -> anyhow::Result<Vec<Alert>> {
        self.with(|store| store.alerts().to_vec())
    }
}

impl AlertSink for SharedAlertStore {
    fn push_alerts(&mut self, alerts: &[Alert]) -> anyhow::Result<()> {
        self.with(|store| store.push(alerts))
    }
}
