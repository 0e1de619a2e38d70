use std::collections::HashMap;

use crate::types::ObserverKey;

/// Values waiting for the next flush.
///
/// Staging a global value supersedes every per-observer value staged before
/// it. Per-observer values never displace a staged global value.
pub struct PendingBatch<V> {
    pending_global: Option<V>,
    pending_per_observer: HashMap<ObserverKey, V>,
}

impl<V> Default for PendingBatch<V> {
    fn default() -> Self {
        Self {
            pending_global: None,
            pending_per_observer: HashMap::new(),
        }
    }
}

impl<V> PendingBatch<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_pending_global(&self) -> bool {
        self.pending_global.is_some()
    }

    pub fn pending_global(&self) -> Option<&V> {
        self.pending_global.as_ref()
    }

    pub fn pending_for(&self, observer: &ObserverKey) -> Option<&V> {
        self.pending_per_observer.get(observer)
    }

    pub fn stage_global(&mut self, value: V) {
        self.pending_per_observer.clear();
        self.pending_global = Some(value);
    }

    pub fn stage_for(&mut self, observer: ObserverKey, value: V) {
        self.pending_per_observer.insert(observer, value);
    }

    pub fn cancel_for(&mut self, observer: &ObserverKey) -> bool {
        self.pending_per_observer.remove(observer).is_some()
    }

    pub fn take_global(&mut self) -> Option<V> {
        self.pending_global.take()
    }

    pub fn take_per_observer(&mut self) -> Vec<(ObserverKey, V)> {
        self.pending_per_observer.drain().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending_global.is_none() && self.pending_per_observer.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending_global = None;
        self.pending_per_observer.clear();
    }
}
