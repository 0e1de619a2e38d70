use std::collections::HashMap;

use crate::types::ObserverKey;

/// Per-observer values shadowing the global value.
///
/// An entry holding `None` marks an observer whose override was cleared: it
/// falls back to the global value, but the entry still has to be removed on
/// departure.
pub struct OverrideTable<V> {
    entries: HashMap<ObserverKey, Option<V>>,
}

impl<V> Default for OverrideTable<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<V> OverrideTable<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active override for `observer`, if any
    pub fn get(&self, observer: &ObserverKey) -> Option<&V> {
        self.entries.get(observer).and_then(Option::as_ref)
    }

    pub fn is_active(&self, observer: &ObserverKey) -> bool {
        self.get(observer).is_some()
    }

    pub fn has_entry(&self, observer: &ObserverKey) -> bool {
        self.entries.contains_key(observer)
    }

    pub fn insert(&mut self, observer: ObserverKey, value: V) {
        self.entries.insert(observer, Some(value));
    }

    /// Drop the override but keep the observer's entry
    pub fn reset(&mut self, observer: ObserverKey) {
        self.entries.insert(observer, None);
    }

    pub fn remove(&mut self, observer: &ObserverKey) -> bool {
        self.entries.remove(observer).is_some()
    }

    pub fn active_observers(&self) -> Vec<ObserverKey> {
        self.entries
            .iter()
            .filter(|(_, value)| value.is_some())
            .map(|(observer, _)| *observer)
            .collect()
    }

    /// Remove every entry, returning the overrides that were active
    pub fn drain_active(&mut self) -> Vec<(ObserverKey, V)> {
        self.entries
            .drain()
            .filter_map(|(observer, value)| value.map(|value| (observer, value)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
