use std::collections::HashMap;

use crate::{
    diff::{exact_map::MapChange, Replicable, ReplicableKey},
    replica::{Outbound, ReplicaState},
    shape::ExactMap,
    types::ObserverKey,
};

impl<K: ReplicableKey, V: Replicable> ReplicaState<ExactMap<K, V>> {
    pub fn get_entry(&self, observer: Option<&ObserverKey>, key: &K) -> Option<V> {
        let map = match observer {
            Some(observer) => self.effective(observer),
            None => &self.global,
        };
        map.get(key).cloned()
    }

    pub fn set_entry(&mut self, key: K, value: V) -> Option<Outbound<MapChange<K, V>>> {
        self.set_and_delete_entries(std::iter::once((key, value)), std::iter::empty())
    }

    pub fn set_entries<I>(&mut self, entries: I) -> Option<Outbound<MapChange<K, V>>>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.set_and_delete_entries(entries, std::iter::empty())
    }

    /// Produces a payload only when the key existed
    pub fn delete_entry(&mut self, key: &K) -> Option<Outbound<MapChange<K, V>>> {
        self.set_and_delete_entries(std::iter::empty(), std::iter::once(key.clone()))
    }

    /// Apply writes then deletions to the global value, broadcasting one
    /// payload holding every change that actually took effect
    pub fn set_and_delete_entries<I, D>(
        &mut self,
        sets: I,
        deletes: D,
    ) -> Option<Outbound<MapChange<K, V>>>
    where
        I: IntoIterator<Item = (K, V)>,
        D: IntoIterator<Item = K>,
    {
        let mut changes = Vec::new();

        for (key, value) in sets {
            if self.global.get(&key) == Some(&value) {
                continue;
            }
            self.global.insert(key.clone(), value.clone());
            changes.push(MapChange::Set { key, value });
        }

        for key in deletes {
            if self.global.remove(&key).is_some() {
                changes.push(MapChange::Delete { key });
            }
        }

        self.broadcast(changes)
    }

    /// Empty the map, dropping overrides
    pub fn clear(&mut self) -> Vec<Outbound<MapChange<K, V>>> {
        self.set(HashMap::new())
    }
}
