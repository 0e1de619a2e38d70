use std::{collections::HashMap, hash::Hash};

use serde::{Deserialize, Serialize};

/// Change to one entry of a keyed map
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapChange<K, V> {
    Set { key: K, value: V },
    Delete { key: K },
}

impl<K, V> MapChange<K, V> {
    pub fn key(&self) -> &K {
        match self {
            MapChange::Set { key, .. } | MapChange::Delete { key } => key,
        }
    }
}

/// Every key whose value differs (or is new) becomes a `Set`, every key that
/// vanished becomes a `Delete`. Unchanged keys emit nothing.
pub fn map_diff<K, V>(old: &HashMap<K, V>, new: &HashMap<K, V>) -> Vec<MapChange<K, V>>
where
    K: Eq + Hash + Clone,
    V: PartialEq + Clone,
{
    let mut changes = Vec::new();

    for (key, value) in new {
        match old.get(key) {
            Some(previous) if previous == value => {}
            _ => changes.push(MapChange::Set {
                key: key.clone(),
                value: value.clone(),
            }),
        }
    }

    for key in old.keys() {
        if !new.contains_key(key) {
            changes.push(MapChange::Delete { key: key.clone() });
        }
    }

    changes
}

pub fn map_snapshot<K, V>(map: &HashMap<K, V>) -> Vec<MapChange<K, V>>
where
    K: Clone,
    V: Clone,
{
    map.iter()
        .map(|(key, value)| MapChange::Set {
            key: key.clone(),
            value: value.clone(),
        })
        .collect()
}

pub fn apply_map_changes<K, V>(map: &mut HashMap<K, V>, changes: &[MapChange<K, V>])
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    for change in changes {
        match change {
            MapChange::Set { key, value } => {
                map.insert(key.clone(), value.clone());
            }
            MapChange::Delete { key } => {
                map.remove(key);
            }
        }
    }
}
