use std::collections::HashMap;

use crate::{
    diff::{
        shallow_map::{object_patch, ShallowChange, ShallowObject},
        Replicable, ReplicableKey,
    },
    replica::{Outbound, ReplicaState},
    shape::ShallowMap,
    types::ObserverKey,
};

impl<K: ReplicableKey, F: Replicable> ReplicaState<ShallowMap<K, F>> {
    pub fn get_entry(&self, observer: Option<&ObserverKey>, key: &K) -> Option<ShallowObject<F>> {
        let map = match observer {
            Some(observer) => self.effective(observer),
            None => &self.global,
        };
        map.get(key).cloned()
    }

    /// Store a whole record. An existing record is patched field by field.
    pub fn set_entry(
        &mut self,
        key: K,
        object: ShallowObject<F>,
    ) -> Option<Outbound<ShallowChange<K, F>>> {
        let change = match self.global.get(&key) {
            None => ShallowChange::Replace {
                key: key.clone(),
                object: object.clone(),
            },
            Some(current) => {
                let (sets, deletes) = object_patch(current, &object)?;
                ShallowChange::Patch {
                    key: key.clone(),
                    sets,
                    deletes,
                }
            }
        };

        self.global.insert(key, object);
        self.broadcast(vec![change])
    }

    /// Write `sets` and remove `deletes` on one record, creating it from
    /// `sets` when the key is absent
    pub fn patch_entry(
        &mut self,
        key: K,
        sets: ShallowObject<F>,
        deletes: Vec<String>,
    ) -> Option<Outbound<ShallowChange<K, F>>> {
        let Some(current) = self.global.get(&key) else {
            if sets.is_empty() {
                return None;
            }
            return self.set_entry(key, sets);
        };

        let mut next = current.clone();
        for (field, value) in sets {
            next.set(field, value);
        }
        for field in &deletes {
            next.remove(field);
        }

        self.set_entry(key, next)
    }

    pub fn delete_fields(
        &mut self,
        key: &K,
        fields: Vec<String>,
    ) -> Option<Outbound<ShallowChange<K, F>>> {
        if !self.global.contains_key(key) {
            return None;
        }
        self.patch_entry(key.clone(), ShallowObject::new(), fields)
    }

    /// Produces a payload only when the key existed
    pub fn delete_entry(&mut self, key: &K) -> Option<Outbound<ShallowChange<K, F>>> {
        self.global.remove(key)?;
        self.broadcast(vec![ShallowChange::Delete { key: key.clone() }])
    }

    pub fn clear(&mut self) -> Vec<Outbound<ShallowChange<K, F>>> {
        self.set(HashMap::new())
    }
}
