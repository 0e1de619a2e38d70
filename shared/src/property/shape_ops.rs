use std::collections::HashMap;

use crate::{
    diff::{shallow_map::ShallowObject, Replicable, ReplicableKey},
    property::Property,
    role::Role,
    shape::{ExactMap, ExactSet, ShallowMap},
    types::ObserverKey,
};

impl<K, V, R> Property<ExactMap<K, V>, R>
where
    K: ReplicableKey,
    V: Replicable,
    R: Role<ExactMap<K, V>>,
{
    pub fn get_entry(&self, observer: Option<&ObserverKey>, key: &K) -> Option<V> {
        self.state.get_entry(observer, key)
    }

    /// Owned copy of the whole map as seen by `observer`
    pub fn snapshot(&self, observer: Option<&ObserverKey>) -> HashMap<K, V> {
        self.state.get(observer)
    }

    pub fn set_entry(&mut self, key: K, value: V) {
        let outbound = self.state.set_entry(key, value);
        self.emit(outbound);
    }

    pub fn set_entries<I: IntoIterator<Item = (K, V)>>(&mut self, entries: I) {
        let outbound = self.state.set_entries(entries);
        self.emit(outbound);
    }

    /// Returns whether the key was present
    pub fn delete_entry(&mut self, key: &K) -> bool {
        let outbound = self.state.delete_entry(key);
        let removed = outbound.is_some();
        self.emit(outbound);
        removed
    }

    pub fn set_and_delete_entries<I, D>(&mut self, sets: I, deletes: D)
    where
        I: IntoIterator<Item = (K, V)>,
        D: IntoIterator<Item = K>,
    {
        let outbound = self.state.set_and_delete_entries(sets, deletes);
        self.emit(outbound);
    }

    pub fn clear(&mut self) {
        let outbound = self.state.clear();
        self.emit_all(outbound);
    }
}

impl<V, R> Property<ExactSet<V>, R>
where
    V: ReplicableKey,
    R: Role<ExactSet<V>>,
{
    pub fn contains(&self, observer: Option<&ObserverKey>, member: &V) -> bool {
        self.state.contains(observer, member)
    }

    /// Returns whether `member` was newly added
    pub fn add(&mut self, member: V) -> bool {
        let outbound = self.state.add(member);
        let added = outbound.is_some();
        self.emit(outbound);
        added
    }

    /// Returns whether `member` was present
    pub fn remove(&mut self, member: &V) -> bool {
        let outbound = self.state.remove(member);
        let removed = outbound.is_some();
        self.emit(outbound);
        removed
    }

    pub fn clear(&mut self) {
        let outbound = self.state.clear();
        self.emit_all(outbound);
    }
}

impl<K, F, R> Property<ShallowMap<K, F>, R>
where
    K: ReplicableKey,
    F: Replicable,
    R: Role<ShallowMap<K, F>>,
{
    pub fn get_entry(&self, observer: Option<&ObserverKey>, key: &K) -> Option<ShallowObject<F>> {
        self.state.get_entry(observer, key)
    }

    pub fn set_entry(&mut self, key: K, object: ShallowObject<F>) {
        let outbound = self.state.set_entry(key, object);
        self.emit(outbound);
    }

    pub fn patch_entry(&mut self, key: K, sets: ShallowObject<F>, deletes: Vec<String>) {
        let outbound = self.state.patch_entry(key, sets, deletes);
        self.emit(outbound);
    }

    pub fn delete_fields(&mut self, key: &K, fields: Vec<String>) {
        let outbound = self.state.delete_fields(key, fields);
        self.emit(outbound);
    }

    /// Returns whether the key was present
    pub fn delete_entry(&mut self, key: &K) -> bool {
        let outbound = self.state.delete_entry(key);
        let removed = outbound.is_some();
        self.emit(outbound);
        removed
    }

    pub fn clear(&mut self) {
        let outbound = self.state.clear();
        self.emit_all(outbound);
    }
}
