use std::{
    collections::{HashMap, HashSet},
    fmt::Debug,
    marker::PhantomData,
};

use crate::diff::{
    exact_map::{apply_map_changes, map_diff, map_snapshot, MapChange},
    exact_set::{apply_set_changes, set_diff, set_snapshot, SetChange},
    payload::DiffPayload,
    scalar::{apply_scalar_changes, scalar_diff, scalar_snapshot, ScalarChange},
    shallow_map::{
        apply_shallow_changes, shallow_object_map_diff, shallow_snapshot, ShallowChange,
        ShallowObject,
    },
    Replicable, ReplicableKey,
};

/// Binds a replicated value type to the change type and diff algorithm used
/// to move it across the wire.
///
/// Shapes are marker types, they are never instantiated.
pub trait ReplicaShape: Send + Sync + 'static {
    type Value: Clone + Default + PartialEq + Debug + Send + Sync + 'static;
    type Change: Replicable;

    /// Changes that turn `old` into `new`, empty when they are equal
    fn diff(old: &Self::Value, new: &Self::Value) -> Vec<Self::Change>;

    /// Changes that rebuild `value` starting from `Self::Value::default()`
    fn snapshot(value: &Self::Value) -> Vec<Self::Change>;

    fn apply(value: &mut Self::Value, changes: &[Self::Change]);

    /// A vacant value has never been assigned, and is not worth syncing
    fn is_vacant(_value: &Self::Value) -> bool {
        false
    }

    fn full_payload(value: &Self::Value) -> DiffPayload<Self::Change> {
        DiffPayload::full(Self::snapshot(value))
    }

    fn diff_payload(old: &Self::Value, new: &Self::Value) -> DiffPayload<Self::Change> {
        DiffPayload::incremental(Self::diff(old, new))
    }

    fn apply_payload(value: &mut Self::Value, payload: &DiffPayload<Self::Change>) {
        if payload.full {
            *value = Self::Value::default();
        }
        Self::apply(value, &payload.changes);
    }
}

/// A single value, vacant until first assigned
pub struct Scalar<T>(PhantomData<fn() -> T>);

impl<T: Replicable> ReplicaShape for Scalar<T> {
    type Value = Option<T>;
    type Change = ScalarChange<T>;

    fn diff(old: &Self::Value, new: &Self::Value) -> Vec<Self::Change> {
        scalar_diff(old, new)
    }

    fn snapshot(value: &Self::Value) -> Vec<Self::Change> {
        scalar_snapshot(value)
    }

    fn apply(value: &mut Self::Value, changes: &[Self::Change]) {
        apply_scalar_changes(value, changes);
    }

    fn is_vacant(value: &Self::Value) -> bool {
        value.is_none()
    }
}

/// A keyed map diffed entry by entry
pub struct ExactMap<K, V>(PhantomData<fn() -> (K, V)>);

impl<K: ReplicableKey, V: Replicable> ReplicaShape for ExactMap<K, V> {
    type Value = HashMap<K, V>;
    type Change = MapChange<K, V>;

    fn diff(old: &Self::Value, new: &Self::Value) -> Vec<Self::Change> {
        map_diff(old, new)
    }

    fn snapshot(value: &Self::Value) -> Vec<Self::Change> {
        map_snapshot(value)
    }

    fn apply(value: &mut Self::Value, changes: &[Self::Change]) {
        apply_map_changes(value, changes);
    }
}

/// A set diffed by membership
pub struct ExactSet<V>(PhantomData<fn() -> V>);

impl<V: ReplicableKey> ReplicaShape for ExactSet<V> {
    type Value = HashSet<V>;
    type Change = SetChange<V>;

    fn diff(old: &Self::Value, new: &Self::Value) -> Vec<Self::Change> {
        set_diff(old, new)
    }

    fn snapshot(value: &Self::Value) -> Vec<Self::Change> {
        set_snapshot(value)
    }

    fn apply(value: &mut Self::Value, changes: &[Self::Change]) {
        apply_set_changes(value, changes);
    }
}

/// A keyed map of flat records, patched one field at a time
pub struct ShallowMap<K, F>(PhantomData<fn() -> (K, F)>);

impl<K: ReplicableKey, F: Replicable> ReplicaShape for ShallowMap<K, F> {
    type Value = HashMap<K, ShallowObject<F>>;
    type Change = ShallowChange<K, F>;

    fn diff(old: &Self::Value, new: &Self::Value) -> Vec<Self::Change> {
        shallow_object_map_diff(old, new)
    }

    fn snapshot(value: &Self::Value) -> Vec<Self::Change> {
        shallow_snapshot(value)
    }

    fn apply(value: &mut Self::Value, changes: &[Self::Change]) {
        apply_shallow_changes(value, changes);
    }
}
