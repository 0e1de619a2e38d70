//! # Diff Engine
//! Pure functions computing the minimal change-set between two values of the
//! same shape. Nothing in here performs I/O or touches replication state.
//!
//! Equality is Rust's [`PartialEq`] on the stored values: two values that
//! compare equal are never diffed, two that don't always are.

use std::{fmt::Debug, hash::Hash};

use serde::{de::DeserializeOwned, Serialize};

pub mod exact_map;
pub mod exact_set;
pub mod payload;
pub mod scalar;
pub mod shallow_map;

/// Bound shared by every value that can travel inside a diff payload
pub trait Replicable:
    Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

impl<T> Replicable for T where
    T: Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

/// Bound for values used as map keys or set members
pub trait ReplicableKey: Replicable + Eq + Hash {}

impl<T> ReplicableKey for T where T: Replicable + Eq + Hash {}
