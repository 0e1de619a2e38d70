use std::{
    collections::HashSet,
    sync::{Arc, RwLock},
};

use quiver_shared::ObserverKey;

use crate::QuiverServerError;

/// The set of currently connected observers, shared between the server and
/// every authority role it hands out
#[derive(Clone, Default)]
pub struct ObserverSet {
    inner: Arc<RwLock<HashSet<ObserverKey>>>,
}

impl ObserverSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_contains(&self, observer: &ObserverKey) -> Result<bool, QuiverServerError> {
        let observers = self
            .inner
            .read()
            .map_err(|_| QuiverServerError::RosterPoisoned)?;
        Ok(observers.contains(observer))
    }

    /// Panics if the roster lock is poisoned
    pub fn contains(&self, observer: &ObserverKey) -> bool {
        let Ok(contains) = self.try_contains(observer) else {
            panic!("observer roster lock poisoned while checking {}", observer);
        };
        contains
    }

    /// Connected observers, in key order
    pub fn try_keys(&self) -> Result<Vec<ObserverKey>, QuiverServerError> {
        let observers = self
            .inner
            .read()
            .map_err(|_| QuiverServerError::RosterPoisoned)?;
        let mut keys: Vec<ObserverKey> = observers.iter().copied().collect();
        keys.sort();
        Ok(keys)
    }

    /// Panics if the roster lock is poisoned
    pub fn keys(&self) -> Vec<ObserverKey> {
        let Ok(keys) = self.try_keys() else {
            panic!("observer roster lock poisoned while listing observers");
        };
        keys
    }

    pub fn len(&self) -> usize {
        self.keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn insert(&self, observer: ObserverKey) -> bool {
        let Ok(mut observers) = self.inner.write() else {
            panic!("observer roster lock poisoned while adding {}", observer);
        };
        observers.insert(observer)
    }

    pub(crate) fn remove(&self, observer: &ObserverKey) -> bool {
        let Ok(mut observers) = self.inner.write() else {
            panic!("observer roster lock poisoned while removing {}", observer);
        };
        observers.remove(observer)
    }
}
