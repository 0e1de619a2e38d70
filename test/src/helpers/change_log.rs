use std::sync::{Arc, Mutex, MutexGuard};

use quiver_shared::{DiffPayload, ReplicaShape};

/// One handler call: the value seen and the shape of the payload that produced it
#[derive(Clone, Debug, PartialEq)]
pub struct Entry<V> {
    pub value: V,
    pub full: bool,
    pub changes: usize,
}

/// Records handler calls so tests can assert on them afterwards
pub struct ChangeLog<S: ReplicaShape> {
    entries: Arc<Mutex<Vec<Entry<S::Value>>>>,
}

impl<S: ReplicaShape> Clone for ChangeLog<S> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<S: ReplicaShape> Default for ChangeLog<S> {
    fn default() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<S: ReplicaShape> ChangeLog<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handler appending to this log
    pub fn handler(&self) -> impl FnMut(&S::Value, &DiffPayload<S::Change>) + Send + 'static {
        let entries = self.entries.clone();
        move |value: &S::Value, payload: &DiffPayload<S::Change>| {
            let Ok(mut entries) = entries.lock() else {
                panic!("change log lock poisoned");
            };
            entries.push(Entry {
                value: value.clone(),
                full: payload.full,
                changes: payload.changes.len(),
            });
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Entry<S::Value>>> {
        let Ok(entries) = self.entries.lock() else {
            panic!("change log lock poisoned");
        };
        entries
    }

    pub fn entries(&self) -> Vec<Entry<S::Value>> {
        self.lock().clone()
    }

    pub fn values(&self) -> Vec<S::Value> {
        self.lock().iter().map(|entry| entry.value.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn last(&self) -> Option<Entry<S::Value>> {
        self.lock().last().cloned()
    }
}
