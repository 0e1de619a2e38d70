use serde::{Deserialize, Serialize};

/// Change to a single replicated value
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalarChange<T> {
    Replace(T),
    Clear,
}

pub fn scalar_diff<T: Clone + PartialEq>(old: &Option<T>, new: &Option<T>) -> Vec<ScalarChange<T>> {
    match (old, new) {
        (Some(previous), Some(next)) if previous == next => Vec::new(),
        (_, Some(next)) => vec![ScalarChange::Replace(next.clone())],
        (Some(_), None) => vec![ScalarChange::Clear],
        (None, None) => Vec::new(),
    }
}

pub fn scalar_snapshot<T: Clone>(value: &Option<T>) -> Vec<ScalarChange<T>> {
    match value {
        Some(inner) => vec![ScalarChange::Replace(inner.clone())],
        None => Vec::new(),
    }
}

pub fn apply_scalar_changes<T: Clone>(value: &mut Option<T>, changes: &[ScalarChange<T>]) {
    for change in changes {
        match change {
            ScalarChange::Replace(next) => *value = Some(next.clone()),
            ScalarChange::Clear => *value = None,
        }
    }
}
