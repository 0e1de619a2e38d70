use std::{
    collections::{btree_map, BTreeMap, HashMap},
    hash::Hash,
};

use serde::{Deserialize, Serialize};

/// A flat record of named fields, compared one field at a time.
///
/// A field that is absent and a field that was deleted are the same thing:
/// there is no way to store an "absent" marker inside the record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShallowObject<F> {
    fields: BTreeMap<String, F>,
}

impl<F> Default for ShallowObject<F> {
    fn default() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }
}

impl<F> ShallowObject<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<S: Into<String>>(mut self, field: S, value: F) -> Self {
        self.fields.insert(field.into(), value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&F> {
        self.fields.get(field)
    }

    pub fn set<S: Into<String>>(&mut self, field: S, value: F) -> Option<F> {
        self.fields.insert(field.into(), value)
    }

    pub fn remove(&mut self, field: &str) -> Option<F> {
        self.fields.remove(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, F> {
        self.fields.iter()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<F, S: Into<String>> FromIterator<(S, F)> for ShallowObject<F> {
    fn from_iter<I: IntoIterator<Item = (S, F)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(field, value)| (field.into(), value))
                .collect(),
        }
    }
}

impl<F> IntoIterator for ShallowObject<F> {
    type Item = (String, F);
    type IntoIter = btree_map::IntoIter<String, F>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// Change to one record of a map of shallow objects
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShallowChange<K, F> {
    /// The whole record, used when the key is new on the receiving side
    Replace { key: K, object: ShallowObject<F> },
    /// Field-level edit of an existing record
    Patch {
        key: K,
        sets: ShallowObject<F>,
        deletes: Vec<String>,
    },
    Delete { key: K },
}

impl<K, F> ShallowChange<K, F> {
    pub fn key(&self) -> &K {
        match self {
            ShallowChange::Replace { key, .. }
            | ShallowChange::Patch { key, .. }
            | ShallowChange::Delete { key } => key,
        }
    }
}

/// Field-level difference between two records, `None` when they are equal
pub fn object_patch<F>(
    current: &ShallowObject<F>,
    next: &ShallowObject<F>,
) -> Option<(ShallowObject<F>, Vec<String>)>
where
    F: PartialEq + Clone,
{
    let mut sets = ShallowObject::new();
    for (field, value) in next.iter() {
        if current.get(field) != Some(value) {
            sets.set(field.clone(), value.clone());
        }
    }

    let deletes: Vec<String> = current
        .field_names()
        .filter(|field| !next.contains(field))
        .map(str::to_string)
        .collect();

    if sets.is_empty() && deletes.is_empty() {
        None
    } else {
        Some((sets, deletes))
    }
}

pub fn shallow_object_map_diff<K, F>(
    old: &HashMap<K, ShallowObject<F>>,
    new: &HashMap<K, ShallowObject<F>>,
) -> Vec<ShallowChange<K, F>>
where
    K: Eq + Hash + Clone,
    F: PartialEq + Clone,
{
    let mut changes = Vec::new();

    for (key, next) in new {
        match old.get(key) {
            None => changes.push(ShallowChange::Replace {
                key: key.clone(),
                object: next.clone(),
            }),
            Some(current) => {
                if let Some((sets, deletes)) = object_patch(current, next) {
                    changes.push(ShallowChange::Patch {
                        key: key.clone(),
                        sets,
                        deletes,
                    });
                }
            }
        }
    }

    for key in old.keys() {
        if !new.contains_key(key) {
            changes.push(ShallowChange::Delete { key: key.clone() });
        }
    }

    changes
}

pub fn shallow_snapshot<K, F>(map: &HashMap<K, ShallowObject<F>>) -> Vec<ShallowChange<K, F>>
where
    K: Clone,
    F: Clone,
{
    map.iter()
        .map(|(key, object)| ShallowChange::Replace {
            key: key.clone(),
            object: object.clone(),
        })
        .collect()
}

pub fn apply_shallow_changes<K, F>(
    map: &mut HashMap<K, ShallowObject<F>>,
    changes: &[ShallowChange<K, F>],
) where
    K: Eq + Hash + Clone,
    F: Clone,
{
    for change in changes {
        match change {
            ShallowChange::Replace { key, object } => {
                map.insert(key.clone(), object.clone());
            }
            ShallowChange::Patch { key, sets, deletes } => {
                let record = map.entry(key.clone()).or_default();
                for (field, value) in sets.iter() {
                    record.set(field.clone(), value.clone());
                }
                for field in deletes {
                    record.remove(field);
                }
            }
            ShallowChange::Delete { key } => {
                map.remove(key);
            }
        }
    }
}
