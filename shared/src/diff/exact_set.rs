use std::{collections::HashSet, hash::Hash};

use serde::{Deserialize, Serialize};

/// Membership change of one set member
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetChange<V> {
    Add(V),
    Delete(V),
}

pub fn set_diff<V>(old: &HashSet<V>, new: &HashSet<V>) -> Vec<SetChange<V>>
where
    V: Eq + Hash + Clone,
{
    let mut changes: Vec<SetChange<V>> = new
        .difference(old)
        .map(|member| SetChange::Add(member.clone()))
        .collect();
    changes.extend(
        old.difference(new)
            .map(|member| SetChange::Delete(member.clone())),
    );
    changes
}

pub fn set_snapshot<V: Clone>(set: &HashSet<V>) -> Vec<SetChange<V>> {
    set.iter().map(|member| SetChange::Add(member.clone())).collect()
}

pub fn apply_set_changes<V>(set: &mut HashSet<V>, changes: &[SetChange<V>])
where
    V: Eq + Hash + Clone,
{
    for change in changes {
        match change {
            SetChange::Add(member) => {
                set.insert(member.clone());
            }
            SetChange::Delete(member) => {
                set.remove(member);
            }
        }
    }
}
