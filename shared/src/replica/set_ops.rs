use std::collections::HashSet;

use crate::{
    diff::{exact_set::SetChange, ReplicableKey},
    replica::{Outbound, ReplicaState},
    shape::ExactSet,
    types::ObserverKey,
};

impl<V: ReplicableKey> ReplicaState<ExactSet<V>> {
    pub fn contains(&self, observer: Option<&ObserverKey>, member: &V) -> bool {
        match observer {
            Some(observer) => self.effective(observer).contains(member),
            None => self.global.contains(member),
        }
    }

    /// Produces a payload only when `member` was not already present
    pub fn add(&mut self, member: V) -> Option<Outbound<SetChange<V>>> {
        if !self.global.insert(member.clone()) {
            return None;
        }
        self.broadcast(vec![SetChange::Add(member)])
    }

    /// Produces a payload only when `member` was present
    pub fn remove(&mut self, member: &V) -> Option<Outbound<SetChange<V>>> {
        if !self.global.remove(member) {
            return None;
        }
        self.broadcast(vec![SetChange::Delete(member.clone())])
    }

    pub fn clear(&mut self) -> Vec<Outbound<SetChange<V>>> {
        self.set(HashSet::new())
    }
}
