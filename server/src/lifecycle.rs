use std::collections::HashSet;

use log::{debug, info};

use quiver_shared::{ObserverKey, ReplicatedEntity};

use crate::roster::ObserverSet;

/// Keeps the roster and every replicated entity in step with observers
/// arriving and leaving.
///
/// A departure leaves the roster before any entity is told about it, so no
/// entity can address the observer again while the fan-out runs. Departed
/// keys are remembered until the transport reports them connected again, so
/// a late packet cannot bring them back through an implicit join.
pub struct ObserverLifecycle {
    roster: ObserverSet,
    departed: HashSet<ObserverKey>,
}

impl ObserverLifecycle {
    pub fn new(roster: ObserverSet) -> Self {
        Self {
            roster,
            departed: HashSet::new(),
        }
    }

    pub fn roster(&self) -> &ObserverSet {
        &self.roster
    }

    pub fn has_departed(&self, observer: &ObserverKey) -> bool {
        self.departed.contains(observer)
    }

    /// Explicit connection from the transport. Returns false when the
    /// observer was already connected.
    pub fn connect(&mut self, observer: ObserverKey) -> bool {
        self.departed.remove(&observer);
        let added = self.roster.insert(observer);
        if added {
            info!("{} connected", observer);
        }
        added
    }

    /// Admit an observer first seen through one of its requests. Refused for
    /// observers that departed.
    pub fn join(&mut self, observer: ObserverKey) -> bool {
        if self.departed.contains(&observer) {
            debug!("refusing to readmit departed {}", observer);
            return false;
        }
        if self.roster.insert(observer) {
            info!("{} joined", observer);
        }
        true
    }

    /// Returns false when the observer was not connected. Entities are
    /// cleaned up either way.
    pub fn depart<'a, I>(&mut self, observer: &ObserverKey, entities: I) -> bool
    where
        I: IntoIterator<Item = &'a mut Box<dyn ReplicatedEntity>>,
    {
        self.departed.insert(*observer);
        let removed = self.roster.remove(observer);
        if removed {
            info!("{} departed", observer);
        }
        for entity in entities {
            entity.remove_observer(observer);
        }
        removed
    }
}
