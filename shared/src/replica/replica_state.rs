use log::debug;

use crate::{
    diff::payload::DiffPayload,
    replica::{Outbound, OverrideTable, Recipients},
    shape::ReplicaShape,
    types::ObserverKey,
};

/// The authority's view of one replicated entity: the global value plus the
/// per-observer overrides shadowing it.
///
/// Every mutation returns the payloads it produced instead of sending them,
/// delivery is up to the role owning this state.
pub struct ReplicaState<S: ReplicaShape> {
    pub(crate) global: S::Value,
    overrides: OverrideTable<S::Value>,
}

impl<S: ReplicaShape> Default for ReplicaState<S> {
    fn default() -> Self {
        Self::new(S::Value::default())
    }
}

impl<S: ReplicaShape> ReplicaState<S> {
    pub fn new(initial: S::Value) -> Self {
        Self {
            global: initial,
            overrides: OverrideTable::new(),
        }
    }

    pub fn global(&self) -> &S::Value {
        &self.global
    }

    /// The value `observer` currently sees
    pub fn effective(&self, observer: &ObserverKey) -> &S::Value {
        self.overrides.get(observer).unwrap_or(&self.global)
    }

    /// Owned copy of the value seen by `observer`, or the global value
    pub fn get(&self, observer: Option<&ObserverKey>) -> S::Value {
        match observer {
            Some(observer) => self.effective(observer).clone(),
            None => self.global.clone(),
        }
    }

    pub fn has_override(&self, observer: &ObserverKey) -> bool {
        self.overrides.is_active(observer)
    }

    pub fn has_override_entry(&self, observer: &ObserverKey) -> bool {
        self.overrides.has_entry(observer)
    }

    pub fn overridden_observers(&self) -> Vec<ObserverKey> {
        self.overrides.active_observers()
    }

    /// Replace the global value and drop every override.
    ///
    /// Observers without an override receive one incremental payload. Each
    /// observer whose override was displaced receives its own diff from the
    /// override to the new value.
    pub fn set(&mut self, value: S::Value) -> Vec<Outbound<S::Change>> {
        let displaced = self.overrides.drain_active();
        let changes = S::diff(&self.global, &value);
        self.global = value;

        let mut outbound = Vec::new();

        if changes.is_empty() {
            debug!("global value unchanged, broadcast suppressed");
        } else {
            let excluded = displaced.iter().map(|(observer, _)| *observer).collect();
            outbound.push(Outbound::new(
                Recipients::all_except(excluded),
                DiffPayload::incremental(changes),
            ));
        }

        for (observer, previous) in displaced {
            let changes = S::diff(&previous, &self.global);
            if !changes.is_empty() {
                outbound.push(Outbound::to_one(observer, DiffPayload::incremental(changes)));
            }
        }

        outbound
    }

    /// Replace the global value, leaving overrides in place
    pub fn set_top(&mut self, value: S::Value) -> Option<Outbound<S::Change>> {
        let changes = S::diff(&self.global, &value);
        self.global = value;
        self.broadcast(changes)
    }

    /// Store an override for `observer`, diffed against what it saw before.
    ///
    /// A departed observer's entry is removed and nothing is produced.
    pub fn set_for(
        &mut self,
        observer: ObserverKey,
        value: S::Value,
        live: bool,
    ) -> Option<Outbound<S::Change>> {
        if !live {
            debug!("discarding override for departed {}", observer);
            self.overrides.remove(&observer);
            return None;
        }

        let changes = S::diff(self.effective(&observer), &value);
        self.overrides.insert(observer, value);

        if changes.is_empty() {
            return None;
        }
        Some(Outbound::to_one(observer, DiffPayload::incremental(changes)))
    }

    /// Drop the override for `observer` and resend the global value in full
    pub fn clear_for(&mut self, observer: ObserverKey, live: bool) -> Option<Outbound<S::Change>> {
        if !live {
            self.overrides.remove(&observer);
            return None;
        }

        self.overrides.reset(observer);
        Some(Outbound::to_one(observer, S::full_payload(&self.global)))
    }

    /// Full snapshot of what `observer` should see, `None` while it is vacant
    pub fn sync_request(&self, observer: ObserverKey) -> Option<Outbound<S::Change>> {
        let value = self.effective(&observer);
        if S::is_vacant(value) {
            debug!("sync request from {} left unanswered, value is vacant", observer);
            return None;
        }
        Some(Outbound::to_one(observer, S::full_payload(value)))
    }

    pub fn remove_observer(&mut self, observer: &ObserverKey) -> bool {
        self.overrides.remove(observer)
    }

    /// Global value replacement used by the batch coalescer, which builds its own payloads
    pub(crate) fn assign_global(&mut self, value: S::Value) {
        self.global = value;
    }

    pub(crate) fn store_override(&mut self, observer: ObserverKey, value: S::Value) {
        self.overrides.insert(observer, value);
    }

    pub(crate) fn reset_override(&mut self, observer: ObserverKey) {
        self.overrides.reset(observer);
    }

    pub(crate) fn clear_overrides(&mut self) {
        self.overrides.clear();
    }

    /// Incremental payload for changes already applied to the global value
    pub(crate) fn broadcast(&self, changes: Vec<S::Change>) -> Option<Outbound<S::Change>> {
        if changes.is_empty() {
            return None;
        }
        Some(Outbound::new(
            Recipients::all_except(self.overrides.active_observers()),
            DiffPayload::incremental(changes),
        ))
    }
}
