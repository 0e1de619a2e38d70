use std::{any::Any, collections::HashSet, time::Instant};

use log::debug;

use crate::{
    batch::{BatchConfig, FlushTimer, PendingBatch},
    diff::payload::DiffPayload,
    entity::ReplicatedEntity,
    replica::{Outbound, Recipients, ReplicaState},
    role::Role,
    shape::ReplicaShape,
    types::{ChannelId, ObserverKey, RoleKind},
};

/// A replicated property delivering at most once per batch interval.
///
/// Reads are always current: mutations update the state immediately and only
/// the outbound payloads are deferred. A flush sends the staged global value
/// as a diff against the last flushed one (`baseline`), then every
/// per-observer value staged after it in full.
pub struct BatchedProperty<S: ReplicaShape, R: Role<S>> {
    channel: ChannelId,
    pub(crate) state: ReplicaState<S>,
    pub(crate) role: R,
    config: BatchConfig,
    batch: PendingBatch<S::Value>,
    timer: FlushTimer,
    baseline: S::Value,
    /// Observers whose mirror may no longer match `baseline`
    diverged: HashSet<ObserverKey>,
}

impl<S: ReplicaShape, R: Role<S>> BatchedProperty<S, R> {
    pub fn new(channel: ChannelId, initial: S::Value, role: R, config: BatchConfig) -> Self {
        Self {
            channel,
            baseline: initial.clone(),
            state: ReplicaState::new(initial),
            role,
            config,
            batch: PendingBatch::new(),
            timer: FlushTimer::new(),
            diverged: HashSet::new(),
        }
    }

    pub fn channel(&self) -> &ChannelId {
        &self.channel
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    pub fn role(&self) -> &R {
        &self.role
    }

    pub fn role_mut(&mut self) -> &mut R {
        &mut self.role
    }

    pub fn state(&self) -> &ReplicaState<S> {
        &self.state
    }

    pub fn get(&self, observer: Option<&ObserverKey>) -> S::Value {
        self.state.get(observer)
    }

    pub fn has_pending(&self) -> bool {
        !self.batch.is_empty()
    }

    pub fn flush_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Replace the global value, dropping every override
    pub fn set(&mut self, value: S::Value) {
        self.state.clear_overrides();
        self.state.assign_global(value.clone());
        self.batch.stage_global(value);
        self.schedule();
    }

    /// Replace the global value, keeping overrides
    pub fn set_top(&mut self, value: S::Value) {
        self.state.assign_global(value.clone());

        let overridden = self.state.overridden_observers();
        if overridden.is_empty() {
            self.batch.stage_global(value);
        } else {
            for observer in self.role.observers() {
                if !overridden.contains(&observer) {
                    self.batch.stage_for(observer, value.clone());
                }
            }
        }
        self.schedule();
    }

    pub fn set_for(&mut self, observer: ObserverKey, value: S::Value) {
        if !self.role.is_live(&observer) {
            debug!("discarding override for departed {}", observer);
            self.forget(&observer);
            return;
        }
        self.state.store_override(observer, value.clone());
        self.batch.stage_for(observer, value);
        self.schedule();
    }

    pub fn clear_for(&mut self, observer: ObserverKey) {
        if !self.role.is_live(&observer) {
            self.forget(&observer);
            return;
        }
        self.state.reset_override(observer);
        self.batch.stage_for(observer, self.state.global().clone());
        self.schedule();
    }

    pub fn set_for_list(&mut self, observers: &[ObserverKey], value: S::Value) {
        for observer in observers {
            self.set_for(*observer, value.clone());
        }
    }

    pub fn set_filter<P>(&mut self, mut predicate: P, value: S::Value)
    where
        P: FnMut(&ObserverKey) -> bool,
    {
        let observers: Vec<ObserverKey> = self
            .role
            .observers()
            .into_iter()
            .filter(|observer| predicate(observer))
            .collect();
        self.set_for_list(&observers, value);
    }

    pub fn clear_for_list(&mut self, observers: &[ObserverKey]) {
        for observer in observers {
            self.clear_for(*observer);
        }
    }

    pub fn clear_filter<P>(&mut self, mut predicate: P)
    where
        P: FnMut(&ObserverKey) -> bool,
    {
        let observers: Vec<ObserverKey> = self
            .role
            .observers()
            .into_iter()
            .filter(|observer| predicate(observer))
            .collect();
        self.clear_for_list(&observers);
    }

    /// Send everything staged so far, regardless of the timer
    pub fn flush(&mut self) {
        self.timer.disarm();

        if let Some(pending) = self.batch.take_global() {
            self.flush_global(pending);
        }

        for (observer, value) in self.batch.take_per_observer() {
            if !self.role.is_live(&observer) {
                debug!("dropping staged value for departed {}", observer);
                self.forget(&observer);
                continue;
            }
            let outbound = Outbound::to_one(observer, S::full_payload(&value));
            self.role.dispatch(&self.state, outbound);
            self.diverged.insert(observer);
        }
    }

    fn flush_global(&mut self, pending: S::Value) {
        let overridden = self.state.overridden_observers();
        let resync: Vec<ObserverKey> = self
            .diverged
            .iter()
            .filter(|observer| !overridden.contains(observer))
            .copied()
            .collect();

        let changes = S::diff(&self.baseline, &pending);
        if changes.is_empty() {
            debug!("batched global value unchanged on channel {}", self.channel);
        } else {
            let mut excluded = overridden.clone();
            excluded.extend(resync.iter().copied());
            let outbound = Outbound::new(
                Recipients::all_except(excluded),
                DiffPayload::incremental(changes),
            );
            self.role.dispatch(&self.state, outbound);
        }

        for observer in resync {
            if self.role.is_live(&observer) {
                let outbound = Outbound::to_one(observer, S::full_payload(&pending));
                self.role.dispatch(&self.state, outbound);
            }
        }

        self.diverged.retain(|observer| overridden.contains(observer));
        self.baseline = pending;
    }

    fn schedule(&mut self) {
        if self.config.is_immediate() {
            self.flush();
            return;
        }
        if self.timer.arm(Instant::now(), self.config.interval) {
            debug!(
                "flush armed on channel {} for {:?}",
                self.channel, self.config.interval
            );
        }
    }

    fn forget(&mut self, observer: &ObserverKey) {
        self.state.remove_observer(observer);
        self.batch.cancel_for(observer);
        self.diverged.remove(observer);
    }
}

impl<S: ReplicaShape, R: Role<S>> ReplicatedEntity for BatchedProperty<S, R> {
    fn channel(&self) -> &ChannelId {
        &self.channel
    }

    fn role_kind(&self) -> RoleKind {
        self.role.kind()
    }

    fn handle_sync_request(&mut self, observer: ObserverKey) {
        let Some(outbound) = self.state.sync_request(observer) else {
            return;
        };
        self.role.dispatch(&self.state, outbound);
        if self.state.effective(&observer) != &self.baseline {
            self.diverged.insert(observer);
        }
    }

    fn remove_observer(&mut self, observer: &ObserverKey) {
        self.forget(observer);
    }

    fn update(&mut self, now: Instant) {
        if self.timer.ringing(now) {
            self.flush();
        }
    }

    fn destroy(&mut self) {
        self.timer.disarm();
        self.batch.clear();
        self.diverged.clear();
        self.state.clear_overrides();
        self.role.detach();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
