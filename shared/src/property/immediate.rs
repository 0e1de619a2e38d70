use std::{any::Any, time::Instant};

use log::debug;

use crate::{
    diff::Replicable,
    entity::ReplicatedEntity,
    replica::{Outbound, ReplicaState},
    role::Role,
    shape::{ReplicaShape, Scalar},
    types::{ChannelId, ObserverKey, RoleKind},
};

/// A replicated property that sends every mutation as soon as it happens
pub struct Property<S: ReplicaShape, R: Role<S>> {
    channel: ChannelId,
    pub(crate) state: ReplicaState<S>,
    pub(crate) role: R,
}

impl<S: ReplicaShape, R: Role<S>> Property<S, R> {
    pub fn new(channel: ChannelId, initial: S::Value, role: R) -> Self {
        Self {
            channel,
            state: ReplicaState::new(initial),
            role,
        }
    }

    pub fn channel(&self) -> &ChannelId {
        &self.channel
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

    /// Owned copy of what `observer` sees, or of the global value
    pub fn get(&self, observer: Option<&ObserverKey>) -> S::Value {
        self.state.get(observer)
    }

    /// Replace the global value, dropping every override
    pub fn set(&mut self, value: S::Value) {
        let outbound = self.state.set(value);
        self.emit_all(outbound);
    }

    /// Replace the global value, keeping overrides
    pub fn set_top(&mut self, value: S::Value) {
        let outbound = self.state.set_top(value);
        self.emit(outbound);
    }

    pub fn set_for(&mut self, observer: ObserverKey, value: S::Value) {
        let live = self.role.is_live(&observer);
        let outbound = self.state.set_for(observer, value, live);
        self.emit(outbound);
    }

    pub fn clear_for(&mut self, observer: ObserverKey) {
        let live = self.role.is_live(&observer);
        let outbound = self.state.clear_for(observer, live);
        self.emit(outbound);
    }

    pub fn set_for_list(&mut self, observers: &[ObserverKey], value: S::Value) {
        for observer in observers {
            self.set_for(*observer, value.clone());
        }
    }

    /// Override the value for every connected observer matching `predicate`
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

    pub(crate) fn emit(&mut self, outbound: Option<Outbound<S::Change>>) {
        match outbound {
            Some(outbound) => self.role.dispatch(&self.state, outbound),
            None => debug!("no changes to send on channel {}", self.channel),
        }
    }

    pub(crate) fn emit_all(&mut self, outbound: Vec<Outbound<S::Change>>) {
        if outbound.is_empty() {
            debug!("no changes to send on channel {}", self.channel);
        }
        for outbound in outbound {
            self.role.dispatch(&self.state, outbound);
        }
    }
}

impl<T: Replicable, R: Role<Scalar<T>>> Property<Scalar<T>, R> {
    pub fn set_value(&mut self, value: T) {
        self.set(Some(value));
    }

    pub fn set_value_for(&mut self, observer: ObserverKey, value: T) {
        self.set_for(observer, Some(value));
    }

    /// Return the property to its vacant state
    pub fn clear(&mut self) {
        self.set(None);
    }
}

impl<S: ReplicaShape, R: Role<S>> ReplicatedEntity for Property<S, R> {
    fn channel(&self) -> &ChannelId {
        &self.channel
    }

    fn role_kind(&self) -> RoleKind {
        self.role.kind()
    }

    fn handle_sync_request(&mut self, observer: ObserverKey) {
        let outbound = self.state.sync_request(observer);
        if let Some(outbound) = outbound {
            self.role.dispatch(&self.state, outbound);
        }
    }

    fn remove_observer(&mut self, observer: &ObserverKey) {
        if self.state.remove_observer(observer) {
            debug!("dropped override of {} on channel {}", observer, self.channel);
        }
    }

    fn update(&mut self, _now: Instant) {}

    fn destroy(&mut self) {
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
