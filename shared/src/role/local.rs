use log::debug;

use crate::{
    diff::payload::DiffPayload,
    replica::{Outbound, Recipients, ReplicaState},
    role::Role,
    shape::ReplicaShape,
    signal::{HandlerKey, Signal},
    types::{ObserverKey, RoleKind},
};

/// Runs authority and observer in the same process.
///
/// Nothing goes over a channel. When a payload reaches the simulated viewer,
/// the handlers connected to this role are called with the viewer's value.
/// Without a viewer the local process sees the global value.
pub struct LocalSimulationRole<S: ReplicaShape> {
    viewer: Option<ObserverKey>,
    signal: Signal<S::Value, S::Change>,
}

impl<S: ReplicaShape> Default for LocalSimulationRole<S> {
    fn default() -> Self {
        Self {
            viewer: None,
            signal: Signal::new(),
        }
    }
}

impl<S: ReplicaShape> LocalSimulationRole<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_viewer(viewer: ObserverKey) -> Self {
        Self {
            viewer: Some(viewer),
            signal: Signal::new(),
        }
    }

    pub fn viewer(&self) -> Option<&ObserverKey> {
        self.viewer.as_ref()
    }

    /// The value the local viewer currently sees
    pub fn local_value<'a>(&self, state: &'a ReplicaState<S>) -> &'a S::Value {
        match &self.viewer {
            Some(viewer) => state.effective(viewer),
            None => state.global(),
        }
    }

    pub fn connect<F>(&mut self, handler: F) -> HandlerKey
    where
        F: FnMut(&S::Value, &DiffPayload<S::Change>) + Send + 'static,
    {
        self.signal.connect(handler)
    }

    pub fn disconnect(&mut self, key: &HandlerKey) -> bool {
        self.signal.disconnect(key)
    }

    pub(crate) fn fire_one(
        &mut self,
        key: &HandlerKey,
        value: &S::Value,
        payload: &DiffPayload<S::Change>,
    ) {
        self.signal.fire_one(key, value, payload);
    }

    fn reaches_viewer(&self, recipients: &Recipients) -> bool {
        match &self.viewer {
            Some(viewer) => recipients.includes(viewer),
            None => !matches!(recipients, Recipients::One(_)),
        }
    }
}

impl<S: ReplicaShape> Role<S> for LocalSimulationRole<S> {
    fn kind(&self) -> RoleKind {
        RoleKind::LocalSimulation
    }

    fn is_live(&self, _observer: &ObserverKey) -> bool {
        true
    }

    fn observers(&self) -> Vec<ObserverKey> {
        self.viewer.iter().copied().collect()
    }

    fn dispatch(&mut self, state: &ReplicaState<S>, outbound: Outbound<S::Change>) {
        if outbound.payload.is_noop() || !self.reaches_viewer(&outbound.recipients) {
            return;
        }
        debug!(
            "local simulation applying {} change(s), full: {}",
            outbound.payload.len(),
            outbound.payload.full
        );
        let value = self.local_value(state);
        self.signal.fire(value, &outbound.payload);
    }

    fn detach(&mut self) {
        self.signal.clear();
    }
}
