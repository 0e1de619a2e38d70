//! How a replicated entity delivers the payloads its state produces.
//!
//! The role is picked once, when the entity is built. An authority sends over
//! the transport, a local simulation notifies in-process handlers, and an
//! observer is a different type altogether (see the client's `Mirror`).

mod local;

pub use local::LocalSimulationRole;

use crate::{
    replica::{Outbound, ReplicaState},
    shape::ReplicaShape,
    types::{ObserverKey, RoleKind},
};

pub trait Role<S: ReplicaShape>: Send + 'static {
    fn kind(&self) -> RoleKind;

    /// Whether `observer` is still connected. Writes aimed at observers that
    /// are not live are discarded.
    fn is_live(&self, observer: &ObserverKey) -> bool;

    fn observers(&self) -> Vec<ObserverKey>;

    fn dispatch(&mut self, state: &ReplicaState<S>, outbound: Outbound<S::Change>);

    /// Called once when the owning entity is destroyed
    fn detach(&mut self) {}
}
