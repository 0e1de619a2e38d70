use std::{any::Any, time::Instant};

use crate::types::{ChannelId, ObserverKey, RoleKind};

/// Type-erased surface every replicated property exposes to its process root
pub trait ReplicatedEntity: Any + Send {
    fn channel(&self) -> &ChannelId;

    fn role_kind(&self) -> RoleKind;

    /// An observer asked for its current state
    fn handle_sync_request(&mut self, observer: ObserverKey);

    /// Forget everything held for a departed observer
    fn remove_observer(&mut self, observer: &ObserverKey);

    /// Flush anything whose deadline has passed
    fn update(&mut self, now: Instant);

    fn destroy(&mut self);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
