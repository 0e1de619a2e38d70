use serde::{Deserialize, Serialize};

/// The unit of replication sent from an authority to an observer.
///
/// `full = true` tells the receiver to discard whatever it mirrors and rebuild
/// from `changes` alone. An incremental payload with no changes is a no-op and
/// is never dispatched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffPayload<C> {
    pub full: bool,
    pub changes: Vec<C>,
}

impl<C> DiffPayload<C> {
    pub fn incremental(changes: Vec<C>) -> Self {
        Self {
            full: false,
            changes,
        }
    }

    pub fn full(changes: Vec<C>) -> Self {
        Self {
            full: true,
            changes,
        }
    }

    /// An incremental payload that carries nothing
    pub fn is_noop(&self) -> bool {
        !self.full && self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

impl<C> Default for DiffPayload<C> {
    fn default() -> Self {
        Self::incremental(Vec::new())
    }
}
