use thiserror::Error;

use crate::{ChannelId, ObserverKey};

/// Errors reported by a transport collaborator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The target observer is no longer connected
    #[error("Cannot send on channel {channel} - {observer} is not connected")]
    ObserverGone {
        observer: ObserverKey,
        channel: ChannelId,
    },

    /// The transport has shut down and can no longer send or receive
    #[error("Transport is disconnected")]
    Disconnected,

    /// The transport refused the payload
    #[error("Transport rejected {length} byte payload on channel {channel}: {reason}")]
    SendRejected {
        channel: ChannelId,
        length: usize,
        reason: String,
    },
}

impl TransportError {
    /// Stale targets are an expected race, not a failure of the sender
    pub fn is_stale_target(&self) -> bool {
        matches!(self, TransportError::ObserverGone { .. })
    }
}
