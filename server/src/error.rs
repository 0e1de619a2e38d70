use thiserror::Error;

use quiver_shared::{ChannelError, ChannelId, TransportError};

#[derive(Debug, Error)]
pub enum QuiverServerError {
    #[error("Server is not listening, io_load() must be called before creating properties")]
    NotListening,

    #[error("No replicated property is bound to channel {channel}")]
    ChannelNotFound { channel: ChannelId },

    #[error("Property on channel {channel} is not a {expected}")]
    PropertyTypeMismatch {
        channel: ChannelId,
        expected: &'static str,
    },

    #[error("Observer roster lock was poisoned")]
    RosterPoisoned,

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Channel(#[from] ChannelError),
}
