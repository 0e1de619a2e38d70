use thiserror::Error;

use quiver_shared::{ChannelError, ChannelId, CodecError, TransportError};

#[derive(Debug, Error)]
pub enum QuiverClientError {
    #[error("Client is not connected, io_load() must be called first")]
    NotConnected,

    #[error("No mirror is bound to channel {channel}")]
    ChannelNotFound { channel: ChannelId },

    #[error("Channel {channel} is already mirrored")]
    AlreadyMirrored { channel: ChannelId },

    #[error("Mirror on channel {channel} is not a {expected}")]
    MirrorTypeMismatch {
        channel: ChannelId,
        expected: &'static str,
    },

    #[error("Cannot apply payload on channel {channel}")]
    Decode {
        channel: ChannelId,
        #[source]
        source: CodecError,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Channel(#[from] ChannelError),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ReadyError {
    #[error("Mirror was dropped before its first value arrived")]
    MirrorDropped,
}
