use thiserror::Error;

use crate::types::ChannelId;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to encode diff payload")]
    Encode {
        #[source]
        source: bincode::Error,
    },
    #[error("failed to decode diff payload of {length} bytes")]
    Decode {
        length: usize,
        #[source]
        source: bincode::Error,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChannelError {
    #[error("channel `{channel}` is not registered")]
    NotRegistered { channel: ChannelId },
}
