//! Wire encoding of [`DiffPayload`] values.

use serde::{de::DeserializeOwned, Serialize};

use crate::{diff::payload::DiffPayload, error::CodecError};

pub fn encode_payload<C: Serialize>(payload: &DiffPayload<C>) -> Result<Vec<u8>, CodecError> {
    bincode::serialize(payload).map_err(|source| CodecError::Encode { source })
}

pub fn decode_payload<C: DeserializeOwned>(bytes: &[u8]) -> Result<DiffPayload<C>, CodecError> {
    bincode::deserialize(bytes).map_err(|source| CodecError::Decode {
        length: bytes.len(),
        source,
    })
}
