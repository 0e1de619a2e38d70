//! # Quiver Client
//! The observer side of quiver: mirrors properties replicated by a server,
//! applying each diff as it arrives and notifying local handlers.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod transport;
pub mod shared {
    pub use quiver_shared::{
        ChannelId, ChannelMode, DiffPayload, ExactMap, ExactSet, HandlerKey, MapChange,
        ObserverKey, ReplicaShape, Scalar, ScalarChange, SetChange, ShallowChange, ShallowMap,
        ShallowObject, TransportError,
    };
}

mod client;
mod client_config;
mod error;
mod events;
mod mirror;
mod mirror_key;
mod ready;

pub use client::Client;
pub use client_config::ClientConfig;
pub use error::{QuiverClientError, ReadyError};
pub use events::ClientEvents;
pub use mirror::{Mirror, MirrorEntity};
pub use mirror_key::MirrorKey;
pub use ready::ReadySignal;
