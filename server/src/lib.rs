//! # Quiver Server
//! The authority side of quiver: owns replicated properties, tracks which
//! observers are connected, and sends each of them the minimal diff needed to
//! keep its mirror current.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod transport;
pub mod shared {
    pub use quiver_shared::{
        BatchConfig, ChannelId, ChannelMode, DiffPayload, ExactMap, ExactSet, MapChange,
        ObserverKey, ReplicaShape, ReplicatedEntity, Scalar, ScalarChange, SetChange,
        ShallowChange, ShallowMap, ShallowObject, TransportError,
    };
}

mod authority;
mod error;
mod events;
mod lifecycle;
mod property_key;
mod roster;
mod server;

pub use authority::{AuthorityRole, ServerBatchedProperty, ServerProperty};
pub use error::QuiverServerError;
pub use events::ServerEvents;
pub use lifecycle::ObserverLifecycle;
pub use property_key::PropertyKey;
pub use roster::ObserverSet;
pub use server::{Server, ServerConfig};
