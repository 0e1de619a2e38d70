//! # Quiver Shared
//! Common functionality shared between quiver-server & quiver-client crates.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod batch;
mod codec;
mod diff;
mod entity;
mod error;
mod property;
mod registry;
mod replica;
mod role;
mod shape;
mod signal;
mod transport;
mod types;

pub use batch::{BatchConfig, FlushTimer, PendingBatch};
pub use codec::{decode_payload, encode_payload};
pub use diff::{
    exact_map::{apply_map_changes, map_diff, map_snapshot, MapChange},
    exact_set::{apply_set_changes, set_diff, set_snapshot, SetChange},
    payload::DiffPayload,
    scalar::{apply_scalar_changes, scalar_diff, scalar_snapshot, ScalarChange},
    shallow_map::{
        apply_shallow_changes, object_patch, shallow_object_map_diff, shallow_snapshot,
        ShallowChange, ShallowObject,
    },
    Replicable, ReplicableKey,
};
pub use entity::ReplicatedEntity;
pub use error::{ChannelError, CodecError};
pub use property::{BatchedProperty, Property};
pub use registry::{ChannelRegistry, DEFAULT_MAX_CHANNEL_NAME_LENGTH};
pub use replica::{Outbound, OverrideTable, Recipients, ReplicaState};
pub use role::{LocalSimulationRole, Role};
pub use shape::{ExactMap, ExactSet, ReplicaShape, Scalar, ShallowMap};
pub use signal::{ChangeHandler, HandlerKey, Signal};
pub use transport::error::TransportError;
pub use types::{ChannelId, ChannelMode, ObserverKey, RoleKind};

/// A property simulated entirely inside the current process
pub type LocalProperty<S> = Property<S, LocalSimulationRole<S>>;
/// A batched property simulated entirely inside the current process
pub type LocalBatchedProperty<S> = BatchedProperty<S, LocalSimulationRole<S>>;
