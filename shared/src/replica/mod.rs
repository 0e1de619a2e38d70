mod map_ops;
mod outbound;
mod override_table;
mod replica_state;
mod set_ops;
mod shallow_ops;

pub use outbound::{Outbound, Recipients};
pub use override_table::OverrideTable;
pub use replica_state::ReplicaState;
