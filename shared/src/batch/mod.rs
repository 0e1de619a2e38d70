//! # Batch Coalescer
//! Deferred delivery for properties that change faster than observers need
//! to hear about it. At most one flush is scheduled per window.

mod batch_config;
mod flush_timer;
mod pending_batch;

pub use batch_config::BatchConfig;
pub use flush_timer::FlushTimer;
pub use pending_batch::PendingBatch;
