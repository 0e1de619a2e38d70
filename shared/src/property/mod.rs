mod batched;
mod immediate;
mod local;
mod shape_ops;

pub use batched::BatchedProperty;
pub use immediate::Property;
