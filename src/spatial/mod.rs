pub mod buffer;
pub mod partition;

pub use buffer::GenerationBuffer;
pub use partition::{split_slot_domain, LanePartition};
