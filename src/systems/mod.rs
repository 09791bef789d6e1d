pub mod balance;
pub mod burst;
pub mod motion;

pub use balance::rebalance_lanes;
pub use burst::init_burst;
pub use motion::{advance_particles, LaneReport, StepParams};
