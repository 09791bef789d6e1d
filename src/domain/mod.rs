pub mod config;
pub mod particle;

pub use config::{EngineConfig, PhysicsParams};
pub use particle::{Effect, Particle, SlotId, MAX_EFFECTS, MAX_LANES, PRT_PER_EFFECT};
