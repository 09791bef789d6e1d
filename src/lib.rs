//! Fireburst Engine - triple-buffered particle bursts, native and WASM
//!
//! Architecture:
//! - core/       - Safety macros, per-lane RNGs
//! - domain/     - Particle/effect types and configuration
//! - spatial/    - Generation buffers and lane partitions
//! - systems/    - Burst spawning, per-lane motion, lane rebalancing
//! - simulation/ - EffectSystem orchestration and the wasm facade
//! - driver      - Background update thread (native only)

// Safety macros must come first for macro export
#[macro_use]
pub mod core;
pub mod domain;
pub mod spatial;
pub mod systems;
pub mod simulation;
pub mod error;
#[cfg(not(target_arch = "wasm32"))]
pub mod driver;

use wasm_bindgen::prelude::*;

#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&"Fireburst engine initialized".into());
    #[cfg(not(target_arch = "wasm32"))]
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "fireburst engine initialized");
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Largest lane count a system will run with
#[wasm_bindgen]
pub fn max_lanes() -> usize {
    domain::particle::MAX_LANES
}

/// Particles launched by one burst
#[wasm_bindgen]
pub fn particles_per_effect() -> usize {
    domain::particle::PRT_PER_EFFECT
}

// Re-export main types
pub use domain::config::{EngineConfig, PhysicsParams};
pub use error::{EngineError, Result};
pub use simulation::{extract_points, EffectSystem, EffectWorld, RenderPoint, RenderSnapshot, TickStats};
#[cfg(not(target_arch = "wasm32"))]
pub use driver::SimulationDriver;
