//! EffectSystem - triple-buffered burst simulation
//!
//! Three generation buffers rotate through three roles:
//! - `last`: the most recently completed generation, source of the next tick
//! - `next`: the generation being written by the current tick
//! - `render`: the generation handed to the renderer, pinned until the next
//!   `get_render_buffer`
//!
//! Ticks are split into lanes. Every lane advances only the effects it owns,
//! so lane passes run in parallel without locks. Rebalancing, spawn admission
//! and the role swap happen on the calling thread after the lanes join.

use std::sync::atomic::{AtomicBool, Ordering};

use fastrand::Rng;
use parking_lot::{Mutex, RwLock};

use crate::domain::config::EngineConfig;
use crate::spatial::buffer::GenerationBuffer;
use crate::systems::motion::LaneReport;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "swap/roles.rs"]
mod roles;
#[path = "step/lanes.rs"]
mod lanes;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "render/render_extract.rs"]
mod render_extract;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use facade::EffectWorld;
pub use perf_stats::TickStats;
pub use render_extract::{extract_points, RenderPoint, RenderSnapshot};
pub use roles::{BufferRoles, SpawnRequest, BUFFER_COUNT};

use lanes::LaneScheduler;
use perf_timer::PerfTimer;

/// State shared between the writer, the renderer and spawn callers.
/// Held only for short critical sections, never across a lane pass.
struct SwapState {
    roles: BufferRoles,
    pending: Option<SpawnRequest>,
    stats: TickStats,
}

/// State touched only by the thread currently inside `update`
struct WriterState {
    rngs: Vec<Rng>,
    reports: Vec<LaneReport>,
    tick: u64,
}

/// The simulation
pub struct EffectSystem {
    config: EngineConfig,
    lanes: usize,
    buffers: [RwLock<GenerationBuffer>; BUFFER_COUNT],
    swap: Mutex<SwapState>,
    writer: Mutex<WriterState>,
    scheduler: LaneScheduler,
    perf_enabled: AtomicBool,
}

impl EffectSystem {
    /// Create a system with `lanes` lanes (clamped to `1..=MAX_LANES`) and
    /// default physics
    pub fn new(lanes: usize) -> Self {
        init::create_effect_system(EngineConfig::with_lanes(lanes))
    }

    /// Create a system from an explicit config. The config is validated.
    pub fn with_config(config: EngineConfig) -> crate::error::Result<Self> {
        config.validate()?;
        Ok(init::create_effect_system(config))
    }

    /// Parse, validate and build from a JSON config
    pub fn from_config_json(json: &str) -> crate::error::Result<Self> {
        Self::with_config(EngineConfig::from_json(json)?)
    }

    /// Advance the simulation by `dt` seconds on a `width` x `height` screen.
    ///
    /// Calls are serialized; a second caller blocks until the first returns.
    pub fn update(&self, dt: f32, width: f32, height: f32) {
        step::update(self, dt, width, height);
    }

    /// Request a burst at `(x, y)`, admitted at the end of the next update.
    /// Only the most recent request since that update survives.
    pub fn add_effect(&self, x: f32, y: f32) {
        commands::add_effect(self, x, y);
    }

    /// Pin the most recently completed generation and return a read view of it
    pub fn get_render_buffer(&self) -> RenderSnapshot<'_> {
        commands::get_render_buffer(self)
    }

    #[inline]
    pub fn lane_count(&self) -> usize {
        self.lanes
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current role assignment (diagnostics)
    pub fn roles(&self) -> BufferRoles {
        self.swap.lock().roles
    }

    /// Spawn request waiting for the next update, if any
    pub fn pending_spawn(&self) -> Option<SpawnRequest> {
        self.swap.lock().pending
    }

    /// Completed updates so far
    pub fn tick_count(&self) -> u64 {
        self.swap.lock().stats.tick
    }

    /// Enable or disable per-tick timings (adds timer overhead when enabled)
    pub fn enable_perf_metrics(&self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    pub fn perf_metrics_enabled(&self) -> bool {
        self.perf_enabled.load(Ordering::Relaxed)
    }

    /// Stats published by the last completed update
    pub fn get_tick_stats(&self) -> TickStats {
        settings::get_tick_stats(self)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
