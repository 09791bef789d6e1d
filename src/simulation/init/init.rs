use parking_lot::{Mutex, RwLock};
use std::sync::atomic::AtomicBool;
use tracing::debug;

use crate::core::random::lane_rngs;
use crate::domain::config::EngineConfig;
use crate::domain::particle::MAX_EFFECTS;
use crate::spatial::buffer::GenerationBuffer;
use crate::systems::motion::LaneReport;

use super::lanes::LaneScheduler;
use super::perf_stats::TickStats;
use super::roles::BufferRoles;
use super::{EffectSystem, SwapState, WriterState};

pub(super) fn create_effect_system(mut config: EngineConfig) -> EffectSystem {
    let lanes = config.clamped_lanes();
    if lanes != config.lanes {
        debug!(requested = config.lanes, lanes, "lane count clamped");
    }
    config.lanes = lanes;

    let stats = TickStats {
        lanes: lanes as u32,
        ..TickStats::default()
    };

    let system = EffectSystem {
        buffers: [
            RwLock::new(GenerationBuffer::new(lanes)),
            RwLock::new(GenerationBuffer::new(lanes)),
            RwLock::new(GenerationBuffer::new(lanes)),
        ],
        swap: Mutex::new(SwapState {
            roles: BufferRoles::default(),
            pending: None,
            stats,
        }),
        writer: Mutex::new(WriterState {
            rngs: lane_rngs(lanes, config.seed),
            reports: vec![LaneReport::default(); lanes],
            tick: 0,
        }),
        scheduler: LaneScheduler::new(lanes),
        perf_enabled: AtomicBool::new(false),
        lanes,
        config,
    };

    debug!(
        lanes,
        max_lane_capacity = MAX_EFFECTS.div_ceil(lanes),
        seeded = system.config.seed.is_some(),
        "effect system created"
    );
    system
}
