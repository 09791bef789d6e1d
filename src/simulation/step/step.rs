use std::sync::atomic::Ordering;

use tracing::trace;

use crate::domain::particle::PRT_PER_EFFECT;
use crate::spatial::buffer::GenerationBuffer;
use crate::systems::balance::rebalance_lanes;
use crate::systems::burst::spawn_into_buffer;
use crate::systems::motion::{LaneReport, StepParams};

use super::perf_stats::TickStats;
use super::{EffectSystem, PerfTimer, SpawnRequest};

pub(super) fn update(sys: &EffectSystem, dt: f32, width: f32, height: f32) {
    // One writer at a time; this guard also owns the lane RNGs.
    let mut writer = sys.writer.lock();
    let writer = &mut *writer;

    let perf_on = sys.perf_enabled.load(Ordering::Relaxed);
    let tick_start = if perf_on { Some(PerfTimer::start()) } else { None };

    let roles = sys.swap.lock().roles;
    let src = sys.buffers[roles.last].read();
    let mut dst = sys.buffers[roles.next].write();
    let step = StepParams::new(dt, width, height, &sys.config.physics);

    // === LANE PASSES ===
    let lanes_ms = if perf_on {
        let t0 = PerfTimer::start();
        sys.scheduler
            .run(&src, &mut dst, &mut writer.rngs, &mut writer.reports, &step);
        t0.elapsed_ms()
    } else {
        sys.scheduler
            .run(&src, &mut dst, &mut writer.rngs, &mut writer.reports, &step);
        0.0
    };
    drop(src);

    // === REBALANCE ===
    let (rebalance_swaps, rebalance_ms) = if perf_on {
        let t0 = PerfTimer::start();
        let swaps = rebalance_lanes(dst.lanes_mut());
        (swaps, t0.elapsed_ms())
    } else {
        (rebalance_lanes(dst.lanes_mut()), 0.0)
    };

    let mut total = LaneReport::default();
    for report in &writer.reports {
        total.merge(report);
    }

    // === ADMIT + SWAP ===
    {
        let mut swap = sys.swap.lock();

        let spawn_admitted = match swap.pending.take() {
            Some(request) => admit_spawn(&mut dst, request, writer, sys),
            None => false,
        };
        if spawn_admitted {
            total.particles += PRT_PER_EFFECT as u32;
        }

        writer.tick += 1;
        swap.roles.rotate();
        swap.stats = TickStats {
            tick: writer.tick,
            lanes: sys.lanes as u32,
            effects_alive: dst.effect_count() as u32,
            particles_alive: total.particles,
            fade_deaths: total.fade_deaths,
            secondary_spawns: total.secondary_spawns,
            spawns_dropped: total.spawns_dropped,
            effects_evicted: total.effects_evicted,
            rebalance_swaps: rebalance_swaps as u32,
            spawn_admitted,
            tick_ms: tick_start.map_or(0.0, |t| t.elapsed_ms()),
            lanes_ms,
            rebalance_ms,
        };
    }

    trace!(
        tick = writer.tick,
        effects = dst.effect_count(),
        particles = total.particles,
        secondary = total.secondary_spawns,
        swaps = rebalance_swaps,
        "tick complete"
    );
}

/// Place an external request in the lane with the fewest occupied slots
/// (lowest index on ties), drawing from that lane's generator.
fn admit_spawn(
    dst: &mut GenerationBuffer,
    request: SpawnRequest,
    writer: &mut super::WriterState,
    sys: &EffectSystem,
) -> bool {
    let lane = dst
        .lanes()
        .iter()
        .enumerate()
        .min_by_key(|(_, lane)| lane.used())
        .map_or(0, |(lane, _)| lane);

    let admitted = spawn_into_buffer(
        dst,
        lane,
        request.x,
        request.y,
        &mut writer.rngs[lane],
        &sys.config.physics,
    );
    if !admitted {
        trace!(lane, x = request.x, y = request.y, "spawn request dropped, lane full");
    }
    admitted
}
