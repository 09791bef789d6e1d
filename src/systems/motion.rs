//! Per-lane update pass
//!
//! A lane copies its id layout from the source generation, then advances
//! every effect it owns into a fresh slot of the destination generation.
//! The pass touches only its own lane's bookkeeping, slots it owns and its
//! own RNG, so lanes can run it concurrently without synchronization.

use fastrand::Rng;

use crate::core::random::roll_percent;
use crate::domain::config::PhysicsParams;
use crate::domain::particle::{Particle, PRT_PER_EFFECT};
use crate::spatial::buffer::{GenerationBuffer, SlotWriter};
use crate::spatial::partition::LanePartition;

use super::burst::spawn_effect;

/// Tick-constant values shared by every lane
#[derive(Clone, Copy, Debug)]
pub struct StepParams {
    pub dt: f32,
    pub width: f32,
    pub height: f32,
    /// `drag^dt`, applied to both velocity components
    pub velocity_scale: f32,
    /// `gravity * dt`, subtracted from the vertical velocity
    pub gravity_step: f32,
    pub physics: PhysicsParams,
}

impl StepParams {
    pub fn new(dt: f32, width: f32, height: f32, physics: &PhysicsParams) -> Self {
        StepParams {
            dt,
            width,
            height,
            velocity_scale: physics.drag.powf(dt),
            gravity_step: physics.gravity * dt,
            physics: *physics,
        }
    }

    #[inline]
    fn on_screen(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && x <= self.width && y >= 0.0 && y <= self.height
    }
}

/// Counters produced by one lane pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LaneReport {
    pub effects: u32,
    pub particles: u32,
    pub fade_deaths: u32,
    pub secondary_spawns: u32,
    pub spawns_dropped: u32,
    /// Source effects lost because secondary bursts already filled the lane
    pub effects_evicted: u32,
}

impl LaneReport {
    pub fn merge(&mut self, other: &LaneReport) {
        self.effects += other.effects;
        self.particles += other.particles;
        self.fade_deaths += other.fade_deaths;
        self.secondary_spawns += other.secondary_spawns;
        self.spawns_dropped += other.spawns_dropped;
        self.effects_evicted += other.effects_evicted;
    }
}

/// Advance `src` particles by one step and compact the survivors, in order,
/// into `dst`. Returns the survivor count.
///
/// Off-screen particles vanish silently. Particles whose alpha drops below
/// zero call `on_fade` with their new position.
pub fn advance_particles(
    src: &[Particle],
    dst: &mut [Particle; PRT_PER_EFFECT],
    step: &StepParams,
    mut on_fade: impl FnMut(f32, f32),
) -> usize {
    let mut count = 0;

    for prt in src {
        let speed_x = prt.speed_x * step.velocity_scale;
        let speed_y = prt.speed_y * step.velocity_scale - step.gravity_step;

        let x = prt.x + speed_x * step.dt;
        let y = prt.y + speed_y * step.dt;

        if !step.on_screen(x, y) {
            continue;
        }

        let alpha = prt.alpha + prt.alpha_decay * step.dt;
        if alpha < 0.0 {
            on_fade(x, y);
            continue;
        }

        fast!(dst, [count] = Particle {
            x,
            y,
            alpha,
            speed_x,
            speed_y,
            alpha_decay: prt.alpha_decay,
        });
        count += 1;
    }

    count
}

/// Run the update pass for `lane`: read `src`, write `dst_lane` and the
/// slots of `dst_pool` that `dst_lane` owns.
pub(crate) fn update_lane(
    src: &GenerationBuffer,
    lane: usize,
    dst_lane: &mut LanePartition,
    dst_pool: SlotWriter<'_>,
    rng: &mut Rng,
    step: &StepParams,
) -> LaneReport {
    let src_lane = src.lane(lane);
    dst_lane.reset_from(src_lane);

    let mut report = LaneReport::default();
    let spawn_percent = step.physics.secondary_spawn_percent;

    // Fade positions that won the secondary-spawn roll. Spawning waits until
    // the survivors are settled so a fully faded effect never holds a slot.
    let mut pending = [(0.0f32, 0.0f32); PRT_PER_EFFECT];

    for &src_id in src_lane.occupied() {
        let src_effect = src.effect(src_id);
        if src_effect.is_dead() {
            continue;
        }

        let Some(dst_id) = dst_lane.peek_free() else {
            report.effects_evicted += 1;
            continue;
        };

        let mut n_pending = 0;
        {
            // SAFETY: `dst_id` is a free id of this lane's partition; no other
            // lane can own it and no other reference to the slot exists.
            let dst_effect = unsafe { dst_pool.slot_mut(dst_id) };

            let survivors = advance_particles(src_effect.particles(), &mut dst_effect.particles, step, |x, y| {
                report.fade_deaths += 1;
                if roll_percent(rng, spawn_percent) {
                    pending[n_pending] = (x, y);
                    n_pending += 1;
                }
            });

            dst_effect.alive = survivors as u32;
            if survivors > 0 {
                dst_lane.claim();
                report.particles += survivors as u32;
            }
        }

        for &(x, y) in &pending[..n_pending] {
            if spawn_effect(dst_lane, dst_pool, x, y, rng, &step.physics) {
                report.secondary_spawns += 1;
            } else {
                report.spawns_dropped += 1;
            }
        }
    }

    report.particles += report.secondary_spawns * PRT_PER_EFFECT as u32;
    report.effects = dst_lane.used() as u32;
    report
}
