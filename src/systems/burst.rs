//! Burst spawning
//!
//! A spawn claims the next free slot in one lane and fills it with a full
//! ring of particles launched from a single origin. A full lane drops the
//! spawn without error.

use std::f32::consts::TAU;

use fastrand::Rng;
use tracing::trace;

use crate::core::random::unit;
use crate::domain::config::PhysicsParams;
use crate::domain::particle::{Effect, Particle, PRT_PER_EFFECT};
use crate::spatial::buffer::{GenerationBuffer, SlotWriter};
use crate::spatial::partition::LanePartition;

/// Fill `effect` with a fresh burst at `(x, y)`.
///
/// Each particle gets a uniform direction in `[0, 2π)`, a uniform speed in
/// `[0, max_launch_speed]` and a decay rate of
/// `-1 / (min_lifetime + U * lifetime_spread)`.
pub fn init_burst(effect: &mut Effect, x: f32, y: f32, rng: &mut Rng, physics: &PhysicsParams) {
    for prt in effect.particles.iter_mut() {
        let angle = unit(rng) * TAU;
        let speed = unit(rng) * physics.max_launch_speed;
        let lifetime = physics.min_lifetime + unit(rng) * physics.lifetime_spread;
        let (sin, cos) = angle.sin_cos();

        *prt = Particle {
            x,
            y,
            alpha: 1.0,
            speed_x: cos * speed,
            speed_y: sin * speed,
            alpha_decay: -(1.0 / lifetime),
        };
    }
    effect.alive = PRT_PER_EFFECT as u32;
}

/// Claim a slot in `lane` and launch a burst into it. Returns false when the
/// lane is at capacity.
///
/// `pool` must be the pool `lane` belongs to, and the caller must not hold a
/// reference to any of `lane`'s free slots.
pub(crate) fn spawn_effect(
    lane: &mut LanePartition,
    pool: SlotWriter<'_>,
    x: f32,
    y: f32,
    rng: &mut Rng,
    physics: &PhysicsParams,
) -> bool {
    let Some(id) = lane.claim() else {
        trace!(x, y, capacity = lane.capacity(), "lane full, burst dropped");
        return false;
    };
    // SAFETY: `id` was just claimed from `lane`, which owns it exclusively.
    let effect = unsafe { pool.slot_mut(id) };
    init_burst(effect, x, y, rng, physics);
    true
}

/// Single-threaded spawn into a whole buffer (used for admitted requests)
pub(crate) fn spawn_into_buffer(
    buffer: &mut GenerationBuffer,
    lane: usize,
    x: f32,
    y: f32,
    rng: &mut Rng,
    physics: &PhysicsParams,
) -> bool {
    let (pool, lanes) = buffer.split_for_write();
    spawn_effect(&mut lanes[lane], pool, x, y, rng, physics)
}
