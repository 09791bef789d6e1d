//! Particle and effect records
//!
//! Both are plain value types. An `Effect` is a fixed-capacity burst: entries
//! `[0, alive)` of `particles` are live, the rest are stale leftovers from
//! whatever previously occupied the slot.

/// Number of effect slots in every generation buffer.
pub const MAX_EFFECTS: usize = 2048;

/// Particles per burst.
pub const PRT_PER_EFFECT: usize = 64;

/// Upper bound for the lane count.
pub const MAX_LANES: usize = 16;

/// Global index into a generation buffer's effect pool.
pub type SlotId = u32;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    /// Opacity, nominally 0..=1. Goes negative for one step right before removal.
    pub alpha: f32,
    pub speed_x: f32,
    pub speed_y: f32,
    /// Alpha change per second, always negative.
    pub alpha_decay: f32,
}

impl Particle {
    pub const ZERO: Particle = Particle {
        x: 0.0,
        y: 0.0,
        alpha: 0.0,
        speed_x: 0.0,
        speed_y: 0.0,
        alpha_decay: 0.0,
    };
}

#[derive(Clone, Copy, Debug)]
pub struct Effect {
    pub(crate) alive: u32,
    pub(crate) particles: [Particle; PRT_PER_EFFECT],
}

impl Effect {
    pub const EMPTY: Effect = Effect {
        alive: 0,
        particles: [Particle::ZERO; PRT_PER_EFFECT],
    };

    #[inline]
    pub fn alive(&self) -> usize {
        self.alive as usize
    }

    /// Logically dead effects have no live particles and a reclaimable slot
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.alive == 0
    }

    /// Live particles only
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles[..self.alive()]
    }
}

impl Default for Effect {
    fn default() -> Self {
        Effect::EMPTY
    }
}
