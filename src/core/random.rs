//! Per-lane random number generators
//!
//! Every lane owns one `fastrand::Rng`; lanes never share a generator, so the
//! parallel passes draw random numbers without contention.

use fastrand::Rng;

/// Mixes a base seed with the lane index so neighbouring lanes diverge (splitmix64 finalizer)
#[inline]
fn lane_seed(seed: u64, lane: usize) -> u64 {
    let mut z = seed.wrapping_add((lane as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

pub fn lane_rngs(lanes: usize, seed: Option<u64>) -> Vec<Rng> {
    (0..lanes)
        .map(|lane| match seed {
            Some(seed) => Rng::with_seed(lane_seed(seed, lane)),
            None => Rng::new(),
        })
        .collect()
}

/// Uniform in `[0, 1)`
#[inline]
pub fn unit(rng: &mut Rng) -> f32 {
    rng.f32()
}

/// Integer roll in `0..100`, true when below `percent`
#[inline]
pub fn roll_percent(rng: &mut Rng, percent: u32) -> bool {
    rng.u32(0..100) < percent
}
