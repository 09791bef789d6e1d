//! Lane load rebalancing
//!
//! After a tick, lanes above the mean occupancy hand occupied slot ids to
//! lanes below it. Effect data stays where it is; only the lane that will
//! advance it next tick changes. Total occupancy is conserved.

use crate::spatial::partition::LanePartition;

/// Two distinct lanes borrowed mutably at once
fn pair_mut(lanes: &mut [LanePartition], a: usize, b: usize) -> (&mut LanePartition, &mut LanePartition) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = lanes.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = lanes.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

/// Level lane occupancy towards the integer mean. Returns the number of ids
/// that changed lanes.
///
/// Afterwards no lane is above the mean while some other lane is below it
/// with spare capacity.
pub fn rebalance_lanes(lanes: &mut [LanePartition]) -> usize {
    let n = lanes.len();
    if n < 2 {
        return 0;
    }

    let total: usize = lanes.iter().map(LanePartition::used).sum();
    let avg = total / n;
    let mut swaps = 0;

    for t in 0..n {
        if lanes[t].used() <= avg {
            continue;
        }

        for t2 in 0..n {
            if t == t2 {
                continue;
            }

            let (donor, receiver) = pair_mut(lanes, t, t2);
            while receiver.used() < avg && !receiver.is_full() && donor.used() > avg {
                donor.hand_over_to(receiver);
                swaps += 1;
            }
        }
    }

    swaps
}
