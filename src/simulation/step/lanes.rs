use fastrand::Rng;
use tracing::debug;
#[cfg(feature = "parallel")]
use tracing::warn;

use crate::spatial::buffer::{GenerationBuffer, SlotWriter};
use crate::spatial::partition::LanePartition;
use crate::systems::motion::{update_lane, LaneReport, StepParams};

/// Everything one lane pass borrows mutably
struct LaneJob<'a> {
    lane: usize,
    dst_lane: &'a mut LanePartition,
    rng: &'a mut Rng,
    report: &'a mut LaneReport,
}

impl LaneJob<'_> {
    #[inline]
    fn run(self, src: &GenerationBuffer, dst_pool: SlotWriter<'_>, step: &StepParams) {
        *self.report = update_lane(src, self.lane, self.dst_lane, dst_pool, self.rng, step);
    }
}

/// Runs the lane passes of one tick. Lane 0 always runs on the calling
/// thread; lanes `1..n` go to a dedicated pool of `n - 1` workers that lives
/// as long as the system.
pub(crate) struct LaneScheduler {
    lanes: usize,
    #[cfg(feature = "parallel")]
    pool: Option<rayon::ThreadPool>,
}

impl LaneScheduler {
    pub(crate) fn new(lanes: usize) -> Self {
        #[cfg(feature = "parallel")]
        {
            let pool = if lanes > 1 {
                match rayon::ThreadPoolBuilder::new()
                    .num_threads(lanes - 1)
                    .thread_name(|i| format!("fx-lane-{}", i + 1))
                    .build()
                {
                    Ok(pool) => {
                        debug!(workers = lanes - 1, "lane pool started");
                        Some(pool)
                    }
                    Err(err) => {
                        warn!(error = %err, "lane pool unavailable, falling back to the global rayon pool");
                        None
                    }
                }
            } else {
                None
            };
            LaneScheduler { lanes, pool }
        }
        #[cfg(not(feature = "parallel"))]
        {
            debug!(lanes, "parallel feature disabled, lanes run sequentially");
            LaneScheduler { lanes }
        }
    }

    /// Advance every lane from `src` into `dst`. Returns once all lanes are done.
    /// A panic in any lane propagates to the caller.
    pub(crate) fn run(
        &self,
        src: &GenerationBuffer,
        dst: &mut GenerationBuffer,
        rngs: &mut [Rng],
        reports: &mut [LaneReport],
        step: &StepParams,
    ) {
        let (dst_pool, dst_lanes) = dst.split_for_write();
        let mut jobs = dst_lanes
            .iter_mut()
            .zip(rngs.iter_mut())
            .zip(reports.iter_mut())
            .enumerate()
            .map(|(lane, ((dst_lane, rng), report))| LaneJob {
                lane,
                dst_lane,
                rng,
                report,
            });

        let Some(first) = jobs.next() else {
            return;
        };

        if self.lanes <= 1 {
            first.run(src, dst_pool, step);
            return;
        }

        #[cfg(feature = "parallel")]
        {
            match &self.pool {
                Some(pool) => pool.in_place_scope(|scope| {
                    for job in jobs {
                        scope.spawn(move |_| job.run(src, dst_pool, step));
                    }
                    first.run(src, dst_pool, step);
                }),
                None => rayon::in_place_scope(|scope| {
                    for job in jobs {
                        scope.spawn(move |_| job.run(src, dst_pool, step));
                    }
                    first.run(src, dst_pool, step);
                }),
            }
        }

        #[cfg(not(feature = "parallel"))]
        {
            first.run(src, dst_pool, step);
            for job in jobs {
                job.run(src, dst_pool, step);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn has_dedicated_pool(&self) -> bool {
        #[cfg(feature = "parallel")]
        {
            self.pool.is_some()
        }
        #[cfg(not(feature = "parallel"))]
        {
            false
        }
    }
}
