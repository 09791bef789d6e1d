use std::sync::atomic::Ordering;

use super::perf_stats::TickStats;
use super::EffectSystem;

pub(super) fn enable_perf_metrics(sys: &EffectSystem, enabled: bool) {
    sys.perf_enabled.store(enabled, Ordering::Relaxed);
}

pub(super) fn get_tick_stats(sys: &EffectSystem) -> TickStats {
    sys.swap.lock().stats
}
