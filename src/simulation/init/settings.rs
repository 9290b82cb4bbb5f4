use crate::spatial::perf::reset_ray_perf_counters;

use super::perf_stats::PerfStats;
use super::WorldCore;

pub(super) fn enable_perf_metrics(world: &mut WorldCore, enabled: bool) {
    // casts made while metrics were off are not part of the next step
    if enabled && !world.perf_enabled {
        reset_ray_perf_counters();
    }
    world.perf_enabled = enabled;
    if !enabled {
        world.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(world: &WorldCore) -> PerfStats {
    world.perf_stats.clone()
}
