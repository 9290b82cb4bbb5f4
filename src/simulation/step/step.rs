use crate::core::time::Stopwatch;
use crate::spatial::perf::take_ray_perf_counters;

use super::WorldCore;

pub(super) fn step(world: &mut WorldCore, dt: f32) {
    if !(dt.is_finite() && dt >= 0.0) {
        engine_warn!("step ignored: dt must be finite and >= 0, got {}", dt);
        return;
    }

    let perf_on = world.perf_enabled;
    if perf_on {
        world.perf_stats.reset();
        world.perf_stats.bodies = world.bodies.body_count() as u32;
        world.perf_stats.platforms = world.platforms.len() as u32;
        world.perf_stats.colliders = world.collision.len() as u32;
    }
    let step_start = Stopwatch::start();
    let mut section = step_start;

    // === FALL-THROUGH TIMERS ===
    // Bodies the host did not move this frame still get their resets
    world.bodies.poll_timers();
    if perf_on {
        world.perf_stats.timers_ms = section.lap_ms();
    }

    // === PLATFORMS ===
    // In insertion order; each pushes its passengers through the body system
    let mut passengers_moved = 0u32;
    for entry in world.platforms.iter_mut() {
        entry
            .platform
            .tick(dt, &mut world.collision, &mut world.bodies);
        passengers_moved = passengers_moved.saturating_add(entry.platform.passengers().len() as u32);
    }
    if perf_on {
        world.perf_stats.platforms_ms = section.lap_ms();
    }

    world.frame = world.frame.wrapping_add(1);

    if perf_on {
        let (casts, hits) = take_ray_perf_counters();
        world.perf_stats.ray_casts = casts.min(u32::MAX as u64) as u32;
        world.perf_stats.ray_hits = hits.min(u32::MAX as u64) as u32;
        world.perf_stats.passengers_moved = passengers_moved;
        world.perf_stats.frame = world.frame as u32;
        world.perf_stats.step_ms = step_start.elapsed_ms();
    }
}
