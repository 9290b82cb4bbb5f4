use std::sync::Arc;

use crate::core::time::{Clock, SystemClock};
use crate::domain::EngineSettings;
use crate::spatial::CollisionWorld;
use crate::systems::BodySystem;

use super::perf_stats::PerfStats;
use super::WorldCore;

pub(super) fn system_clock() -> Arc<dyn Clock> {
    Arc::new(SystemClock::new())
}

pub(super) fn create_world_core(settings: EngineSettings, clock: Arc<dyn Clock>) -> WorldCore {
    WorldCore {
        collision: CollisionWorld::new(settings.cell_size),
        settings,
        clock,
        bodies: BodySystem::new(),
        platforms: Vec::new(),
        next_platform_id: 1,
        frame: 0,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}
