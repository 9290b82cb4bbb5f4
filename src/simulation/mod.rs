//! World - kinematic platformer simulation
//!
//! WorldCore only orchestrates:
//! - static geometry lives in the CollisionWorld (spatial/)
//! - bodies and their controllers in the BodySystem (systems/body_system)
//! - moving platforms tick in `step`, pushing bodies through the BodySystem
//!
//! Bodies never move on their own: the host calls `move_body` with whatever
//! displacement its own gravity/jump logic produced.

use std::sync::Arc;

use crate::core::math::Vec2;
use crate::core::time::Clock;
use crate::core::EngineResult;
use crate::domain::{CollisionMask, DirectionalInput, EngineSettings};
use crate::spatial::CollisionWorld;
use crate::systems::{BodySystem, CollisionState, MovingPlatform, PlatformConfig};

#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "commands/platforms.rs"]
mod platforms;
#[path = "init/init.rs"]
mod init;
#[path = "init/level.rs"]
mod level;
#[path = "init/settings.rs"]
mod settings;
#[path = "snapshot/snapshot.rs"]
mod snapshot;
mod facade;

pub use facade::{CollisionReport, World};
pub use perf_stats::PerfStats;

pub(crate) struct PlatformEntry {
    pub(crate) id: u32,
    pub(crate) platform: MovingPlatform,
}

/// The simulation world
pub struct WorldCore {
    settings: EngineSettings,
    clock: Arc<dyn Clock>,

    collision: CollisionWorld,
    bodies: BodySystem,
    platforms: Vec<PlatformEntry>,
    next_platform_id: u32,

    frame: u64,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl WorldCore {
    /// Empty world, default settings, wall clock
    pub fn new() -> Self {
        init::create_world_core(EngineSettings::default(), init::system_clock())
    }

    pub fn with_settings(settings: EngineSettings) -> EngineResult<Self> {
        Self::with_clock(settings, init::system_clock())
    }

    /// Custom real-time source (tests, replays, lock-step hosts)
    pub fn with_clock(settings: EngineSettings, clock: Arc<dyn Clock>) -> EngineResult<Self> {
        settings.validate()?;
        Ok(init::create_world_core(settings, clock))
    }

    /// Replace everything with the contents of a level bundle. On error the
    /// current world is left untouched.
    pub fn load_level_bundle_json(&mut self, json: &str) -> EngineResult<()> {
        level::load_level_bundle_json(self, json)
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn collision_world(&self) -> &CollisionWorld {
        &self.collision
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === GEOMETRY API ===

    /// Static box collider; returns the collider id
    pub fn add_box(&mut self, x: f32, y: f32, w: f32, h: f32, layers: CollisionMask) -> EngineResult<u32> {
        commands::add_box(self, x, y, w, h, layers)
    }

    /// Static polygon collider in world coordinates
    pub fn add_polygon(&mut self, points: &[Vec2], layers: CollisionMask) -> EngineResult<u32> {
        commands::add_polygon(self, points, layers)
    }

    pub fn remove_collider(&mut self, id: u32) -> bool {
        commands::remove_collider(self, id)
    }

    // === BODY API ===

    /// Spawn a body centered at (x, y) on the BODY layer, colliding with
    /// ground and platforms. Returns the body ID.
    pub fn spawn_body(&mut self, x: f32, y: f32, w: f32, h: f32) -> EngineResult<u32> {
        commands::spawn_body(self, x, y, w, h, CollisionMask::BODY, CollisionMask::GROUND | CollisionMask::PLATFORM)
    }

    pub fn spawn_body_with_layers(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        layers: CollisionMask,
        mask: CollisionMask,
    ) -> EngineResult<u32> {
        commands::spawn_body(self, x, y, w, h, layers, mask)
    }

    pub fn remove_body(&mut self, id: u32) -> bool {
        commands::remove_body(self, id)
    }

    pub fn set_body_position(&mut self, id: u32, x: f32, y: f32) -> EngineResult<()> {
        commands::set_body_position(self, id, x, y)
    }

    /// Resolve and apply one host move for a body.
    pub fn move_body(&mut self, id: u32, dx: f32, dy: f32, input: DirectionalInput) -> EngineResult<()> {
        commands::move_body(self, id, dx, dy, input)
    }

    pub fn body_position(&self, id: u32) -> Option<Vec2> {
        commands::body_position(self, id)
    }

    pub fn body_collisions(&self, id: u32) -> Option<&CollisionState> {
        self.bodies.get(id).map(|b| b.collisions())
    }

    pub fn body_count(&self) -> usize {
        self.bodies.body_count()
    }

    // === PLATFORM API ===

    /// Moving platform centered at (x, y). Returns the platform ID.
    pub fn add_platform(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        layers: CollisionMask,
        config: PlatformConfig,
    ) -> EngineResult<u32> {
        platforms::add_platform(self, x, y, w, h, layers, config)
    }

    pub fn remove_platform(&mut self, id: u32) -> bool {
        platforms::remove_platform(self, id)
    }

    pub fn platform_position(&self, id: u32) -> Option<Vec2> {
        platforms::platform_position(self, id)
    }

    pub fn platform(&self, id: u32) -> Option<&MovingPlatform> {
        self.platforms.iter().find(|p| p.id == id).map(|p| &p.platform)
    }

    pub fn platform_count(&self) -> usize {
        self.platforms.len()
    }

    /// Remove bodies, platforms and geometry. Settings and clock stay.
    pub fn clear(&mut self) {
        commands::clear(self)
    }

    /// Advance platforms by `dt` seconds, carrying their passengers.
    pub fn step(&mut self, dt: f32) {
        step::step(self, dt);
    }

    /// Bodies and platforms as JSON, for hosts without wasm getters
    pub fn snapshot_json(&self) -> String {
        snapshot::snapshot_json(self)
    }
}

impl Default for WorldCore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
