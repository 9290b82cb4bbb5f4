//! Controller2D - ray-based kinematic movement for one body
//!
//! `move_by` takes the displacement the host wants this step and shrinks or
//! bends it against the geometry around the body:
//! - descend-slope snapping / max-slope sliding (only when moving down)
//! - horizontal rays on the leading side, with slope climbing on the first ray
//! - vertical rays on the leading side, offset by the resolved `dx`
//!
//! The corrected displacement is applied to the body's collider and the
//! outcome is published as a [`CollisionState`].

mod horizontal;
mod slopes;
mod state;
mod vertical;

use std::sync::Arc;

pub use state::CollisionState;

use crate::core::math::{sign, Vec2};
use crate::core::time::{Clock, DelayedTasks};
use crate::core::{EngineError, EngineResult};
use crate::domain::{CollisionMask, DirectionalInput, EngineSettings};
use crate::spatial::{ColliderId, CollisionWorld, RayHit, RayQuery};
use crate::systems::raycast_geometry::RaycastGeometry;

/// Real-time work a controller schedules for itself
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ResolverTask {
    ResetFallThrough,
}

pub struct Controller2D {
    collider: ColliderId,
    mask: CollisionMask,
    geometry: RaycastGeometry,
    max_slope_angle: f32,
    fall_through_delay_ms: f64,
    clock: Arc<dyn Clock>,
    timers: DelayedTasks<ResolverTask>,
    state: CollisionState,
    input: DirectionalInput,
}

impl Controller2D {
    /// Controller for an existing collider. Fails if the collider is unknown
    /// or too small to carry two rays per axis.
    pub fn new(
        world: &CollisionWorld,
        collider: ColliderId,
        mask: CollisionMask,
        settings: &EngineSettings,
        clock: Arc<dyn Clock>,
    ) -> EngineResult<Self> {
        let bounds = world
            .bounds_of(collider)
            .ok_or(EngineError::UnknownCollider(collider.0))?;
        let geometry = RaycastGeometry::new(&bounds, settings)?;
        Ok(Self {
            collider,
            mask,
            geometry,
            max_slope_angle: settings.max_slope_angle,
            fall_through_delay_ms: settings.fall_through_delay_ms,
            clock,
            timers: DelayedTasks::new(),
            state: CollisionState::new(),
            input: DirectionalInput::NONE,
        })
    }

    pub fn collider(&self) -> ColliderId {
        self.collider
    }

    pub fn mask(&self) -> CollisionMask {
        self.mask
    }

    pub fn collisions(&self) -> &CollisionState {
        &self.state
    }

    pub fn geometry(&self) -> &RaycastGeometry {
        &self.geometry
    }

    /// Fall-through resets still waiting on the clock
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Run whatever delayed tasks are due. `move_by` does this first, so
    /// hosts only need it to observe the reset between moves.
    pub fn poll_timers(&mut self) {
        let now = self.clock.now_ms();
        for task in self.timers.take_due(now) {
            match task {
                ResolverTask::ResetFallThrough => self.state.falling_through_platform = false,
            }
        }
    }

    /// Move a passenger: neutral input.
    pub fn move_passive(&mut self, world: &mut CollisionWorld, amount: Vec2, standing_on_platform: bool) {
        self.move_by(world, amount, DirectionalInput::NONE, standing_on_platform);
    }

    /// Resolve `amount` against the world and translate the collider by the
    /// result.
    pub fn move_by(
        &mut self,
        world: &mut CollisionWorld,
        amount: Vec2,
        input: DirectionalInput,
        standing_on_platform: bool,
    ) {
        self.poll_timers();

        let Some(bounds) = world.bounds_of(self.collider) else {
            engine_warn!("controller collider {:?} is gone, move skipped", self.collider);
            return;
        };
        if !amount.is_finite() {
            engine_warn!("non-finite move {:?} for {:?} ignored", amount, self.collider);
            return;
        }

        self.geometry.update_origins(&bounds);
        self.state.reset();
        self.state.move_amount_old = amount;
        self.input = input;

        let mut amount = amount;
        let scan: &CollisionWorld = &*world;

        if amount.y < 0.0 {
            self.descend_slope(scan, &mut amount);
        }

        if amount.x != 0.0 {
            self.state.face_direction = sign(amount.x) as i8;
        }

        self.horizontal_collisions(scan, &mut amount);

        if amount.y != 0.0 {
            self.vertical_collisions(scan, &mut amount);
        }

        world.translate(self.collider, amount);

        if standing_on_platform {
            self.state.below = true;
        }
    }

    /// One ray against everything in `mask` except this body.
    #[inline]
    fn cast(&self, world: &CollisionWorld, origin: Vec2, direction: Vec2, length: f32) -> Option<RayHit> {
        world.raycast(&RayQuery::new(origin, direction, length, self.mask).excluding(self.collider))
    }

    /// Stop ignoring through platforms now and drop the pending resets.
    pub fn end_fall_through(&mut self) {
        self.timers
            .cancel_where(|t| *t == ResolverTask::ResetFallThrough);
        self.state.falling_through_platform = false;
    }

    fn begin_fall_through(&mut self) {
        self.state.falling_through_platform = true;
        let now = self.clock.now_ms();
        self.timers
            .schedule(now, self.fall_through_delay_ms, ResolverTask::ResetFallThrough);
        engine_log!(
            "collider {:?} falling through platform for {}ms",
            self.collider,
            self.fall_through_delay_ms
        );
    }
}
