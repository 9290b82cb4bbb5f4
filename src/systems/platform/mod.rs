//! MovingPlatform - waypoint-driven platforms that carry and push bodies
//!
//! Every tick:
//! 1. the path yields this tick's displacement
//! 2. passengers are found with the platform's own rays (before it moves)
//! 3. passengers tagged "before" move, the platform translates, the rest move
//!
//! The split keeps riders on a rising platform from being overlapped and
//! riders on a sinking one from being left hanging.

mod passengers;
mod waypoints;

pub use passengers::{PassengerMover, PassengerRecord};
pub use waypoints::{PathPhase, WaypointPath};

use crate::core::math::Vec2;
use crate::core::{EngineError, EngineResult};
use crate::domain::{CollisionMask, EngineSettings};
use crate::spatial::{ColliderId, CollisionWorld};
use crate::systems::raycast_geometry::RaycastGeometry;

use passengers::PassengerScan;

#[derive(Clone, Debug)]
pub struct PlatformConfig {
    pub passenger_mask: CollisionMask,
    pub speed: f32,
    pub ease_amount: f32,
    pub cyclic: bool,
    /// Pause after each arrival, seconds of accumulated `dt`
    pub wait_time: f32,
    /// Offsets from the platform's position at creation
    pub local_waypoints: Vec<Vec2>,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            passenger_mask: CollisionMask::BODY,
            speed: 1.0,
            ease_amount: 0.0,
            cyclic: false,
            wait_time: 0.0,
            local_waypoints: Vec::new(),
        }
    }
}

pub struct MovingPlatform {
    collider: ColliderId,
    geometry: RaycastGeometry,
    passenger_mask: CollisionMask,
    path: WaypointPath,
    passengers: Vec<PassengerRecord>,
}

impl MovingPlatform {
    pub fn new(
        world: &CollisionWorld,
        collider: ColliderId,
        config: PlatformConfig,
        settings: &EngineSettings,
    ) -> EngineResult<Self> {
        let bounds = world
            .bounds_of(collider)
            .ok_or(EngineError::UnknownCollider(collider.0))?;
        let origin = world
            .position_of(collider)
            .ok_or(EngineError::UnknownCollider(collider.0))?;
        let geometry = RaycastGeometry::new(&bounds, settings)?;

        let global: Vec<Vec2> = config.local_waypoints.iter().map(|p| origin + *p).collect();
        let path = WaypointPath::new(
            global,
            config.speed,
            config.ease_amount,
            config.cyclic,
            config.wait_time,
        )?;

        Ok(Self {
            collider,
            geometry,
            passenger_mask: config.passenger_mask,
            path,
            passengers: Vec::new(),
        })
    }

    pub fn collider(&self) -> ColliderId {
        self.collider
    }

    pub fn path(&self) -> &WaypointPath {
        &self.path
    }

    /// Passengers found in the last tick
    pub fn passengers(&self) -> &[PassengerRecord] {
        &self.passengers
    }

    /// Advance one tick and return the platform's own displacement.
    pub fn tick(&mut self, dt: f32, world: &mut CollisionWorld, mover: &mut dyn PassengerMover) -> Vec2 {
        let (Some(bounds), Some(position)) = (world.bounds_of(self.collider), world.position_of(self.collider))
        else {
            engine_warn!("platform collider {:?} is gone, tick skipped", self.collider);
            self.passengers.clear();
            return Vec2::ZERO;
        };
        self.geometry.update_origins(&bounds);

        let velocity = self.path.advance(dt, position);

        self.passengers = PassengerScan {
            world,
            geometry: &self.geometry,
            platform: self.collider,
            mask: self.passenger_mask,
        }
        .find(velocity);

        move_passengers(&self.passengers, world, mover, true);
        world.translate(self.collider, velocity);
        move_passengers(&self.passengers, world, mover, false);

        velocity
    }
}

fn move_passengers(
    passengers: &[PassengerRecord],
    world: &mut CollisionWorld,
    mover: &mut dyn PassengerMover,
    before_platform: bool,
) {
    for passenger in passengers {
        if passenger.move_before_platform == before_platform {
            mover.move_passenger(world, passenger);
        }
    }
}
