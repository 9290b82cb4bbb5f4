use std::sync::Arc;

use crate::core::math::{BoundingBox, Vec2};
use crate::core::time::Clock;
use crate::core::{EngineError, EngineResult};
use crate::domain::{CollisionMask, DirectionalInput, EngineSettings};
use crate::spatial::{ColliderId, CollisionWorld};
use crate::systems::controller::{CollisionState, Controller2D};
use crate::systems::platform::{PassengerMover, PassengerRecord};

/// What to spawn
#[derive(Clone, Copy, Debug)]
pub struct BodySpec {
    pub bounds: BoundingBox,
    /// Layers the body lives on (what platforms and other rays see)
    pub layers: CollisionMask,
    /// Layers the body collides with
    pub mask: CollisionMask,
}

pub struct KinematicBody {
    pub id: u32,
    pub controller: Controller2D,
}

impl KinematicBody {
    pub fn collisions(&self) -> &CollisionState {
        self.controller.collisions()
    }
}

/// Manages all kinematic bodies in the world
pub struct BodySystem {
    bodies: Vec<KinematicBody>,
    next_id: u32,
}

impl BodySystem {
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            next_id: 1,
        }
    }

    /// Register the collider and its controller. Nothing is left in the world
    /// if the body is rejected.
    pub fn add_body(
        &mut self,
        world: &mut CollisionWorld,
        spec: BodySpec,
        settings: &EngineSettings,
        clock: Arc<dyn Clock>,
    ) -> EngineResult<u32> {
        let collider = world.add_box(spec.bounds, spec.layers)?;
        let controller = match Controller2D::new(world, collider, spec.mask, settings, clock) {
            Ok(c) => c,
            Err(e) => {
                world.remove(collider);
                return Err(e);
            }
        };

        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        self.bodies.push(KinematicBody { id, controller });
        Ok(id)
    }

    /// Remove a body and its collider.
    pub fn remove_body(&mut self, id: u32, world: &mut CollisionWorld) -> bool {
        if let Some(idx) = self.bodies.iter().position(|b| b.id == id) {
            let body = self.bodies.swap_remove(idx);
            world.remove(body.controller.collider());
            return true;
        }
        false
    }

    /// Remove all bodies (used by WorldCore::clear()).
    pub fn clear(&mut self, world: &mut CollisionWorld) {
        for body in self.bodies.iter() {
            world.remove(body.controller.collider());
        }
        self.bodies.clear();
        self.next_id = 1;
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn get(&self, id: u32) -> Option<&KinematicBody> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &KinematicBody> {
        self.bodies.iter()
    }

    fn get_mut(&mut self, id: u32) -> EngineResult<&mut KinematicBody> {
        self.bodies
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(EngineError::UnknownBody(id))
    }

    pub fn by_collider(&self, collider: ColliderId) -> Option<&KinematicBody> {
        self.bodies.iter().find(|b| b.controller.collider() == collider)
    }

    /// Host-driven move for one body.
    pub fn move_body(
        &mut self,
        id: u32,
        world: &mut CollisionWorld,
        amount: Vec2,
        input: DirectionalInput,
    ) -> EngineResult<()> {
        let body = self.get_mut(id)?;
        body.controller.move_by(world, amount, input, false);
        Ok(())
    }

    /// Teleport; contacts are stale until the next move. A fall-through in
    /// progress ends here.
    pub fn set_position(&mut self, id: u32, world: &mut CollisionWorld, center: Vec2) -> EngineResult<()> {
        let controller = &mut self.get_mut(id)?.controller;
        controller.end_fall_through();
        world.set_position(controller.collider(), center);
        Ok(())
    }

    /// Fire due fall-through resets without moving anything.
    pub fn poll_timers(&mut self) {
        for body in self.bodies.iter_mut() {
            body.controller.poll_timers();
        }
    }
}

impl PassengerMover for BodySystem {
    fn move_passenger(&mut self, world: &mut CollisionWorld, passenger: &PassengerRecord) {
        let Some(body) = self
            .bodies
            .iter_mut()
            .find(|b| b.controller.collider() == passenger.collider)
        else {
            engine_warn!(
                "passenger {:?} has no controller, platform push dropped",
                passenger.collider
            );
            return;
        };
        body.controller
            .move_passive(world, passenger.amount, passenger.standing_on_platform);
    }
}

impl Default for BodySystem {
    fn default() -> Self {
        Self::new()
    }
}
