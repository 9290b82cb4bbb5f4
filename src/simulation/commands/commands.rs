use crate::core::math::{BoundingBox, Vec2};
use crate::core::{EngineError, EngineResult};
use crate::domain::{CollisionMask, DirectionalInput};
use crate::spatial::{ColliderId, Shape};
use crate::systems::BodySpec;

use super::WorldCore;

pub(super) fn add_box(world: &mut WorldCore, x: f32, y: f32, w: f32, h: f32, layers: CollisionMask) -> EngineResult<u32> {
    let bounds = BoundingBox::from_size(Vec2::new(x, y), w, h);
    let id = world.collision.add_box(bounds, layers)?;
    Ok(id.0)
}

pub(super) fn add_polygon(world: &mut WorldCore, points: &[Vec2], layers: CollisionMask) -> EngineResult<u32> {
    let shape = Shape::polygon(points.to_vec())?;
    let id = world.collision.add(shape, Vec2::ZERO, layers)?;
    Ok(id.0)
}

/// Bodies and platforms own their colliders; those go through their own
/// remove calls.
pub(super) fn remove_collider(world: &mut WorldCore, id: u32) -> bool {
    let collider = ColliderId(id);
    let owned = world.bodies.by_collider(collider).is_some()
        || world.platforms.iter().any(|p| p.platform.collider() == collider);
    if owned {
        engine_warn!("collider {} belongs to a body or platform, not removed", id);
        return false;
    }
    world.collision.remove(collider)
}

pub(super) fn spawn_body(
    world: &mut WorldCore,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    layers: CollisionMask,
    mask: CollisionMask,
) -> EngineResult<u32> {
    let spec = BodySpec {
        bounds: BoundingBox::from_size(Vec2::new(x, y), w, h),
        layers,
        mask,
    };
    world
        .bodies
        .add_body(&mut world.collision, spec, &world.settings, world.clock.clone())
}

pub(super) fn remove_body(world: &mut WorldCore, id: u32) -> bool {
    world.bodies.remove_body(id, &mut world.collision)
}

pub(super) fn set_body_position(world: &mut WorldCore, id: u32, x: f32, y: f32) -> EngineResult<()> {
    let center = Vec2::new(x, y);
    if !center.is_finite() {
        return Err(EngineError::InvalidShape(format!("non-finite body position ({x}, {y})")));
    }
    world.bodies.set_position(id, &mut world.collision, center)
}

pub(super) fn move_body(world: &mut WorldCore, id: u32, dx: f32, dy: f32, input: DirectionalInput) -> EngineResult<()> {
    world
        .bodies
        .move_body(id, &mut world.collision, Vec2::new(dx, dy), input)
}

pub(super) fn body_position(world: &WorldCore, id: u32) -> Option<Vec2> {
    let body = world.bodies.get(id)?;
    world.collision.position_of(body.controller.collider())
}

pub(super) fn clear(world: &mut WorldCore) {
    world.bodies.clear(&mut world.collision);
    world.platforms.clear();
    world.next_platform_id = 1;
    world.collision.clear();
    world.frame = 0;
    world.perf_stats.reset();
}
