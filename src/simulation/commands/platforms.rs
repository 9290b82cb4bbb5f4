use crate::core::math::{BoundingBox, Vec2};
use crate::core::EngineResult;
use crate::domain::CollisionMask;
use crate::systems::{MovingPlatform, PlatformConfig};

use super::{PlatformEntry, WorldCore};

pub(super) fn add_platform(
    world: &mut WorldCore,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    layers: CollisionMask,
    config: PlatformConfig,
) -> EngineResult<u32> {
    let bounds = BoundingBox::from_size(Vec2::new(x, y), w, h);
    let collider = world.collision.add_box(bounds, layers)?;
    let platform = match MovingPlatform::new(&world.collision, collider, config, &world.settings) {
        Ok(p) => p,
        Err(e) => {
            world.collision.remove(collider);
            return Err(e);
        }
    };

    let id = world.next_platform_id;
    world.next_platform_id = world.next_platform_id.saturating_add(1);
    world.platforms.push(PlatformEntry { id, platform });
    Ok(id)
}

pub(super) fn remove_platform(world: &mut WorldCore, id: u32) -> bool {
    if let Some(idx) = world.platforms.iter().position(|p| p.id == id) {
        let entry = world.platforms.remove(idx);
        world.collision.remove(entry.platform.collider());
        return true;
    }
    false
}

pub(super) fn platform_position(world: &WorldCore, id: u32) -> Option<Vec2> {
    let entry = world.platforms.iter().find(|p| p.id == id)?;
    world.collision.position_of(entry.platform.collider())
}
