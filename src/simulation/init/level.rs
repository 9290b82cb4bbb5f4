use crate::core::EngineResult;
use crate::domain::{CollisionMask, LevelBundle};
use crate::spatial::CollisionWorld;
use crate::systems::{BodySpec, BodySystem, MovingPlatform, PlatformConfig};

use super::{PlatformEntry, WorldCore};

/// Build the new world on the side and swap it in only when every entry
/// loaded.
pub(super) fn load_level_bundle_json(world: &mut WorldCore, json: &str) -> EngineResult<()> {
    let bundle = LevelBundle::from_bundle_json(json)?;
    let settings = bundle.settings.clone();

    let mut collision = CollisionWorld::new(settings.cell_size);
    let mut bodies = BodySystem::new();
    let mut platforms = Vec::with_capacity(bundle.platforms.len());

    for def in &bundle.colliders {
        let (shape, position) = def.to_shape()?;
        collision.add(shape, position, def.layers()?)?;
    }

    for def in &bundle.bodies {
        let spec = BodySpec {
            bounds: def.bounds(),
            layers: CollisionMask::from_names(&def.layers)?,
            mask: CollisionMask::from_names(&def.mask)?,
        };
        bodies.add_body(&mut collision, spec, &settings, world.clock.clone())?;
    }

    for (i, def) in bundle.platforms.iter().enumerate() {
        let collider = collision.add_box(def.bounds(), CollisionMask::from_names(&def.layers)?)?;
        let config = PlatformConfig {
            passenger_mask: CollisionMask::from_names(&def.passenger_mask)?,
            speed: def.speed,
            ease_amount: def.ease_amount,
            cyclic: def.cyclic,
            wait_time: def.wait_time,
            local_waypoints: def.local_waypoints(),
        };
        let platform = MovingPlatform::new(&collision, collider, config, &settings)?;
        platforms.push(PlatformEntry {
            id: i as u32 + 1,
            platform,
        });
    }

    engine_log!(
        "level loaded: {} colliders, {} bodies, {} platforms",
        bundle.colliders.len(),
        bodies.body_count(),
        platforms.len()
    );

    world.next_platform_id = platforms.len() as u32 + 1;
    world.settings = settings;
    world.collision = collision;
    world.bodies = bodies;
    world.platforms = platforms;
    world.frame = 0;
    world.perf_stats.reset();
    Ok(())
}
