use serde::Serialize;

use crate::systems::{CollisionState, PathPhase};

use super::WorldCore;

#[derive(Serialize)]
struct BodySnapshot<'a> {
    id: u32,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    collisions: &'a CollisionState,
}

#[derive(Serialize)]
struct PlatformSnapshot {
    id: u32,
    x: f32,
    y: f32,
    phase: PathPhase,
    from_index: usize,
    passengers: usize,
}

#[derive(Serialize)]
struct WorldSnapshot<'a> {
    frame: u64,
    bodies: Vec<BodySnapshot<'a>>,
    platforms: Vec<PlatformSnapshot>,
}

pub(super) fn snapshot_json(world: &WorldCore) -> String {
    let bodies = world
        .bodies
        .iter()
        .filter_map(|body| {
            let bounds = world.collision.bounds_of(body.controller.collider())?;
            Some(BodySnapshot {
                id: body.id,
                x: bounds.center.x,
                y: bounds.center.y,
                width: bounds.width(),
                height: bounds.height(),
                collisions: body.collisions(),
            })
        })
        .collect();

    let platforms = world
        .platforms
        .iter()
        .filter_map(|entry| {
            let position = world.collision.position_of(entry.platform.collider())?;
            Some(PlatformSnapshot {
                id: entry.id,
                x: position.x,
                y: position.y,
                phase: entry.platform.path().phase(),
                from_index: entry.platform.path().from_index(),
                passengers: entry.platform.passengers().len(),
            })
        })
        .collect();

    let snapshot = WorldSnapshot {
        frame: world.frame,
        bodies,
        platforms,
    };
    serde_json::to_string(&snapshot).unwrap_or_else(|_| "{}".to_string())
}
