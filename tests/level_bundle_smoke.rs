use std::fs;
use std::sync::Arc;

use platformer_engine::core::time::ManualClock;
use platformer_engine::{DirectionalInput, EngineSettings, WorldCore};

const GRAVITY_STEP: f32 = -0.2;

fn demo_level() -> (WorldCore, Arc<ManualClock>) {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/levels/demo_level.json");
    let json = fs::read_to_string(path).expect("demo level should exist");

    let clock = Arc::new(ManualClock::new());
    let mut world = WorldCore::with_clock(EngineSettings::default(), clock.clone()).unwrap();
    world.load_level_bundle_json(&json).expect("demo level should load");
    (world, clock)
}

fn settle(world: &mut WorldCore, id: u32, frames: usize) {
    for _ in 0..frames {
        world.move_body(id, 0.0, GRAVITY_STEP, DirectionalInput::NONE).unwrap();
    }
}

#[test]
fn demo_level_loads_with_expected_counts() {
    let (world, _) = demo_level();
    assert_eq!(world.body_count(), 2);
    assert_eq!(world.platform_count(), 1);
    // 4 static colliders, 2 bodies, 1 platform
    assert_eq!(world.collision_world().len(), 7);
}

#[test]
fn bodies_land_on_ground_and_ledge() {
    let (mut world, _) = demo_level();
    settle(&mut world, 1, 30);
    settle(&mut world, 2, 30);

    let ground = world.body_position(1).unwrap();
    assert!((ground.y - 0.5).abs() < 1e-4, "ground body y = {}", ground.y);
    assert!(world.body_collisions(1).unwrap().below);

    // ledge top is at 2.75
    let ledge = world.body_position(2).unwrap();
    assert!((ledge.y - 3.25).abs() < 1e-4, "ledge body y = {}", ledge.y);
    assert!(world.body_collisions(2).unwrap().below);
}

#[test]
fn walking_right_climbs_the_slope() {
    let (mut world, _) = demo_level();
    settle(&mut world, 1, 30);

    for _ in 0..60 {
        world.move_body(1, 0.1, -0.1, DirectionalInput::new(1, 0)).unwrap();
    }

    let pos = world.body_position(1).unwrap();
    assert!(pos.x > 4.0 && pos.x < 10.0, "x = {}", pos.x);
    assert!(pos.y > 1.0, "y = {}", pos.y);
    let c = world.body_collisions(1).unwrap();
    assert!(c.below);
    assert!(!c.right);
}

#[test]
fn down_input_drops_through_the_ledge() {
    let (mut world, _) = demo_level();
    settle(&mut world, 2, 30);

    world.move_body(2, 0.0, GRAVITY_STEP, DirectionalInput::new(0, -1)).unwrap();
    assert!(world.body_collisions(2).unwrap().falling_through_platform);
    settle(&mut world, 2, 30);

    let pos = world.body_position(2).unwrap();
    assert!((pos.y - 0.5).abs() < 1e-4, "y = {}", pos.y);
    assert!(world.body_collisions(2).unwrap().below);
}

#[test]
fn wall_stops_a_body_walking_left() {
    let (mut world, _) = demo_level();
    settle(&mut world, 1, 30);

    for _ in 0..200 {
        world.move_body(1, -0.1, -0.1, DirectionalInput::new(-1, 0)).unwrap();
    }

    // wall right face at x = -14.5
    let pos = world.body_position(1).unwrap();
    assert!((pos.x - (-14.0)).abs() < 1e-4, "x = {}", pos.x);
    let c = world.body_collisions(1).unwrap();
    assert!(c.left);
    assert_eq!(c.face_direction, -1);
}
