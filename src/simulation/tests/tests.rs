use super::*;
use crate::core::time::ManualClock;
use crate::core::EngineError;

const EPS: f32 = 1e-4;

fn manual_world() -> (WorldCore, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let world = WorldCore::with_clock(EngineSettings::default(), clock.clone()).unwrap();
    (world, clock)
}

fn rising_platform() -> PlatformConfig {
    PlatformConfig {
        speed: 1.0,
        local_waypoints: vec![Vec2::ZERO, Vec2::new(0.0, 5.0)],
        ..PlatformConfig::default()
    }
}

#[test]
fn body_falls_onto_the_ground_and_reports_below() {
    let (mut world, _) = manual_world();
    // ground top at y = 0
    world.add_box(0.0, -0.5, 20.0, 1.0, CollisionMask::GROUND).unwrap();
    let id = world.spawn_body(0.0, 2.0, 1.0, 1.0).unwrap();

    world.move_body(id, 0.0, -3.0, DirectionalInput::NONE).unwrap();

    let pos = world.body_position(id).unwrap();
    assert!((pos.y - 0.5).abs() < EPS, "y = {}", pos.y);
    assert!(world.body_collisions(id).unwrap().below);
}

#[test]
fn unknown_body_commands_are_errors() {
    let (mut world, _) = manual_world();
    assert!(matches!(
        world.move_body(9, 1.0, 0.0, DirectionalInput::NONE),
        Err(EngineError::UnknownBody(9))
    ));
    assert!(world.set_body_position(9, 0.0, 0.0).is_err());
    assert!(world.body_position(9).is_none());
    assert!(!world.remove_body(9));
}

#[test]
fn rising_platform_carries_its_rider_flush() {
    let (mut world, _) = manual_world();
    // platform top at y = 0.5, rider resting on it
    let pid = world
        .add_platform(0.0, 0.0, 3.0, 1.0, CollisionMask::PLATFORM, rising_platform())
        .unwrap();
    let id = world.spawn_body(0.0, 1.0, 1.0, 1.0).unwrap();

    for _ in 0..10 {
        world.step(0.1);
    }

    let platform = world.platform_position(pid).unwrap();
    let body = world.body_position(id).unwrap();
    assert!((platform.y - 1.0).abs() < 1e-3, "platform y = {}", platform.y);
    assert!((body.y - (platform.y + 1.0)).abs() < 1e-3, "body y = {}", body.y);
    assert!(world.body_collisions(id).unwrap().below);
    assert_eq!(world.frame(), 10);
}

#[test]
fn invalid_platform_leaves_no_collider_behind() {
    let (mut world, _) = manual_world();
    let config = PlatformConfig {
        speed: -1.0,
        ..rising_platform()
    };
    let r = world.add_platform(0.0, 0.0, 3.0, 1.0, CollisionMask::PLATFORM, config);
    assert!(matches!(r, Err(EngineError::InvalidPlatform(_))));
    assert!(world.collision_world().is_empty());
    assert_eq!(world.platform_count(), 0);
}

#[test]
fn step_polls_fall_through_timers() {
    let (mut world, clock) = manual_world();
    // through ledge, top at y = 0
    world
        .add_box(0.0, -0.5, 6.0, 1.0, CollisionMask::PLATFORM | CollisionMask::THROUGH)
        .unwrap();
    let id = world.spawn_body(0.0, 0.5, 1.0, 1.0).unwrap();

    world.move_body(id, 0.0, -0.1, DirectionalInput::new(0, -1)).unwrap();
    assert!(world.body_collisions(id).unwrap().falling_through_platform);
    assert!((world.body_position(id).unwrap().y - 0.4).abs() < EPS);

    clock.advance_ms(100.0);
    world.step(0.016);
    assert!(world.body_collisions(id).unwrap().falling_through_platform);

    clock.advance_ms(200.0);
    world.step(0.016);
    assert!(!world.body_collisions(id).unwrap().falling_through_platform);
}

#[test]
fn teleport_ends_a_fall_through() {
    let (mut world, clock) = manual_world();
    world
        .add_box(0.0, -0.5, 6.0, 1.0, CollisionMask::PLATFORM | CollisionMask::THROUGH)
        .unwrap();
    let id = world.spawn_body(0.0, 0.5, 1.0, 1.0).unwrap();

    world.move_body(id, 0.0, -0.1, DirectionalInput::new(0, -1)).unwrap();
    assert!(world.body_collisions(id).unwrap().falling_through_platform);
    assert_eq!(world.bodies.get(id).unwrap().controller.pending_timers(), 1);

    world.set_body_position(id, 0.0, 2.0).unwrap();
    assert!(!world.body_collisions(id).unwrap().falling_through_platform);
    assert_eq!(world.bodies.get(id).unwrap().controller.pending_timers(), 0);

    // lands on the ledge again instead of dropping through it
    clock.advance_ms(50.0);
    world.move_body(id, 0.0, -3.0, DirectionalInput::NONE).unwrap();
    assert!((world.body_position(id).unwrap().y - 0.5).abs() < EPS);
    assert!(world.body_collisions(id).unwrap().below);
}

#[test]
fn bad_dt_is_ignored() {
    let (mut world, _) = manual_world();
    world.step(-1.0);
    world.step(f32::NAN);
    assert_eq!(world.frame(), 0);
    world.step(0.0);
    assert_eq!(world.frame(), 1);
}

#[test]
fn owned_colliders_cannot_be_removed_directly() {
    let (mut world, _) = manual_world();
    let wall = world.add_box(5.0, 0.0, 1.0, 4.0, CollisionMask::GROUND).unwrap();
    let id = world.spawn_body(0.0, 0.0, 1.0, 1.0).unwrap();
    let body_collider = world.bodies.get(id).unwrap().controller.collider();

    assert!(!world.remove_collider(body_collider.0));
    assert!(world.remove_collider(wall));
    assert_eq!(world.collision_world().len(), 1);
}

#[test]
fn clear_resets_ids_and_geometry() {
    let (mut world, _) = manual_world();
    world.add_box(0.0, -0.5, 10.0, 1.0, CollisionMask::GROUND).unwrap();
    world.spawn_body(0.0, 2.0, 1.0, 1.0).unwrap();
    world
        .add_platform(4.0, 0.0, 2.0, 1.0, CollisionMask::PLATFORM, rising_platform())
        .unwrap();
    world.step(0.1);

    world.clear();
    assert_eq!(world.body_count(), 0);
    assert_eq!(world.platform_count(), 0);
    assert!(world.collision_world().is_empty());
    assert_eq!(world.frame(), 0);

    assert_eq!(world.spawn_body(0.0, 2.0, 1.0, 1.0).unwrap(), 1);
    assert_eq!(
        world
            .add_platform(4.0, 0.0, 2.0, 1.0, CollisionMask::PLATFORM, rising_platform())
            .unwrap(),
        1
    );
}

#[test]
fn level_bundle_replaces_the_world() {
    let (mut world, _) = manual_world();
    world.spawn_body(10.0, 10.0, 1.0, 1.0).unwrap();

    let json = r#"{
        "settings": { "skin_width": 0.02 },
        "colliders": [
            { "shape": { "rect": { "x": 0, "y": -0.5, "width": 20, "height": 1 } } },
            { "shape": { "polygon": { "points": [[4, 0], [8, 0], [8, 2]] } } }
        ],
        "bodies": [ { "x": 0, "y": 2, "width": 1, "height": 1 } ],
        "platforms": [ { "x": -5, "y": 1, "width": 2, "height": 0.5, "speed": 2,
                         "waypoints": [[0, 0], [0, 3]] } ]
    }"#;
    world.load_level_bundle_json(json).unwrap();

    assert!((world.settings().skin_width - 0.02).abs() < 1e-6);
    assert_eq!(world.body_count(), 1);
    assert_eq!(world.platform_count(), 1);
    assert_eq!(world.collision_world().len(), 4);
    let body = world.body_position(1).unwrap();
    assert!((body - Vec2::new(0.0, 2.0)).length() < EPS);
    assert_eq!(world.platform(1).unwrap().path().waypoints()[1], Vec2::new(-5.0, 4.0));
}

#[test]
fn failed_level_load_keeps_the_current_world() {
    let (mut world, _) = manual_world();
    world.spawn_body(0.0, 2.0, 1.0, 1.0).unwrap();

    let bad_layer = r#"{ "colliders": [
        { "shape": { "rect": { "x": 0, "y": 0, "width": 1, "height": 1 } }, "layers": ["lava"] }
    ] }"#;
    assert!(matches!(
        world.load_level_bundle_json(bad_layer),
        Err(EngineError::UnknownLayer(_))
    ));
    assert!(world.load_level_bundle_json("not json").is_err());

    assert_eq!(world.body_count(), 1);
    assert_eq!(world.collision_world().len(), 1);
}

#[test]
fn perf_stats_track_the_last_step() {
    let (mut world, _) = manual_world();
    world
        .add_platform(0.0, 0.0, 3.0, 1.0, CollisionMask::PLATFORM, rising_platform())
        .unwrap();
    world.spawn_body(0.0, 1.0, 1.0, 1.0).unwrap();

    world.step(0.1);
    assert_eq!(world.get_perf_stats().ray_casts(), 0);

    world.enable_perf_metrics(true);
    world.step(0.1);
    let stats = world.get_perf_stats();
    assert_eq!(stats.bodies(), 1);
    assert_eq!(stats.platforms(), 1);
    assert_eq!(stats.colliders(), 2);
    assert_eq!(stats.passengers_moved(), 1);
    assert!(stats.ray_casts() > 0);
    assert!(stats.ray_hits() > 0);
    assert_eq!(stats.frame(), 2);

    world.enable_perf_metrics(false);
    assert_eq!(world.get_perf_stats().ray_casts(), 0);
}

#[test]
fn snapshot_lists_bodies_and_platforms() {
    let (mut world, _) = manual_world();
    world.add_box(0.0, -0.5, 20.0, 1.0, CollisionMask::GROUND).unwrap();
    let id = world.spawn_body(0.0, 0.5, 1.0, 1.0).unwrap();
    world.move_body(id, 0.0, -0.1, DirectionalInput::NONE).unwrap();
    world
        .add_platform(5.0, 0.0, 2.0, 1.0, CollisionMask::PLATFORM, rising_platform())
        .unwrap();

    let snap: serde_json::Value = serde_json::from_str(&world.snapshot_json()).unwrap();
    assert_eq!(snap["bodies"].as_array().unwrap().len(), 1);
    assert_eq!(snap["bodies"][0]["id"], 1);
    assert_eq!(snap["bodies"][0]["collisions"]["below"], true);
    assert_eq!(snap["platforms"][0]["phase"], "Traveling");
}

#[test]
fn vanishing_ray_spacing_fails_at_setup() {
    let settings = EngineSettings {
        ray_spacing: 1e-30,
        ..EngineSettings::default()
    };
    assert!(matches!(
        WorldCore::with_settings(settings),
        Err(EngineError::InvalidSettings(_))
    ));

    // a body wider than the ray cap allows never reaches move_body
    let (mut world, _) = manual_world();
    assert!(matches!(
        world.spawn_body(0.0, 0.0, 1000.0, 1.0),
        Err(EngineError::TooManyRays { .. })
    ));
    assert_eq!(world.body_count(), 0);
    assert!(world.collision_world().is_empty());
}

#[test]
fn casts_made_before_enabling_perf_are_not_counted() {
    let (mut world, _) = manual_world();
    world.add_box(0.0, -0.5, 20.0, 1.0, CollisionMask::GROUND).unwrap();
    let id = world.spawn_body(0.0, 2.0, 1.0, 1.0).unwrap();
    world.move_body(id, 0.5, -3.0, DirectionalInput::NONE).unwrap();

    world.enable_perf_metrics(true);
    world.step(0.016);
    assert_eq!(world.get_perf_stats().ray_casts(), 0);

    world.move_body(id, 0.5, -0.1, DirectionalInput::NONE).unwrap();
    world.step(0.016);
    assert!(world.get_perf_stats().ray_casts() > 0);
}
