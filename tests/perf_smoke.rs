use platformer_engine::World;

#[test]
fn perf_smoke_step() {
    let mut world = World::new();
    world.enable_perf_metrics(true);
    assert!(world.add_box(0.0, -0.5, 64.0, 1.0, 1).is_ok());
    for i in 0..16 {
        assert!(world
            .add_platform(i as f32 * 4.0 - 30.0, 2.0, 3.0, 0.5, vec![0.0, 0.0, 0.0, 3.0], 1.0, 0.0, false, 0.0)
            .is_ok());
        assert!(world.spawn_body(i as f32 * 4.0 - 30.0, 2.75, 1.0, 1.0).is_ok());
    }
    world.step(1.0 / 60.0);
    let stats = world.get_perf_stats();
    assert!(stats.step_ms() >= 0.0);
    assert_eq!(stats.platforms(), 16);
    assert_eq!(stats.passengers_moved(), 16);
}
