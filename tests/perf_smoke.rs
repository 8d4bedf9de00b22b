use viking_engine::World;

#[test]
fn perf_smoke_tick() {
    let mut world = World::new("").unwrap();
    world.enable_perf_metrics(true);
    world.load_walls(r#"[{"x":-1000,"y":400,"w":4000,"h":50}]"#).unwrap();
    for i in 0..64 {
        let params = format!(r#"{{"location":{{"x":{},"y":{}}}}}"#, (i % 16) * 40, (i / 16) * 40);
        world.spawn_robot(&params).unwrap();
    }
    world.spawn_spawner(r#"{"location":{"x":300,"y":100}}"#).unwrap();

    for _ in 0..200 {
        assert!(world.tick().unwrap());
    }
    let stats = world.get_tick_stats();
    assert!(stats.tick_ms() >= 0.0);
    assert!(stats.iterations() >= 1);
    assert!(world.entity_count() > 0);
}
