#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use viking_engine::World;

#[wasm_bindgen_test]
fn facade_ticks_and_snapshots() {
    viking_engine::init();
    let mut world = World::new(r#"{"gravity": 0.5}"#).unwrap();
    let id = world.spawn_robot(r#"{"location":{"x":10,"y":10},"hitpoints":5}"#).unwrap();

    assert!(world.tick().unwrap());
    assert!(world.is_alive(id));
    assert!(world.snapshot_json().contains("BasicRobot"));
    assert_eq!(world.frame(), 1);
}

#[wasm_bindgen_test]
fn bad_config_is_a_js_error() {
    assert!(World::new(r#"{"maxIterations": 0}"#).is_err());
}
