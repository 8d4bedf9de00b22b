use slotmap::{Key, KeyData};
use wasm_bindgen::prelude::*;

use crate::core::error::SimError;
use crate::core::geometry::Vec2;
use crate::core::random::xorshift32;
use crate::domain::entity::{Attributes, EntityHandle};
use crate::systems::behaviors::{BasicRobot, MineDropper, Spawner};

use super::perf_stats::TickStats;
use super::{TickOutcome, WorldCore};

fn js_error(err: SimError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Handle as a JS number (slotmap FFI encoding)
fn handle_to_js(handle: EntityHandle) -> u64 {
    handle.data().as_ffi()
}

fn handle_from_js(id: u64) -> EntityHandle {
    EntityHandle::from(KeyData::from_ffi(id))
}

/// Optional spawn parameters coming from JS
#[derive(serde::Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct SpawnParams {
    location: Vec2,
    angle: Option<f32>,
    velocity: Option<f32>,
    hitpoints: Option<i32>,
}

fn parse_params(json: &str) -> Result<SpawnParams, JsValue> {
    if json.trim().is_empty() {
        return Ok(SpawnParams::default());
    }
    serde_json::from_str(json).map_err(|e| js_error(SimError::from(e)))
}

#[wasm_bindgen]
pub struct World {
    core: WorldCore,
    rng_state: u32,
}

#[wasm_bindgen]
impl World {
    /// Create a world from a config JSON string (empty = defaults)
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<World, JsValue> {
        let json = if config_json.trim().is_empty() { "{}" } else { config_json };
        let core = WorldCore::from_config_json(json).map_err(js_error)?;
        Ok(Self { core, rng_state: 12345 })
    }

    /// Replace level geometry with a JSON array of `{x, y, w, h}`
    #[wasm_bindgen(js_name = loadWalls)]
    pub fn load_walls(&mut self, json: &str) -> Result<usize, JsValue> {
        self.core.load_walls_json(json).map_err(js_error)
    }

    #[wasm_bindgen(js_name = spawnRobot)]
    pub fn spawn_robot(&mut self, params_json: &str) -> Result<u64, JsValue> {
        let p = parse_params(params_json)?;
        let seed = xorshift32(&mut self.rng_state);
        let robot = BasicRobot::new(
            p.location,
            p.angle.unwrap_or(135.0),
            p.velocity.unwrap_or(1.0),
            p.hitpoints.unwrap_or(20),
        )
        .with_seed(seed);
        self.core.join_unit(robot).map(handle_to_js).map_err(js_error)
    }

    #[wasm_bindgen(js_name = spawnMineDropper)]
    pub fn spawn_mine_dropper(&mut self, params_json: &str) -> Result<u64, JsValue> {
        let p = parse_params(params_json)?;
        let dropper = MineDropper::new(
            p.location,
            p.angle.unwrap_or(135.0),
            p.velocity.unwrap_or(1.0),
            p.hitpoints.unwrap_or(20),
        );
        self.core.join_unit(dropper).map(handle_to_js).map_err(js_error)
    }

    #[wasm_bindgen(js_name = spawnSpawner)]
    pub fn spawn_spawner(&mut self, params_json: &str) -> Result<u64, JsValue> {
        let p = parse_params(params_json)?;
        let seed = xorshift32(&mut self.rng_state);
        self.core.join_unit(Spawner::new(p.location, seed)).map(handle_to_js).map_err(js_error)
    }

    /// Logic-free entity from a full `Attributes` JSON object
    #[wasm_bindgen(js_name = spawnProp)]
    pub fn spawn_prop(&mut self, attributes_json: &str) -> Result<u64, JsValue> {
        let attributes: Attributes =
            serde_json::from_str(attributes_json).map_err(|e| js_error(SimError::from(e)))?;
        self.core.register(attributes).map(handle_to_js).map_err(js_error)
    }

    /// Advance one frame. Returns false once a unit has requested QUIT.
    pub fn tick(&mut self) -> Result<bool, JsValue> {
        match self.core.tick().map_err(js_error)? {
            TickOutcome::Continue => Ok(true),
            TickOutcome::Quit(code) => {
                log::info!("simulation quit with code {code}");
                Ok(false)
            }
        }
    }

    /// Last published WorldState as JSON
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> String {
        self.core.state().to_json()
    }

    #[wasm_bindgen(js_name = isAlive)]
    pub fn is_alive(&self, id: u64) -> bool {
        self.core.entity(handle_from_js(id)).is_some()
    }

    #[wasm_bindgen(getter)]
    pub fn entity_count(&self) -> usize {
        self.core.entity_count()
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 {
        self.core.frame()
    }

    #[wasm_bindgen(getter)]
    pub fn time_ms(&self) -> f64 {
        self.core.time_ms()
    }

    /// Current adaptive frame target; JS schedules the next tick with it
    #[wasm_bindgen(getter)]
    pub fn frame_time_ms(&self) -> f64 {
        self.core.frame_time_ms()
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.core.set_gravity(gravity);
    }

    /// Enable or disable per-phase timings (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Stats of the last tick
    pub fn get_tick_stats(&self) -> TickStats {
        self.core.stats()
    }
}
