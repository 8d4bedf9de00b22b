use wasm_bindgen::prelude::*;

/// Counters and timings of the last tick.
/// Counters are always filled; `*_ms` timings only with perf metrics enabled.
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct TickStats {
    pub(super) collect_ms: f64,
    pub(super) integrate_ms: f64,
    pub(super) resolve_ms: f64,
    pub(super) lifecycle_ms: f64,
    pub(super) publish_ms: f64,
    pub(super) tick_ms: f64,

    pub(super) iterations: u32,
    pub(super) exhausted: bool,
    pub(super) residual: f32,
    pub(super) contacts: u32,
    pub(super) active_hits: u32,
    pub(super) spawned: u32,
    pub(super) removed: u32,
    pub(super) respawned: u32,
    pub(super) intents_applied: u32,
    pub(super) intents_dropped: u32,
    pub(super) unit_panics: u32,
    pub(super) entity_count: u32,
    pub(super) frame_target_ms: f64,
}

impl TickStats {
    pub(crate) fn reset(&mut self) {
        *self = TickStats::default();
    }
}

#[wasm_bindgen]
impl TickStats {
    #[wasm_bindgen(getter)]
    pub fn collect_ms(&self) -> f64 { self.collect_ms }
    #[wasm_bindgen(getter)]
    pub fn integrate_ms(&self) -> f64 { self.integrate_ms }
    #[wasm_bindgen(getter)]
    pub fn resolve_ms(&self) -> f64 { self.resolve_ms }
    #[wasm_bindgen(getter)]
    pub fn lifecycle_ms(&self) -> f64 { self.lifecycle_ms }
    #[wasm_bindgen(getter)]
    pub fn publish_ms(&self) -> f64 { self.publish_ms }
    #[wasm_bindgen(getter)]
    pub fn tick_ms(&self) -> f64 { self.tick_ms }

    /// Relaxation passes run by collision resolution
    #[wasm_bindgen(getter)]
    pub fn iterations(&self) -> u32 { self.iterations }
    /// Resolution stopped at the iteration ceiling
    #[wasm_bindgen(getter)]
    pub fn exhausted(&self) -> bool { self.exhausted }
    #[wasm_bindgen(getter)]
    pub fn residual(&self) -> f32 { self.residual }
    #[wasm_bindgen(getter)]
    pub fn contacts(&self) -> u32 { self.contacts }
    #[wasm_bindgen(getter)]
    pub fn active_hits(&self) -> u32 { self.active_hits }
    #[wasm_bindgen(getter)]
    pub fn spawned(&self) -> u32 { self.spawned }
    #[wasm_bindgen(getter)]
    pub fn removed(&self) -> u32 { self.removed }
    #[wasm_bindgen(getter)]
    pub fn respawned(&self) -> u32 { self.respawned }
    #[wasm_bindgen(getter)]
    pub fn intents_applied(&self) -> u32 { self.intents_applied }
    #[wasm_bindgen(getter)]
    pub fn intents_dropped(&self) -> u32 { self.intents_dropped }
    #[wasm_bindgen(getter)]
    pub fn unit_panics(&self) -> u32 { self.unit_panics }
    #[wasm_bindgen(getter)]
    pub fn entity_count(&self) -> u32 { self.entity_count }
    #[wasm_bindgen(getter)]
    pub fn frame_target_ms(&self) -> f64 { self.frame_target_ms }
}
