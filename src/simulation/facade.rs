use wasm_bindgen::prelude::*;

use super::perf_stats::TickStats;
use super::render_extract::RenderPoint;
use super::EffectSystem;

/// JS-facing wrapper. Owns the system plus a point buffer that JS reads
/// directly out of linear memory after `extract_points`.
#[wasm_bindgen]
pub struct EffectWorld {
    core: EffectSystem,
    points: Vec<RenderPoint>,
}

impl EffectWorld {
    pub fn system(&self) -> &EffectSystem {
        &self.core
    }
}

#[wasm_bindgen]
impl EffectWorld {
    /// Create a world with `lanes` lanes (clamped to 1..=16)
    #[wasm_bindgen(constructor)]
    pub fn new(lanes: usize) -> Self {
        Self {
            core: EffectSystem::new(lanes),
            points: Vec::new(),
        }
    }

    #[wasm_bindgen(js_name = fromConfigJson)]
    pub fn from_config_json(json: &str) -> Result<EffectWorld, JsValue> {
        let core = EffectSystem::from_config_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            core,
            points: Vec::new(),
        })
    }

    /// Advance by `dt` seconds on a `width` x `height` screen
    pub fn update(&mut self, dt: f32, width: f32, height: f32) {
        self.core.update(dt, width, height);
    }

    /// Queue a burst for the next update (latest call wins)
    pub fn add_effect(&mut self, x: f32, y: f32) {
        self.core.add_effect(x, y);
    }

    /// Copy the latest generation into the point buffer. Returns the point count.
    pub fn extract_points(&mut self) -> usize {
        let snapshot = self.core.get_render_buffer();
        snapshot.extract_points(&mut self.points)
    }

    /// Pointer to `points_len() * 3` floats: x, y, alpha per point
    pub fn points_ptr(&self) -> *const f32 {
        self.points.as_ptr() as *const f32
    }

    pub fn points_len(&self) -> usize {
        self.points.len()
    }

    #[wasm_bindgen(getter)]
    pub fn effect_count(&self) -> usize {
        self.core.get_render_buffer().effect_count()
    }

    #[wasm_bindgen(getter)]
    pub fn lane_count(&self) -> usize {
        self.core.lane_count()
    }

    #[wasm_bindgen(getter)]
    pub fn tick(&self) -> u64 {
        self.core.tick_count()
    }

    /// Enable or disable per-tick timings (adds timer overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Stats of the last update (timings are zero when perf is disabled)
    pub fn get_tick_stats(&self) -> TickStats {
        self.core.get_tick_stats()
    }

    pub fn config_json(&self) -> String {
        self.core.config().to_json()
    }
}
