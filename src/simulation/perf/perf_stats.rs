use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Snapshot of the last completed tick. Counters are always filled; the
/// `*_ms` timings stay zero unless perf metrics are enabled.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickStats {
    pub(crate) tick: u64,
    pub(crate) lanes: u32,
    pub(crate) effects_alive: u32,
    pub(crate) particles_alive: u32,
    pub(crate) fade_deaths: u32,
    pub(crate) secondary_spawns: u32,
    pub(crate) spawns_dropped: u32,
    pub(crate) effects_evicted: u32,
    pub(crate) rebalance_swaps: u32,
    pub(crate) spawn_admitted: bool,

    pub(crate) tick_ms: f64,
    pub(crate) lanes_ms: f64,
    pub(crate) rebalance_ms: f64,
}

#[wasm_bindgen]
impl TickStats {
    #[wasm_bindgen(getter)]
    pub fn tick(&self) -> u64 { self.tick }
    #[wasm_bindgen(getter)]
    pub fn lanes(&self) -> u32 { self.lanes }
    #[wasm_bindgen(getter)]
    pub fn effects_alive(&self) -> u32 { self.effects_alive }
    #[wasm_bindgen(getter)]
    pub fn particles_alive(&self) -> u32 { self.particles_alive }
    /// Particles that faded out this tick (not counting off-screen exits)
    #[wasm_bindgen(getter)]
    pub fn fade_deaths(&self) -> u32 { self.fade_deaths }
    #[wasm_bindgen(getter)]
    pub fn secondary_spawns(&self) -> u32 { self.secondary_spawns }
    /// Secondary bursts lost to a full lane
    #[wasm_bindgen(getter)]
    pub fn spawns_dropped(&self) -> u32 { self.spawns_dropped }
    /// Effects lost because secondaries had already filled their lane
    #[wasm_bindgen(getter)]
    pub fn effects_evicted(&self) -> u32 { self.effects_evicted }
    #[wasm_bindgen(getter)]
    pub fn rebalance_swaps(&self) -> u32 { self.rebalance_swaps }
    #[wasm_bindgen(getter)]
    pub fn spawn_admitted(&self) -> bool { self.spawn_admitted }

    #[wasm_bindgen(getter)]
    pub fn tick_ms(&self) -> f64 { self.tick_ms }
    #[wasm_bindgen(getter)]
    pub fn lanes_ms(&self) -> f64 { self.lanes_ms }
    #[wasm_bindgen(getter)]
    pub fn rebalance_ms(&self) -> f64 { self.rebalance_ms }

    /// camelCase JSON, for dashboards and logs
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
