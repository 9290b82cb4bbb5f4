use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Clone, Debug)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) platforms_ms: f64,
    pub(super) timers_ms: f64,
    /// Rays cast since the previous step, host moves included
    pub(super) ray_casts: u32,
    pub(super) ray_hits: u32,
    pub(super) passengers_moved: u32,
    pub(super) bodies: u32,
    pub(super) platforms: u32,
    pub(super) colliders: u32,
    pub(super) frame: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

impl Default for PerfStats {
    fn default() -> Self {
        PerfStats {
            step_ms: 0.0,
            platforms_ms: 0.0,
            timers_ms: 0.0,
            ray_casts: 0,
            ray_hits: 0,
            passengers_moved: 0,
            bodies: 0,
            platforms: 0,
            colliders: 0,
            frame: 0,
        }
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn platforms_ms(&self) -> f64 { self.platforms_ms }
    #[wasm_bindgen(getter)]
    pub fn timers_ms(&self) -> f64 { self.timers_ms }
    #[wasm_bindgen(getter)]
    pub fn ray_casts(&self) -> u32 { self.ray_casts }
    #[wasm_bindgen(getter)]
    pub fn ray_hits(&self) -> u32 { self.ray_hits }
    #[wasm_bindgen(getter)]
    pub fn passengers_moved(&self) -> u32 { self.passengers_moved }
    #[wasm_bindgen(getter)]
    pub fn bodies(&self) -> u32 { self.bodies }
    #[wasm_bindgen(getter)]
    pub fn platforms(&self) -> u32 { self.platforms }
    #[wasm_bindgen(getter)]
    pub fn colliders(&self) -> u32 { self.colliders }
    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u32 { self.frame }
}
