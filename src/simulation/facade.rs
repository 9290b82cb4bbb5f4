use wasm_bindgen::prelude::*;

use crate::core::math::Vec2;
use crate::core::EngineError;
use crate::domain::{CollisionMask, DirectionalInput, EngineSettings};
use crate::systems::{CollisionState, PlatformConfig};

use super::perf_stats::PerfStats;
use super::WorldCore;

fn js_err(e: EngineError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn pairs(flat: &[f32]) -> Vec<Vec2> {
    flat.chunks_exact(2).map(|p| Vec2::new(p[0], p[1])).collect()
}

/// Read-only copy of a body's collision state
#[wasm_bindgen]
#[derive(Clone)]
pub struct CollisionReport {
    above: bool,
    below: bool,
    left: bool,
    right: bool,
    climbing_slope: bool,
    descending_slope: bool,
    sliding_down_max_slope: bool,
    slope_angle: f32,
    face_direction: i32,
    falling_through_platform: bool,
}

impl From<&CollisionState> for CollisionReport {
    fn from(s: &CollisionState) -> Self {
        Self {
            above: s.above,
            below: s.below,
            left: s.left,
            right: s.right,
            climbing_slope: s.climbing_slope,
            descending_slope: s.descending_slope,
            sliding_down_max_slope: s.sliding_down_max_slope,
            slope_angle: s.slope_angle,
            face_direction: s.face_direction as i32,
            falling_through_platform: s.falling_through_platform,
        }
    }
}

#[wasm_bindgen]
impl CollisionReport {
    #[wasm_bindgen(getter)]
    pub fn above(&self) -> bool { self.above }
    #[wasm_bindgen(getter)]
    pub fn below(&self) -> bool { self.below }
    #[wasm_bindgen(getter)]
    pub fn left(&self) -> bool { self.left }
    #[wasm_bindgen(getter)]
    pub fn right(&self) -> bool { self.right }
    #[wasm_bindgen(getter)]
    pub fn climbing_slope(&self) -> bool { self.climbing_slope }
    #[wasm_bindgen(getter)]
    pub fn descending_slope(&self) -> bool { self.descending_slope }
    #[wasm_bindgen(getter)]
    pub fn sliding_down_max_slope(&self) -> bool { self.sliding_down_max_slope }
    #[wasm_bindgen(getter)]
    pub fn slope_angle(&self) -> f32 { self.slope_angle }
    #[wasm_bindgen(getter)]
    pub fn face_direction(&self) -> i32 { self.face_direction }
    #[wasm_bindgen(getter)]
    pub fn falling_through_platform(&self) -> bool { self.falling_through_platform }
}

#[wasm_bindgen]
pub struct World {
    core: WorldCore,
}

#[wasm_bindgen]
impl World {
    /// Empty world with default settings
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            core: WorldCore::new(),
        }
    }

    #[wasm_bindgen(js_name = newWithSettings)]
    pub fn new_with_settings(settings_json: String) -> Result<World, JsValue> {
        let settings: EngineSettings =
            serde_json::from_str(&settings_json).map_err(|e| js_err(EngineError::Json(e)))?;
        let core = WorldCore::with_settings(settings).map_err(js_err)?;
        Ok(Self { core })
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> usize { self.core.body_count() }

    #[wasm_bindgen(getter)]
    pub fn platform_count(&self) -> usize { self.core.platform_count() }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    pub fn load_level_bundle(&mut self, json: String) -> Result<(), JsValue> {
        self.core.load_level_bundle_json(&json).map_err(js_err)
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.core.clear();
    }

    // === GEOMETRY API ===

    /// Static box centered at (x, y); `layers` is a raw layer bit set
    pub fn add_box(&mut self, x: f32, y: f32, w: f32, h: f32, layers: u32) -> Result<u32, JsValue> {
        self.core
            .add_box(x, y, w, h, CollisionMask(layers))
            .map_err(js_err)
    }

    /// Static polygon from flat `[x0, y0, x1, y1, ...]` world coordinates
    pub fn add_polygon(&mut self, points: Vec<f32>, layers: u32) -> Result<u32, JsValue> {
        self.core
            .add_polygon(&pairs(&points), CollisionMask(layers))
            .map_err(js_err)
    }

    pub fn remove_collider(&mut self, id: u32) -> bool {
        self.core.remove_collider(id)
    }

    // === BODY API ===

    /// Spawn a body centered at (x, y). Returns the body ID
    pub fn spawn_body(&mut self, x: f32, y: f32, w: f32, h: f32) -> Result<u32, JsValue> {
        self.core.spawn_body(x, y, w, h).map_err(js_err)
    }

    pub fn remove_body(&mut self, id: u32) -> bool {
        self.core.remove_body(id)
    }

    pub fn set_body_position(&mut self, id: u32, x: f32, y: f32) -> Result<(), JsValue> {
        self.core.set_body_position(id, x, y).map_err(js_err)
    }

    /// Resolve a move; input axes are analog sticks or -1/0/1 keys
    pub fn move_body(&mut self, id: u32, dx: f32, dy: f32, input_x: f32, input_y: f32) -> Result<(), JsValue> {
        self.core
            .move_body(id, dx, dy, DirectionalInput::from_axes(input_x, input_y))
            .map_err(js_err)
    }

    /// `[x, y]` of the body's center
    pub fn body_position(&self, id: u32) -> Option<Vec<f32>> {
        self.core.body_position(id).map(|p| vec![p.x, p.y])
    }

    pub fn collision_report(&self, id: u32) -> Option<CollisionReport> {
        self.core.body_collisions(id).map(CollisionReport::from)
    }

    // === PLATFORM API ===

    /// Moving platform centered at (x, y); waypoints are flat offsets from there
    #[allow(clippy::too_many_arguments)]
    pub fn add_platform(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        waypoints: Vec<f32>,
        speed: f32,
        ease_amount: f32,
        cyclic: bool,
        wait_time: f32,
    ) -> Result<u32, JsValue> {
        let config = PlatformConfig {
            speed,
            ease_amount,
            cyclic,
            wait_time,
            local_waypoints: pairs(&waypoints),
            ..PlatformConfig::default()
        };
        self.core
            .add_platform(x, y, w, h, CollisionMask::PLATFORM, config)
            .map_err(js_err)
    }

    pub fn remove_platform(&mut self, id: u32) -> bool {
        self.core.remove_platform(id)
    }

    pub fn platform_position(&self, id: u32) -> Option<Vec<f32>> {
        self.core.platform_position(id).map(|p| vec![p.x, p.y])
    }

    /// Advance platforms by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        self.core.step(dt);
    }

    pub fn snapshot_json(&self) -> String {
        self.core.snapshot_json()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
