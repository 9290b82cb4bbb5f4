//! Platformer Engine - ray-based kinematic 2D movement in WASM
//!
//! Bodies are boxes moved by the host; the engine resolves each requested
//! displacement against static geometry with skin-inset rays, handling
//! slopes, one-way platforms and moving platforms that carry riders.
//!
//! Architecture:
//! - core/          - math, time, errors, logging
//! - domain/        - layers, input, settings, level bundles
//! - spatial/       - colliders, broadphase, raycasts
//! - systems/       - controller, moving platforms, body registry
//! - simulation/    - orchestration and the JS facade

// Logging macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod domain;
pub mod spatial;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Thread pool for parallel ray batches in the browser
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    engine_log!("platformer engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Layer bits for JS callers of `add_box` / `add_polygon`
#[wasm_bindgen]
pub fn layer_ground() -> u32 { domain::CollisionMask::GROUND.0 }
#[wasm_bindgen]
pub fn layer_body() -> u32 { domain::CollisionMask::BODY.0 }
#[wasm_bindgen]
pub fn layer_platform() -> u32 { domain::CollisionMask::PLATFORM.0 }
#[wasm_bindgen]
pub fn layer_through() -> u32 { domain::CollisionMask::THROUGH.0 }

// Re-export main types
pub use crate::core::{EngineError, EngineResult};
pub use domain::{CollisionMask, DirectionalInput, EngineSettings, LevelBundle};
pub use simulation::{CollisionReport, PerfStats, World, WorldCore};
pub use spatial::{ColliderId, CollisionWorld};
pub use systems::{CollisionState, Controller2D, MovingPlatform, PlatformConfig};
