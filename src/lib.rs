//! Ripple Engine - 2D scalar wave field simulation in WASM
//!
//! Explicit leapfrog stepping of `∂²u/∂t² = c²∇²u` on a fixed grid with
//! heterogeneous media, reflecting obstacles, coherent sources and an
//! absorbing sponge boundary.
//!
//! Architecture:
//! - core/        - errors, bounds-check macro, numeric helpers
//! - spatial/     - grid indexing and cell rasterization
//! - domain/      - medium, obstacles, sources, configuration
//! - systems/     - finite-difference kernel and sponge mask
//! - simulation/  - the tank (field stepper) and its JS facade
//! - scenarios/   - ready-made experiment setups

// Safety macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod spatial;
pub mod domain;
pub mod systems;
pub mod simulation;
pub mod scenarios;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization (browser only;
// native builds use rayon's global pool)
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

    web_sys::console::log_1(&"Ripple WASM engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Wavelength in cells for a wave speed and source frequency.
#[wasm_bindgen]
pub fn wavelength(speed: f32, frequency: f32) -> f32 {
    crate::core::math::wavelength(speed, frequency)
}

// Re-export main types
pub use crate::core::{Result, TankError};
pub use domain::{BoundaryMode, Emission, SourceShape, TankConfig};
pub use scenarios::{Scenario, ScenarioParams};
pub use simulation::{FrameSchedule, PerfStats, RippleTank, TankCore, TankPhase};
pub use spatial::Grid;
