use wasm_bindgen::prelude::*;

use crate::core::TankError;
use crate::domain::{BoundaryMode, Emission};
use crate::scenarios::Scenario;

use super::perf_stats::PerfStats;
use super::TankCore;

fn to_js(err: TankError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Pointer/length snapshot of every readable buffer. Pointers are offsets
/// into wasm memory and stay valid until the tank is dropped.
#[wasm_bindgen]
pub struct AbiLayout {
    current_ptr: u32,
    medium_ptr: u32,
    obstacle_ptr: u32,
    average_ptr: u32,
    sponge_ptr: u32,
    len_elements: u32,
    f32_len_bytes: u32,
    u8_len_bytes: u32,
}

#[wasm_bindgen]
impl AbiLayout {
    #[wasm_bindgen(getter)]
    pub fn current_ptr(&self) -> u32 { self.current_ptr }
    #[wasm_bindgen(getter)]
    pub fn medium_ptr(&self) -> u32 { self.medium_ptr }
    #[wasm_bindgen(getter)]
    pub fn obstacle_ptr(&self) -> u32 { self.obstacle_ptr }
    #[wasm_bindgen(getter)]
    pub fn average_ptr(&self) -> u32 { self.average_ptr }
    #[wasm_bindgen(getter)]
    pub fn sponge_ptr(&self) -> u32 { self.sponge_ptr }

    #[wasm_bindgen(getter)]
    pub fn len_elements(&self) -> u32 { self.len_elements }
    #[wasm_bindgen(getter)]
    pub fn f32_len_bytes(&self) -> u32 { self.f32_len_bytes }
    #[wasm_bindgen(getter)]
    pub fn u8_len_bytes(&self) -> u32 { self.u8_len_bytes }
}

#[wasm_bindgen]
pub struct RippleTank {
    core: TankCore,
}

#[wasm_bindgen]
impl RippleTank {
    /// Tank with default settings; fails on zero dimensions.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Result<RippleTank, JsValue> {
        Ok(Self { core: TankCore::new(width, height).map_err(to_js)? })
    }

    #[wasm_bindgen(js_name = fromConfigJson)]
    pub fn from_config_json(json: &str) -> Result<RippleTank, JsValue> {
        Ok(Self { core: TankCore::from_config_json(json).map_err(to_js)? })
    }

    pub fn config_json(&self) -> String {
        self.core.config().to_json()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn time(&self) -> f64 { self.core.time() }

    #[wasm_bindgen(getter)]
    pub fn step_count(&self) -> u64 { self.core.step_count() }

    /// "idle" or "running"
    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String { self.core.phase().name().to_string() }

    // === Settings ===

    pub fn set_damping_loss(&mut self, loss: f32) {
        self.core.set_damping_loss(loss);
    }

    /// "absorb" or "reflect"
    pub fn set_boundary_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode = BoundaryMode::from_name(mode)
            .ok_or_else(|| to_js(TankError::Config(format!("unknown boundary mode '{}'", mode))))?;
        self.core.set_boundary_mode(mode);
        Ok(())
    }

    pub fn boundary_mode(&self) -> String {
        self.core.boundary_mode().name().to_string()
    }

    pub fn set_base_speed(&mut self, speed: f32) {
        self.core.set_base_speed(speed);
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.perf_stats()
    }

    // === Medium ===

    pub fn fill_medium(&mut self, speed: f32) {
        self.core.fill_medium(speed);
    }

    pub fn fill_medium_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, speed: f32) {
        self.core.fill_medium_rect(x0, y0, x1, y1, speed);
    }

    pub fn fill_medium_half_plane(&mut self, px: f32, py: f32, nx: f32, ny: f32, speed: f32) {
        self.core.fill_medium_half_plane(px, py, nx, ny, speed);
    }

    // === Obstacles ===

    pub fn add_obstacle_disk(&mut self, cx: f32, cy: f32, radius: f32) {
        self.core.add_obstacle_disk(cx, cy, radius);
    }

    pub fn add_obstacle_segment(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, thickness: f32) {
        self.core.add_obstacle_segment(x0, y0, x1, y1, thickness);
    }

    pub fn add_obstacle_parabola(
        &mut self,
        center_x: f32,
        vertex_y: f32,
        curvature: f32,
        min_x: i32,
        max_x: i32,
        thickness: f32,
    ) {
        self.core.add_obstacle_parabola(center_x, vertex_y, curvature, min_x, max_x, thickness);
    }

    pub fn add_obstacle_rounded_rect(&mut self, cx: f32, cy: f32, width: f32, height: f32, corner_radius: f32) {
        self.core.add_obstacle_rounded_rect(cx, cy, width, height, corner_radius);
    }

    pub fn clear_obstacles(&mut self) {
        self.core.clear_obstacles();
    }

    // === Sources ===

    /// Returns the source's index.
    #[allow(clippy::too_many_arguments)]
    pub fn add_point_source(
        &mut self,
        x: f32,
        y: f32,
        radius: f32,
        frequency: f32,
        amplitude: f32,
        phase: f32,
        relative_amplitude: f32,
    ) -> u32 {
        let emission = Emission { frequency, amplitude, phase, relative_amplitude };
        self.core.add_point_source(x, y, radius, emission) as u32
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_line_source(
        &mut self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        thickness: f32,
        frequency: f32,
        amplitude: f32,
        phase: f32,
        relative_amplitude: f32,
    ) -> u32 {
        let emission = Emission { frequency, amplitude, phase, relative_amplitude };
        self.core.add_line_source(x0, y0, x1, y1, thickness, emission) as u32
    }

    pub fn clear_sources(&mut self) {
        self.core.clear_sources();
    }

    pub fn source_count(&self) -> u32 {
        self.core.sources().len() as u32
    }

    pub fn set_source_frequency(&mut self, frequency: f32) {
        self.core.set_source_frequency(frequency);
    }

    pub fn set_source_amplitude(&mut self, amplitude: f32) {
        self.core.set_source_amplitude(amplitude);
    }

    // === Clears, scenarios, stepping ===

    pub fn clear_waves(&mut self) {
        self.core.clear_waves();
    }

    pub fn clear_environment(&mut self) {
        self.core.clear_environment();
    }

    pub fn impulse(&mut self, x: i32, y: i32, value: f32) -> bool {
        self.core.impulse(x, y, value)
    }

    /// Load a scenario by name. `params_json` overrides any subset of the
    /// scenario's default parameters.
    pub fn apply_scenario(&mut self, name: &str, params_json: Option<String>) -> Result<(), JsValue> {
        let scenario = Scenario::from_name(name).map_err(to_js)?;
        let defaults = scenario.defaults();
        let params = match params_json {
            Some(json) => defaults.merged_with_json(&json).map_err(to_js)?,
            None => defaults,
        };
        self.core.apply_scenario(scenario, &params);
        Ok(())
    }

    /// JSON of a scenario's default parameters.
    pub fn scenario_defaults_json(name: &str) -> Result<String, JsValue> {
        let scenario = Scenario::from_name(name).map_err(to_js)?;
        Ok(scenario.defaults().to_json())
    }

    pub fn step(&mut self, dt: f64) {
        self.core.step(dt);
    }

    /// Returns how many sub-steps ran.
    pub fn advance_frame(&mut self, speed_multiplier: f64, target_fps: f64) -> u32 {
        self.core.advance_frame(speed_multiplier, target_fps).substeps
    }

    // === Probes ===

    pub fn displacement_at(&self, x: i32, y: i32) -> Option<f32> {
        self.core.displacement_at(x, y)
    }

    pub fn speed_at(&self, x: i32, y: i32) -> Option<f32> {
        self.core.speed_at(x, y)
    }

    pub fn average_at(&self, x: i32, y: i32) -> Option<f32> {
        self.core.average_at(x, y)
    }

    pub fn is_obstacle_at(&self, x: i32, y: i32) -> Option<bool> {
        self.core.is_obstacle_at(x, y)
    }

    pub fn discrete_energy(&self) -> f64 {
        self.core.discrete_energy()
    }

    pub fn peak_abs(&self) -> f32 {
        self.core.peak_abs()
    }

    pub fn max_speed(&self) -> f32 {
        self.core.max_speed()
    }

    // === Buffers ===

    pub fn current_ptr(&self) -> *const f32 {
        self.core.current_ptr()
    }

    pub fn medium_ptr(&self) -> *const f32 {
        self.core.medium_ptr()
    }

    pub fn obstacle_ptr(&self) -> *const u8 {
        self.core.obstacle_ptr()
    }

    pub fn average_ptr(&self) -> *const f32 {
        self.core.average_ptr()
    }

    /// Rebuilds the sponge first if it is stale.
    pub fn sponge_ptr(&mut self) -> *const f32 {
        self.core.sponge_mask().as_ptr()
    }

    pub fn buffer_len(&self) -> usize {
        self.core.buffer_len()
    }

    /// The current buffer is swapped every step, so re-read this (or
    /// `current_ptr`) after stepping.
    pub fn abi_layout(&mut self) -> AbiLayout {
        let data = self.core.abi_layout_data();
        let len = data.len_elements as u32;
        AbiLayout {
            current_ptr: data.current_ptr as u32,
            medium_ptr: data.medium_ptr as u32,
            obstacle_ptr: data.obstacle_ptr as u32,
            average_ptr: data.average_ptr as u32,
            sponge_ptr: data.sponge_ptr as u32,
            len_elements: len,
            f32_len_bytes: (data.len_elements * std::mem::size_of::<f32>()) as u32,
            u8_len_bytes: len,
        }
    }
}
