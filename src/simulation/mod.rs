//! Tank - the field stepper and everything it owns
//!
//! `TankCore` holds the three field generations, the running average, the
//! medium, the obstacle mask, the source registry and the cached sponge. All
//! mutation goes through it; callers read buffers back by slice or, from
//! JavaScript, by pointer (see `RippleTank`).
//!
//! Methods here are thin; the work lives in the submodules:
//! - init/      - construction and runtime settings
//! - commands/  - geometry, sources and clears
//! - step/      - one leapfrog step and per-frame sub-stepping
//! - probe/     - point reads and whole-field metrics
//! - perf/      - optional step timing

use crate::core::Result;
use crate::domain::{BoundaryMode, Emission, MediumField, ObstacleMask, SourceRegistry, TankConfig};
use crate::scenarios::{Scenario, ScenarioParams};
use crate::spatial::Grid;
use crate::systems::SpongeMask;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "commands/commands.rs"]
mod commands;
#[path = "step/step.rs"]
mod step;
#[path = "probe/probe.rs"]
mod probe;
mod facade;

pub use facade::{AbiLayout, RippleTank};
pub use perf_stats::PerfStats;

use perf_timer::PerfTimer;

/// Whether the tank has advanced since the last wave clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TankPhase {
    /// Buffers zeroed, time 0.
    Idle,
    Running,
}

impl TankPhase {
    pub fn name(&self) -> &'static str {
        match self {
            TankPhase::Idle => "idle",
            TankPhase::Running => "running",
        }
    }
}

/// Sub-step plan for one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSchedule {
    pub substeps: u32,
    /// Time increment per sub-step.
    pub dt: f64,
}

impl FrameSchedule {
    /// `substeps = max(1, round(2·speed))`, `dt = (1/fps)·(speed/substeps)`.
    /// A non-positive speed or frame rate plans no steps.
    pub fn plan(speed_multiplier: f64, target_fps: f64) -> Self {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(speed_multiplier) || !usable(target_fps) {
            return Self { substeps: 0, dt: 0.0 };
        }
        let substeps = ((speed_multiplier * 2.0).round() as u32).max(1);
        let dt = (1.0 / target_fps) * (speed_multiplier / substeps as f64);
        Self { substeps, dt }
    }
}

pub(crate) struct AbiLayoutData {
    pub(crate) current_ptr: *const f32,
    pub(crate) medium_ptr: *const f32,
    pub(crate) obstacle_ptr: *const u8,
    pub(crate) average_ptr: *const f32,
    pub(crate) sponge_ptr: *const f32,
    pub(crate) len_elements: usize,
}

pub struct TankCore {
    grid: Grid,
    config: TankConfig,

    // Field generations, rotated every step
    previous: Vec<f32>,
    current: Vec<f32>,
    next: Vec<f32>,
    average: Vec<f32>,

    medium: MediumField,
    obstacles: ObstacleMask,
    sources: SourceRegistry,
    sponge: SpongeMask,

    time: f64,
    steps: u64,

    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl TankCore {
    /// Tank with default settings and the given dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        init::create_tank_core(TankConfig::with_size(width, height))
    }

    pub fn from_config(config: TankConfig) -> Result<Self> {
        init::create_tank_core(config)
    }

    pub fn from_config_json(json: &str) -> Result<Self> {
        init::create_tank_core(TankConfig::from_json(json)?)
    }

    pub fn grid(&self) -> &Grid { &self.grid }

    pub fn width(&self) -> u32 { self.grid.width() }

    pub fn height(&self) -> u32 { self.grid.height() }

    pub fn config(&self) -> &TankConfig { &self.config }

    /// Simulation time in seconds.
    pub fn time(&self) -> f64 { self.time }

    /// Steps taken since the last wave clear.
    pub fn step_count(&self) -> u64 { self.steps }

    pub fn phase(&self) -> TankPhase {
        if self.steps == 0 { TankPhase::Idle } else { TankPhase::Running }
    }

    // === Settings ===

    pub fn damping_loss(&self) -> f32 { self.config.damping_loss }

    pub fn set_damping_loss(&mut self, loss: f32) {
        settings::set_damping_loss(self, loss);
    }

    pub fn boundary_mode(&self) -> BoundaryMode { self.config.boundary_mode }

    pub fn set_boundary_mode(&mut self, mode: BoundaryMode) {
        settings::set_boundary_mode(self, mode);
    }

    pub fn base_speed(&self) -> f32 { self.config.base_speed }

    pub fn set_base_speed(&mut self, speed: f32) {
        settings::set_base_speed(self, speed);
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last step's perf snapshot (zeros when perf disabled)
    pub fn perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === Medium ===

    pub fn fill_medium(&mut self, speed: f32) {
        self.medium.fill(speed);
    }

    pub fn fill_medium_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, speed: f32) {
        self.medium.fill_rect(x0, y0, x1, y1, speed);
    }

    pub fn fill_medium_half_plane(&mut self, px: f32, py: f32, nx: f32, ny: f32, speed: f32) {
        self.medium.fill_half_plane(px, py, nx, ny, speed);
    }

    pub fn medium(&self) -> &MediumField { &self.medium }

    // === Obstacles ===

    pub fn add_obstacle_disk(&mut self, cx: f32, cy: f32, radius: f32) {
        self.obstacles.disk(cx, cy, radius);
    }

    pub fn add_obstacle_segment(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, thickness: f32) {
        self.obstacles.segment(x0, y0, x1, y1, thickness);
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
        self.obstacles.parabola(center_x, vertex_y, curvature, min_x, max_x, thickness);
    }

    pub fn add_obstacle_rounded_rect(&mut self, cx: f32, cy: f32, width: f32, height: f32, corner_radius: f32) {
        self.obstacles.rounded_rect(cx, cy, width, height, corner_radius);
    }

    pub fn clear_obstacles(&mut self) {
        self.obstacles.clear();
    }

    pub fn obstacles(&self) -> &ObstacleMask { &self.obstacles }

    // === Sources ===

    pub fn add_point_source(&mut self, x: f32, y: f32, radius: f32, emission: Emission) -> usize {
        commands::add_point_source(self, x, y, radius, emission)
    }

    pub fn add_line_source(
        &mut self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        thickness: f32,
        emission: Emission,
    ) -> usize {
        commands::add_line_source(self, x0, y0, x1, y1, thickness, emission)
    }

    pub fn clear_sources(&mut self) {
        commands::clear_sources(self);
    }

    pub fn set_source_frequency(&mut self, frequency: f32) {
        self.sources.set_frequency(frequency);
    }

    pub fn set_source_amplitude(&mut self, amplitude: f32) {
        self.sources.set_amplitude(amplitude);
    }

    pub fn sources(&self) -> &SourceRegistry { &self.sources }

    // === Clears ===

    /// Zero every field buffer and rewind time. Geometry is kept.
    pub fn clear_waves(&mut self) {
        commands::clear_waves(self);
    }

    /// Drop obstacles and sources and reset the medium to the base speed.
    /// Waves are kept.
    pub fn clear_environment(&mut self) {
        commands::clear_environment(self);
    }

    /// Add `value` to one interior, non-obstacle cell of the current field.
    /// Returns false (and does nothing) anywhere else.
    pub fn impulse(&mut self, x: i32, y: i32, value: f32) -> bool {
        commands::impulse(self, x, y, value)
    }

    pub fn apply_scenario(&mut self, scenario: Scenario, params: &ScenarioParams) {
        crate::scenarios::apply(self, scenario, params);
    }

    // === Stepping ===

    /// Advance one discrete step of length `dt` seconds.
    ///
    /// Stability needs roughly `max(c)·dt_grid ≤ 1/√2`; with `medium = c²`
    /// per step this means `medium ≤ 0.5`. Violations are not detected.
    pub fn step(&mut self, dt: f64) {
        step::step(self, dt);
    }

    /// Run one rendered frame's worth of sub-steps.
    pub fn advance_frame(&mut self, speed_multiplier: f64, target_fps: f64) -> FrameSchedule {
        step::advance_frame(self, speed_multiplier, target_fps)
    }

    /// Rebuild the sponge now if a source change invalidated it.
    pub fn refresh_sponge(&mut self) -> bool {
        self.sponge.refresh(&self.sources)
    }

    /// Up-to-date sponge multipliers.
    pub fn sponge_mask(&mut self) -> &[f32] {
        self.refresh_sponge();
        self.sponge.values()
    }

    pub fn sponge_rebuild_count(&self) -> u32 {
        self.sponge.rebuild_count()
    }

    // === Buffers ===

    pub fn current(&self) -> &[f32] { &self.current }

    pub fn previous(&self) -> &[f32] { &self.previous }

    /// Running rectified average of the field.
    pub fn average(&self) -> &[f32] { &self.average }

    // === Probes ===

    pub fn displacement_at(&self, x: i32, y: i32) -> Option<f32> {
        probe::displacement_at(self, x, y)
    }

    pub fn speed_at(&self, x: i32, y: i32) -> Option<f32> {
        probe::speed_at(self, x, y)
    }

    pub fn average_at(&self, x: i32, y: i32) -> Option<f32> {
        probe::average_at(self, x, y)
    }

    pub fn is_obstacle_at(&self, x: i32, y: i32) -> Option<bool> {
        probe::is_obstacle_at(self, x, y)
    }

    /// Leapfrog energy of the last two generations. Constant in reflect mode
    /// with zero damping and no sources.
    pub fn discrete_energy(&self) -> f64 {
        probe::discrete_energy(self)
    }

    pub fn peak_abs(&self) -> f32 {
        probe::peak_abs(self)
    }

    /// Fastest wave speed in the medium; keep it at or below `1/√2`.
    pub fn max_speed(&self) -> f32 {
        self.medium.max_speed_squared().sqrt()
    }

    // === Raw views for the JS side ===

    pub fn current_ptr(&self) -> *const f32 { self.current.as_ptr() }

    pub fn medium_ptr(&self) -> *const f32 { self.medium.values().as_ptr() }

    pub fn obstacle_ptr(&self) -> *const u8 { self.obstacles.as_bytes().as_ptr() }

    pub fn average_ptr(&self) -> *const f32 { self.average.as_ptr() }

    /// Buffer length in elements; every per-cell buffer has this length.
    pub fn buffer_len(&self) -> usize { self.grid.size() }

    pub(crate) fn abi_layout_data(&mut self) -> AbiLayoutData {
        let sponge_ptr = self.sponge_mask().as_ptr();
        AbiLayoutData {
            current_ptr: self.current_ptr(),
            medium_ptr: self.medium_ptr(),
            obstacle_ptr: self.obstacle_ptr(),
            average_ptr: self.average_ptr(),
            sponge_ptr,
            len_elements: self.buffer_len(),
        }
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
