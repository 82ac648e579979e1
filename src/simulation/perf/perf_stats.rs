use wasm_bindgen::prelude::*;

/// Timings and counters for the last step (or frame, for `substeps`).
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) sponge_ms: f64,
    pub(super) kernel_ms: f64,
    pub(super) inject_ms: f64,
    pub(super) settle_ms: f64,
    pub(super) sponge_rebuilt: bool,
    pub(super) sponge_rebuilds: u32,
    pub(super) source_count: u32,
    pub(super) source_cells: u32,
    pub(super) obstacle_cells: u32,
    pub(super) grid_size: u32,
    pub(super) memory_bytes: u32,
    pub(super) substeps: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn sponge_ms(&self) -> f64 { self.sponge_ms }
    #[wasm_bindgen(getter)]
    pub fn kernel_ms(&self) -> f64 { self.kernel_ms }
    #[wasm_bindgen(getter)]
    pub fn inject_ms(&self) -> f64 { self.inject_ms }
    #[wasm_bindgen(getter)]
    pub fn settle_ms(&self) -> f64 { self.settle_ms }

    /// True when this step had to rebuild the sponge mask.
    #[wasm_bindgen(getter)]
    pub fn sponge_rebuilt(&self) -> bool { self.sponge_rebuilt }
    #[wasm_bindgen(getter)]
    pub fn sponge_rebuilds(&self) -> u32 { self.sponge_rebuilds }

    #[wasm_bindgen(getter)]
    pub fn source_count(&self) -> u32 { self.source_count }
    #[wasm_bindgen(getter)]
    pub fn source_cells(&self) -> u32 { self.source_cells }
    #[wasm_bindgen(getter)]
    pub fn obstacle_cells(&self) -> u32 { self.obstacle_cells }
    #[wasm_bindgen(getter)]
    pub fn grid_size(&self) -> u32 { self.grid_size }
    #[wasm_bindgen(getter)]
    pub fn memory_bytes(&self) -> u32 { self.memory_bytes }
    #[wasm_bindgen(getter)]
    pub fn substeps(&self) -> u32 { self.substeps }
}
