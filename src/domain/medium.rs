//! Medium field - per-cell wave speed squared.
//!
//! The stepper multiplies the Laplacian by this value directly, so storing
//! c² avoids a square per cell per step. Speed is recovered with `sqrt` for
//! display and metrics only.

use crate::spatial::Grid;

pub struct MediumField {
    grid: Grid,
    values: Vec<f32>,
}

/// c² for a speed, with non-finite input mapped to 0 so the buffer never
/// holds a negative or NaN coefficient.
#[inline]
fn speed_squared(speed: f32) -> f32 {
    let c2 = speed * speed;
    if c2.is_finite() { c2 } else { 0.0 }
}

impl MediumField {
    pub fn new(grid: Grid, speed: f32) -> Self {
        Self {
            grid,
            values: vec![speed_squared(speed); grid.size()],
        }
    }

    /// Uniform medium.
    pub fn fill(&mut self, speed: f32) {
        self.values.fill(speed_squared(speed));
    }

    /// Inclusive rectangle. Corners may come in any order; both are clamped
    /// onto the grid, so an off-grid rectangle collapses onto the nearest
    /// edge row/column.
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, speed: f32) {
        let c2 = speed_squared(speed);
        let max_x = self.grid.width() as i32 - 1;
        let max_y = self.grid.height() as i32 - 1;
        let min_xc = x0.min(x1).clamp(0, max_x) as usize;
        let max_xc = x0.max(x1).clamp(0, max_x) as usize;
        let min_yc = y0.min(y1).clamp(0, max_y) as usize;
        let max_yc = y0.max(y1).clamp(0, max_y) as usize;

        let width = self.grid.width() as usize;
        for y in min_yc..=max_yc {
            let row = y * width;
            self.values[row + min_xc..=row + max_xc].fill(c2);
        }
    }

    /// Every cell with `(x - px)·nx + (y - py)·ny >= 0` takes the new speed.
    /// Cells are assigned whole; there is no blending along the boundary.
    pub fn fill_half_plane(&mut self, px: f32, py: f32, nx: f32, ny: f32, speed: f32) {
        let c2 = speed_squared(speed);
        let width = self.grid.width() as usize;
        for (y, row) in self.values.chunks_mut(width).enumerate() {
            let oy = (y as f32 - py) * ny;
            for (x, cell) in row.iter_mut().enumerate() {
                if (x as f32 - px) * nx + oy >= 0.0 {
                    *cell = c2;
                }
            }
        }
    }

    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    pub fn speed_at(&self, idx: usize) -> f32 {
        self.values[idx].sqrt()
    }

    /// Largest c² anywhere.
    pub fn max_speed_squared(&self) -> f32 {
        self.values.iter().copied().fold(0.0, f32::max)
    }
}
