//! Obstacle mask - rigid reflectors.
//!
//! One byte per cell (1 = obstacle) so the buffer can be handed to
//! JavaScript as a `Uint8Array` without conversion. All drawing operations
//! are additive; only `clear` removes obstacles.

use crate::core::math::snap;
use crate::spatial::raster::{for_each_disk_cell, for_each_segment_cell, MIN_BRUSH_RADIUS};
use crate::spatial::Grid;

pub struct ObstacleMask {
    grid: Grid,
    cells: Vec<u8>,
}

impl ObstacleMask {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            cells: vec![0; grid.size()],
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Filled disk, radius clamped to at least 0.5.
    pub fn disk(&mut self, cx: f32, cy: f32, radius: f32) {
        let cells = &mut self.cells;
        for_each_disk_cell(&self.grid, cx, cy, radius, |idx| cells[idx] = 1);
    }

    /// Thick segment; gap-free for any length.
    pub fn segment(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, thickness: f32) {
        let cells = &mut self.cells;
        for_each_segment_cell(&self.grid, x0, y0, x1, y1, thickness, |idx| cells[idx] = 1);
    }

    /// Parabolic mirror `y = vertex_y - curvature·(x - center_x)²`, sampled at
    /// each integer x in `[min_x, max_x]`. Positive curvature opens downward
    /// from the vertex, toward smaller y.
    pub fn parabola(
        &mut self,
        center_x: f32,
        vertex_y: f32,
        curvature: f32,
        min_x: i32,
        max_x: i32,
        thickness: f32,
    ) {
        let (lo, hi) = if min_x <= max_x { (min_x, max_x) } else { (max_x, min_x) };
        // Samples only stamp when their center is on the grid
        let lo = lo.max(0);
        let hi = hi.min(self.grid.width() as i32 - 1);
        for x in lo..=hi {
            let dx = x as f32 - center_x;
            let y = snap(vertex_y - curvature * dx * dx);
            if self.grid.is_inside(x, y) {
                self.disk(x as f32, y as f32, thickness);
            }
        }
    }

    /// Axis-aligned rectangle with filleted corners. A cell is filled when it
    /// lies in the core cross (within the half extent minus the corner radius
    /// along either axis) or within `corner_radius` of the nearest fillet
    /// center. Half extents are clamped to at least 0.5.
    pub fn rounded_rect(&mut self, cx: f32, cy: f32, width: f32, height: f32, corner_radius: f32) {
        let half_w = (width * 0.5).max(MIN_BRUSH_RADIUS);
        let half_h = (height * 0.5).max(MIN_BRUSH_RADIUS);
        let r = corner_radius.clamp(0.0, half_w.min(half_h));
        let inner_w = half_w - r;
        let inner_h = half_h - r;
        let r2 = r * r;

        let min_x = ((cx - half_w).floor() as i64).max(0);
        let max_x = ((cx + half_w).ceil() as i64).min(self.grid.width() as i64 - 1);
        let min_y = ((cy - half_h).floor() as i64).max(0);
        let max_y = ((cy + half_h).ceil() as i64).min(self.grid.height() as i64 - 1);

        for y in min_y..=max_y {
            let dy = (y as f32 - cy).abs();
            if dy > half_h {
                continue;
            }
            for x in min_x..=max_x {
                let dx = (x as f32 - cx).abs();
                if dx > half_w {
                    continue;
                }
                let in_cross = dx <= inner_w || dy <= inner_h;
                let fx = dx - inner_w;
                let fy = dy - inner_h;
                if in_cross || fx * fx + fy * fy <= r2 {
                    let idx = self.grid.index(x as u32, y as u32);
                    self.cells[idx] = 1;
                }
            }
        }
    }

    #[inline]
    pub fn is_obstacle(&self, idx: usize) -> bool {
        self.cells[idx] != 0
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }
}
