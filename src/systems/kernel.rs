//! Finite-difference wave kernel
//!
//! Explicit leapfrog on a unit grid:
//! `next = (2·cur − prev + c²·∇²cur) · damping · scale`
//! with a 4-neighbour Laplacian. The interior pass only reads `current` and
//! `previous` and only writes `next`, so rows are independent and can be
//! split across rayon workers.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::spatial::Grid;

/// Grids with fewer cells than this stay on the calling thread even with the
/// `parallel` feature; fork/join costs more than the pass itself.
pub const PARALLEL_MIN_CELLS: usize = 128 * 128;

/// Read-only inputs to one interior pass.
#[derive(Clone, Copy)]
pub struct FieldView<'a> {
    pub grid: Grid,
    pub current: &'a [f32],
    pub previous: &'a [f32],
    pub medium: &'a [f32],
    pub obstacles: &'a [u8],
    /// Sponge multiplier per cell; `None` in reflect mode.
    pub scale: Option<&'a [f32]>,
    /// Per-step retention, already clamped to [0, 1].
    pub damping: f32,
}

impl<'a> FieldView<'a> {
    /// Write interior row `y` of `next`. Obstacle cells get 0; the rim
    /// columns are left for `clamp_rim`.
    #[inline]
    fn update_row(&self, y: usize, row: &mut [f32]) {
        let w = self.grid.width() as usize;
        let row_start = y * w;
        let cur = self.current;
        let prev = self.previous;

        for x in 1..w - 1 {
            let i = row_start + x;
            if *fast!(self.obstacles, [i]) != 0 {
                fast!(row, [x] = 0.0);
                continue;
            }
            let c = *fast!(cur, [i]);
            let lap = *fast!(cur, [i - 1]) + *fast!(cur, [i + 1]) + *fast!(cur, [i - w])
                + *fast!(cur, [i + w])
                - 4.0 * c;
            let scale = match self.scale {
                Some(mask) => *fast!(mask, [i]),
                None => 1.0,
            };
            let value = (2.0 * c - *fast!(prev, [i]) + *fast!(self.medium, [i]) * lap) * self.damping * scale;
            fast!(row, [x] = value);
        }
    }

    fn check_lengths(&self, next: &[f32]) {
        let size = self.grid.size();
        debug_assert_eq!(self.current.len(), size);
        debug_assert_eq!(self.previous.len(), size);
        debug_assert_eq!(self.medium.len(), size);
        debug_assert_eq!(self.obstacles.len(), size);
        debug_assert!(self.scale.map_or(true, |s| s.len() == size));
        debug_assert_eq!(next.len(), size);
    }
}

/// Run the interior update, picking the parallel path for large grids.
pub fn advance_interior(view: &FieldView<'_>, next: &mut [f32]) {
    #[cfg(feature = "parallel")]
    {
        if view.grid.size() >= PARALLEL_MIN_CELLS {
            advance_interior_parallel(view, next);
            return;
        }
    }
    advance_interior_sequential(view, next);
}

pub fn advance_interior_sequential(view: &FieldView<'_>, next: &mut [f32]) {
    view.check_lengths(next);
    let w = view.grid.width() as usize;
    let h = view.grid.height() as usize;
    if w < 3 || h < 3 {
        return;
    }
    for y in 1..h - 1 {
        view.update_row(y, &mut next[y * w..(y + 1) * w]);
    }
}

/// Row-parallel interior update. Returns only after every row is written,
/// so the caller may rotate buffers immediately.
#[cfg(feature = "parallel")]
pub fn advance_interior_parallel(view: &FieldView<'_>, next: &mut [f32]) {
    view.check_lengths(next);
    let w = view.grid.width() as usize;
    let h = view.grid.height() as usize;
    if w < 3 || h < 3 {
        return;
    }
    next[w..(h - 1) * w]
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(offset, row)| view.update_row(offset + 1, row));
}

/// Zero the outermost ring.
pub fn clamp_rim(grid: &Grid, buffer: &mut [f32]) {
    let w = grid.width() as usize;
    let h = grid.height() as usize;
    buffer[..w].fill(0.0);
    buffer[(h - 1) * w..].fill(0.0);
    for y in 1..h.saturating_sub(1) {
        buffer[y * w] = 0.0;
        buffer[y * w + w - 1] = 0.0;
    }
}

/// Pin obstacle cells to zero in both live generations and fold `|current|`
/// into the running average everywhere else.
pub fn settle_obstacles_and_average(
    obstacles: &[u8],
    current: &mut [f32],
    previous: &mut [f32],
    average: &mut [f32],
    blend: f32,
) {
    let keep = 1.0 - blend;
    for (i, &blocked) in obstacles.iter().enumerate() {
        if blocked != 0 {
            current[i] = 0.0;
            previous[i] = 0.0;
            average[i] = 0.0;
        } else {
            average[i] = average[i] * keep + current[i].abs() * blend;
        }
    }
}
