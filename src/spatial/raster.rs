//! Cell rasterization for disks and thick segments.
//!
//! Obstacles mark the visited cells; sources collect them. Both go through
//! the same walkers so a line source covers exactly the cells a segment
//! obstacle with the same arguments would.

use std::collections::HashSet;

use super::Grid;

/// Smallest brush radius; guarantees at least the center cell is produced.
pub const MIN_BRUSH_RADIUS: f32 = 0.5;

/// Upper bound on segment samples so absurd inputs stay bounded.
const MAX_SEGMENT_SAMPLES: u32 = 1 << 20;

/// Visit every in-grid cell within `radius` (Euclidean, inclusive) of a
/// possibly fractional center. The radius is clamped to `MIN_BRUSH_RADIUS`.
pub fn for_each_disk_cell<F: FnMut(usize)>(grid: &Grid, cx: f32, cy: f32, radius: f32, mut visit: F) {
    let r = radius.max(MIN_BRUSH_RADIUS);
    let r2 = r * r;

    // Clip the bounding box to the grid before looping
    let min_x = ((cx - r).floor() as i64).max(0);
    let max_x = ((cx + r).ceil() as i64).min(grid.width() as i64 - 1);
    let min_y = ((cy - r).floor() as i64).max(0);
    let max_y = ((cy + r).ceil() as i64).min(grid.height() as i64 - 1);

    for y in min_y..=max_y {
        let dy = y as f32 - cy;
        for x in min_x..=max_x {
            let dx = x as f32 - cx;
            if dx * dx + dy * dy <= r2 {
                visit(grid.index(x as u32, y as u32));
            }
        }
    }
}

/// Visit the cells of a thick segment: the segment is sampled at least twice
/// per unit length and a disk brush of radius `max(0.5, thickness)` is
/// stamped at each sample. Cells may be visited more than once.
pub fn for_each_segment_cell<F: FnMut(usize)>(
    grid: &Grid,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    thickness: f32,
    mut visit: F,
) {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let length = dx.hypot(dy);
    if !length.is_finite() {
        return;
    }

    let samples = ((length * 2.0).ceil() as u32).clamp(1, MAX_SEGMENT_SAMPLES);
    // No brush needs to reach further than the grid diagonal
    let diagonal = (grid.width() as f32).hypot(grid.height() as f32);
    let brush = thickness.max(MIN_BRUSH_RADIUS).min(diagonal);
    let brush2 = brush * brush;
    let reach = brush.ceil() as i64;
    let max_x = grid.width() as i64 - 1;
    let max_y = grid.height() as i64 - 1;

    for s in 0..=samples {
        let t = s as f32 / samples as f32;
        let sx = x0 + dx * t;
        let sy = y0 + dy * t;

        // Offsets are whole cells, so stamping around the snapped center is
        // the same as snapping each offset sample point
        let cx = (sx + 0.5).floor() as i64;
        let cy = (sy + 0.5).floor() as i64;
        let min_xc = cx.saturating_sub(reach).max(0);
        let max_xc = cx.saturating_add(reach).min(max_x);
        let min_yc = cy.saturating_sub(reach).max(0);
        let max_yc = cy.saturating_add(reach).min(max_y);

        for y in min_yc..=max_yc {
            let oy = (y - cy) as f32;
            for x in min_xc..=max_xc {
                let ox = (x - cx) as f32;
                if ox * ox + oy * oy <= brush2 {
                    visit(grid.index(x as u32, y as u32));
                }
            }
        }
    }
}

pub fn collect_disk_cells(grid: &Grid, cx: f32, cy: f32, radius: f32) -> Vec<usize> {
    let mut out = Vec::new();
    for_each_disk_cell(grid, cx, cy, radius, |idx| out.push(idx));
    out
}

/// Segment cells, deduplicated, in first-visit order.
pub fn collect_segment_cells(
    grid: &Grid,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    thickness: f32,
) -> Vec<usize> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for_each_segment_cell(grid, x0, y0, x1, y1, thickness, |idx| {
        if seen.insert(idx) {
            out.push(idx);
        }
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(32, 24).unwrap()
    }

    #[test]
    fn tiny_disk_still_produces_its_center() {
        let g = grid();
        assert_eq!(collect_disk_cells(&g, 5.0, 5.0, 0.0), vec![g.index(5, 5)]);
        assert_eq!(collect_disk_cells(&g, 5.0, 5.0, -3.0), vec![g.index(5, 5)]);
    }

    #[test]
    fn unit_disk_is_a_plus_shape() {
        let g = grid();
        let mut cells = collect_disk_cells(&g, 10.0, 10.0, 1.0);
        cells.sort_unstable();
        let mut expected = vec![
            g.index(10, 9),
            g.index(9, 10),
            g.index(10, 10),
            g.index(11, 10),
            g.index(10, 11),
        ];
        expected.sort_unstable();
        assert_eq!(cells, expected);
    }

    #[test]
    fn disk_is_clipped_at_grid_edges() {
        let g = grid();
        let cells = collect_disk_cells(&g, 0.0, 0.0, 2.0);
        assert!(!cells.is_empty());
        for idx in cells {
            let (x, y) = g.coords(idx);
            assert!(x <= 2 && y <= 2);
        }
        assert!(collect_disk_cells(&g, -50.0, -50.0, 3.0).is_empty());
    }

    #[test]
    fn segment_has_no_gaps_and_no_duplicates() {
        let g = grid();
        let cells = collect_segment_cells(&g, 2.0, 3.0, 20.0, 15.0, 0.5);
        let unique: HashSet<_> = cells.iter().copied().collect();
        assert_eq!(unique.len(), cells.len());

        // Every column between the endpoints is touched
        for x in 2..=20 {
            assert!(cells.iter().any(|&i| g.coords(i).0 == x), "column {} missing", x);
        }
    }

    #[test]
    fn zero_length_segment_stamps_one_brush() {
        let g = grid();
        let cells = collect_segment_cells(&g, 7.0, 7.0, 7.0, 7.0, 0.0);
        assert_eq!(cells, vec![g.index(7, 7)]);
    }

    #[test]
    fn non_finite_segment_is_ignored() {
        let g = grid();
        assert!(collect_segment_cells(&g, 0.0, 0.0, f32::INFINITY, 3.0, 1.0).is_empty());
    }

    #[test]
    fn huge_brush_covers_the_grid_once() {
        let g = grid();
        for thickness in [5.0e4, f32::INFINITY] {
            let cells = collect_segment_cells(&g, 10.0, 10.0, 10.0, 10.0, thickness);
            assert_eq!(cells.len(), g.size());
        }
    }

    #[test]
    fn far_off_grid_segment_visits_nothing() {
        let g = grid();
        let cells = collect_segment_cells(&g, 1.0e9, 1.0e9, 1.0e9, 1.0e9 + 4.0, 5.0e4);
        assert!(cells.is_empty());
    }
}
