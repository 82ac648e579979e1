//! Sponge mask - edge absorption with source protection
//!
//! Cells within `margin` of the grid edge get a cubic falloff toward 0.02;
//! cells near a source's geometry are lifted back toward 1 so emitters close
//! to the band still radiate. The mask is O(sources × cells) to build, so it
//! is cached and only rebuilt after the source list changes.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::domain::SourceRegistry;
use crate::spatial::Grid;

/// Multiplier at the outermost cell of the band.
pub const EDGE_FLOOR: f32 = 0.02;
/// Ceiling of the protection lift; also the value at distance 0 from a source.
pub const PROTECTION_PEAK: f32 = 0.999;
/// How much the lift drops between a source and the protection radius.
pub const PROTECTION_DROP: f32 = 0.03;

/// Edge-band multiplier for a cell `edge_distance` cells from the rim.
#[inline]
pub fn edge_falloff(edge_distance: u32, margin: u32) -> f32 {
    if margin == 0 || edge_distance >= margin {
        return 1.0;
    }
    let t = (edge_distance as f32 / margin as f32).clamp(0.0, 1.0);
    EDGE_FLOOR + (1.0 - EDGE_FLOOR) * t * t * t
}

pub struct SpongeMask {
    grid: Grid,
    margin: u32,
    protection_radius: f32,
    values: Vec<f32>,
    stale: bool,
    rebuilds: u32,
}

impl SpongeMask {
    /// Fresh mask, all ones and marked stale so the first step builds it.
    pub fn new(grid: Grid, margin: u32, protection_radius: f32) -> Self {
        Self {
            grid,
            margin,
            protection_radius,
            values: vec![1.0; grid.size()],
            stale: true,
            rebuilds: 0,
        }
    }

    pub fn mark_stale(&mut self) {
        self.stale = true;
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Rebuild only if something invalidated the cached mask.
    /// Returns whether a rebuild happened.
    pub fn refresh(&mut self, sources: &SourceRegistry) -> bool {
        if !self.stale {
            return false;
        }
        self.rebuild(sources);
        true
    }

    pub fn rebuild(&mut self, sources: &SourceRegistry) {
        let width = self.grid.width() as usize;
        let grid = self.grid;
        let margin = self.margin;
        let radius = self.protection_radius;

        #[cfg(feature = "parallel")]
        {
            self.values
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| fill_row(&grid, margin, radius, sources, y as u32, row));
        }

        #[cfg(not(feature = "parallel"))]
        {
            for (y, row) in self.values.chunks_mut(width).enumerate() {
                fill_row(&grid, margin, radius, sources, y as u32, row);
            }
        }

        self.stale = false;
        self.rebuilds = self.rebuilds.wrapping_add(1);
        log::debug!(
            "sponge rebuilt ({} sources, margin {}, protection {})",
            sources.len(),
            margin,
            radius
        );
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn value_at(&self, idx: usize) -> f32 {
        self.values[idx]
    }

    pub fn rebuild_count(&self) -> u32 {
        self.rebuilds
    }

    pub fn margin(&self) -> u32 {
        self.margin
    }

    pub fn protection_radius(&self) -> f32 {
        self.protection_radius
    }
}

fn fill_row(grid: &Grid, margin: u32, radius: f32, sources: &SourceRegistry, y: u32, row: &mut [f32]) {
    for (x, cell) in row.iter_mut().enumerate() {
        let x = x as u32;
        let mut mask = edge_falloff(grid.edge_distance(x, y), margin);

        // The lift can never exceed the peak, so fully open cells skip the search
        if radius > 0.0 && mask < PROTECTION_PEAK {
            if let Some(d) = sources.nearest_distance(x as f32, y as f32) {
                if d <= radius {
                    let u = d / radius;
                    mask = mask.max(PROTECTION_PEAK - PROTECTION_DROP * u);
                }
            }
        }
        *cell = mask;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Emission;

    fn grid() -> Grid {
        Grid::new(120, 100).unwrap()
    }

    #[test]
    fn falloff_shape() {
        assert_eq!(edge_falloff(0, 44), EDGE_FLOOR);
        assert_eq!(edge_falloff(44, 44), 1.0);
        assert_eq!(edge_falloff(80, 44), 1.0);
        let mid = edge_falloff(22, 44);
        assert!((mid - (0.02 + 0.98 * 0.125)).abs() < 1e-6);
    }

    #[test]
    fn monotone_toward_interior_without_sources() {
        let g = grid();
        let mut sponge = SpongeMask::new(g, 44, 34.0);
        sponge.rebuild(&SourceRegistry::new(g));

        let y = 50;
        let mut last = 0.0;
        for x in 0..60 {
            let v = sponge.value_at(g.index(x, y));
            assert!(v >= last, "mask fell at x={}", x);
            assert!(v > 0.0 && v <= 1.0);
            if g.edge_distance(x, y) >= 44 {
                assert_eq!(v, 1.0);
            }
            last = v;
        }
    }

    #[test]
    fn sources_lift_the_band() {
        let g = grid();
        let mut sources = SourceRegistry::new(g);
        sources.add_point(6.0, 50.0, 1.0, Emission::default());

        let mut sponge = SpongeMask::new(g, 44, 34.0);
        sponge.rebuild(&sources);

        let at_source = sponge.value_at(g.index(6, 50));
        assert!((at_source - PROTECTION_PEAK).abs() < 1e-6);

        // 20 cells away along the band
        let near = sponge.value_at(g.index(6, 70));
        let expected = PROTECTION_PEAK - PROTECTION_DROP * (20.0 / 34.0);
        assert!((near - expected).abs() < 1e-5);

        // Outside the protection radius only the band applies
        let far = sponge.value_at(g.index(6, 95));
        assert_eq!(far, edge_falloff(4, 44));
    }

    #[test]
    fn monotone_along_rays_clear_of_sources() {
        let g = Grid::new(240, 160).unwrap();
        let mut sources = SourceRegistry::new(g);
        sources.add_point(6.0, 80.0, 1.0, Emission::default());
        let mut sponge = SpongeMask::new(g, 44, 34.0);
        sponge.rebuild(&sources);

        // Rows far from the source, read inward from each side
        for y in [20u32, 140] {
            let left: Vec<u32> = (0..120).collect();
            let right: Vec<u32> = (120..240).rev().collect();
            for ray in [left, right] {
                let mut last = 0.0;
                for x in ray {
                    let d = sources.nearest_distance(x as f32, y as f32).unwrap();
                    assert!(d > sponge.protection_radius());
                    let v = sponge.value_at(g.index(x, y));
                    assert!(v >= last, "mask fell at ({}, {})", x, y);
                    if g.edge_distance(x, y) >= 44 {
                        assert_eq!(v, 1.0);
                    }
                    last = v;
                }
            }
        }

        // Row 80 read from the right edge stays clear until the interior
        let mut last = 0.0;
        for x in (120..240).rev() {
            let v = sponge.value_at(g.index(x, 80));
            assert!(v >= last);
            last = v;
        }
        assert_eq!(last, 1.0);
    }

    #[test]
    fn lift_near_a_band_source_outranks_edge_ordering() {
        let g = Grid::new(240, 160).unwrap();
        let mut sources = SourceRegistry::new(g);
        sources.add_point(6.0, 80.0, 1.0, Emission::default());
        let mut sponge = SpongeMask::new(g, 44, 34.0);
        sponge.rebuild(&sources);

        let at_source = sponge.value_at(g.index(6, 80));
        let inward = sponge.value_at(g.index(7, 80));
        assert!(inward < at_source);
    }

    #[test]
    fn refresh_only_when_stale() {
        let g = grid();
        let sources = SourceRegistry::new(g);
        let mut sponge = SpongeMask::new(g, 44, 34.0);
        assert!(sponge.is_stale());
        assert!(sponge.refresh(&sources));
        assert!(!sponge.refresh(&sources));
        assert_eq!(sponge.rebuild_count(), 1);
        sponge.mark_stale();
        assert!(sponge.refresh(&sources));
        assert_eq!(sponge.rebuild_count(), 2);
    }
}
