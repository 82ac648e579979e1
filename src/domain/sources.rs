//! Source registry - coherent sinusoidal emitters.
//!
//! A source owns the set of cells it drives. Each step it adds
//! `amplitude · sin(2π·f·t + phase) · cell_scale` to every one of them;
//! overlapping sources superpose additively.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::core::math::{distance_to_segment, snap};
use crate::spatial::raster::{collect_disk_cells, collect_segment_cells};
use crate::spatial::Grid;

/// Geometry a source was built from. Kept so the sponge can measure
/// distance to the emitter rather than to its rasterized cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SourceShape {
    Point { x: f32, y: f32 },
    Line { x0: f32, y0: f32, x1: f32, y1: f32 },
}

impl SourceShape {
    /// Distance from a cell center to the emitter geometry.
    pub fn distance_to(&self, px: f32, py: f32) -> f32 {
        match *self {
            SourceShape::Point { x, y } => (px - x).hypot(py - y),
            SourceShape::Line { x0, y0, x1, y1 } => distance_to_segment(px, py, x0, y0, x1, y1),
        }
    }
}

/// Temporal parameters supplied when a source is registered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Emission {
    pub frequency: f32,
    pub amplitude: f32,
    pub phase: f32,
    /// Weight applied by the registry-wide amplitude control.
    pub relative_amplitude: f32,
}

impl Default for Emission {
    fn default() -> Self {
        Self {
            frequency: 3.0,
            amplitude: 1.0,
            phase: 0.0,
            relative_amplitude: 1.0,
        }
    }
}

impl Emission {
    pub fn new(frequency: f32, amplitude: f32) -> Self {
        Self { frequency, amplitude, ..Self::default() }
    }

    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_relative_amplitude(mut self, relative_amplitude: f32) -> Self {
        self.relative_amplitude = relative_amplitude;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Source {
    shape: SourceShape,
    cells: Vec<usize>,
    frequency: f32,
    amplitude: f32,
    phase: f32,
    relative_amplitude: f32,
    cell_scale: f32,
}

impl Source {
    pub fn shape(&self) -> &SourceShape { &self.shape }
    pub fn cells(&self) -> &[usize] { &self.cells }
    pub fn frequency(&self) -> f32 { self.frequency }
    pub fn amplitude(&self) -> f32 { self.amplitude }
    pub fn phase(&self) -> f32 { self.phase }
    pub fn relative_amplitude(&self) -> f32 { self.relative_amplitude }
    pub fn cell_scale(&self) -> f32 { self.cell_scale }

    /// Displacement added to each owned cell at simulation time `t`.
    #[inline]
    pub fn sample(&self, t: f64) -> f32 {
        let angle = TAU * self.frequency as f64 * t + self.phase as f64;
        (self.amplitude as f64 * angle.sin() * self.cell_scale as f64) as f32
    }
}

pub struct SourceRegistry {
    grid: Grid,
    sources: Vec<Source>,
}

impl SourceRegistry {
    pub fn new(grid: Grid) -> Self {
        Self { grid, sources: Vec::new() }
    }

    /// Point emitter: the disk of `radius` around the snapped center.
    /// Returns the new source's position in the registry.
    pub fn add_point(&mut self, x: f32, y: f32, radius: f32, emission: Emission) -> usize {
        let cells = collect_disk_cells(&self.grid, snap(x) as f32, snap(y) as f32, radius);
        self.push(SourceShape::Point { x, y }, cells, 1.0, emission)
    }

    /// Line emitter rasterized like a segment obstacle. Injection is scaled
    /// by `2/√cells` so long lines do not flood the tank.
    pub fn add_line(
        &mut self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        thickness: f32,
        emission: Emission,
    ) -> usize {
        let cells = collect_segment_cells(&self.grid, x0, y0, x1, y1, thickness);
        let cell_scale = if cells.is_empty() {
            1.0
        } else {
            2.0 / (cells.len() as f32).sqrt()
        };
        self.push(SourceShape::Line { x0, y0, x1, y1 }, cells, cell_scale, emission)
    }

    fn push(&mut self, shape: SourceShape, cells: Vec<usize>, cell_scale: f32, emission: Emission) -> usize {
        self.sources.push(Source {
            shape,
            cells,
            frequency: emission.frequency,
            amplitude: emission.amplitude,
            phase: emission.phase,
            relative_amplitude: emission.relative_amplitude,
            cell_scale,
        });
        self.sources.len() - 1
    }

    pub fn clear(&mut self) {
        self.sources.clear();
    }

    /// Batch update: every source now emits at `frequency`.
    pub fn set_frequency(&mut self, frequency: f32) {
        for source in self.sources.iter_mut() {
            source.frequency = frequency;
        }
    }

    /// Batch update: each source's amplitude becomes
    /// `global_amplitude × relative_amplitude`.
    pub fn set_amplitude(&mut self, global_amplitude: f32) {
        for source in self.sources.iter_mut() {
            source.amplitude = global_amplitude * source.relative_amplitude;
        }
    }

    /// Add every source's sample at time `t` into `buffer`.
    pub fn inject(&self, buffer: &mut [f32], t: f64) {
        debug_assert_eq!(buffer.len(), self.grid.size());
        for source in self.sources.iter() {
            let sample = source.sample(t);
            for &idx in source.cells.iter() {
                fast!(buffer, [idx] = *fast!(buffer, [idx]) + sample);
            }
        }
    }

    pub fn len(&self) -> usize { self.sources.len() }

    pub fn is_empty(&self) -> bool { self.sources.is_empty() }

    pub fn get(&self, index: usize) -> Option<&Source> { self.sources.get(index) }

    pub fn iter(&self) -> impl Iterator<Item = &Source> { self.sources.iter() }

    /// Sum of owned cells over all sources (overlaps counted twice).
    pub fn total_cells(&self) -> usize {
        self.sources.iter().map(|s| s.cells.len()).sum()
    }

    /// Nearest distance from a cell center to any emitter, or `None` when the
    /// registry is empty.
    pub fn nearest_distance(&self, px: f32, py: f32) -> Option<f32> {
        self.sources
            .iter()
            .map(|s| s.shape.distance_to(px, py))
            .fold(None, |best, d| Some(best.map_or(d, |b: f32| b.min(d))))
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    fn registry() -> SourceRegistry {
        SourceRegistry::new(Grid::new(64, 48).unwrap())
    }

    #[test]
    fn point_source_collects_disk_around_snapped_center() {
        let mut reg = registry();
        let id = reg.add_point(10.4, 20.6, 1.0, Emission::default());
        let src = reg.get(id).unwrap();
        assert_eq!(src.cells().len(), 5);
        assert_eq!(src.cell_scale(), 1.0);
        let g = Grid::new(64, 48).unwrap();
        assert!(src.cells().contains(&g.index(10, 21)));
    }

    #[test]
    fn line_source_scale_follows_cell_count() {
        let mut reg = registry();
        let id = reg.add_line(6.0, 6.0, 6.0, 40.0, 1.0, Emission::default());
        let src = reg.get(id).unwrap();
        let n = src.cells().len() as f32;
        assert!(n > 35.0);
        assert!((src.cell_scale() - 2.0 / n.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn off_grid_line_keeps_unit_scale() {
        let mut reg = registry();
        let id = reg.add_line(-30.0, -30.0, -20.0, -30.0, 1.0, Emission::default());
        let src = reg.get(id).unwrap();
        assert!(src.cells().is_empty());
        assert_eq!(src.cell_scale(), 1.0);
    }

    #[test]
    fn global_controls_batch_update_all_sources() {
        let mut reg = registry();
        reg.add_point(10.0, 10.0, 1.0, Emission::new(2.0, 1.0));
        reg.add_point(30.0, 10.0, 1.0, Emission::new(2.0, 1.0).with_relative_amplitude(0.5));
        reg.set_frequency(4.5);
        reg.set_amplitude(0.8);
        let a = reg.get(0).unwrap();
        let b = reg.get(1).unwrap();
        assert_eq!(a.frequency(), 4.5);
        assert_eq!(b.frequency(), 4.5);
        assert!((a.amplitude() - 0.8).abs() < 1e-6);
        assert!((b.amplitude() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn coincident_sources_superpose() {
        let emission = Emission::new(1.0, 0.7).with_phase(FRAC_PI_2);
        let mut single = registry();
        single.add_point(20.0, 20.0, 1.0, emission);
        let mut double = registry();
        double.add_point(20.0, 20.0, 1.0, emission);
        double.add_point(20.0, 20.0, 1.0, emission);

        let g = Grid::new(64, 48).unwrap();
        let mut a = g.zeroed();
        let mut b = g.zeroed();
        single.inject(&mut a, 0.0);
        double.inject(&mut b, 0.0);

        let idx = g.index(20, 20);
        assert!((a[idx] - 0.7).abs() < 1e-6);
        assert!((b[idx] - 2.0 * a[idx]).abs() < 1e-6);
    }

    #[test]
    fn sample_tracks_phase_and_time() {
        let mut reg = registry();
        reg.add_point(5.0, 5.0, 0.0, Emission::new(2.0, 1.5));
        let src = reg.get(0).unwrap();
        assert!(src.sample(0.0).abs() < 1e-6);
        // Quarter period of a 2 Hz source
        assert!((src.sample(0.125) - 1.5).abs() < 1e-5);
    }

    #[test]
    fn nearest_distance_uses_geometry() {
        let mut reg = registry();
        assert_eq!(reg.nearest_distance(0.0, 0.0), None);
        reg.add_line(10.0, 0.0, 10.0, 40.0, 1.0, Emission::default());
        reg.add_point(40.0, 20.0, 1.0, Emission::default());
        let d = reg.nearest_distance(13.0, 20.0).unwrap();
        assert!((d - 3.0).abs() < 1e-5);
        let d = reg.nearest_distance(41.0, 20.0).unwrap();
        assert!((d - 1.0).abs() < 1e-5);
    }
}
