/// Snap a continuous coordinate to the lattice. Halves round up, so
/// `-0.5` lands on cell 0 rather than -1.
#[inline]
pub fn snap(v: f32) -> i32 {
    (v + 0.5).floor() as i32
}

/// Euclidean distance from `(px, py)` to the segment `(x0, y0)-(x1, y1)`.
///
/// The projection parameter is clamped to [0, 1]; a zero-length segment
/// degenerates to point distance.
pub fn distance_to_segment(px: f32, py: f32, x0: f32, y0: f32, x1: f32, y1: f32) -> f32 {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let len2 = dx * dx + dy * dy;
    if len2 <= f32::EPSILON {
        return (px - x0).hypot(py - y0);
    }
    let t = (((px - x0) * dx + (py - y0) * dy) / len2).clamp(0.0, 1.0);
    (px - (x0 + t * dx)).hypot(py - (y0 + t * dy))
}

/// Wavelength in cells for a propagation speed (cells per step) and a
/// frequency. Frequencies below 0.1 are treated as 0.1.
#[inline]
pub fn wavelength(speed: f32, frequency: f32) -> f32 {
    speed / frequency.max(0.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_rounds_halves_up() {
        assert_eq!(snap(2.5), 3);
        assert_eq!(snap(2.49), 2);
        assert_eq!(snap(-0.5), 0);
        assert_eq!(snap(-0.51), -1);
    }

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        // Beyond the end of a horizontal segment
        let d = distance_to_segment(13.0, 4.0, 0.0, 0.0, 10.0, 0.0);
        assert!((d - 5.0).abs() < 1e-5);
        // Perpendicular foot inside the segment
        let d = distance_to_segment(5.0, 3.0, 0.0, 0.0, 10.0, 0.0);
        assert!((d - 3.0).abs() < 1e-5);
        // Degenerate segment
        let d = distance_to_segment(3.0, 4.0, 0.0, 0.0, 0.0, 0.0);
        assert!((d - 5.0).abs() < 1e-5);
    }

    #[test]
    fn wavelength_guards_tiny_frequencies() {
        assert!((wavelength(0.34, 2.0) - 0.17).abs() < 1e-6);
        assert!((wavelength(0.34, 0.0) - 3.4).abs() < 1e-5);
    }
}
