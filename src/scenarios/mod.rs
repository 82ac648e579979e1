//! Scenario setups
//!
//! Each scenario rebuilds the tank's environment from scratch: medium,
//! obstacles and sources, laid out relative to the grid size so any tank
//! dimensions work. Geometry is kept `EDIT_MARGIN` cells clear of the rim.

use serde::{Deserialize, Serialize};

use crate::core::math::snap;
use crate::core::{Result, TankError};
use crate::domain::Emission;
use crate::simulation::TankCore;

/// Clearance between scenario geometry and the grid edge.
pub const EDIT_MARGIN: f32 = 6.0;
/// Narrowest slit the diffraction wall will leave open.
pub const MIN_SLIT_HEIGHT: f32 = 6.0;
/// Shortest mirror/boundary segment after rotation.
pub const MIN_SEGMENT_LENGTH: f32 = 10.0;
/// Curvature of the parabolic mirror.
pub const PARABOLA_CURVATURE: f32 = 0.004;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Scenario {
    Diffraction,
    DiffractionWall,
    ReflectionFlat,
    ReflectionDiagonal,
    ReflectionParabolic,
    RefractionBoundary,
    RefractionAngled,
    Interference,
}

impl Scenario {
    pub const ALL: [Scenario; 8] = [
        Scenario::Diffraction,
        Scenario::DiffractionWall,
        Scenario::ReflectionFlat,
        Scenario::ReflectionDiagonal,
        Scenario::ReflectionParabolic,
        Scenario::RefractionBoundary,
        Scenario::RefractionAngled,
        Scenario::Interference,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::Diffraction => "diffraction",
            Scenario::DiffractionWall => "diffractionWall",
            Scenario::ReflectionFlat => "reflectionFlat",
            Scenario::ReflectionDiagonal => "reflectionDiagonal",
            Scenario::ReflectionParabolic => "reflectionParabolic",
            Scenario::RefractionBoundary => "refractionBoundary",
            Scenario::RefractionAngled => "refractionAngled",
            Scenario::Interference => "interference",
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        Scenario::ALL
            .iter()
            .copied()
            .find(|s| s.name() == name)
            .ok_or_else(|| TankError::UnknownScenario(name.to_string()))
    }

    /// Catalog parameters for this scenario.
    pub fn defaults(&self) -> ScenarioParams {
        let base = ScenarioParams::default();
        match self {
            Scenario::Diffraction | Scenario::DiffractionWall => ScenarioParams {
                frequency: 2.8,
                amplitude: 0.95,
                angle: 26.0,
                ..base
            },
            Scenario::ReflectionFlat => ScenarioParams {
                frequency: 3.2,
                amplitude: 0.88,
                angle: 26.0,
                ..base
            },
            Scenario::ReflectionDiagonal => ScenarioParams { frequency: 3.1, amplitude: 0.88, ..base },
            Scenario::ReflectionParabolic => ScenarioParams {
                frequency: 2.7,
                amplitude: 0.9,
                damping: 0.003,
                ..base
            },
            Scenario::RefractionBoundary => ScenarioParams {
                frequency: 2.5,
                amplitude: 0.9,
                medium_ratio: 0.6,
                ..base
            },
            Scenario::RefractionAngled => ScenarioParams {
                frequency: 2.9,
                amplitude: 0.9,
                angle: 18.0,
                medium_ratio: 0.58,
                ..base
            },
            Scenario::Interference => ScenarioParams {
                frequency: 4.0,
                amplitude: 0.92,
                damping: 0.003,
                separation: 34.0,
                ..base
            },
        }
    }
}

/// Knobs a scenario reads. Each scenario uses a subset; the rest are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScenarioParams {
    pub frequency: f32,
    pub amplitude: f32,
    pub damping: f32,
    /// Diffraction slit opening in cells.
    pub slit_width: f32,
    /// Mirror or medium boundary angle in degrees.
    pub angle: f32,
    /// Slow-side speed as a fraction of the base speed.
    pub medium_ratio: f32,
    /// Distance between the two interference sources.
    pub separation: f32,
    pub wall_radius: f32,
    /// Parabolic mirror: emit from the focus instead of a plane wave.
    pub focus_source: bool,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            frequency: 3.0,
            amplitude: 1.0,
            damping: 0.004,
            slit_width: 28.0,
            angle: 24.0,
            medium_ratio: 0.62,
            separation: 28.0,
            wall_radius: 18.0,
            focus_source: false,
        }
    }
}

impl ScenarioParams {
    /// Overlay the fields present in `json` onto `self`.
    pub fn merged_with_json(&self, json: &str) -> Result<Self> {
        let mut merged = serde_json::to_value(self)?;
        let overrides: serde_json::Value = serde_json::from_str(json)?;
        match (merged.as_object_mut(), overrides) {
            (Some(base), serde_json::Value::Object(fields)) => base.extend(fields),
            _ => return Err(TankError::Config("scenario params must be a JSON object".to_string())),
        }
        Ok(serde_json::from_value(merged)?)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Rebuild the tank for `scenario`: clear environment and waves, set the
/// damping, lay out geometry, then apply the global frequency and amplitude.
pub fn apply(tank: &mut TankCore, scenario: Scenario, params: &ScenarioParams) {
    tank.clear_environment();
    tank.clear_waves();
    tank.set_damping_loss(params.damping);

    let layout = Layout::of(tank);
    match scenario {
        Scenario::Diffraction => diffraction(tank, &layout, params),
        Scenario::DiffractionWall => diffraction_wall(tank, &layout, params),
        Scenario::ReflectionFlat => reflection_flat(tank, &layout),
        Scenario::ReflectionDiagonal => reflection_diagonal(tank, &layout, params),
        Scenario::ReflectionParabolic => reflection_parabolic(tank, &layout, params),
        Scenario::RefractionBoundary => refraction_boundary(tank, &layout, params),
        Scenario::RefractionAngled => refraction_angled(tank, &layout, params),
        Scenario::Interference => interference(tank, &layout, params),
    }

    tank.set_source_frequency(params.frequency);
    tank.set_source_amplitude(params.amplitude);

    log::debug!(
        "scenario {} applied: {} sources, {} obstacle cells",
        scenario.name(),
        tank.sources().len(),
        tank.obstacles().count()
    );
}

/// Never panics on an inverted range; the lower bound wins.
#[inline]
fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.min(hi).max(lo)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Segment {
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
}

impl Segment {
    fn from_center_angle(cx: f32, cy: f32, half_length: f32, angle_deg: f32) -> Self {
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        Self {
            x0: cx - cos * half_length,
            y0: cy - sin * half_length,
            x1: cx + cos * half_length,
            y1: cy + sin * half_length,
        }
    }

    fn midpoint(&self) -> (f32, f32) {
        ((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    fn length(&self) -> f32 {
        (self.x1 - self.x0).hypot(self.y1 - self.y0)
    }
}

/// Grid-relative dimensions and the clamp box geometry must stay inside.
struct Layout {
    w: f32,
    h: f32,
}

impl Layout {
    fn of(tank: &TankCore) -> Self {
        Self { w: tank.width() as f32, h: tank.height() as f32 }
    }

    fn max_x(&self) -> f32 {
        self.w - 1.0 - EDIT_MARGIN
    }

    fn max_y(&self) -> f32 {
        self.h - 1.0 - EDIT_MARGIN
    }

    fn clamp_segment(&self, s: Segment) -> Segment {
        Segment {
            x0: clamp(s.x0, EDIT_MARGIN, self.max_x()),
            y0: clamp(s.y0, EDIT_MARGIN, self.max_y()),
            x1: clamp(s.x1, EDIT_MARGIN, self.max_x()),
            y1: clamp(s.y1, EDIT_MARGIN, self.max_y()),
        }
    }

    /// Segment through `(cx, cy)` at `angle`, clamped inside the margin.
    fn rotated_segment(&self, cx: f32, cy: f32, half_length: f32, angle: f32) -> Segment {
        let half_length = half_length.max(MIN_SEGMENT_LENGTH / 2.0);
        self.clamp_segment(Segment::from_center_angle(cx, cy, half_length, angle))
    }

    /// Vertical plane-wave emitter `inset` cells from the left edge.
    fn left_emitter(&self, tank: &mut TankCore, inset: f32, y_inset: f32) {
        tank.add_line_source(inset, y_inset, inset, self.h - 1.0 - y_inset, 1.0, Emission::default());
    }

    /// Horizontal plane-wave emitter along the top.
    fn top_emitter(&self, tank: &mut TankCore) {
        tank.add_line_source(10.0, 9.0, self.w - 11.0, 9.0, 1.0, Emission::default());
    }
}

fn diffraction(tank: &mut TankCore, l: &Layout, p: &ScenarioParams) {
    let wall_x = clamp(snap(l.w * 0.47) as f32, EDIT_MARGIN + 8.0, l.max_x() - 8.0);

    let half_gap = (MIN_SLIT_HEIGHT / 2.0).max(p.slit_width / 2.0);
    let center = clamp(snap(l.h / 2.0) as f32, EDIT_MARGIN + half_gap, l.max_y() - half_gap);
    let slit_top = snap(center - half_gap);
    let slit_bottom = snap(center + half_gap);

    let y_end = tank.height() as i32 - EDIT_MARGIN as i32;
    for y in EDIT_MARGIN as i32..y_end {
        if (slit_top..=slit_bottom).contains(&y) {
            continue;
        }
        tank.add_obstacle_disk(wall_x, y as f32, 1.0);
    }

    l.left_emitter(tank, 6.0, 6.0);
}

fn diffraction_wall(tank: &mut TankCore, l: &Layout, p: &ScenarioParams) {
    let cx = clamp(l.w * 0.56, EDIT_MARGIN + 10.0, l.max_x() - 10.0);
    let cy = clamp(l.h * 0.5, EDIT_MARGIN + 10.0, l.max_y() - 10.0);
    tank.add_obstacle_disk(cx, cy, p.wall_radius.max(1.0));

    l.left_emitter(tank, 6.0, 6.0);
}

fn reflection_flat(tank: &mut TankCore, l: &Layout) {
    let y = snap(l.h * 0.58) as f32;
    let mirror = l.clamp_segment(Segment { x0: 22.0, y0: y, x1: l.w - 22.0, y1: y });
    tank.add_obstacle_segment(mirror.x0, mirror.y0, mirror.x1, mirror.y1, 1.0);

    l.top_emitter(tank);
}

fn reflection_diagonal(tank: &mut TankCore, l: &Layout, p: &ScenarioParams) {
    let mirror = l.rotated_segment(l.w * 0.54, l.h * 0.62, l.w * 0.33, p.angle);
    tank.add_obstacle_segment(mirror.x0, mirror.y0, mirror.x1, mirror.y1, 1.0);

    l.top_emitter(tank);
}

fn reflection_parabolic(tank: &mut TankCore, l: &Layout, p: &ScenarioParams) {
    let k = PARABOLA_CURVATURE;
    let cx = clamp(l.w * 0.52, EDIT_MARGIN + 22.0, l.max_x() - 22.0);
    let vertex_y = clamp(l.h * 0.78, EDIT_MARGIN + 14.0, l.max_y() - 4.0);

    // Keep the arms inside the margin and above the top edge
    let x_limit = (cx - EDIT_MARGIN).min(l.max_x() - cx);
    let y_limit = (vertex_y / k).max(0.0).sqrt();
    let half_span = clamp(l.w * 0.42, 16.0, 16f32.max(x_limit.min(y_limit)));

    let min_x = snap(cx - half_span);
    let max_x = snap(cx + half_span);
    tank.add_obstacle_parabola(cx, vertex_y, k, min_x, max_x, 1.0);

    if p.focus_source {
        let focus_y = snap(vertex_y - 1.0 / (4.0 * k)) as f32;
        tank.add_point_source(cx, focus_y, 1.0, Emission::default());
    } else {
        l.top_emitter(tank);
    }
}

fn refraction_boundary(tank: &mut TankCore, l: &Layout, p: &ScenarioParams) {
    let boundary_x = clamp(snap(l.w * 0.56) as f32, EDIT_MARGIN + 8.0, l.max_x() - 8.0) as i32;
    let slow = tank.base_speed() * p.medium_ratio;
    tank.fill_medium_rect(boundary_x, 0, tank.width() as i32 - 1, tank.height() as i32 - 1, slow);

    l.left_emitter(tank, 8.0, 6.0);
}

fn refraction_angled(tank: &mut TankCore, l: &Layout, p: &ScenarioParams) {
    let boundary = l.rotated_segment(l.w * 0.56, l.h * 0.52, l.w * 0.65, p.angle);
    let (mx, my) = boundary.midpoint();
    let len = boundary.length().max(1.0);
    let dir_x = (boundary.x1 - boundary.x0) / len;
    let dir_y = (boundary.y1 - boundary.y0) / len;

    let slow = tank.base_speed() * p.medium_ratio;
    tank.fill_medium_half_plane(mx, my, -dir_y, dir_x, slow);

    l.left_emitter(tank, 8.0, 8.0);
}

fn interference(tank: &mut TankCore, l: &Layout, p: &ScenarioParams) {
    let half_sep = p.separation / 2.0;
    let mid = clamp(l.h * 0.5, EDIT_MARGIN + half_sep, l.max_y() - half_sep);
    let x = clamp(l.w * 0.3, EDIT_MARGIN + 4.0, l.max_x() - 4.0);
    let y_lo = EDIT_MARGIN + 4.0;
    let y_hi = l.max_y() - 4.0;

    for y in [mid - half_sep, mid + half_sep] {
        tank.add_point_source(x, clamp(y, y_lo, y_hi), 1.0, Emission::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SourceShape;

    fn tank() -> TankCore {
        TankCore::new(240, 160).unwrap()
    }

    #[test]
    fn names_round_trip() {
        for s in Scenario::ALL {
            assert_eq!(Scenario::from_name(s.name()).unwrap(), s);
        }
        assert_eq!(
            Scenario::from_name("tsunami"),
            Err(TankError::UnknownScenario("tsunami".to_string()))
        );
    }

    #[test]
    fn catalog_defaults() {
        let d = Scenario::Interference.defaults();
        assert_eq!((d.frequency, d.amplitude, d.damping, d.separation), (4.0, 0.92, 0.003, 34.0));
        let d = Scenario::RefractionAngled.defaults();
        assert_eq!((d.angle, d.medium_ratio), (18.0, 0.58));
        assert_eq!(Scenario::Diffraction.defaults().slit_width, 28.0);
    }

    #[test]
    fn params_json_overrides_only_given_fields() {
        let base = Scenario::Diffraction.defaults();
        let merged = base.merged_with_json(r#"{"slitWidth": 12, "focusSource": true}"#).unwrap();
        assert_eq!(merged.slit_width, 12.0);
        assert!(merged.focus_source);
        assert_eq!(merged.frequency, base.frequency);
        assert!(base.merged_with_json("[1, 2]").is_err());
    }

    #[test]
    fn diffraction_leaves_an_open_slit() {
        let mut t = tank();
        apply(&mut t, Scenario::Diffraction, &Scenario::Diffraction.defaults());

        // snap(240 · 0.47) = 113; slit spans 66..=94, disks of radius 1 eat one row
        assert_eq!(t.is_obstacle_at(113, 40), Some(true));
        assert_eq!(t.is_obstacle_at(113, 80), Some(false));
        assert_eq!(t.is_obstacle_at(113, 67), Some(false));
        assert_eq!(t.is_obstacle_at(113, 66), Some(true));
        assert_eq!(t.is_obstacle_at(113, 2), Some(false));
        assert_eq!(t.sources().len(), 1);
        assert!((t.damping_loss() - 0.004).abs() < 1e-7);
        let src = t.sources().get(0).unwrap();
        assert_eq!(src.frequency(), 2.8);
        assert!((src.amplitude() - 0.95).abs() < 1e-6);
    }

    #[test]
    fn reflection_flat_mirror_row() {
        let mut t = tank();
        apply(&mut t, Scenario::ReflectionFlat, &Scenario::ReflectionFlat.defaults());
        // snap(160 · 0.58) = 93
        assert_eq!(t.is_obstacle_at(120, 93), Some(true));
        assert_eq!(t.is_obstacle_at(120, 96), Some(false));
        assert_eq!(t.is_obstacle_at(10, 93), Some(false));
    }

    #[test]
    fn diagonal_mirror_stays_inside_margin() {
        let mut t = tank();
        apply(&mut t, Scenario::ReflectionDiagonal, &Scenario::ReflectionDiagonal.defaults());
        let grid = *t.grid();
        for (i, &b) in t.obstacles().as_bytes().iter().enumerate() {
            if b != 0 {
                let (x, y) = grid.coords(i);
                assert!(x >= 4 && y >= 4 && x <= 235 && y <= 155);
            }
        }
        assert!(t.obstacles().count() > 100);
    }

    #[test]
    fn parabolic_focus_source_sits_at_focus() {
        let mut t = tank();
        let params = ScenarioParams { focus_source: true, ..Scenario::ReflectionParabolic.defaults() };
        apply(&mut t, Scenario::ReflectionParabolic, &params);
        // vertex 124.8, focal length 62.5
        match *t.sources().get(0).unwrap().shape() {
            SourceShape::Point { x, y } => {
                assert!((x - 124.8).abs() < 1e-3);
                assert_eq!(y, 62.0);
            }
            other => panic!("expected point source, got {:?}", other),
        }
        assert!((t.damping_loss() - 0.003).abs() < 1e-7);
        assert!(t.obstacles().count() > 0);
    }

    #[test]
    fn refraction_boundary_splits_medium() {
        let mut t = tank();
        apply(&mut t, Scenario::RefractionBoundary, &Scenario::RefractionBoundary.defaults());
        let fast = t.speed_at(100, 80).unwrap();
        let slow = t.speed_at(200, 80).unwrap();
        assert!((fast - 0.34).abs() < 1e-5);
        assert!((slow - 0.34 * 0.6).abs() < 1e-5);
        // snap(240 · 0.56) = 134
        assert!((t.speed_at(134, 5).unwrap() - slow).abs() < 1e-6);
        assert!((t.speed_at(133, 5).unwrap() - fast).abs() < 1e-6);
    }

    #[test]
    fn refraction_angled_splits_along_the_tilted_boundary() {
        let mut t = tank();
        apply(&mut t, Scenario::RefractionAngled, &Scenario::RefractionAngled.defaults());
        // The boundary runs from upper left to lower right; the normal points
        // down and to the left, so the slow side lies below it
        assert!((t.speed_at(119, 20).unwrap() - 0.34).abs() < 1e-5);
        assert!((t.speed_at(119, 150).unwrap() - 0.34 * 0.58).abs() < 1e-5);
        assert!((t.speed_at(230, 40).unwrap() - 0.34).abs() < 1e-5);
    }

    #[test]
    fn interference_places_mirrored_points() {
        let mut t = tank();
        apply(&mut t, Scenario::Interference, &Scenario::Interference.defaults());
        assert_eq!(t.sources().len(), 2);
        let ys: Vec<f32> = t
            .sources()
            .iter()
            .map(|s| match *s.shape() {
                SourceShape::Point { y, .. } => y,
                SourceShape::Line { y0, .. } => y0,
            })
            .collect();
        assert_eq!(ys, vec![63.0, 97.0]);
    }

    #[test]
    fn reapplying_replaces_previous_setup() {
        let mut t = tank();
        apply(&mut t, Scenario::Diffraction, &Scenario::Diffraction.defaults());
        t.step(1.0 / 120.0);
        apply(&mut t, Scenario::RefractionBoundary, &Scenario::RefractionBoundary.defaults());
        assert_eq!(t.obstacles().count(), 0);
        assert_eq!(t.sources().len(), 1);
        assert_eq!(t.step_count(), 0);
    }
}
