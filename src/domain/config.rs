//! Tank configuration bundle (JSON in, JSON out).

use serde::{Deserialize, Serialize};

use crate::core::Result;

/// How the grid edge treats outgoing waves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryMode {
    /// Sponge band damps waves before they reach the clamped rim.
    #[default]
    Absorb,
    /// No sponge; the clamped rim reflects.
    Reflect,
}

impl BoundaryMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "absorb" => Some(BoundaryMode::Absorb),
            "reflect" => Some(BoundaryMode::Reflect),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BoundaryMode::Absorb => "absorb",
            BoundaryMode::Reflect => "reflect",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TankConfig {
    pub width: u32,
    pub height: u32,
    /// Speed used by `clear_environment` and the initial medium fill.
    pub base_speed: f32,
    /// Uniform per-step energy loss; the step multiplies by `1 - damping_loss`.
    pub damping_loss: f32,
    pub boundary_mode: BoundaryMode,
    /// Width of the sponge band in cells.
    pub sponge_margin: u32,
    /// Radius around each source inside which the sponge is lifted.
    pub protection_radius: f32,
    /// Weight of the newest |u| in the running average.
    pub average_blend: f32,
}

impl Default for TankConfig {
    fn default() -> Self {
        Self {
            width: 240,
            height: 160,
            base_speed: 0.34,
            damping_loss: 0.004,
            boundary_mode: BoundaryMode::Absorb,
            sponge_margin: 44,
            protection_radius: 34.0,
            average_blend: 0.008,
        }
    }
}

impl TankConfig {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self { width, height, ..Self::default() }
    }

    /// Parse a config bundle; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TankConfig = serde_json::from_str(json)?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Copy with every tunable forced into its legal range. Dimensions are
    /// left alone; the grid rejects bad ones.
    pub fn sanitized(&self) -> Self {
        let mut out = self.clone();
        out.base_speed = finite_or(self.base_speed, 0.0).max(0.0);
        out.damping_loss = finite_or(self.damping_loss, 0.0).clamp(0.0, 1.0);
        out.sponge_margin = self.sponge_margin.max(1);
        out.protection_radius = finite_or(self.protection_radius, 0.0).max(0.0);
        out.average_blend = finite_or(self.average_blend, 0.008).clamp(f32::EPSILON, 1.0);
        if out != *self {
            log::warn!("tank config adjusted into legal range: {:?} -> {:?}", self, out);
        }
        out
    }
}

#[inline]
fn finite_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() { v } else { fallback }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg = TankConfig::from_json(r#"{"width": 120, "boundaryMode": "reflect"}"#).unwrap();
        assert_eq!(cfg.width, 120);
        assert_eq!(cfg.height, 160);
        assert_eq!(cfg.boundary_mode, BoundaryMode::Reflect);
        assert_eq!(cfg.sponge_margin, 44);
    }

    #[test]
    fn json_round_trip_preserves_values() {
        let cfg = TankConfig { damping_loss: 0.01, ..TankConfig::with_size(64, 32) };
        let back = TankConfig::from_json(&cfg.to_json()).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = TankConfig::from_json("{width: }").unwrap_err();
        assert!(matches!(err, crate::core::TankError::Config(_)));
        let err = TankConfig::from_json(r#"{"boundaryMode": "sticky"}"#).unwrap_err();
        assert!(matches!(err, crate::core::TankError::Config(_)));
    }

    #[test]
    fn sanitized_clamps_tunables() {
        let cfg = TankConfig {
            damping_loss: 1.7,
            base_speed: -1.0,
            sponge_margin: 0,
            average_blend: f32::NAN,
            ..TankConfig::default()
        }
        .sanitized();
        assert_eq!(cfg.damping_loss, 1.0);
        assert_eq!(cfg.base_speed, 0.0);
        assert_eq!(cfg.sponge_margin, 1);
        assert_eq!(cfg.average_blend, 0.008);
    }

    #[test]
    fn boundary_mode_names() {
        assert_eq!(BoundaryMode::from_name("reflect"), Some(BoundaryMode::Reflect));
        assert_eq!(BoundaryMode::from_name("wrap"), None);
        assert_eq!(BoundaryMode::Absorb.name(), "absorb");
    }
}
