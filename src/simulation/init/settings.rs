use crate::domain::BoundaryMode;

use super::perf_stats::PerfStats;
use super::TankCore;

pub(super) fn set_damping_loss(tank: &mut TankCore, loss: f32) {
    let clamped = if loss.is_finite() { loss.clamp(0.0, 1.0) } else { 0.0 };
    if clamped != loss {
        log::warn!("damping loss {} clamped to {}", loss, clamped);
    }
    tank.config.damping_loss = clamped;
}

pub(super) fn set_boundary_mode(tank: &mut TankCore, mode: BoundaryMode) {
    tank.config.boundary_mode = mode;
}

/// Only affects later `clear_environment` calls; the medium is not refilled.
pub(super) fn set_base_speed(tank: &mut TankCore, speed: f32) {
    let clamped = if speed.is_finite() { speed.max(0.0) } else { 0.0 };
    if clamped != speed {
        log::warn!("base speed {} clamped to {}", speed, clamped);
    }
    tank.config.base_speed = clamped;
}

pub(super) fn enable_perf_metrics(tank: &mut TankCore, enabled: bool) {
    tank.perf_enabled = enabled;
    if !enabled {
        tank.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(tank: &TankCore) -> PerfStats {
    tank.perf_stats.clone()
}
