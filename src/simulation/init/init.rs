use crate::core::Result;
use crate::domain::{MediumField, ObstacleMask, SourceRegistry, TankConfig};
use crate::spatial::Grid;
use crate::systems::SpongeMask;

use super::perf_stats::PerfStats;
use super::TankCore;

pub(super) fn create_tank_core(config: TankConfig) -> Result<TankCore> {
    let config = config.sanitized();
    let grid = Grid::new(config.width, config.height)?;

    log::debug!(
        "creating {}x{} tank ({} boundary, base speed {})",
        grid.width(),
        grid.height(),
        config.boundary_mode.name(),
        config.base_speed
    );

    Ok(TankCore {
        grid,
        previous: grid.zeroed(),
        current: grid.zeroed(),
        next: grid.zeroed(),
        average: grid.zeroed(),
        medium: MediumField::new(grid, config.base_speed),
        obstacles: ObstacleMask::new(grid),
        sources: SourceRegistry::new(grid),
        sponge: SpongeMask::new(grid, config.sponge_margin, config.protection_radius),
        config,
        time: 0.0,
        steps: 0,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    })
}
