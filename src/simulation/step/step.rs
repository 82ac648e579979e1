use crate::domain::BoundaryMode;
use crate::systems::kernel::{self, FieldView};

use super::{FrameSchedule, PerfTimer, TankCore};

pub(super) fn step(tank: &mut TankCore, dt: f64) {
    let perf_on = tank.perf_enabled;
    if perf_on {
        tank.perf_stats.reset();
        tank.perf_stats.grid_size = tank.grid.size() as u32;
        tank.perf_stats.source_count = tank.sources.len() as u32;
        tank.perf_stats.source_cells = tank.sources.total_cells() as u32;
        tank.perf_stats.obstacle_cells = tank.obstacles.count() as u32;
        // f32 × (prev, current, next, average, medium, sponge) + u8 obstacles
        tank.perf_stats.memory_bytes = (tank.grid.size() as u32).saturating_mul(25);
    }
    let step_start = if perf_on { Some(PerfTimer::start()) } else { None };
    let mut lap = step_start;

    let absorb = tank.config.boundary_mode == BoundaryMode::Absorb;
    if absorb {
        let rebuilt = tank.sponge.refresh(&tank.sources);
        if let Some(timer) = lap.as_mut() {
            tank.perf_stats.sponge_rebuilt = rebuilt;
            tank.perf_stats.sponge_ms = timer.lap_ms();
        }
    }

    // === Interior update: reads current/previous, writes next ===
    let view = FieldView {
        grid: tank.grid,
        current: &tank.current,
        previous: &tank.previous,
        medium: tank.medium.values(),
        obstacles: tank.obstacles.as_bytes(),
        scale: if absorb { Some(tank.sponge.values()) } else { None },
        damping: (1.0 - tank.config.damping_loss).clamp(0.0, 1.0),
    };
    kernel::advance_interior(&view, &mut tank.next);
    kernel::clamp_rim(&tank.grid, &mut tank.next);
    if let Some(timer) = lap.as_mut() {
        tank.perf_stats.kernel_ms = timer.lap_ms();
    }

    // previous <- current, current <- next, next <- old previous
    std::mem::swap(&mut tank.previous, &mut tank.current);
    std::mem::swap(&mut tank.current, &mut tank.next);

    tank.sources.inject(&mut tank.current, tank.time);
    // Sources touching the rim are neutralized like those on obstacles
    kernel::clamp_rim(&tank.grid, &mut tank.current);
    if let Some(timer) = lap.as_mut() {
        tank.perf_stats.inject_ms = timer.lap_ms();
    }

    kernel::settle_obstacles_and_average(
        tank.obstacles.as_bytes(),
        &mut tank.current,
        &mut tank.previous,
        &mut tank.average,
        tank.config.average_blend,
    );
    if let Some(timer) = lap.as_mut() {
        tank.perf_stats.settle_ms = timer.lap_ms();
    }

    tank.time += dt;
    tank.steps += 1;

    if let Some(t0) = step_start {
        tank.perf_stats.step_ms = t0.elapsed_ms();
        tank.perf_stats.sponge_rebuilds = tank.sponge.rebuild_count();
    }
}

pub(super) fn advance_frame(tank: &mut TankCore, speed_multiplier: f64, target_fps: f64) -> FrameSchedule {
    let schedule = FrameSchedule::plan(speed_multiplier, target_fps);
    let mut frame_ms = 0.0;
    for _ in 0..schedule.substeps {
        step(tank, schedule.dt);
        frame_ms += tank.perf_stats.step_ms;
    }
    if tank.perf_enabled {
        tank.perf_stats.substeps = schedule.substeps;
        tank.perf_stats.step_ms = frame_ms;
    }
    schedule
}
