use crate::domain::Emission;

use super::TankCore;

pub(super) fn add_point_source(tank: &mut TankCore, x: f32, y: f32, radius: f32, emission: Emission) -> usize {
    let id = tank.sources.add_point(x, y, radius, emission);
    tank.sponge.mark_stale();
    id
}

pub(super) fn add_line_source(
    tank: &mut TankCore,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    thickness: f32,
    emission: Emission,
) -> usize {
    let id = tank.sources.add_line(x0, y0, x1, y1, thickness, emission);
    tank.sponge.mark_stale();
    id
}

pub(super) fn clear_sources(tank: &mut TankCore) {
    tank.sources.clear();
    tank.sponge.mark_stale();
}

pub(super) fn clear_waves(tank: &mut TankCore) {
    tank.previous.fill(0.0);
    tank.current.fill(0.0);
    tank.next.fill(0.0);
    tank.average.fill(0.0);
    tank.time = 0.0;
    tank.steps = 0;
}

pub(super) fn clear_environment(tank: &mut TankCore) {
    tank.obstacles.clear();
    tank.medium.fill(tank.config.base_speed);
    clear_sources(tank);
}

pub(super) fn impulse(tank: &mut TankCore, x: i32, y: i32, value: f32) -> bool {
    let Some(idx) = tank.grid.index_of(x, y) else {
        return false;
    };
    if tank.grid.is_rim(x as u32, y as u32) || tank.obstacles.is_obstacle(idx) {
        return false;
    }
    tank.current[idx] += value;
    true
}
