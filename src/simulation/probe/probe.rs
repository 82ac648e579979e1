use super::TankCore;

pub(super) fn displacement_at(tank: &TankCore, x: i32, y: i32) -> Option<f32> {
    tank.grid.index_of(x, y).map(|i| tank.current[i])
}

pub(super) fn speed_at(tank: &TankCore, x: i32, y: i32) -> Option<f32> {
    tank.grid.index_of(x, y).map(|i| tank.medium.speed_at(i))
}

pub(super) fn average_at(tank: &TankCore, x: i32, y: i32) -> Option<f32> {
    tank.grid.index_of(x, y).map(|i| tank.average[i])
}

pub(super) fn is_obstacle_at(tank: &TankCore, x: i32, y: i32) -> Option<bool> {
    tank.grid.index_of(x, y).map(|i| tank.obstacles.is_obstacle(i))
}

/// `Σ (cur−prev)²/c² + Σ_edges (cur_i−cur_j)(prev_i−prev_j)` over
/// right/down neighbour pairs, accumulated in f64. Cells with zero medium
/// are skipped in the kinetic sum.
pub(super) fn discrete_energy(tank: &TankCore) -> f64 {
    let w = tank.grid.width() as usize;
    let h = tank.grid.height() as usize;
    let cur = &tank.current;
    let prev = &tank.previous;
    let medium = tank.medium.values();

    let mut kinetic = 0.0f64;
    for i in 0..tank.grid.size() {
        let m = medium[i] as f64;
        if m > 0.0 {
            let v = cur[i] as f64 - prev[i] as f64;
            kinetic += v * v / m;
        }
    }

    let mut strain = 0.0f64;
    for y in 0..h {
        for x in 0..w {
            let i = y * w + x;
            if x + 1 < w {
                strain += (cur[i] as f64 - cur[i + 1] as f64) * (prev[i] as f64 - prev[i + 1] as f64);
            }
            if y + 1 < h {
                strain += (cur[i] as f64 - cur[i + w] as f64) * (prev[i] as f64 - prev[i + w] as f64);
            }
        }
    }

    kinetic + strain
}

pub(super) fn peak_abs(tank: &TankCore) -> f32 {
    tank.current.iter().fold(0.0f32, |peak, v| peak.max(v.abs()))
}
