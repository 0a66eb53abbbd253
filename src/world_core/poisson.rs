use glam::DVec2;

use crate::world_core::random::SeededRandom;

pub const DEFAULT_MAX_ATTEMPTS: usize = 30;

/// Bridson's Poisson-disc sampling over `[-width/2, width/2) x [-height/2, height/2)`.
///
/// The origin is always the first point. Returned vectors carry world x in `.x`
/// and world z in `.y`. A `min_distance` too large for the area simply yields
/// fewer points; callers must not assume a minimum count.
pub fn poisson_disc_sample(
    random: &mut SeededRandom,
    width: f64,
    height: f64,
    min_distance: f64,
    max_attempts: usize,
) -> Vec<DVec2> {
    let origin = DVec2::ZERO;
    if min_distance.is_nan() || min_distance <= 0.0 || width <= 0.0 || height <= 0.0 {
        return vec![origin];
    }

    let cell_size = min_distance / std::f64::consts::SQRT_2;
    let grid_width = (width / cell_size).ceil() as i64;
    let grid_height = (height / cell_size).ceil() as i64;
    let half_width = width / 2.0;
    let half_height = height / 2.0;

    // One point per cell at most: the cell diagonal equals `min_distance`.
    let mut grid: Vec<Option<DVec2>> = vec![None; (grid_width * grid_height) as usize];
    let cell_of = |p: DVec2| -> (i64, i64) {
        (
            ((p.x + half_width) / cell_size).floor() as i64,
            ((p.y + half_height) / cell_size).floor() as i64,
        )
    };

    let mut points = vec![origin];
    let mut active = vec![origin];
    let (gx, gz) = cell_of(origin);
    if (0..grid_width).contains(&gx) && (0..grid_height).contains(&gz) {
        grid[(gz * grid_width + gx) as usize] = Some(origin);
    }

    while !active.is_empty() {
        let idx = random.int(0, active.len() as i64 - 1) as usize;
        let point = active[idx];
        let mut found = false;

        for _ in 0..max_attempts {
            let angle = random.next() * std::f64::consts::TAU;
            let distance = min_distance + random.next() * min_distance;
            let candidate = point + DVec2::new(angle.cos(), angle.sin()) * distance;

            if candidate.x < -half_width
                || candidate.x >= half_width
                || candidate.y < -half_height
                || candidate.y >= half_height
            {
                continue;
            }

            let (cx, cz) = cell_of(candidate);
            let mut valid = true;
            'neighbours: for dz in -2..=2 {
                for dx in -2..=2 {
                    let nx = cx + dx;
                    let nz = cz + dz;
                    if !(0..grid_width).contains(&nx) || !(0..grid_height).contains(&nz) {
                        continue;
                    }
                    if let Some(neighbour) = grid[(nz * grid_width + nx) as usize] {
                        if candidate.distance(neighbour) < min_distance {
                            valid = false;
                            break 'neighbours;
                        }
                    }
                }
            }

            if valid {
                points.push(candidate);
                active.push(candidate);
                grid[(cz * grid_width + cx) as usize] = Some(candidate);
                found = true;
                break;
            }
        }

        if !found {
            active.remove(idx);
        }
    }

    points
}
