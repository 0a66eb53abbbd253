use glam::DVec2;

use crate::world_core::random::SeededRandom;

pub const DEFAULT_RIVER_COUNT: usize = 3;
const MEANDER_AMPLITUDE: f64 = 5.0;
const MEANDER_WAVES: f64 = 4.0;

pub type RiverPath = Vec<DVec2>;

/// Meandering polylines that start near the world edge and flow through the
/// middle toward the opposite side. Used only to seed `RIVER` terrain.
pub fn generate_river_paths(
    random: &mut SeededRandom,
    world_radius: f64,
    river_count: usize,
) -> Vec<RiverPath> {
    let mut rivers = Vec::with_capacity(river_count);

    for _ in 0..river_count {
        let start_angle = random.range(0.0, std::f64::consts::TAU);
        let start = DVec2::new(start_angle.cos(), start_angle.sin()) * world_radius * 0.9;

        let end_angle = start_angle + std::f64::consts::PI + random.range(-0.5, 0.5);
        let end = DVec2::new(end_angle.cos(), end_angle.sin()) * world_radius * 0.7;

        let steps = 20 + random.int(0, 10) as usize;
        let delta = end - start;
        let perpendicular = DVec2::new(-delta.y, delta.x).normalize_or_zero();

        let river = (0..=steps)
            .map(|step| {
                let t = step as f64 / steps as f64;
                let meander = (t * std::f64::consts::PI * MEANDER_WAVES).sin() * MEANDER_AMPLITUDE;
                start + delta * t + perpendicular * meander
            })
            .collect();
        rivers.push(river);
    }

    rivers
}

#[cfg(test)]
mod tests {
    use super::{generate_river_paths, DEFAULT_RIVER_COUNT};
    use crate::world_core::random::SeededRandom;

    #[test]
    fn rivers_run_from_edge_to_far_side() {
        let mut random = SeededRandom::new(42);
        let rivers = generate_river_paths(&mut random, 50.0, DEFAULT_RIVER_COUNT);
        assert_eq!(rivers.len(), 3);
        for river in &rivers {
            assert!((21..=31).contains(&river.len()));
            let first = river[0];
            let last = river[river.len() - 1];
            assert!((first.length() - 45.0).abs() < 1e-6);
            assert!((last.length() - 35.0).abs() < 1e-6);
            // start and end sit on roughly opposite sides of the origin
            assert!(first.dot(last) < 0.0);
        }
    }

    #[test]
    fn rivers_are_deterministic() {
        let a = generate_river_paths(&mut SeededRandom::new(9), 40.0, 3);
        let b = generate_river_paths(&mut SeededRandom::new(9), 40.0, 3);
        assert_eq!(a, b);
    }
}
