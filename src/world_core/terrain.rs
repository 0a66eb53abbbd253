use glam::{DVec2, IVec2};
#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::world_core::rivers::RiverPath;

const RIVER_PROXIMITY: f64 = 2.0;
const JUNGLE_BIAS_DISTANCE: f64 = 50.0;
const JUNGLE_BIAS_WEIGHT: f64 = 0.3;
const RIVER_THRESHOLD: f64 = -0.2;
const MARSH_THRESHOLD: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerrainType {
    River,
    Marsh,
    DenseJungle,
}

impl TerrainType {
    fn severity(self) -> u8 {
        match self {
            TerrainType::River => 0,
            TerrainType::Marsh => 1,
            TerrainType::DenseJungle => 2,
        }
    }

    /// The harder of two terrains: `DENSE_JUNGLE > MARSH > RIVER`.
    pub fn harder(self, other: TerrainType) -> TerrainType {
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }
}

/// Classifies a chunk coordinate. Pure in all four inputs.
pub fn determine_terrain_type(x: f64, z: f64, seed: u32, rivers: &[RiverPath]) -> TerrainType {
    let here = DVec2::new(x, z);
    let near_river = rivers
        .iter()
        .flatten()
        .any(|point| here.distance(*point) < RIVER_PROXIMITY);
    if near_river {
        return TerrainType::River;
    }

    let s = seed as f64;
    let noise_x = (x * 0.1 + s).sin() * (z * 0.15 + s * 0.7).cos();
    let noise_z = (x * 0.12 + s * 0.5).cos() * (z * 0.08 + s * 1.2).sin();
    let combined = (noise_x + noise_z) / 2.0;

    let distance_factor = (here.length() / JUNGLE_BIAS_DISTANCE).min(1.0);
    let value = combined + distance_factor * JUNGLE_BIAS_WEIGHT;

    if value < RIVER_THRESHOLD {
        TerrainType::River
    } else if value < MARSH_THRESHOLD {
        TerrainType::Marsh
    } else {
        TerrainType::DenseJungle
    }
}

/// Dense terrain grid covering every integer coordinate in `[-radius, radius]^2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainZones {
    radius: i32,
    cells: Vec<TerrainType>,
}

impl TerrainZones {
    pub fn generate(radius: i32, seed: u32, rivers: &[RiverPath]) -> Self {
        let radius = radius.max(0);
        let side = (radius * 2 + 1) as usize;
        let total = side * side;

        // Collected in index order, so scheduling never affects the result.
        let cells: Vec<TerrainType> = maybe_par_iter!(0..total)
            .map(|idx| {
                let x = (idx % side) as i32 - radius;
                let z = (idx / side) as i32 - radius;
                determine_terrain_type(x as f64, z as f64, seed, rivers)
            })
            .collect();

        Self { radius, cells }
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, coord: IVec2) -> Option<TerrainType> {
        if coord.x.abs() > self.radius || coord.y.abs() > self.radius {
            return None;
        }
        let side = (self.radius * 2 + 1) as usize;
        let x = (coord.x + self.radius) as usize;
        let z = (coord.y + self.radius) as usize;
        self.cells.get(z * side + x).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (IVec2, TerrainType)> + '_ {
        let side = (self.radius * 2 + 1) as usize;
        self.cells.iter().enumerate().map(move |(idx, terrain)| {
            let x = (idx % side) as i32 - self.radius;
            let z = (idx / side) as i32 - self.radius;
            (IVec2::new(x, z), *terrain)
        })
    }
}
