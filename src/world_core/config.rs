use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldLayoutConfig,
    pub assembly: AssemblyConfig,
    pub runtime: RuntimeConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: WorldLayoutConfig::default(),
            assembly: AssemblyConfig::default(),
            runtime: RuntimeConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn load() -> Self {
        let path = Path::new("config.json");
        if !path.exists() {
            log::info!("no config.json found, using defaults");
            return Self::default();
        }
        Self::load_from(path)
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("loaded {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("failed to parse {}: {e}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("failed to read {}: {e}, using defaults", path.display());
                Self::default()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorldLayoutConfig {
    pub seed: u32,
    /// Chunks in each direction from the origin.
    pub world_radius: i32,
    /// Minimum chunk distance between sampled POI candidates.
    #[serde(rename = "minPOIDistance")]
    pub min_poi_distance: f64,
    pub village_count: usize,
    pub outpost_count: usize,
    pub siphon_cluster_count: usize,
    pub rescue_characters: Vec<String>,
}

impl Default for WorldLayoutConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            world_radius: 50,
            min_poi_distance: 8.0,
            village_count: 6,
            outpost_count: 5,
            siphon_cluster_count: 4,
            rescue_characters: ["whiskers", "splash", "fang", "marina", "muskrat"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HutConfig {
    pub min_stilts: usize,
    pub max_stilts: usize,
    pub floor_height: Span,
    pub room_size: Span,
    pub roof_pitch: Span,
    pub wear_variation: f64,
}

impl Default for HutConfig {
    fn default() -> Self {
        Self {
            min_stilts: 4,
            max_stilts: 9,
            floor_height: Span::new(0.5, 2.5),
            room_size: Span::new(2.5, 5.0),
            roof_pitch: Span::new(0.3, 0.6),
            wear_variation: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub min_height: f64,
    pub max_height: f64,
    pub section_size: f64,
    pub connect_radius: f64,
    pub requires_ladder_access: bool,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            min_height: 1.5,
            max_height: 4.0,
            section_size: 3.0,
            connect_radius: 8.0,
            requires_ladder_access: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AssemblyConfig {
    pub hut: HutConfig,
    pub platforms: PlatformConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub load_radius: i32,
    pub threads: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            load_radius: 1,
            threads: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GameConfig, WorldLayoutConfig};

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "world": { "seed": 7, "minPOIDistance": 6.5 } }"#).unwrap();
        assert_eq!(config.world.seed, 7);
        assert_eq!(config.world.min_poi_distance, 6.5);
        assert_eq!(config.world.world_radius, 50);
        assert_eq!(config.world.rescue_characters.len(), 5);
        assert_eq!(config.assembly.hut.max_stilts, 9);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = GameConfig::load_from(std::path::Path::new("/nonexistent/config.json"));
        assert_eq!(config.world, WorldLayoutConfig::default());
    }
}
