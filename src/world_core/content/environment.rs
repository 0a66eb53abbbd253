use glam::Vec3;

use super::sampling::ChunkRandom;
use super::ContentInput;
use crate::world_core::chunk::{Entity, EnvironmentKind, InteractionKind, CHUNK_SIZE};
use crate::world_core::layer::Layer;
use crate::world_core::terrain::TerrainType;

/// Terrain-driven hazards and traversal aids.
pub struct EnvironmentLayer {
    stream: u32,
}

impl EnvironmentLayer {
    pub fn new(stream: u32) -> Self {
        Self { stream }
    }
}

impl<'a> Layer<ContentInput<'a>, Vec<Entity>> for EnvironmentLayer {
    fn generate(&self, input: ContentInput<'a>) -> Vec<Entity> {
        let mut random = ChunkRandom::new(input.coord, self.stream);
        let id = input.id;
        let is_poi = input.is_poi();
        let mut entities = Vec::new();

        match input.terrain {
            TerrainType::DenseJungle => {
                let platforms = (random.next() * 2.0).floor() as usize + usize::from(!is_poi);
                for i in 0..platforms {
                    let x = random.offset(CHUNK_SIZE - 20.0);
                    let y = 0.5 + random.next() * 2.0;
                    let z = random.offset(CHUNK_SIZE - 20.0);
                    entities.push(Entity::environment(
                        format!("p-{id}-{i}"),
                        EnvironmentKind::Platform,
                        Vec3::new(x, y, z),
                    ));
                }

                let climbables = (random.next() * 2.0).floor() as usize + 1;
                for i in 0..climbables {
                    let x = random.offset(CHUNK_SIZE - 30.0);
                    let z = random.offset(CHUNK_SIZE - 30.0);
                    entities.push(Entity::environment(
                        format!("c-{id}-{i}"),
                        EnvironmentKind::Climbable,
                        Vec3::new(x, 5.0, z),
                    ));
                }
            }
            TerrainType::Marsh => {
                if random.next() > 0.5 {
                    let (x, z) = (random.offset(40.0), random.offset(40.0));
                    entities.push(Entity::environment(
                        format!("mud-{id}"),
                        EnvironmentKind::MudPit,
                        Vec3::new(x, 0.05, z),
                    ));
                }
                if random.next() > 0.7 {
                    let (x, z) = (random.offset(40.0), random.offset(40.0));
                    entities.push(Entity::environment(
                        format!("sludge-env-{id}"),
                        EnvironmentKind::ToxicSludge,
                        Vec3::new(x, 0.05, z),
                    ));
                }
            }
            TerrainType::River => {
                if random.next() > 0.6 {
                    let (x, z) = (random.offset(30.0), random.offset(30.0));
                    entities.push(Entity::environment(
                        format!("oil-{id}"),
                        EnvironmentKind::OilSlick,
                        Vec3::new(x, 0.02, z),
                    ));
                }
                // Drifting rafts would clutter a POI template.
                if random.next() > 0.75 && !is_poi {
                    let (x, z) = (random.offset(40.0), random.offset(40.0));
                    entities.push(Entity::interaction(
                        format!("raft-env-{id}"),
                        InteractionKind::Raft,
                        Vec3::new(x, 0.2, z),
                    ));
                }
            }
        }

        entities
    }
}

#[cfg(test)]
mod tests {
    use super::EnvironmentLayer;
    use crate::world_core::chunk::Entity;
    use crate::world_core::content::ContentInput;
    use crate::world_core::layer::Layer;
    use crate::world_core::terrain::TerrainType;
    use glam::IVec2;

    fn input(x: i32, terrain: TerrainType) -> ContentInput<'static> {
        ContentInput {
            coord: IVec2::new(x, -x),
            id: "t",
            difficulty: 0.5,
            terrain,
            key_point: None,
        }
    }

    #[test]
    fn jungle_always_has_something_to_climb() {
        let layer = EnvironmentLayer::new(7);
        for x in 0..30 {
            let entities = layer.generate(input(x, TerrainType::DenseJungle));
            let climbables = entities
                .iter()
                .filter(|e| e.type_name() == "CLIMBABLE")
                .count();
            let platforms = entities
                .iter()
                .filter(|e| e.type_name() == "PLATFORM")
                .count();
            assert!((1..=2).contains(&climbables));
            assert!((1..=2).contains(&platforms));
        }
    }

    #[test]
    fn hazards_match_terrain() {
        let layer = EnvironmentLayer::new(7);
        for x in 0..40 {
            for entity in layer.generate(input(x, TerrainType::Marsh)) {
                assert!(matches!(entity.type_name(), "MUD_PIT" | "TOXIC_SLUDGE"));
            }
            for entity in layer.generate(input(x, TerrainType::River)) {
                assert!(matches!(entity, Entity::Environment(_) | Entity::Interaction(_)));
                assert!(matches!(entity.type_name(), "OIL_SLICK" | "RAFT"));
            }
        }
    }
}
