use std::sync::Arc;

use glam::IVec2;

use crate::world_core::chunk::ChunkData;
use crate::world_core::content::{ContentInput, ContentLayer};
use crate::world_core::layer::Layer;
use crate::world_core::layout::{chunk_id, WorldLayout};

/// `|x * 31 + z * 17|`, independent of the world seed.
pub fn chunk_seed(coord: IVec2) -> u32 {
    (coord.x as i64 * 31 + coord.y as i64 * 17).unsigned_abs() as u32
}

pub struct ChunkGenerator {
    layout: Arc<WorldLayout>,
    content_layer: ContentLayer,
}

impl ChunkGenerator {
    pub fn new(layout: Arc<WorldLayout>) -> Self {
        Self {
            layout,
            content_layer: ContentLayer::new(),
        }
    }

    pub fn layout(&self) -> &Arc<WorldLayout> {
        &self.layout
    }

    pub fn generate_chunk(&self, coord: IVec2) -> ChunkData {
        let id = chunk_id(coord);
        let key_point = self.layout.key_coordinate_for_chunk(coord);
        let terrain = self.layout.terrain_for_chunk(coord);
        let difficulty = self.layout.difficulty_for_chunk(coord) as f32;

        let content = self.content_layer.generate(ContentInput {
            coord,
            id: &id,
            difficulty,
            terrain,
            key_point,
        });

        log::debug!(
            "generated chunk {id}: {:?}, difficulty {difficulty:.2}, {} entities",
            terrain,
            content.entities.len()
        );

        ChunkData {
            x: coord.x,
            z: coord.y,
            seed: chunk_seed(coord),
            terrain_type: terrain,
            secured: false,
            entities: content.entities,
            decorations: content.decorations,
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::{chunk_seed, ChunkGenerator};
    use crate::world_core::chunk::Entity;
    use crate::world_core::config::WorldLayoutConfig;
    use crate::world_core::layout::{generate_world_layout, PointOfInterestType};
    use glam::IVec2;

    fn generator(seed: u32) -> ChunkGenerator {
        let config = WorldLayoutConfig {
            seed,
            ..WorldLayoutConfig::default()
        };
        ChunkGenerator::new(Arc::new(generate_world_layout(&config)))
    }

    fn type_multiset(entities: &[Entity]) -> Vec<&'static str> {
        let mut types: Vec<&'static str> = entities.iter().map(Entity::type_name).collect();
        types.sort_unstable();
        types
    }

    #[test]
    fn chunk_generation_is_deterministic_for_same_layout() {
        let generator = generator(42);
        let a = generator.generate_chunk(IVec2::new(5, 5));
        let b = generator.generate_chunk(IVec2::new(5, 5));
        assert_eq!(a.seed, b.seed);
        assert_eq!(type_multiset(&a.entities), type_multiset(&b.entities));
        assert_eq!(a, b);
    }

    #[test]
    fn chunks_do_not_depend_on_generation_order() {
        let generator = generator(7);
        let coords: Vec<IVec2> = (-3..=3)
            .flat_map(|x| (-3..=3).map(move |z| IVec2::new(x, z)))
            .collect();
        let forward: Vec<_> = coords.iter().map(|c| generator.generate_chunk(*c)).collect();
        let mut backward: Vec<_> = coords
            .iter()
            .rev()
            .map(|c| generator.generate_chunk(*c))
            .collect();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn origin_has_exactly_one_extraction_point() {
        for seed in [1, 42, 12345] {
            let chunk = generator(seed).generate_chunk(IVec2::ZERO);
            assert_eq!(chunk.count_of("EXTRACTION_POINT"), 1);
            assert_eq!(chunk.id, "0,0");
        }
    }

    #[test]
    fn rescue_hosts_hold_a_matching_cage() {
        let mut prison_camps_seen = 0;
        for seed in 0..40 {
            let generator = generator(seed);
            let layout = generator.layout().clone();
            let host = layout.rescue_location("whiskers").unwrap();
            if host.poi_type == PointOfInterestType::PrisonCamp {
                prison_camps_seen += 1;
            }
            let chunk = generator.generate_chunk(host.coord());
            let cage = chunk.entities.iter().find_map(|e| match e {
                Entity::Objective(o) if o.id == "cage-whiskers" => Some(o),
                _ => None,
            });
            assert_eq!(
                cage.and_then(|c| c.objective_id.as_deref()),
                Some("whiskers"),
                "seed {seed}, host {:?}",
                host.poi_type
            );
        }
        assert!(prison_camps_seen > 0);
    }

    #[test]
    fn entity_ids_are_unique_within_a_chunk() {
        let generator = generator(99);
        for x in -6..=6 {
            for z in -6..=6 {
                let chunk = generator.generate_chunk(IVec2::new(x, z));
                let ids: HashSet<&str> = chunk.entities.iter().map(Entity::id).collect();
                assert_eq!(ids.len(), chunk.entities.len(), "chunk {}", chunk.id);
            }
        }
    }

    #[test]
    fn chunk_seed_ignores_world_seed() {
        assert_eq!(chunk_seed(IVec2::new(2, -3)), (2i32 * 31 - 3 * 17).unsigned_abs());
        assert_eq!(
            generator(1).generate_chunk(IVec2::new(4, 4)).seed,
            generator(2).generate_chunk(IVec2::new(4, 4)).seed
        );
    }
}
