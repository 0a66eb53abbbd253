use glam::Vec3;

use super::sampling::ChunkRandom;
use super::ContentInput;
use crate::world_core::chunk::{Entity, InteractionEntity, InteractionKind, ObjectiveKind};
use crate::world_core::layer::Layer;

/// Loose objectives and interactables sprinkled over ordinary chunks. POI
/// chunks get their content from the template layer instead.
pub struct ScatterLayer {
    stream: u32,
}

impl ScatterLayer {
    pub fn new(stream: u32) -> Self {
        Self { stream }
    }
}

impl<'a> Layer<ContentInput<'a>, Vec<Entity>> for ScatterLayer {
    fn generate(&self, input: ContentInput<'a>) -> Vec<Entity> {
        if input.is_poi() {
            return Vec::new();
        }

        let mut random = ChunkRandom::new(input.coord, self.stream);
        let id = input.id;
        let difficulty = input.difficulty;
        let mut entities = Vec::new();

        if random.next() > 0.8 - difficulty * 0.2 {
            let (x, z) = (random.offset(40.0), random.offset(40.0));
            entities.push(Entity::objective(
                format!("siphon-{id}"),
                ObjectiveKind::Siphon,
                Vec3::new(x, 0.0, z),
                Some(40.0 + difficulty * 20.0),
            ));
        }

        if random.next() > 0.85 {
            let (x, z) = (random.offset(40.0), random.offset(40.0));
            entities.push(Entity::objective(
                format!("gas-{id}"),
                ObjectiveKind::GasStockpile,
                Vec3::new(x, 0.5, z),
                Some(30.0),
            ));
        }

        if random.next() > 0.75 {
            let (x, z) = (random.offset(35.0), random.offset(35.0));
            // A heavy basket is booby-trapped.
            let is_heavy = random.next() > 0.5;
            entities.push(Entity::Interaction(InteractionEntity {
                id: format!("basket-{id}"),
                kind: InteractionKind::ClamBasket,
                position: Vec3::new(x, 0.2, z),
                is_heavy,
                interacted: false,
            }));
        }

        if difficulty < 0.5 && random.next() > 0.7 {
            let is_healer = random.next() > 0.85;
            let (x, z) = (random.offset(30.0), random.offset(30.0));
            entities.push(Entity::interaction(
                format!("hut-{id}"),
                InteractionKind::Hut,
                Vec3::new(x, 0.0, z),
            ));
            entities.push(Entity::interaction(
                format!("vil-{id}"),
                if is_healer {
                    InteractionKind::Healer
                } else {
                    InteractionKind::Villager
                },
                Vec3::new(x + 3.0, 0.0, z + 2.0),
            ));
        }

        entities
    }
}

#[cfg(test)]
mod tests {
    use super::ScatterLayer;
    use crate::world_core::content::ContentInput;
    use crate::world_core::layer::Layer;
    use crate::world_core::terrain::TerrainType;
    use glam::IVec2;

    #[test]
    fn huts_only_appear_at_low_difficulty_and_bring_a_resident() {
        let layer = ScatterLayer::new(3);
        let mut huts = 0;
        for x in 0..200 {
            for difficulty in [0.1f32, 0.9] {
                let entities = layer.generate(ContentInput {
                    coord: IVec2::new(x, 17),
                    id: "s",
                    difficulty,
                    terrain: TerrainType::Marsh,
                    key_point: None,
                });
                let hut = entities.iter().position(|e| e.type_name() == "HUT");
                if difficulty >= 0.5 {
                    assert!(hut.is_none());
                    continue;
                }
                if let Some(index) = hut {
                    huts += 1;
                    let resident = &entities[index + 1];
                    assert!(matches!(resident.type_name(), "VILLAGER" | "HEALER"));
                    let offset = resident.position() - entities[index].position();
                    assert!((offset.x - 3.0).abs() < 1e-4 && (offset.z - 2.0).abs() < 1e-4);
                }
            }
        }
        assert!(huts > 0);
    }
}
