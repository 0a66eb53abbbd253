use glam::Vec3;

use super::sampling::ChunkRandom;
use super::ContentInput;
use crate::world_core::chunk::{Entity, PredatorKind, CHUNK_SIZE};
use crate::world_core::layer::Layer;

const SNAKE_PERCH_HEIGHT: f32 = 5.0;

pub struct PredatorLayer {
    stream: u32,
}

impl PredatorLayer {
    pub fn new(stream: u32) -> Self {
        Self { stream }
    }
}

fn kind_for_roll(roll: f32) -> PredatorKind {
    if roll > 0.9 {
        PredatorKind::Snapper
    } else if roll > 0.75 {
        PredatorKind::Snake
    } else if roll > 0.6 {
        PredatorKind::Scout
    } else {
        PredatorKind::Gator
    }
}

impl<'a> Layer<ContentInput<'a>, Vec<Entity>> for PredatorLayer {
    fn generate(&self, input: ContentInput<'a>) -> Vec<Entity> {
        let mut random = ChunkRandom::new(input.coord, self.stream);
        let difficulty = input.difficulty;

        let base = (difficulty * 4.0).floor() as usize + 2;
        let count = base + (random.next() * 3.0).floor() as usize;

        let mut predators = Vec::with_capacity(count);
        for i in 0..count {
            let kind = kind_for_roll(random.next() + difficulty * 0.3);
            let is_heavy = random.next() < difficulty * 0.4;
            let x = random.offset(CHUNK_SIZE);
            let z = random.offset(CHUNK_SIZE);
            let y = if kind == PredatorKind::Snake {
                SNAKE_PERCH_HEIGHT
            } else {
                0.0
            };
            predators.push(Entity::predator(
                format!("e-{}-{i}", input.id),
                kind,
                Vec3::new(x, y, z),
                kind.base_hp(is_heavy),
                is_heavy,
            ));
        }

        predators
    }
}

#[cfg(test)]
mod tests {
    use super::{kind_for_roll, PredatorLayer};
    use crate::world_core::chunk::{Entity, PredatorKind, CHUNK_SIZE};
    use crate::world_core::content::ContentInput;
    use crate::world_core::layer::Layer;
    use crate::world_core::terrain::TerrainType;
    use glam::IVec2;

    #[test]
    fn roll_thresholds_pick_tiers() {
        assert_eq!(kind_for_roll(0.95), PredatorKind::Snapper);
        assert_eq!(kind_for_roll(0.8), PredatorKind::Snake);
        assert_eq!(kind_for_roll(0.65), PredatorKind::Scout);
        assert_eq!(kind_for_roll(0.2), PredatorKind::Gator);
    }

    #[test]
    fn count_scales_with_difficulty() {
        let layer = PredatorLayer::new(1);
        for (x, difficulty) in [(3, 0.0f32), (9, 0.5), (14, 1.0)] {
            let input = ContentInput {
                coord: IVec2::new(x, 2),
                id: "test",
                difficulty,
                terrain: TerrainType::Marsh,
                key_point: None,
            };
            let predators = layer.generate(input);
            let base = (difficulty * 4.0).floor() as usize + 2;
            assert!((base..=base + 2).contains(&predators.len()));
            for entity in &predators {
                let Entity::Predator(p) = entity else {
                    panic!("non-predator from predator layer");
                };
                assert!(p.position.x.abs() <= CHUNK_SIZE / 2.0);
                assert!(p.position.z.abs() <= CHUNK_SIZE / 2.0);
                assert_eq!(p.hp, p.kind.base_hp(p.is_heavy));
                assert_eq!(p.suppression, 0.0);
            }
        }
    }
}
