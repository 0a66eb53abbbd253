use super::sampling::ChunkRandom;
use super::ContentInput;
use crate::world_core::chunk::{Decoration, DecorationKind};
use crate::world_core::layer::Layer;
use crate::world_core::terrain::TerrainType;

/// Cosmetic dressing counts. No gameplay meaning beyond being reproducible.
pub struct DecorationLayer {
    stream: u32,
}

impl DecorationLayer {
    pub fn new(stream: u32) -> Self {
        Self { stream }
    }
}

impl<'a> Layer<ContentInput<'a>, Vec<Decoration>> for DecorationLayer {
    fn generate(&self, input: ContentInput<'a>) -> Vec<Decoration> {
        let mut random = ChunkRandom::new(input.coord, self.stream);
        let jungle = input.terrain == TerrainType::DenseJungle;

        let reeds = (random.next() * 20.0).floor() as u32 + 10;
        let lilypads = (random.next() * 15.0).floor() as u32 + 5;
        let debris = (random.next() * 5.0).floor() as u32;
        let drums = (random.next() * 3.0).floor() as u32;

        [
            (DecorationKind::Reed, reeds),
            (DecorationKind::Lilypad, lilypads),
            (DecorationKind::Debris, debris),
            (DecorationKind::BurntTree, if jungle { 15 } else { 5 }),
            (DecorationKind::Mangrove, if jungle { 20 } else { 10 }),
            (DecorationKind::Drum, drums),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (kind, count))| Decoration {
            id: format!("{}-dec-{i}", input.id),
            kind,
            count,
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::DecorationLayer;
    use crate::world_core::chunk::DecorationKind;
    use crate::world_core::content::ContentInput;
    use crate::world_core::layer::Layer;
    use crate::world_core::terrain::TerrainType;
    use glam::IVec2;

    #[test]
    fn counts_stay_in_range_and_jungle_is_denser() {
        let layer = DecorationLayer::new(9);
        for x in -20..20 {
            for terrain in [TerrainType::DenseJungle, TerrainType::River] {
                let decorations = layer.generate(ContentInput {
                    coord: IVec2::new(x, 3),
                    id: "d",
                    difficulty: 0.3,
                    terrain,
                    key_point: None,
                });
                assert_eq!(decorations.len(), 6);
                for decoration in &decorations {
                    let range = match decoration.kind {
                        DecorationKind::Reed => 10..=29,
                        DecorationKind::Lilypad => 5..=19,
                        DecorationKind::Debris => 0..=4,
                        DecorationKind::Drum => 0..=2,
                        DecorationKind::BurntTree => 5..=15,
                        DecorationKind::Mangrove => 10..=20,
                    };
                    assert!(range.contains(&decoration.count));
                }
                let mangroves = decorations[4].count;
                if terrain == TerrainType::DenseJungle {
                    assert_eq!(mangroves, 20);
                } else {
                    assert_eq!(mangroves, 10);
                }
            }
        }
    }
}
