mod decorations;
mod environment;
mod poi;
mod predators;
pub mod sampling;
mod scatter;

use glam::{IVec2, Vec3};

use self::decorations::DecorationLayer;
use self::environment::EnvironmentLayer;
use self::poi::PoiLayer;
use self::predators::PredatorLayer;
use self::scatter::ScatterLayer;

use crate::world_core::chunk::{ChunkContent, Entity, ObjectiveKind};
use crate::world_core::layer::Layer;
use crate::world_core::layout::{PointOfInterestType, WorldPoint};
use crate::world_core::terrain::TerrainType;

// Each layer draws from its own hash stream so their draws never interleave.
const PREDATOR_STREAM: u32 = 0x0001_0001;
const ENVIRONMENT_STREAM: u32 = 0x0002_0003;
const SCATTER_STREAM: u32 = 0x0003_0005;
const POI_STREAM: u32 = 0x0004_0007;
const DECORATION_STREAM: u32 = 0x0005_000B;

#[derive(Clone, Copy)]
pub struct ContentInput<'a> {
    pub coord: IVec2,
    /// `"x,z"`; prefixes every entity id.
    pub id: &'a str,
    pub difficulty: f32,
    pub terrain: TerrainType,
    pub key_point: Option<&'a WorldPoint>,
}

impl ContentInput<'_> {
    pub fn is_poi(&self) -> bool {
        self.key_point
            .is_some_and(|p| p.poi_type != PointOfInterestType::Waypoint)
    }
}

pub struct ContentLayer {
    predators: PredatorLayer,
    environment: EnvironmentLayer,
    scatter: ScatterLayer,
    poi: PoiLayer,
    decorations: DecorationLayer,
}

impl ContentLayer {
    pub fn new() -> Self {
        Self {
            predators: PredatorLayer::new(PREDATOR_STREAM),
            environment: EnvironmentLayer::new(ENVIRONMENT_STREAM),
            scatter: ScatterLayer::new(SCATTER_STREAM),
            poi: PoiLayer::new(POI_STREAM),
            decorations: DecorationLayer::new(DECORATION_STREAM),
        }
    }
}

impl Default for ContentLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Layer<ContentInput<'a>, ChunkContent> for ContentLayer {
    fn generate(&self, input: ContentInput<'a>) -> ChunkContent {
        let mut entities = self.predators.generate(input);
        entities.extend(self.environment.generate(input));
        entities.extend(self.scatter.generate(input));
        entities.extend(self.poi.generate(input));

        // The origin chunk must always offer a way out.
        let has_extraction = entities.iter().any(|e| {
            matches!(e, Entity::Objective(o) if o.kind == ObjectiveKind::ExtractionPoint)
        });
        if input.coord == IVec2::ZERO && !has_extraction {
            entities.push(Entity::objective(
                format!("extract-{}", input.id),
                ObjectiveKind::ExtractionPoint,
                Vec3::ZERO,
                None,
            ));
        }

        ChunkContent {
            entities,
            decorations: self.decorations.generate(input),
        }
    }
}
