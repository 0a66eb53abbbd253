use glam::{IVec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::world_core::terrain::TerrainType;

/// Side length of a chunk in world units.
pub const CHUNK_SIZE: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PredatorKind {
    Gator,
    Snake,
    Snapper,
    Scout,
}

impl PredatorKind {
    pub fn base_hp(self, is_heavy: bool) -> f32 {
        match (self, is_heavy) {
            (PredatorKind::Gator, false) => 10.0,
            (PredatorKind::Gator, true) => 20.0,
            (PredatorKind::Snapper, false) => 20.0,
            (PredatorKind::Snapper, true) => 40.0,
            (PredatorKind::Snake, _) => 2.0,
            (PredatorKind::Scout, _) => 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectiveKind {
    Siphon,
    GasStockpile,
    PrisonCage,
    ExtractionPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InteractionKind {
    Villager,
    Healer,
    Hut,
    Raft,
    ClamBasket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnvironmentKind {
    Platform,
    Climbable,
    OilSlick,
    MudPit,
    ToxicSludge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredatorEntity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PredatorKind,
    pub position: Vec3,
    pub hp: f32,
    pub is_heavy: bool,
    pub suppression: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveEntity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ObjectiveKind,
    pub position: Vec3,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionEntity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    pub position: Vec3,
    #[serde(default)]
    pub is_heavy: bool,
    #[serde(default)]
    pub interacted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentEntity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EnvironmentKind,
    pub position: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Entity {
    Predator(PredatorEntity),
    Objective(ObjectiveEntity),
    Interaction(InteractionEntity),
    Environment(EnvironmentEntity),
}

impl Entity {
    pub fn predator(id: String, kind: PredatorKind, position: Vec3, hp: f32, is_heavy: bool) -> Self {
        Entity::Predator(PredatorEntity {
            id,
            kind,
            position,
            hp,
            is_heavy,
            suppression: 0.0,
        })
    }

    pub fn objective(id: String, kind: ObjectiveKind, position: Vec3, hp: Option<f32>) -> Self {
        Entity::Objective(ObjectiveEntity {
            id,
            kind,
            position,
            hp,
            objective_id: None,
        })
    }

    pub fn prison_cage(character: &str, position: Vec3) -> Self {
        Entity::Objective(ObjectiveEntity {
            id: format!("cage-{character}"),
            kind: ObjectiveKind::PrisonCage,
            position,
            hp: None,
            objective_id: Some(character.to_string()),
        })
    }

    pub fn interaction(id: String, kind: InteractionKind, position: Vec3) -> Self {
        Entity::Interaction(InteractionEntity {
            id,
            kind,
            position,
            is_heavy: false,
            interacted: false,
        })
    }

    pub fn environment(id: String, kind: EnvironmentKind, position: Vec3) -> Self {
        Entity::Environment(EnvironmentEntity { id, kind, position })
    }

    pub fn id(&self) -> &str {
        match self {
            Entity::Predator(e) => &e.id,
            Entity::Objective(e) => &e.id,
            Entity::Interaction(e) => &e.id,
            Entity::Environment(e) => &e.id,
        }
    }

    pub fn position(&self) -> Vec3 {
        match self {
            Entity::Predator(e) => e.position,
            Entity::Objective(e) => e.position,
            Entity::Interaction(e) => e.position,
            Entity::Environment(e) => e.position,
        }
    }

    /// The discriminant string the entity serializes with, e.g. `"PRISON_CAGE"`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Entity::Predator(e) => match e.kind {
                PredatorKind::Gator => "GATOR",
                PredatorKind::Snake => "SNAKE",
                PredatorKind::Snapper => "SNAPPER",
                PredatorKind::Scout => "SCOUT",
            },
            Entity::Objective(e) => match e.kind {
                ObjectiveKind::Siphon => "SIPHON",
                ObjectiveKind::GasStockpile => "GAS_STOCKPILE",
                ObjectiveKind::PrisonCage => "PRISON_CAGE",
                ObjectiveKind::ExtractionPoint => "EXTRACTION_POINT",
            },
            Entity::Interaction(e) => match e.kind {
                InteractionKind::Villager => "VILLAGER",
                InteractionKind::Healer => "HEALER",
                InteractionKind::Hut => "HUT",
                InteractionKind::Raft => "RAFT",
                InteractionKind::ClamBasket => "CLAM_BASKET",
            },
            Entity::Environment(e) => match e.kind {
                EnvironmentKind::Platform => "PLATFORM",
                EnvironmentKind::Climbable => "CLIMBABLE",
                EnvironmentKind::OilSlick => "OIL_SLICK",
                EnvironmentKind::MudPit => "MUD_PIT",
                EnvironmentKind::ToxicSludge => "TOXIC_SLUDGE",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecorationKind {
    Reed,
    Lilypad,
    Debris,
    BurntTree,
    Mangrove,
    Drum,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoration {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DecorationKind,
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkContent {
    pub entities: Vec<Entity>,
    pub decorations: Vec<Decoration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkData {
    pub id: String,
    pub x: i32,
    pub z: i32,
    /// Derived from the coordinate alone, never from the world seed.
    pub seed: u32,
    pub terrain_type: TerrainType,
    pub secured: bool,
    pub entities: Vec<Entity>,
    pub decorations: Vec<Decoration>,
}

impl ChunkData {
    pub fn coord(&self) -> IVec2 {
        IVec2::new(self.x, self.z)
    }

    pub fn count_of(&self, type_name: &str) -> usize {
        self.entities
            .iter()
            .filter(|e| e.type_name() == type_name)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::{Entity, ObjectiveKind, PredatorKind};
    use glam::Vec3;

    #[test]
    fn entities_serialize_with_category_and_type_tags() {
        let cage = Entity::prison_cage("whiskers", Vec3::new(8.0, 0.0, 0.0));
        let json = serde_json::to_value(&cage).unwrap();
        assert_eq!(json["category"], "OBJECTIVE");
        assert_eq!(json["type"], "PRISON_CAGE");
        assert_eq!(json["objectiveId"], "whiskers");
        assert_eq!(json["id"], "cage-whiskers");

        let back: Entity = serde_json::from_value(json).unwrap();
        assert_eq!(back, cage);
        assert_eq!(back.type_name(), "PRISON_CAGE");
    }

    #[test]
    fn heavy_predators_hit_harder_only_for_big_types() {
        assert_eq!(PredatorKind::Gator.base_hp(true), 20.0);
        assert_eq!(PredatorKind::Snapper.base_hp(false), 20.0);
        assert_eq!(PredatorKind::Snake.base_hp(true), 2.0);
        assert_eq!(PredatorKind::Scout.base_hp(false), 3.0);
    }

    #[test]
    fn objective_without_hp_omits_field() {
        let extraction = Entity::objective(
            "extract-0,0".to_string(),
            ObjectiveKind::ExtractionPoint,
            Vec3::ZERO,
            None,
        );
        let json = serde_json::to_value(&extraction).unwrap();
        assert!(json.get("hp").is_none());
    }
}
