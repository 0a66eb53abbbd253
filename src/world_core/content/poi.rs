use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::sampling::ChunkRandom;
use super::ContentInput;
use crate::world_core::chunk::{
    Entity, EnvironmentKind, InteractionKind, ObjectiveKind, PredatorKind,
};
use crate::world_core::layer::Layer;
use crate::world_core::layout::{PointOfInterestType, WorldPoint};

/// Fixed entity templates for points of interest.
pub struct PoiLayer {
    stream: u32,
}

impl PoiLayer {
    pub fn new(stream: u32) -> Self {
        Self { stream }
    }
}

/// `count` positions evenly spaced on a circle, starting at +X.
fn ring(count: usize, radius: f32, phase: f32) -> impl Iterator<Item = (usize, Vec3)> {
    (0..count).map(move |i| {
        let angle = i as f32 / count as f32 * TAU + phase;
        (i, Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius))
    })
}

fn hosted_cage(point: &WorldPoint, position: Vec3) -> Option<Entity> {
    point
        .rescue_character
        .as_deref()
        .map(|character| Entity::prison_cage(character, position))
}

impl<'a> Layer<ContentInput<'a>, Vec<Entity>> for PoiLayer {
    fn generate(&self, input: ContentInput<'a>) -> Vec<Entity> {
        let Some(point) = input.key_point else {
            return Vec::new();
        };
        let mut random = ChunkRandom::new(input.coord, self.stream);
        let id = input.id;
        let mut entities = Vec::new();

        match point.poi_type {
            PointOfInterestType::Lz => {
                entities.push(Entity::objective(
                    format!("extract-{id}"),
                    ObjectiveKind::ExtractionPoint,
                    Vec3::ZERO,
                    None,
                ));
            }
            PointOfInterestType::Village => {
                entities.push(Entity::interaction(
                    format!("hut-{id}-main"),
                    InteractionKind::Hut,
                    Vec3::ZERO,
                ));
                for (i, position) in ring(3, 5.0, 0.0) {
                    entities.push(Entity::interaction(
                        format!("villager-{id}-{i}"),
                        InteractionKind::Villager,
                        position,
                    ));
                }
            }
            PointOfInterestType::HealerHub => {
                entities.push(Entity::interaction(
                    format!("healer-{id}"),
                    InteractionKind::Healer,
                    Vec3::ZERO,
                ));
                entities.extend(hosted_cage(point, Vec3::new(8.0, 0.0, 0.0)));
            }
            PointOfInterestType::PrisonCamp => {
                entities.extend(hosted_cage(point, Vec3::ZERO));
                for (i, position) in ring(4, 12.0, 0.0) {
                    entities.push(Entity::predator(
                        format!("guard-{id}-{i}"),
                        PredatorKind::Snapper,
                        position,
                        30.0,
                        false,
                    ));
                }
                entities.push(Entity::predator(
                    format!("scout-{id}"),
                    PredatorKind::Scout,
                    Vec3::new(0.0, 5.0, 15.0),
                    3.0,
                    false,
                ));
            }
            PointOfInterestType::EnemyOutpost => {
                entities.push(Entity::interaction(
                    format!("outpost-hut-{id}"),
                    InteractionKind::Hut,
                    Vec3::ZERO,
                ));
                for (i, position) in ring(3, 10.0, 0.0) {
                    let kind = if random.next() > 0.5 {
                        PredatorKind::Gator
                    } else {
                        PredatorKind::Snapper
                    };
                    let is_heavy = random.next() > 0.7;
                    entities.push(Entity::predator(
                        format!("outpost-enemy-{id}-{i}"),
                        kind,
                        position,
                        15.0,
                        is_heavy,
                    ));
                }
            }
            PointOfInterestType::SiphonCluster => {
                for (i, position) in ring(3, 15.0, 0.0) {
                    entities.push(Entity::objective(
                        format!("siphon-{id}-{i}"),
                        ObjectiveKind::Siphon,
                        position,
                        Some(50.0),
                    ));
                }
                entities.push(Entity::environment(
                    format!("sludge-{id}"),
                    EnvironmentKind::ToxicSludge,
                    Vec3::new(0.0, 0.05, 0.0),
                ));
            }
            PointOfInterestType::GasDepot => {
                for i in 0..4 {
                    let (x, z) = (random.offset(20.0), random.offset(20.0));
                    entities.push(Entity::objective(
                        format!("gas-{id}-{i}"),
                        ObjectiveKind::GasStockpile,
                        Vec3::new(x, 0.0, z),
                        Some(30.0),
                    ));
                }
                entities.extend(hosted_cage(point, Vec3::new(0.0, 0.0, -15.0)));
            }
            PointOfInterestType::BossArena => {
                entities.push(Entity::objective(
                    format!("boss-siphon-{id}"),
                    ObjectiveKind::Siphon,
                    Vec3::ZERO,
                    Some(200.0),
                ));
                for (i, position) in ring(4, 25.0, 0.0) {
                    entities.push(Entity::objective(
                        format!("siphon-{id}-{i}"),
                        ObjectiveKind::Siphon,
                        position,
                        Some(75.0),
                    ));
                }
                for (i, position) in ring(5, 35.0, PI / 5.0) {
                    entities.push(Entity::predator(
                        format!("boss-gator-{id}-{i}"),
                        PredatorKind::Gator,
                        position,
                        40.0,
                        true,
                    ));
                }
                for (i, x) in [-15.0, 15.0].into_iter().enumerate() {
                    entities.push(Entity::predator(
                        format!("elite-snapper-{id}-{i}"),
                        PredatorKind::Snapper,
                        Vec3::new(x, 0.0, 20.0),
                        50.0,
                        false,
                    ));
                }
            }
            PointOfInterestType::RaftDock => {
                entities.push(Entity::interaction(
                    format!("raft-{id}"),
                    InteractionKind::Raft,
                    Vec3::new(0.0, 0.2, 0.0),
                ));
                entities.push(Entity::environment(
                    format!("platform-{id}"),
                    EnvironmentKind::Platform,
                    Vec3::new(5.0, 0.5, 0.0),
                ));
            }
            PointOfInterestType::Waypoint => {}
        }

        entities
    }
}
