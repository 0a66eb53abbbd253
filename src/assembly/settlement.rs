use std::f32::consts::{PI, TAU};
use std::str::FromStr;

use anyhow::anyhow;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::layouts::{layout_positions, rotation_for, LayoutPattern, RotationPolicy, Spacing};
use super::structure::{
    assemble_hut, assemble_platform, assemble_platform_network, assemble_watchtower, Footprint,
    HutVariant, PlatformOptions, PlatformSection, StructureArchetype, StructureTemplate,
};
use crate::world_core::config::{AssemblyConfig, HutConfig, PlatformConfig, Span};
use crate::world_core::paths::prim_mst;
use crate::world_core::random::SeededRandom;

const STRUCTURE_SEED_STRIDE: u32 = 1000;
const BRIDGE_SEED_OFFSET: u32 = 5000;
const BRIDGE_CHANCE: f64 = 0.7;
const BRIDGE_WIDTH: f32 = 1.2;
const ELEVATED_PATH_HEIGHT: f32 = 1.5;
const INHABITANT_SPREAD: f32 = 3.0;
const MAX_DECORATIONS_PER_TYPE: usize = 48;
const COMMAND_POST_ROOM: Span = Span::new(4.0, 5.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SettlementType {
    NativeVillage,
    FishingCamp,
    ScaleGuardOutpost,
    PrisonCompound,
    SiphonFacility,
    PlayerBase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Faction {
    Ura,
    ScaleGuard,
    Native,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PathStyle {
    Dirt,
    Planks,
    Stones,
    Elevated,
    Bridge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InhabitantType {
    Villager,
    Healer,
    Guard,
    Prisoner,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureQuota {
    pub archetype: StructureArchetype,
    pub min: usize,
    pub max: usize,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRules {
    pub pattern: LayoutPattern,
    pub spacing: Spacing,
    pub center_buffer: f32,
    pub rotation: RotationPolicy,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathRules {
    pub connect_all: bool,
    pub style: PathStyle,
    pub width: f32,
}

/// `density` is placements per square unit of settlement area.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DecorationDensity {
    pub kind: &'static str,
    pub density: f32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct InhabitantQuota {
    pub kind: InhabitantType,
    pub min: usize,
    pub max: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementConfig {
    pub settlement_type: SettlementType,
    pub structures: &'static [StructureQuota],
    pub layout: LayoutRules,
    pub paths: PathRules,
    pub decorations: &'static [DecorationDensity],
    pub inhabitants: &'static [InhabitantQuota],
}

const fn quota(archetype: StructureArchetype, min: usize, max: usize, required: bool) -> StructureQuota {
    StructureQuota {
        archetype,
        min,
        max,
        required,
    }
}

const fn decoration(kind: &'static str, density: f32) -> DecorationDensity {
    DecorationDensity { kind, density }
}

const fn inhabitants(kind: InhabitantType, min: usize, max: usize) -> InhabitantQuota {
    InhabitantQuota { kind, min, max }
}

static NATIVE_VILLAGE: SettlementConfig = SettlementConfig {
    settlement_type: SettlementType::NativeVillage,
    structures: &[
        quota(StructureArchetype::BasicHut, 3, 6, true),
        quota(StructureArchetype::Longhouse, 0, 1, false),
        quota(StructureArchetype::MedicalPost, 0, 1, false),
        quota(StructureArchetype::DockPlatform, 0, 2, false),
    ],
    layout: LayoutRules {
        pattern: LayoutPattern::Scattered,
        spacing: Spacing::new(4.0, 8.0),
        center_buffer: 3.0,
        rotation: RotationPolicy::FacingCenter,
    },
    paths: PathRules {
        connect_all: true,
        style: PathStyle::Dirt,
        width: 1.2,
    },
    decorations: &[
        decoration("FIRE_PIT", 0.02),
        decoration("DRYING_RACK", 0.03),
        decoration("POTTERY", 0.05),
    ],
    inhabitants: &[
        inhabitants(InhabitantType::Villager, 4, 10),
        inhabitants(InhabitantType::Healer, 0, 1),
    ],
};

static FISHING_CAMP: SettlementConfig = SettlementConfig {
    settlement_type: SettlementType::FishingCamp,
    structures: &[
        quota(StructureArchetype::BasicHut, 2, 4, true),
        quota(StructureArchetype::DockPlatform, 1, 3, true),
        quota(StructureArchetype::StorageShed, 1, 2, false),
    ],
    layout: LayoutRules {
        pattern: LayoutPattern::Linear,
        spacing: Spacing::new(3.0, 5.0),
        center_buffer: 0.0,
        rotation: RotationPolicy::FacingWater,
    },
    paths: PathRules {
        connect_all: true,
        style: PathStyle::Planks,
        width: 1.5,
    },
    decorations: &[
        decoration("FISHING_NET", 0.04),
        decoration("FISH_BASKET", 0.06),
        decoration("BOAT", 0.01),
    ],
    inhabitants: &[inhabitants(InhabitantType::Villager, 2, 6)],
};

static SCALE_GUARD_OUTPOST: SettlementConfig = SettlementConfig {
    settlement_type: SettlementType::ScaleGuardOutpost,
    structures: &[
        quota(StructureArchetype::CommandPost, 1, 1, true),
        quota(StructureArchetype::BasicHut, 2, 4, true),
        quota(StructureArchetype::Watchtower, 1, 2, true),
        quota(StructureArchetype::AmmoDepot, 1, 1, false),
    ],
    layout: LayoutRules {
        pattern: LayoutPattern::Defensive,
        spacing: Spacing::new(5.0, 8.0),
        center_buffer: 4.0,
        rotation: RotationPolicy::FacingCenter,
    },
    paths: PathRules {
        connect_all: true,
        style: PathStyle::Dirt,
        width: 2.0,
    },
    decorations: &[
        decoration("BARRICADE", 0.03),
        decoration("SANDBAG", 0.04),
        decoration("AMMO_CRATE", 0.02),
    ],
    inhabitants: &[inhabitants(InhabitantType::Guard, 4, 8)],
};

static PRISON_COMPOUND: SettlementConfig = SettlementConfig {
    settlement_type: SettlementType::PrisonCompound,
    structures: &[
        quota(StructureArchetype::CommandPost, 1, 1, true),
        quota(StructureArchetype::Watchtower, 2, 4, true),
        quota(StructureArchetype::BasicHut, 1, 2, false),
    ],
    layout: LayoutRules {
        pattern: LayoutPattern::Circular,
        spacing: Spacing::new(6.0, 10.0),
        // Room for the cage in the middle.
        center_buffer: 8.0,
        rotation: RotationPolicy::FacingCenter,
    },
    paths: PathRules {
        connect_all: true,
        style: PathStyle::Dirt,
        width: 2.0,
    },
    decorations: &[decoration("BARRICADE", 0.05), decoration("SPOTLIGHT", 0.02)],
    inhabitants: &[
        inhabitants(InhabitantType::Guard, 4, 8),
        inhabitants(InhabitantType::Prisoner, 1, 3),
    ],
};

static SIPHON_FACILITY: SettlementConfig = SettlementConfig {
    settlement_type: SettlementType::SiphonFacility,
    structures: &[
        quota(StructureArchetype::CommandPost, 1, 1, true),
        quota(StructureArchetype::StorageShed, 2, 4, true),
        quota(StructureArchetype::Watchtower, 1, 2, false),
    ],
    layout: LayoutRules {
        pattern: LayoutPattern::Grid,
        spacing: Spacing::new(6.0, 8.0),
        // The siphon itself stands in the middle.
        center_buffer: 5.0,
        rotation: RotationPolicy::Aligned,
    },
    paths: PathRules {
        connect_all: true,
        style: PathStyle::Planks,
        width: 2.5,
    },
    decorations: &[
        decoration("OIL_DRUM", 0.06),
        decoration("PIPE", 0.04),
        decoration("VALVE", 0.02),
    ],
    inhabitants: &[inhabitants(InhabitantType::Guard, 3, 6)],
};

static PLAYER_BASE: SettlementConfig = SettlementConfig {
    settlement_type: SettlementType::PlayerBase,
    structures: &[quota(StructureArchetype::DockPlatform, 1, 1, true)],
    layout: LayoutRules {
        pattern: LayoutPattern::Grid,
        spacing: Spacing::new(3.0, 3.0),
        center_buffer: 0.0,
        rotation: RotationPolicy::Aligned,
    },
    paths: PathRules {
        connect_all: true,
        style: PathStyle::Planks,
        width: 2.0,
    },
    decorations: &[],
    inhabitants: &[],
};

impl SettlementType {
    pub const ALL: [SettlementType; 6] = [
        SettlementType::NativeVillage,
        SettlementType::FishingCamp,
        SettlementType::ScaleGuardOutpost,
        SettlementType::PrisonCompound,
        SettlementType::SiphonFacility,
        SettlementType::PlayerBase,
    ];

    pub fn config(self) -> &'static SettlementConfig {
        match self {
            SettlementType::NativeVillage => &NATIVE_VILLAGE,
            SettlementType::FishingCamp => &FISHING_CAMP,
            SettlementType::ScaleGuardOutpost => &SCALE_GUARD_OUTPOST,
            SettlementType::PrisonCompound => &PRISON_COMPOUND,
            SettlementType::SiphonFacility => &SIPHON_FACILITY,
            SettlementType::PlayerBase => &PLAYER_BASE,
        }
    }

    /// Who usually holds a settlement of this type.
    pub fn default_faction(self) -> Faction {
        match self {
            SettlementType::NativeVillage | SettlementType::FishingCamp => Faction::Native,
            SettlementType::ScaleGuardOutpost
            | SettlementType::PrisonCompound
            | SettlementType::SiphonFacility => Faction::ScaleGuard,
            SettlementType::PlayerBase => Faction::Ura,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SettlementType::NativeVillage => "NATIVE_VILLAGE",
            SettlementType::FishingCamp => "FISHING_CAMP",
            SettlementType::ScaleGuardOutpost => "SCALE_GUARD_OUTPOST",
            SettlementType::PrisonCompound => "PRISON_COMPOUND",
            SettlementType::SiphonFacility => "SIPHON_FACILITY",
            SettlementType::PlayerBase => "PLAYER_BASE",
        }
    }
}

impl FromStr for SettlementType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        SettlementType::ALL
            .into_iter()
            .find(|t| t.name() == wanted)
            .ok_or_else(|| anyhow!("unknown settlement type `{s}`"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathSegment {
    pub id: String,
    pub start: Vec3,
    pub end: Vec3,
    pub width: f32,
    pub style: PathStyle,
    pub elevation: f32,
    pub waypoints: Vec<Vec3>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedStructure {
    pub template: StructureTemplate,
    pub world_position: Vec3,
    pub world_rotation: f32,
    pub faction: Faction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inhabitant {
    #[serde(rename = "type")]
    pub kind: InhabitantType,
    pub position: Vec3,
    pub faction: Faction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementDecoration {
    #[serde(rename = "type")]
    pub kind: String,
    pub position: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    #[serde(rename = "type")]
    pub settlement_type: SettlementType,
    pub center: Vec3,
    /// Largest structure distance from `center`.
    pub radius: f32,
    pub structures: Vec<PlacedStructure>,
    pub paths: Vec<PathSegment>,
    pub inhabitants: Vec<Inhabitant>,
    pub decorations: Vec<SettlementDecoration>,
    pub faction: Faction,
}

#[derive(Debug, Clone, Default)]
pub struct SettlementAssembler {
    config: AssemblyConfig,
}

impl SettlementAssembler {
    pub fn new(config: AssemblyConfig) -> Self {
        Self { config }
    }

    fn build_structure(&self, archetype: StructureArchetype, seed: u32) -> StructureTemplate {
        let hut = &self.config.hut;
        match archetype {
            StructureArchetype::BasicHut => assemble_hut(seed, hut, HutVariant::Basic),
            StructureArchetype::Longhouse => assemble_hut(seed, hut, HutVariant::Longhouse),
            StructureArchetype::MedicalPost => assemble_hut(seed, hut, HutVariant::Healer),
            StructureArchetype::Watchtower => assemble_watchtower(seed),
            StructureArchetype::CommandPost => {
                let command = HutConfig {
                    room_size: COMMAND_POST_ROOM,
                    ..hut.clone()
                };
                relabel(assemble_hut(seed, &command, HutVariant::Basic), archetype)
            }
            StructureArchetype::DockPlatform => {
                let platforms = &self.config.platforms;
                let section = platforms.section_size as f32;
                assemble_platform(
                    seed,
                    Footprint {
                        width: section,
                        depth: section,
                    },
                    platforms.min_height as f32,
                    PlatformOptions::default(),
                )
                .to_template()
            }
            StructureArchetype::StorageShed
            | StructureArchetype::AmmoDepot
            | StructureArchetype::BridgeSection => {
                relabel(assemble_hut(seed, hut, HutVariant::Basic), archetype)
            }
        }
    }

    pub fn assemble(
        &self,
        seed: u32,
        settlement_type: SettlementType,
        center: Vec3,
        faction: Faction,
    ) -> Settlement {
        let mut random = SeededRandom::new(seed);
        let config = settlement_type.config();

        let mut to_build: Vec<(StructureArchetype, usize)> = Vec::new();
        for quota in config.structures {
            let mut count = random.int(quota.min as i64, quota.max as i64) as usize;
            if quota.required && count == 0 {
                count = 1;
            }
            if count > 0 {
                to_build.push((quota.archetype, count));
            }
        }
        let requested: usize = to_build.iter().map(|(_, count)| count).sum();

        let positions = layout_positions(
            config.layout.pattern,
            &mut random,
            requested,
            config.layout.spacing,
            config.layout.center_buffer,
        );
        let mut positions = random.shuffle(&positions);
        if config.layout.pattern == LayoutPattern::Defensive {
            // The command post takes the reserved center slot.
            if let Some(center_slot) = positions.iter().position(|p| *p == Vec3::ZERO) {
                positions.swap(0, center_slot);
            }
            to_build.sort_by_key(|(archetype, _)| *archetype != StructureArchetype::CommandPost);
        }

        let mut structures = Vec::with_capacity(positions.len());
        let mut slots = positions.iter();
        let mut placed = 0u32;
        'archetypes: for (archetype, count) in to_build {
            for _ in 0..count {
                let Some(local) = slots.next() else {
                    break 'archetypes;
                };
                placed += 1;
                let world_rotation = rotation_for(*local, config.layout.rotation, &mut random);
                let structure_seed = seed.wrapping_add(placed.wrapping_mul(STRUCTURE_SEED_STRIDE));
                structures.push(PlacedStructure {
                    template: self.build_structure(archetype, structure_seed),
                    world_position: center + *local,
                    world_rotation,
                    faction,
                });
            }
        }
        if structures.len() < requested {
            log::warn!(
                "{} placed {} of {} structures",
                settlement_type.name(),
                structures.len(),
                requested
            );
        }

        let paths = connect_structures(&structures, &config.paths);

        let mut inhabitants = Vec::new();
        for quota in config.inhabitants {
            let count = random.int(quota.min as i64, quota.max as i64) as usize;
            for _ in 0..count {
                let Some(home) = random.pick(&structures) else {
                    break;
                };
                let home = home.world_position;
                let offset = Vec3::new(
                    random.range_f32(-INHABITANT_SPREAD, INHABITANT_SPREAD),
                    0.0,
                    random.range_f32(-INHABITANT_SPREAD, INHABITANT_SPREAD),
                );
                inhabitants.push(Inhabitant {
                    kind: quota.kind,
                    position: home + offset,
                    // Captives stay with the player's side whoever holds them.
                    faction: if quota.kind == InhabitantType::Prisoner {
                        Faction::Ura
                    } else {
                        faction
                    },
                });
            }
        }

        let radius = structures
            .iter()
            .map(|s| s.world_position.distance(center))
            .fold(0.0f32, f32::max);

        let mut decorations = Vec::new();
        for entry in config.decorations {
            let count = ((entry.density * PI * radius * radius).round() as usize)
                .min(MAX_DECORATIONS_PER_TYPE);
            for _ in 0..count {
                let angle = random.range_f32(0.0, TAU);
                let distance = radius * (random.next() as f32).sqrt();
                decorations.push(SettlementDecoration {
                    kind: entry.kind.to_string(),
                    position: center + Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance),
                });
            }
        }

        log::debug!(
            "assembled {} at {center}: {} structures, {} paths, {} inhabitants, radius {radius:.1}",
            settlement_type.name(),
            structures.len(),
            paths.len(),
            inhabitants.len()
        );

        Settlement {
            settlement_type,
            center,
            radius,
            structures,
            paths,
            inhabitants,
            decorations,
            faction,
        }
    }

    /// Platforms over an `area_size` square around `center`, with bridges
    /// between some of the pairs closer than `connect_radius`.
    pub fn assemble_elevated_network(
        &self,
        seed: u32,
        center: Vec3,
        area_size: f32,
        count: usize,
    ) -> ElevatedNetwork {
        assemble_elevated_network(seed, center, area_size, count, &self.config.platforms)
    }
}

fn relabel(mut template: StructureTemplate, archetype: StructureArchetype) -> StructureTemplate {
    template.archetype = archetype;
    template
}

fn connect_structures(structures: &[PlacedStructure], rules: &PathRules) -> Vec<PathSegment> {
    if !rules.connect_all || structures.len() < 2 {
        return Vec::new();
    }
    let elevation = if rules.style == PathStyle::Elevated {
        ELEVATED_PATH_HEIGHT
    } else {
        0.0
    };
    prim_mst(structures.len(), 0, |a, b| {
        structures[a]
            .world_position
            .distance(structures[b].world_position) as f64
    })
    .into_iter()
    .map(|(from, to)| PathSegment {
        id: format!("path-{from}-{to}"),
        start: structures[from].world_position,
        end: structures[to].world_position,
        width: rules.width,
        style: rules.style,
        elevation,
        waypoints: Vec::new(),
    })
    .collect()
}

pub fn assemble_settlement(
    seed: u32,
    settlement_type: SettlementType,
    center: Vec3,
    faction: Faction,
) -> Settlement {
    SettlementAssembler::default().assemble(seed, settlement_type, center, faction)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevatedNetwork {
    pub platforms: Vec<PlatformSection>,
    pub bridges: Vec<PathSegment>,
}

pub fn assemble_elevated_network(
    seed: u32,
    center: Vec3,
    area_size: f32,
    count: usize,
    config: &PlatformConfig,
) -> ElevatedNetwork {
    let mut platforms = assemble_platform_network(seed, count, area_size, config);
    let mut random = SeededRandom::new(seed.wrapping_add(BRIDGE_SEED_OFFSET));
    let connect_radius = config.connect_radius as f32;

    let mut bridges = Vec::new();
    for (i, a) in platforms.iter().enumerate() {
        for (j, b) in platforms.iter().enumerate().skip(i + 1) {
            let gap = Vec2::new(a.position.x, a.position.z).distance(Vec2::new(b.position.x, b.position.z));
            if gap < connect_radius && random.chance(BRIDGE_CHANCE) {
                bridges.push(PathSegment {
                    id: format!("bridge-{i}-{j}"),
                    start: a.position + center,
                    end: b.position + center,
                    width: BRIDGE_WIDTH,
                    style: PathStyle::Bridge,
                    elevation: (a.height + b.height) / 2.0,
                    waypoints: Vec::new(),
                });
            }
        }
    }

    for platform in &mut platforms {
        platform.position += center;
    }

    ElevatedNetwork { platforms, bridges }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn every_settlement(seeds: std::ops::Range<u32>) -> impl Iterator<Item = Settlement> {
        seeds.flat_map(|seed| {
            SettlementType::ALL.into_iter().map(move |t| {
                assemble_settlement(seed, t, Vec3::new(300.0, 0.0, -200.0), Faction::ScaleGuard)
            })
        })
    }

    #[test]
    fn every_structure_lies_within_the_radius() {
        for settlement in every_settlement(0..40) {
            for structure in &settlement.structures {
                let d = structure.world_position.distance(settlement.center);
                assert!(d <= settlement.radius + 1e-3, "{:?}", settlement.settlement_type);
            }
        }
    }

    #[test]
    fn prisoners_always_belong_to_ura() {
        for seed in 0..30 {
            let compound = assemble_settlement(seed, SettlementType::PrisonCompound, Vec3::ZERO, Faction::ScaleGuard);
            let prisoners: Vec<_> = compound
                .inhabitants
                .iter()
                .filter(|i| i.kind == InhabitantType::Prisoner)
                .collect();
            assert!((1..=3).contains(&prisoners.len()));
            assert!(prisoners.iter().all(|p| p.faction == Faction::Ura));
            assert!(compound
                .inhabitants
                .iter()
                .filter(|i| i.kind == InhabitantType::Guard)
                .all(|g| g.faction == Faction::ScaleGuard));
        }
    }

    #[test]
    fn inhabitants_stay_near_a_structure() {
        for settlement in every_settlement(0..20) {
            for inhabitant in &settlement.inhabitants {
                let nearest = settlement
                    .structures
                    .iter()
                    .map(|s| s.world_position.distance(inhabitant.position))
                    .fold(f32::INFINITY, f32::min);
                assert!(nearest <= 10.0);
            }
        }
    }

    #[test]
    fn settlements_are_deterministic() {
        for t in SettlementType::ALL {
            let a = assemble_settlement(1234, t, Vec3::ZERO, Faction::Native);
            let b = assemble_settlement(1234, t, Vec3::ZERO, Faction::Native);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn paths_form_a_spanning_tree() {
        for settlement in every_settlement(0..10) {
            let n = settlement.structures.len();
            assert_eq!(settlement.paths.len(), n.saturating_sub(1));
        }
    }

    #[test]
    fn outposts_carry_their_required_structures() {
        for seed in 0..20 {
            let outpost = assemble_settlement(seed, SettlementType::ScaleGuardOutpost, Vec3::ZERO, Faction::ScaleGuard);
            let count = |a: StructureArchetype| {
                outpost
                    .structures
                    .iter()
                    .filter(|s| s.template.archetype == a)
                    .count()
            };
            assert_eq!(count(StructureArchetype::CommandPost), 1);
            assert!((1..=2).contains(&count(StructureArchetype::Watchtower)));
            assert!((2..=4).contains(&count(StructureArchetype::BasicHut)));
            let center: Vec<_> = outpost
                .structures
                .iter()
                .filter(|s| s.world_position == Vec3::ZERO)
                .collect();
            assert_eq!(center.len(), 1);
            assert_eq!(center[0].template.archetype, StructureArchetype::CommandPost);
        }
    }

    #[test]
    fn player_base_is_a_single_dock() {
        let base = assemble_settlement(5, SettlementType::PlayerBase, Vec3::new(0.0, 0.0, 0.0), Faction::Ura);
        assert_eq!(base.structures.len(), 1);
        assert_eq!(base.structures[0].template.archetype, StructureArchetype::DockPlatform);
        assert!(base.inhabitants.is_empty());
        assert!(base.paths.is_empty());
        assert_eq!(base.radius, base.structures[0].world_position.length());
    }

    #[test]
    fn fishing_camps_face_the_water() {
        let camp = assemble_settlement(77, SettlementType::FishingCamp, Vec3::ZERO, Faction::Native);
        assert!(camp.structures.len() >= 4);
        assert!(camp.structures.iter().all(|s| s.world_rotation == 0.0));
        assert!(camp.paths.iter().all(|p| p.style == PathStyle::Planks));
    }

    #[test]
    fn decorations_scale_with_area_and_are_capped() {
        for settlement in every_settlement(0..10) {
            let config = settlement.settlement_type.config();
            for entry in config.decorations {
                let placed = settlement
                    .decorations
                    .iter()
                    .filter(|d| d.kind == entry.kind)
                    .count();
                let expected = ((entry.density * PI * settlement.radius * settlement.radius).round()
                    as usize)
                    .min(MAX_DECORATIONS_PER_TYPE);
                assert_eq!(placed, expected);
            }
            for decoration in &settlement.decorations {
                assert!(decoration.position.distance(settlement.center) <= settlement.radius + 1e-3);
            }
        }
    }

    #[test]
    fn settlement_type_parses_loosely() {
        assert_eq!(
            "native-village".parse::<SettlementType>().unwrap(),
            SettlementType::NativeVillage
        );
        assert_eq!(
            "PRISON_COMPOUND".parse::<SettlementType>().unwrap(),
            SettlementType::PrisonCompound
        );
        assert!("castle".parse::<SettlementType>().is_err());
    }

    #[test]
    fn bridges_only_join_close_platforms() {
        let config = PlatformConfig::default();
        let center = Vec3::new(10.0, 0.0, 10.0);
        let mut bridged = 0;
        for seed in 0..20 {
            let network = assemble_elevated_network(seed, center, 20.0, 6, &config);
            for bridge in &network.bridges {
                bridged += 1;
                let gap = Vec2::new(bridge.start.x, bridge.start.z)
                    .distance(Vec2::new(bridge.end.x, bridge.end.z));
                assert!(gap < config.connect_radius as f32 + 1e-3);
                assert_eq!(bridge.style, PathStyle::Bridge);
                assert!((1.5..=4.0).contains(&bridge.elevation));
            }
            for platform in &network.platforms {
                assert!((platform.position.x - center.x).abs() <= 10.0);
            }
        }
        assert!(bridged > 0);
    }
}
