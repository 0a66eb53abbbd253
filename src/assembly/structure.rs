use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::world_core::config::{HutConfig, PlatformConfig};
use crate::world_core::random::SeededRandom;

const WALL_HEIGHT: f32 = 1.8;
const PLANK_WIDTH: f32 = 0.3;
/// Floors above this get a ladder and a climb point.
const LADDER_THRESHOLD: f32 = 0.8;
const LADDER_OFFSET: f32 = 0.3;
const PLATFORM_CENTER_STILT_SIZE: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StructureArchetype {
    BasicHut,
    Longhouse,
    Watchtower,
    DockPlatform,
    StorageShed,
    MedicalPost,
    AmmoDepot,
    CommandPost,
    BridgeSection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentType {
    Stilt,
    FloorPlank,
    FloorSection,
    WallFrame,
    WallBamboo,
    WallThatch,
    WindowOpening,
    DoorFrame,
    RoofBeam,
    RoofThatch,
    RoofTin,
    RopeBinding,
    Ladder,
    Railing,
    LanternHook,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Material {
    Wood,
    Bamboo,
    Thatch,
    Metal,
    Rope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    North,
    South,
    East,
    West,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::North, Side::South, Side::East, Side::West];

    /// Unit vector pointing away from the structure on this side.
    pub fn outward_normal(self) -> Vec3 {
        match self {
            Side::North => Vec3::NEG_Z,
            Side::South => Vec3::Z,
            Side::East => Vec3::X,
            Side::West => Vec3::NEG_X,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Side::North => "NORTH",
            Side::South => "SOUTH",
            Side::East => "EAST",
            Side::West => "WEST",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HutVariant {
    Basic,
    Longhouse,
    Healer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureComponent {
    pub id: String,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub local_position: Vec3,
    /// Euler angles in radians.
    pub local_rotation: Vec3,
    pub scale: Vec3,
    pub material: Material,
    /// 0..=1; lower reads as more worn.
    pub condition: f32,
    pub is_destructible: bool,
}

impl StructureComponent {
    fn new(
        id: impl Into<String>,
        component_type: ComponentType,
        material: Material,
        local_position: Vec3,
        local_rotation: Vec3,
        scale: Vec3,
        condition: f32,
    ) -> Self {
        Self {
            id: id.into(),
            component_type,
            local_position,
            local_rotation,
            scale,
            material,
            condition,
            is_destructible: true,
        }
    }

    fn fixed(mut self) -> Self {
        self.is_destructible = false;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub width: f32,
    pub depth: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapPoint {
    pub id: String,
    pub local_position: Vec3,
    pub direction: Vec3,
    pub accepts_types: Vec<StructureArchetype>,
    pub occupied: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InteractionPointType {
    Enter,
    Climb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionPoint {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: InteractionPointType,
    pub local_position: Vec3,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureTemplate {
    pub archetype: StructureArchetype,
    pub components: Vec<StructureComponent>,
    pub footprint: Footprint,
    pub height: f32,
    pub snap_points: Vec<SnapPoint>,
    pub interaction_points: Vec<InteractionPoint>,
}

impl StructureTemplate {
    pub fn count_of(&self, component_type: ComponentType) -> usize {
        self.components
            .iter()
            .filter(|c| c.component_type == component_type)
            .count()
    }

    /// Walls plus door frames. Always 4 for a hut.
    pub fn wall_coverage(&self) -> usize {
        self.count_of(ComponentType::WallBamboo)
            + self.count_of(ComponentType::WallThatch)
            + self.count_of(ComponentType::DoorFrame)
    }
}

struct Placement {
    position: Vec3,
    rotation: Vec3,
    scale: Vec3,
}

fn wall_placement(side: Side, width: f32, depth: f32, floor_height: f32, wall_height: f32) -> Placement {
    let y = floor_height + wall_height / 2.0;
    match side {
        Side::North => Placement {
            position: Vec3::new(0.0, y, -depth / 2.0),
            rotation: Vec3::ZERO,
            scale: Vec3::new(width, wall_height, 0.08),
        },
        Side::South => Placement {
            position: Vec3::new(0.0, y, depth / 2.0),
            rotation: Vec3::new(0.0, PI, 0.0),
            scale: Vec3::new(width, wall_height, 0.08),
        },
        Side::East => Placement {
            position: Vec3::new(width / 2.0, y, 0.0),
            rotation: Vec3::new(0.0, FRAC_PI_2, 0.0),
            scale: Vec3::new(depth, wall_height, 0.08),
        },
        Side::West => Placement {
            position: Vec3::new(-width / 2.0, y, 0.0),
            rotation: Vec3::new(0.0, -FRAC_PI_2, 0.0),
            scale: Vec3::new(depth, wall_height, 0.08),
        },
    }
}

/// Position and lean of a ladder leaning against `side`.
fn ladder_placement(side: Side, width: f32, depth: f32, floor_height: f32) -> (Vec3, Vec3) {
    let y = floor_height / 2.0;
    match side {
        Side::North => (
            Vec3::new(0.0, y, -depth / 2.0 - LADDER_OFFSET),
            Vec3::new(-0.1, 0.0, 0.0),
        ),
        Side::South => (
            Vec3::new(0.0, y, depth / 2.0 + LADDER_OFFSET),
            Vec3::new(0.1, PI, 0.0),
        ),
        Side::East => (
            Vec3::new(width / 2.0 + LADDER_OFFSET, y, 0.0),
            Vec3::new(0.0, FRAC_PI_2, 0.1),
        ),
        Side::West => (
            Vec3::new(-width / 2.0 - LADDER_OFFSET, y, 0.0),
            Vec3::new(0.0, -FRAC_PI_2, -0.1),
        ),
    }
}

/// Corners first, then mid-edges and a centre post as the target count and
/// room size allow. Never fewer than the four corners.
fn stilt_positions(width: f32, depth: f32, config: &HutConfig, random: &mut SeededRandom) -> Vec<Vec2> {
    let (hw, hd) = (width / 2.0, depth / 2.0);
    let mut positions = vec![
        Vec2::new(-hw, -hd),
        Vec2::new(hw, -hd),
        Vec2::new(-hw, hd),
        Vec2::new(hw, hd),
    ];

    let target = random.int(config.min_stilts as i64, config.max_stilts as i64).max(4) as usize;
    if target > 4 && width > 3.0 {
        positions.push(Vec2::new(0.0, -hd));
        positions.push(Vec2::new(0.0, hd));
    }
    if target > 6 && depth > 3.0 {
        positions.push(Vec2::new(-hw, 0.0));
        positions.push(Vec2::new(hw, 0.0));
    }
    if target > 8 {
        positions.push(Vec2::ZERO);
    }

    positions.truncate(target);
    positions
}

pub fn assemble_hut(seed: u32, config: &HutConfig, variant: HutVariant) -> StructureTemplate {
    let mut random = SeededRandom::new(seed);
    let wear = config.wear_variation as f32;
    let room = config.room_size;

    let width = match variant {
        HutVariant::Longhouse => random.range(room.max, room.max * 2.0),
        HutVariant::Basic | HutVariant::Healer => random.range(room.min, room.max),
    } as f32;
    let depth = random.range(room.min, room.max) as f32;
    let floor_height = random.range(config.floor_height.min, config.floor_height.max) as f32;
    let roof_pitch = random.range(config.roof_pitch.min, config.roof_pitch.max) as f32;

    let mut components = Vec::new();

    for (i, stilt) in stilt_positions(width, depth, config, &mut random)
        .into_iter()
        .enumerate()
    {
        let condition = 1.0 - random.range_f32(0.0, wear);
        let lean = Vec3::new(0.0, random.range_f32(-0.05, 0.05), random.range_f32(-0.02, 0.02));
        components.push(StructureComponent::new(
            format!("stilt-{i}"),
            ComponentType::Stilt,
            Material::Wood,
            Vec3::new(stilt.x, floor_height / 2.0, stilt.y),
            lean,
            Vec3::new(0.15, floor_height, 0.15),
            condition,
        ));
        components.push(
            StructureComponent::new(
                format!("binding-{i}"),
                ComponentType::RopeBinding,
                Material::Rope,
                Vec3::new(stilt.x, floor_height - 0.1, stilt.y),
                Vec3::ZERO,
                Vec3::new(0.2, 0.15, 0.2),
                condition,
            )
            .fixed(),
        );
    }

    let plank_count = (depth / PLANK_WIDTH).ceil().max(1.0) as usize;
    let plank_depth = depth / plank_count as f32;
    for i in 0..plank_count {
        let z = -depth / 2.0 + (i as f32 + 0.5) * plank_depth;
        let condition = 1.0 - random.range_f32(0.0, wear);
        let tilt = random.range_f32(-0.02, 0.02);
        components.push(StructureComponent::new(
            format!("plank-{i}"),
            ComponentType::FloorPlank,
            Material::Wood,
            Vec3::new(0.0, floor_height, z),
            Vec3::new(0.0, 0.0, tilt),
            Vec3::new(width, 0.05, plank_depth - 0.02),
            condition,
        ));
    }

    let open_side = random.pick(&Side::ALL).copied().unwrap_or(Side::South);
    for side in Side::ALL {
        let wall = wall_placement(side, width, depth, floor_height, WALL_HEIGHT);
        if side == open_side {
            components.push(StructureComponent::new(
                format!("door-{}", side.label()),
                ComponentType::DoorFrame,
                Material::Wood,
                wall.position,
                wall.rotation,
                Vec3::new(1.2, WALL_HEIGHT, 0.1),
                1.0 - random.range_f32(0.0, wear),
            ));
            continue;
        }

        let (component_type, material) = if random.chance(0.5) {
            (ComponentType::WallBamboo, Material::Bamboo)
        } else {
            (ComponentType::WallThatch, Material::Thatch)
        };
        components.push(StructureComponent::new(
            format!("wall-{}", side.label()),
            component_type,
            material,
            wall.position,
            wall.rotation,
            wall.scale,
            1.0 - random.range_f32(0.0, wear),
        ));

        if random.chance(0.4) {
            components.push(
                StructureComponent::new(
                    format!("window-{}", side.label()),
                    ComponentType::WindowOpening,
                    Material::Wood,
                    wall.position + Vec3::new(0.0, 0.3, 0.0),
                    wall.rotation,
                    Vec3::new(0.6, 0.5, 0.1),
                    1.0,
                )
                .fixed(),
            );
        }
    }

    let roof_height = WALL_HEIGHT * roof_pitch;
    let roof_y = floor_height + WALL_HEIGHT + roof_height / 2.0;
    let (roof_type, roof_material) = if random.chance(0.2) {
        (ComponentType::RoofTin, Material::Metal)
    } else {
        (ComponentType::RoofThatch, Material::Thatch)
    };
    components.push(StructureComponent::new(
        "roof-beam-main",
        ComponentType::RoofBeam,
        Material::Wood,
        Vec3::new(0.0, roof_y, 0.0),
        Vec3::ZERO,
        Vec3::new(0.12, 0.12, depth + 0.5),
        1.0 - random.range_f32(0.0, wear * 0.5),
    ));
    for (side, label) in [(-1.0f32, "west"), (1.0, "east")] {
        let angle = roof_height.atan2(width / 2.0) * side;
        components.push(StructureComponent::new(
            format!("roof-{label}"),
            roof_type,
            roof_material,
            Vec3::new(side * width / 4.0, roof_y, 0.0),
            Vec3::new(0.0, 0.0, angle),
            Vec3::new(width / 2.0 + 0.3, 0.1, depth + 0.4),
            1.0 - random.range_f32(0.0, wear),
        ));
    }

    let elevated = floor_height > LADDER_THRESHOLD;
    let (ladder_position, ladder_rotation) = ladder_placement(open_side, width, depth, floor_height);
    if elevated {
        components.push(StructureComponent::new(
            "ladder",
            ComponentType::Ladder,
            Material::Wood,
            ladder_position,
            ladder_rotation,
            Vec3::new(0.5, floor_height, 0.1),
            1.0 - random.range_f32(0.0, wear),
        ));
    }

    if variant == HutVariant::Healer {
        components.push(
            StructureComponent::new(
                "lantern",
                ComponentType::LanternHook,
                Material::Metal,
                Vec3::new(0.0, floor_height + WALL_HEIGHT - 0.3, 0.0),
                Vec3::ZERO,
                Vec3::new(0.3, 0.4, 0.3),
                1.0,
            )
            .fixed(),
        );
    }

    let snap_points = Side::ALL
        .into_iter()
        .filter(|side| *side != open_side)
        .map(|side| {
            let mut local_position = wall_placement(side, width, depth, floor_height, 0.0).position;
            local_position.y = floor_height;
            SnapPoint {
                id: format!("snap-{}", side.label()),
                local_position,
                direction: side.outward_normal(),
                accepts_types: vec![
                    StructureArchetype::BasicHut,
                    StructureArchetype::Longhouse,
                    StructureArchetype::StorageShed,
                    StructureArchetype::BridgeSection,
                ],
                occupied: false,
            }
        })
        .collect();

    let mut interaction_points = vec![InteractionPoint {
        id: "enter".to_string(),
        kind: InteractionPointType::Enter,
        local_position: Vec3::new(ladder_position.x, 0.0, ladder_position.z),
        radius: 1.5,
    }];
    if elevated {
        interaction_points.push(InteractionPoint {
            id: "climb".to_string(),
            kind: InteractionPointType::Climb,
            local_position: ladder_position,
            radius: 1.0,
        });
    }

    StructureTemplate {
        archetype: match variant {
            HutVariant::Basic => StructureArchetype::BasicHut,
            HutVariant::Longhouse => StructureArchetype::Longhouse,
            HutVariant::Healer => StructureArchetype::MedicalPost,
        },
        components,
        footprint: Footprint {
            width: width + 1.0,
            depth: depth + 1.0,
        },
        height: floor_height + WALL_HEIGHT + roof_height,
        snap_points,
        interaction_points,
    }
}

pub fn assemble_watchtower(seed: u32) -> StructureTemplate {
    let mut random = SeededRandom::new(seed);
    let tower_height = random.range_f32(4.0, 6.0);
    let platform_size = 2.5f32;
    let mut components = Vec::new();

    // Poles lean inward from a wide base to a narrower top.
    let (bottom_radius, top_radius) = (1.2f32, 0.8f32);
    for i in 0..4 {
        let angle = i as f32 / 4.0 * TAU + FRAC_PI_4;
        let bottom = Vec2::new(angle.cos(), angle.sin()) * bottom_radius;
        let top = Vec2::new(angle.cos(), angle.sin()) * top_radius;
        let lean_x = (bottom.x - top.x).atan2(tower_height);
        let lean_z = (bottom.y - top.y).atan2(tower_height);
        let mid = (bottom + top) / 2.0;
        components.push(StructureComponent::new(
            format!("pole-{i}"),
            ComponentType::Stilt,
            Material::Wood,
            Vec3::new(mid.x, tower_height / 2.0, mid.y),
            Vec3::new(lean_z, 0.0, -lean_x),
            Vec3::new(0.12, tower_height * 1.1, 0.12),
            1.0 - random.range_f32(0.0, 0.2),
        ));
    }

    for (level, fraction) in [0.3f32, 0.6].into_iter().enumerate() {
        let height = tower_height * fraction;
        let radius = bottom_radius - fraction * 0.4;
        for i in 0..4 {
            let angle = i as f32 / 4.0 * TAU;
            let next_angle = (i + 1) as f32 / 4.0 * TAU;
            let mid = Vec2::new(angle.cos() + next_angle.cos(), angle.sin() + next_angle.sin())
                / 2.0
                * radius;
            components.push(StructureComponent::new(
                format!("brace-{level}-{i}"),
                ComponentType::WallFrame,
                Material::Wood,
                Vec3::new(mid.x, height, mid.y),
                Vec3::new(0.0, -angle - FRAC_PI_4, 0.0),
                Vec3::new(1.5, 0.08, 0.08),
                1.0 - random.range_f32(0.0, 0.15),
            ));
        }
    }

    components.push(StructureComponent::new(
        "platform",
        ComponentType::FloorSection,
        Material::Wood,
        Vec3::new(0.0, tower_height, 0.0),
        Vec3::ZERO,
        Vec3::new(platform_size, 0.1, platform_size),
        1.0 - random.range_f32(0.0, 0.15),
    ));

    for i in 0..4 {
        let angle = i as f32 / 4.0 * TAU;
        components.push(StructureComponent::new(
            format!("railing-{i}"),
            ComponentType::Railing,
            Material::Wood,
            Vec3::new(
                angle.cos() * platform_size / 2.0,
                tower_height + 0.5,
                angle.sin() * platform_size / 2.0,
            ),
            Vec3::new(0.0, angle, 0.0),
            Vec3::new(platform_size, 0.8, 0.05),
            1.0 - random.range_f32(0.0, 0.2),
        ));
    }

    components.push(StructureComponent::new(
        "ladder",
        ComponentType::Ladder,
        Material::Wood,
        Vec3::new(0.0, tower_height / 2.0, platform_size / 2.0 + 0.2),
        Vec3::new(0.1, 0.0, 0.0),
        Vec3::new(0.6, tower_height, 0.15),
        1.0 - random.range_f32(0.0, 0.15),
    ));

    components.push(StructureComponent::new(
        "roof",
        ComponentType::RoofThatch,
        Material::Thatch,
        Vec3::new(0.0, tower_height + 1.2, 0.0),
        Vec3::new(0.0, FRAC_PI_4, 0.0),
        Vec3::new(platform_size + 0.5, 0.8, platform_size + 0.5),
        1.0 - random.range_f32(0.0, 0.2),
    ));

    StructureTemplate {
        archetype: StructureArchetype::Watchtower,
        components,
        footprint: Footprint {
            width: 3.0,
            depth: 3.0,
        },
        height: tower_height + 2.0,
        snap_points: Vec::new(),
        interaction_points: vec![InteractionPoint {
            id: "climb".to_string(),
            kind: InteractionPointType::Climb,
            local_position: Vec3::new(0.0, 0.5, platform_size / 2.0 + 0.3),
            radius: 1.0,
        }],
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSection {
    pub id: String,
    pub position: Vec3,
    pub size: Footprint,
    pub height: f32,
    /// Ground-level stilt positions relative to `position`.
    pub stilts: Vec<Vec3>,
    pub railings: Vec<Side>,
    pub has_ladder: bool,
    pub ladder_side: Side,
}

#[derive(Debug, Clone, Copy)]
pub struct PlatformOptions {
    pub has_railings: bool,
    pub has_ladder: bool,
    /// Picked at random when `None`.
    pub ladder_side: Option<Side>,
}

impl Default for PlatformOptions {
    fn default() -> Self {
        Self {
            has_railings: true,
            has_ladder: true,
            ladder_side: None,
        }
    }
}

pub fn assemble_platform(seed: u32, size: Footprint, height: f32, options: PlatformOptions) -> PlatformSection {
    let mut random = SeededRandom::new(seed);
    let ladder_side = match options.ladder_side {
        Some(side) => side,
        None => random.pick(&Side::ALL).copied().unwrap_or(Side::South),
    };

    let (hw, hd) = (size.width / 2.0, size.depth / 2.0);
    let mut stilts = vec![
        Vec3::new(-hw, 0.0, -hd),
        Vec3::new(hw, 0.0, -hd),
        Vec3::new(-hw, 0.0, hd),
        Vec3::new(hw, 0.0, hd),
    ];
    if size.width > PLATFORM_CENTER_STILT_SIZE || size.depth > PLATFORM_CENTER_STILT_SIZE {
        stilts.push(Vec3::ZERO);
    }

    let railings = if options.has_railings {
        Side::ALL
            .into_iter()
            .filter(|side| *side != ladder_side)
            .collect()
    } else {
        Vec::new()
    };

    PlatformSection {
        id: format!("platform-{seed}"),
        position: Vec3::new(0.0, height, 0.0),
        size,
        height,
        stilts,
        railings,
        has_ladder: options.has_ladder,
        ladder_side,
    }
}

impl PlatformSection {
    /// Renders the section as a `DOCK_PLATFORM` template so it can be placed
    /// like any other structure.
    pub fn to_template(&self) -> StructureTemplate {
        let (w, d, h) = (self.size.width, self.size.depth, self.height);
        let mut components: Vec<StructureComponent> = self
            .stilts
            .iter()
            .enumerate()
            .map(|(i, stilt)| {
                StructureComponent::new(
                    format!("stilt-{i}"),
                    ComponentType::Stilt,
                    Material::Wood,
                    Vec3::new(stilt.x, h / 2.0, stilt.z),
                    Vec3::ZERO,
                    Vec3::new(0.15, h, 0.15),
                    1.0,
                )
            })
            .collect();

        components.push(StructureComponent::new(
            "deck",
            ComponentType::FloorSection,
            Material::Wood,
            Vec3::new(0.0, h, 0.0),
            Vec3::ZERO,
            Vec3::new(w, 0.1, d),
            1.0,
        ));

        for side in &self.railings {
            let edge = wall_placement(*side, w, d, h, 1.0);
            components.push(StructureComponent::new(
                format!("railing-{}", side.label()),
                ComponentType::Railing,
                Material::Wood,
                edge.position,
                edge.rotation,
                Vec3::new(edge.scale.x, 0.8, 0.05),
                1.0,
            ));
        }

        let mut interaction_points = Vec::new();
        if self.has_ladder {
            let (position, rotation) = ladder_placement(self.ladder_side, w, d, h);
            components.push(StructureComponent::new(
                "ladder",
                ComponentType::Ladder,
                Material::Wood,
                position,
                rotation,
                Vec3::new(0.5, h, 0.1),
                1.0,
            ));
            interaction_points.push(InteractionPoint {
                id: "climb".to_string(),
                kind: InteractionPointType::Climb,
                local_position: position,
                radius: 1.0,
            });
        }

        StructureTemplate {
            archetype: StructureArchetype::DockPlatform,
            components,
            footprint: self.size,
            height: h + 1.0,
            snap_points: Vec::new(),
            interaction_points,
        }
    }
}

/// Up to `count` platforms scattered over an `area_size` square, kept at least
/// `1.5 * section_size` apart. The first platform always has a ladder so the
/// network can be reached from the ground.
pub fn assemble_platform_network(
    seed: u32,
    count: usize,
    area_size: f32,
    config: &PlatformConfig,
) -> Vec<PlatformSection> {
    let mut random = SeededRandom::new(seed);
    let min_distance = config.section_size as f32 * 1.5;
    let half = area_size / 2.0;

    let mut positions: Vec<Vec3> = Vec::with_capacity(count);
    for _ in 0..count * 10 {
        if positions.len() >= count {
            break;
        }
        let x = random.range_f32(-half, half);
        let z = random.range_f32(-half, half);
        let height = random.range(config.min_height, config.max_height) as f32;

        let candidate = Vec2::new(x, z);
        let clear = positions
            .iter()
            .all(|p| Vec2::new(p.x, p.z).distance(candidate) >= min_distance);
        if clear {
            positions.push(Vec3::new(x, height, z));
        }
    }

    let section = config.section_size as f32;
    positions
        .into_iter()
        .enumerate()
        .map(|(i, position)| {
            let size = Footprint {
                width: section + random.range_f32(-0.5, 0.5),
                depth: section + random.range_f32(-0.5, 0.5),
            };
            let has_ladder = i == 0 || random.chance(0.3);
            let mut platform = assemble_platform(
                seed.wrapping_add(i as u32 * 1000),
                size,
                position.y,
                PlatformOptions {
                    has_ladder,
                    ..PlatformOptions::default()
                },
            );
            platform.position = position;
            platform
        })
        .collect()
}
