use std::collections::{BTreeMap, HashMap, VecDeque};

use glam::{DVec2, IVec2};
use serde::{Deserialize, Serialize};

use crate::world_core::config::WorldLayoutConfig;
use crate::world_core::paths::generate_paths;
use crate::world_core::poisson::{poisson_disc_sample, DEFAULT_MAX_ATTEMPTS};
use crate::world_core::random::SeededRandom;
use crate::world_core::rivers::{generate_river_paths, DEFAULT_RIVER_COUNT};
use crate::world_core::terrain::{determine_terrain_type, TerrainType, TerrainZones};

/// Candidates inside this box around the origin are reserved for the LZ.
const LZ_CLEARANCE: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PointOfInterestType {
    Lz,
    Village,
    HealerHub,
    PrisonCamp,
    EnemyOutpost,
    SiphonCluster,
    GasDepot,
    BossArena,
    Waypoint,
    RaftDock,
}

impl PointOfInterestType {
    pub fn display_name(self) -> &'static str {
        match self {
            PointOfInterestType::Lz => "Landing Zone / Base",
            PointOfInterestType::Village => "Native Village",
            PointOfInterestType::HealerHub => "Healer's Grove",
            PointOfInterestType::PrisonCamp => "Prison Camp",
            PointOfInterestType::EnemyOutpost => "Scale-Guard Outpost",
            PointOfInterestType::SiphonCluster => "Siphon Cluster",
            PointOfInterestType::GasDepot => "Gas Depot",
            PointOfInterestType::BossArena => "The Great Siphon",
            PointOfInterestType::Waypoint => "Waypoint",
            PointOfInterestType::RaftDock => "River Crossing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldPoint {
    pub x: i32,
    pub z: i32,
    #[serde(rename = "type")]
    pub poi_type: PointOfInterestType,
    pub difficulty: f64,
    pub terrain_type: TerrainType,
    pub connections: Vec<IVec2>,
    pub rescue_character: Option<String>,
    pub is_boss_area: bool,
    pub special_objective: Option<String>,
}

impl WorldPoint {
    pub fn coord(&self) -> IVec2 {
        IVec2::new(self.x, self.z)
    }

    pub fn id(&self) -> String {
        chunk_id(self.coord())
    }

    pub fn distance_from_origin(&self) -> f64 {
        self.coord().as_dvec2().length()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldPath {
    pub from: IVec2,
    pub to: IVec2,
    pub terrain_type: TerrainType,
}

/// Immutable result of one generation pass. Regenerating means building a new
/// layout; nothing here is mutated after `generate_world_layout` returns.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldLayout {
    seed: u32,
    world_radius: i32,
    /// Insertion order; the LZ is always first.
    points: Vec<WorldPoint>,
    #[serde(skip)]
    index: HashMap<IVec2, usize>,
    rescue_locations: BTreeMap<String, IVec2>,
    paths: Vec<WorldPath>,
    terrain_zones: TerrainZones,
}

pub fn chunk_id(coord: IVec2) -> String {
    format!("{},{}", coord.x, coord.y)
}

pub fn parse_chunk_id(id: &str) -> Option<IVec2> {
    let (x, z) = id.split_once(',')?;
    Some(IVec2::new(x.trim().parse().ok()?, z.trim().parse().ok()?))
}

/// `min(1, distance / world_radius * 1.2)`; shared by POIs and ordinary chunks.
pub fn difficulty_at(coord: IVec2, world_radius: i32) -> f64 {
    let radius = world_radius.max(1) as f64;
    let normalized = (coord.as_dvec2().length() / radius).min(1.0);
    (normalized * 1.2).min(1.0)
}

struct Quotas {
    villages: usize,
    outposts: usize,
    siphons: usize,
}

struct Assignment {
    poi_type: PointOfInterestType,
    rescue_character: Option<String>,
    is_boss_area: bool,
    special_objective: Option<String>,
}

impl Assignment {
    fn plain(poi_type: PointOfInterestType) -> Self {
        Self {
            poi_type,
            rescue_character: None,
            is_boss_area: false,
            special_objective: None,
        }
    }
}

fn assign_poi(
    random: &mut SeededRandom,
    config: &WorldLayoutConfig,
    difficulty: f64,
    terrain: TerrainType,
    quotas: &mut Quotas,
    rescue_queue: &mut VecDeque<String>,
) -> Assignment {
    use PointOfInterestType::*;

    if difficulty < 0.3 && quotas.villages < config.village_count {
        if random.next() > 0.7 {
            return Assignment {
                rescue_character: rescue_queue.pop_front(),
                ..Assignment::plain(HealerHub)
            };
        }
        quotas.villages += 1;
        return Assignment::plain(Village);
    }

    if difficulty > 0.7 && quotas.outposts < config.outpost_count {
        if random.next() > 0.6 && !rescue_queue.is_empty() {
            return Assignment {
                rescue_character: rescue_queue.pop_front(),
                ..Assignment::plain(PrisonCamp)
            };
        }
        if random.next() > 0.8 {
            return Assignment {
                is_boss_area: true,
                ..Assignment::plain(BossArena)
            };
        }
        quotas.outposts += 1;
        return Assignment::plain(EnemyOutpost);
    }

    if difficulty > 0.4 && quotas.siphons < config.siphon_cluster_count {
        if random.next() > 0.5 {
            quotas.siphons += 1;
            return Assignment::plain(SiphonCluster);
        }
        if random.next() > 0.6 {
            return Assignment {
                special_objective: Some("gas_cluster".to_string()),
                ..Assignment::plain(GasDepot)
            };
        }
        return Assignment::plain(Waypoint);
    }

    if terrain == TerrainType::River && random.next() > 0.6 {
        return Assignment::plain(RaftDock);
    }

    Assignment::plain(Waypoint)
}

pub fn generate_world_layout(config: &WorldLayoutConfig) -> WorldLayout {
    let mut random = SeededRandom::new(config.seed);
    let radius = config.world_radius.max(1);
    let span = radius as f64 * 2.0;

    let candidates = poisson_disc_sample(
        &mut random,
        span,
        span,
        config.min_poi_distance,
        DEFAULT_MAX_ATTEMPTS,
    );
    let rivers = generate_river_paths(&mut random, radius as f64, DEFAULT_RIVER_COUNT);

    let mut points = vec![WorldPoint {
        x: 0,
        z: 0,
        poi_type: PointOfInterestType::Lz,
        difficulty: 0.0,
        terrain_type: TerrainType::River,
        connections: Vec::new(),
        rescue_character: None,
        is_boss_area: false,
        special_objective: None,
    }];
    let mut index = HashMap::from([(IVec2::ZERO, 0usize)]);

    let mut sorted: Vec<DVec2> = candidates
        .into_iter()
        .filter(|p| p.x.abs() > LZ_CLEARANCE || p.y.abs() > LZ_CLEARANCE)
        .collect();
    sorted.sort_by(|a, b| a.length().total_cmp(&b.length()));

    let mut rescue_queue: VecDeque<String> = random.shuffle(&config.rescue_characters).into();
    let mut quotas = Quotas {
        villages: 0,
        outposts: 0,
        siphons: 0,
    };

    for candidate in sorted {
        let coord = IVec2::new(candidate.x.round() as i32, candidate.y.round() as i32);
        if index.contains_key(&coord) {
            continue;
        }

        let difficulty = difficulty_at(coord, radius);
        let terrain_type = determine_terrain_type(coord.x as f64, coord.y as f64, config.seed, &rivers);
        let assignment = assign_poi(
            &mut random,
            config,
            difficulty,
            terrain_type,
            &mut quotas,
            &mut rescue_queue,
        );

        index.insert(coord, points.len());
        points.push(WorldPoint {
            x: coord.x,
            z: coord.y,
            poi_type: assignment.poi_type,
            difficulty,
            terrain_type,
            connections: Vec::new(),
            rescue_character: assignment.rescue_character,
            is_boss_area: assignment.is_boss_area,
            special_objective: assignment.special_objective,
        });
    }

    place_remaining_rescues(&mut points, rescue_queue);

    let rescue_locations: BTreeMap<String, IVec2> = points
        .iter()
        .filter_map(|p| p.rescue_character.clone().map(|c| (c, p.coord())))
        .collect();

    let coords: Vec<IVec2> = points.iter().map(WorldPoint::coord).collect();
    let links = generate_paths(&coords, &mut random);
    let mut paths = Vec::with_capacity(links.len());
    for link in links {
        let (Some(&a), Some(&b)) = (index.get(&link.from), index.get(&link.to)) else {
            continue;
        };
        points[a].connections.push(link.to);
        points[b].connections.push(link.from);
        paths.push(WorldPath {
            from: link.from,
            to: link.to,
            terrain_type: points[a].terrain_type.harder(points[b].terrain_type),
        });
    }

    let terrain_zones = TerrainZones::generate(radius, config.seed, &rivers);

    log::info!(
        "generated world layout: seed {}, {} points, {} paths, {} rescue locations, {} terrain cells",
        config.seed,
        points.len(),
        paths.len(),
        rescue_locations.len(),
        terrain_zones.len()
    );

    WorldLayout {
        seed: config.seed,
        world_radius: radius,
        points,
        index,
        rescue_locations,
        paths,
        terrain_zones,
    }
}

/// Characters the cascade did not reach go to the farthest free points, which
/// become prison camps.
fn place_remaining_rescues(points: &mut [WorldPoint], mut queue: VecDeque<String>) {
    if queue.is_empty() {
        return;
    }

    let mut hosts: Vec<usize> = (0..points.len())
        .filter(|&i| points[i].poi_type != PointOfInterestType::Lz)
        .filter(|&i| points[i].rescue_character.is_none())
        .collect();
    hosts.sort_by(|&a, &b| {
        points[b]
            .distance_from_origin()
            .total_cmp(&points[a].distance_from_origin())
    });

    for host in hosts {
        let Some(character) = queue.pop_front() else {
            break;
        };
        let point = &mut points[host];
        log::debug!("placing rescue {character} at prison camp {}", point.id());
        point.poi_type = PointOfInterestType::PrisonCamp;
        point.rescue_character = Some(character);
        point.is_boss_area = false;
        point.special_objective = None;
    }

    if !queue.is_empty() {
        log::warn!(
            "layout too small to host every rescue character; unplaced: {:?}",
            queue
        );
    }
}

impl WorldLayout {
    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn world_radius(&self) -> i32 {
        self.world_radius
    }

    pub fn points(&self) -> &[WorldPoint] {
        &self.points
    }

    pub fn point(&self, coord: IVec2) -> Option<&WorldPoint> {
        self.index.get(&coord).and_then(|&i| self.points.get(i))
    }

    pub fn paths(&self) -> &[WorldPath] {
        &self.paths
    }

    pub fn terrain_zones(&self) -> &TerrainZones {
        &self.terrain_zones
    }

    pub fn rescue_locations(&self) -> impl Iterator<Item = (&str, &WorldPoint)> + '_ {
        self.rescue_locations
            .iter()
            .filter_map(|(name, coord)| Some((name.as_str(), self.point(*coord)?)))
    }

    pub fn rescue_location(&self, character: &str) -> Option<&WorldPoint> {
        self.rescue_locations
            .get(character)
            .and_then(|coord| self.point(*coord))
    }

    /// Every point that is not a plain waypoint.
    pub fn key_coordinates(&self) -> impl Iterator<Item = &WorldPoint> + '_ {
        self.points
            .iter()
            .filter(|p| p.poi_type != PointOfInterestType::Waypoint)
    }

    pub fn key_coordinate_for_chunk(&self, coord: IVec2) -> Option<&WorldPoint> {
        self.point(coord)
    }

    /// Defaults to `MARSH` outside the precomputed grid.
    pub fn terrain_for_chunk(&self, coord: IVec2) -> TerrainType {
        self.terrain_zones.get(coord).unwrap_or(TerrainType::Marsh)
    }

    pub fn difficulty_for_chunk(&self, coord: IVec2) -> f64 {
        self.point(coord)
            .map(|p| p.difficulty)
            .unwrap_or_else(|| difficulty_at(coord, self.world_radius))
    }

    pub fn connected_points(&self, coord: IVec2) -> Vec<&WorldPoint> {
        self.point(coord)
            .map(|p| p.connections.iter().filter_map(|c| self.point(*c)).collect())
            .unwrap_or_default()
    }

    pub fn has_path_between(&self, a: IVec2, b: IVec2) -> bool {
        self.paths
            .iter()
            .any(|p| (p.from == a && p.to == b) || (p.from == b && p.to == a))
    }

    /// Breadth-first search over point connections, endpoints inclusive.
    pub fn find_path(&self, from: IVec2, to: IVec2) -> Option<Vec<IVec2>> {
        if self.point(from).is_none() || self.point(to).is_none() {
            return None;
        }
        if from == to {
            return Some(vec![from]);
        }

        let mut parent: HashMap<IVec2, IVec2> = HashMap::new();
        let mut queue = VecDeque::from([from]);
        parent.insert(from, from);

        while let Some(current) = queue.pop_front() {
            let Some(point) = self.point(current) else {
                continue;
            };
            for &next in &point.connections {
                if parent.contains_key(&next) {
                    continue;
                }
                parent.insert(next, current);
                if next == to {
                    let mut route = vec![to];
                    let mut step = to;
                    while step != from {
                        step = parent[&step];
                        route.push(step);
                    }
                    route.reverse();
                    return Some(route);
                }
                queue.push_back(next);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use glam::IVec2;

    use super::{
        chunk_id, difficulty_at, generate_world_layout, parse_chunk_id, PointOfInterestType,
    };
    use crate::world_core::config::WorldLayoutConfig;
    use crate::world_core::terrain::TerrainType;

    fn config_with_seed(seed: u32) -> WorldLayoutConfig {
        WorldLayoutConfig {
            seed,
            ..WorldLayoutConfig::default()
        }
    }

    #[test]
    fn lz_sits_at_origin_with_zero_difficulty() {
        for seed in [1, 42, 12345, 999_999] {
            let layout = generate_world_layout(&config_with_seed(seed));
            let lz = layout.point(IVec2::ZERO).unwrap();
            assert_eq!(lz.poi_type, PointOfInterestType::Lz);
            assert_eq!(lz.difficulty, 0.0);
            assert_eq!(
                layout
                    .points()
                    .iter()
                    .filter(|p| p.poi_type == PointOfInterestType::Lz)
                    .count(),
                1
            );
        }
    }

    #[test]
    fn same_seed_produces_identical_layouts() {
        let a = generate_world_layout(&config_with_seed(42));
        let b = generate_world_layout(&config_with_seed(42));
        assert_eq!(a.points(), b.points());
        assert_eq!(a.paths(), b.paths());
        assert_eq!(a.terrain_zones(), b.terrain_zones());
    }

    #[test]
    fn different_seeds_differ_somewhere() {
        let a = generate_world_layout(&config_with_seed(111));
        let b = generate_world_layout(&config_with_seed(222));
        let differences = a
            .points()
            .iter()
            .filter(|p| p.coord() != IVec2::ZERO)
            .filter(|p| b.point(p.coord()).map(|q| q.poi_type) != Some(p.poi_type))
            .count();
        assert!(differences > 0);
    }

    #[test]
    fn every_point_is_reachable_from_lz() {
        for seed in [3, 42, 777] {
            let layout = generate_world_layout(&config_with_seed(seed));
            for point in layout.points() {
                let route = layout.find_path(IVec2::ZERO, point.coord()).unwrap();
                assert_eq!(route.first(), Some(&IVec2::ZERO));
                assert_eq!(route.last(), Some(&point.coord()));
                for pair in route.windows(2) {
                    assert!(layout.has_path_between(pair[0], pair[1]));
                }
            }
        }
    }

    #[test]
    fn connections_are_symmetric() {
        let layout = generate_world_layout(&config_with_seed(5));
        for point in layout.points() {
            for other in layout.connected_points(point.coord()) {
                assert!(other.connections.contains(&point.coord()));
            }
        }
    }

    #[test]
    fn each_rescue_character_is_placed_exactly_once() {
        for seed in 0..12 {
            let config = config_with_seed(seed);
            let layout = generate_world_layout(&config);
            for character in &config.rescue_characters {
                let hosts = layout
                    .points()
                    .iter()
                    .filter(|p| p.rescue_character.as_deref() == Some(character.as_str()))
                    .count();
                assert_eq!(hosts, 1, "seed {seed}: {character} hosted {hosts} times");
                assert!(layout.rescue_location(character).is_some());
            }
        }
    }

    #[test]
    fn terrain_grid_has_no_gaps() {
        let layout = generate_world_layout(&config_with_seed(42));
        let r = layout.world_radius();
        for x in -r..=r {
            for z in -r..=r {
                assert!(layout.terrain_zones().get(IVec2::new(x, z)).is_some());
            }
        }
        assert_eq!(
            layout.terrain_for_chunk(IVec2::new(999, 999)),
            TerrainType::Marsh
        );
    }

    #[test]
    fn difficulty_grows_with_distance() {
        let layout = generate_world_layout(&config_with_seed(12345));
        let (mut near, mut far) = (Vec::new(), Vec::new());
        for point in layout.points() {
            let d = point.distance_from_origin();
            if d < 10.0 {
                near.push(point.difficulty);
            } else if d > 30.0 {
                far.push(point.difficulty);
            }
        }
        let avg = |v: &[f64]| v.iter().sum::<f64>() / v.len() as f64;
        assert!(!near.is_empty() && !far.is_empty());
        assert!(avg(&near) < avg(&far));
    }

    #[test]
    fn default_scenario_matches_expectations() {
        let config = WorldLayoutConfig {
            seed: 42,
            ..WorldLayoutConfig::default()
        };
        let layout = generate_world_layout(&config);
        assert!(layout.points().len() > 10);
        assert_eq!(layout.rescue_locations().count(), 5);
        let landing_zones: Vec<_> = layout
            .points()
            .iter()
            .filter(|p| p.poi_type == PointOfInterestType::Lz)
            .collect();
        assert_eq!(landing_zones.len(), 1);
        let origin = layout.point(IVec2::ZERO).unwrap();
        assert_eq!(origin.poi_type, PointOfInterestType::Lz);
        assert_eq!(origin.difficulty, 0.0);
    }

    #[test]
    fn path_queries_handle_edge_cases() {
        let layout = generate_world_layout(&config_with_seed(8));
        assert_eq!(
            layout.find_path(IVec2::ZERO, IVec2::ZERO),
            Some(vec![IVec2::ZERO])
        );
        assert_eq!(layout.find_path(IVec2::ZERO, IVec2::new(999, 999)), None);
        assert_eq!(layout.find_path(IVec2::new(999, 999), IVec2::new(999, 999)), None);
        assert!(layout.connected_points(IVec2::new(999, 999)).is_empty());
        assert!(!layout.connected_points(IVec2::ZERO).is_empty());
    }

    #[test]
    fn no_duplicate_path_edges() {
        let layout = generate_world_layout(&config_with_seed(21));
        let mut seen = HashSet::new();
        for path in layout.paths() {
            let key = if (path.from.x, path.from.y) < (path.to.x, path.to.y) {
                (path.from, path.to)
            } else {
                (path.to, path.from)
            };
            assert!(seen.insert(key));
            let a = layout.point(path.from).unwrap().terrain_type;
            let b = layout.point(path.to).unwrap().terrain_type;
            assert_eq!(path.terrain_type, a.harder(b));
        }
    }

    #[test]
    fn chunk_ids_round_trip_and_reject_garbage() {
        assert_eq!(chunk_id(IVec2::new(-3, 14)), "-3,14");
        assert_eq!(parse_chunk_id("-3,14"), Some(IVec2::new(-3, 14)));
        assert_eq!(parse_chunk_id("7"), None);
        assert_eq!(parse_chunk_id("a,b"), None);
    }

    #[test]
    fn difficulty_is_clamped() {
        assert_eq!(difficulty_at(IVec2::ZERO, 50), 0.0);
        assert_eq!(difficulty_at(IVec2::new(200, 0), 50), 1.0);
        assert!((difficulty_at(IVec2::new(25, 0), 50) - 0.6).abs() < 1e-12);
    }
}
