use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use glam::{IVec2, Vec3};

use crate::assembly::settlement::{
    ElevatedNetwork, Faction, Settlement, SettlementAssembler, SettlementType,
};
use crate::world_core::chunk::{ChunkData, CHUNK_SIZE};
use crate::world_core::chunk_generator::{chunk_seed, ChunkGenerator};
use crate::world_core::config::GameConfig;
use crate::world_core::layout::{chunk_id, generate_world_layout, parse_chunk_id, PointOfInterestType, WorldLayout};
use crate::world_core::save::SaveData;
use crate::world_runtime::streaming::{required_coords, world_to_chunk, ChunkPrewarmer};

const ELEVATED_NETWORK_PLATFORMS: usize = 5;
const ELEVATED_NETWORK_AREA: f32 = 20.0;

pub fn settlement_type_for(poi: PointOfInterestType) -> Option<SettlementType> {
    match poi {
        PointOfInterestType::Village | PointOfInterestType::HealerHub => {
            Some(SettlementType::NativeVillage)
        }
        PointOfInterestType::PrisonCamp => Some(SettlementType::PrisonCompound),
        PointOfInterestType::EnemyOutpost | PointOfInterestType::GasDepot => {
            Some(SettlementType::ScaleGuardOutpost)
        }
        PointOfInterestType::SiphonCluster => Some(SettlementType::SiphonFacility),
        PointOfInterestType::RaftDock => Some(SettlementType::FishingCamp),
        PointOfInterestType::Lz => Some(SettlementType::PlayerBase),
        PointOfInterestType::BossArena | PointOfInterestType::Waypoint => None,
    }
}

pub fn faction_for(poi: PointOfInterestType) -> Faction {
    match poi {
        PointOfInterestType::Village | PointOfInterestType::HealerHub | PointOfInterestType::RaftDock => {
            Faction::Native
        }
        PointOfInterestType::PrisonCamp
        | PointOfInterestType::EnemyOutpost
        | PointOfInterestType::SiphonCluster
        | PointOfInterestType::GasDepot => Faction::ScaleGuard,
        PointOfInterestType::Lz => Faction::Ura,
        PointOfInterestType::BossArena | PointOfInterestType::Waypoint => Faction::Neutral,
    }
}

/// World-space center of a chunk's settlement.
pub fn chunk_center(coord: IVec2) -> Vec3 {
    Vec3::new(coord.x as f32 * CHUNK_SIZE, 0.0, coord.y as f32 * CHUNK_SIZE)
}

/// One game session: the generated layout plus every chunk discovered so far.
///
/// The layout is shared read-only with chunk workers. `regenerate` swaps in a
/// new layout rather than touching the old one.
pub struct WorldSession {
    config: GameConfig,
    generator: ChunkGenerator,
    assembler: SettlementAssembler,
    prewarmer: ChunkPrewarmer,
    discovered: HashMap<IVec2, ChunkData>,
}

impl WorldSession {
    pub fn new(config: GameConfig) -> anyhow::Result<Self> {
        let layout = Arc::new(generate_world_layout(&config.world));
        let prewarmer = ChunkPrewarmer::new(Arc::clone(&layout), config.runtime.threads)?;
        Ok(Self {
            generator: ChunkGenerator::new(layout),
            assembler: SettlementAssembler::new(config.assembly.clone()),
            prewarmer,
            discovered: HashMap::new(),
            config,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn layout(&self) -> &Arc<WorldLayout> {
        self.generator.layout()
    }

    pub fn seed(&self) -> u32 {
        self.layout().seed()
    }

    /// Returns the chunk at `coord`, generating it on first discovery.
    pub fn discover(&mut self, coord: IVec2) -> &ChunkData {
        let generator = &self.generator;
        self.discovered
            .entry(coord)
            .or_insert_with(|| generator.generate_chunk(coord))
    }

    /// Discovers the square of chunks within `radius` of the chunk containing
    /// `position`. Returns the newly discovered coordinates, sorted.
    pub fn discover_around(&mut self, position: Vec3, radius: i32) -> Vec<IVec2> {
        self.collect_prewarmed();
        let required = required_coords(world_to_chunk(position), radius);
        self.prewarmer.cancel_outside(&required);

        let mut fresh: Vec<IVec2> = required
            .into_iter()
            .filter(|coord| !self.discovered.contains_key(coord))
            .collect();
        fresh.sort_by_key(|c| (c.y, c.x));

        for &coord in &fresh {
            self.prewarmer.dispatch(coord);
        }
        for chunk in self.prewarmer.wait() {
            self.discovered.entry(chunk.coord()).or_insert(chunk);
        }
        fresh.retain(|coord| self.discovered.contains_key(coord));
        fresh
    }

    /// Starts generating undiscovered chunks around `position` without
    /// waiting. They land in the cache on the next `collect_prewarmed`.
    pub fn prewarm_around(&mut self, position: Vec3, radius: i32) {
        for coord in required_coords(world_to_chunk(position), radius) {
            if !self.discovered.contains_key(&coord) {
                self.prewarmer.dispatch(coord);
            }
        }
    }

    /// Moves finished prewarmed chunks into the cache. Returns how many arrived.
    pub fn collect_prewarmed(&mut self) -> usize {
        let mut arrived = 0;
        for chunk in self.prewarmer.poll() {
            if let Entry::Vacant(slot) = self.discovered.entry(chunk.coord()) {
                slot.insert(chunk);
                arrived += 1;
            }
        }
        arrived
    }

    pub fn pending_chunks(&self) -> usize {
        self.prewarmer.pending_count()
    }

    pub fn chunk(&self, coord: IVec2) -> Option<&ChunkData> {
        self.discovered.get(&coord)
    }

    pub fn discovered(&self) -> &HashMap<IVec2, ChunkData> {
        &self.discovered
    }

    /// Marks a chunk as secured (or not), discovering it first if needed.
    pub fn set_secured(&mut self, coord: IVec2, secured: bool) {
        self.discover(coord);
        if let Some(chunk) = self.discovered.get_mut(&coord) {
            chunk.secured = secured;
        }
    }

    /// Replaces the layout with a fresh one for `seed` and forgets every
    /// discovered chunk.
    pub fn regenerate(&mut self, seed: u32) -> anyhow::Result<()> {
        self.config.world.seed = seed;
        let layout = Arc::new(generate_world_layout(&self.config.world));
        self.prewarmer = ChunkPrewarmer::new(Arc::clone(&layout), self.config.runtime.threads)?;
        self.generator = ChunkGenerator::new(layout);
        self.discovered.clear();
        Ok(())
    }

    /// The settlement standing on `coord`, if its key point warrants one.
    pub fn settlement_for_chunk(&self, coord: IVec2) -> Option<Settlement> {
        let point = self.layout().key_coordinate_for_chunk(coord)?;
        let settlement_type = settlement_type_for(point.poi_type)?;
        Some(self.assembler.assemble(
            chunk_seed(coord),
            settlement_type,
            chunk_center(coord),
            faction_for(point.poi_type),
        ))
    }

    /// Walkways above the water of a raft dock chunk.
    pub fn elevated_network_for_chunk(&self, coord: IVec2) -> Option<ElevatedNetwork> {
        let point = self.layout().key_coordinate_for_chunk(coord)?;
        if point.poi_type != PointOfInterestType::RaftDock {
            return None;
        }
        Some(self.assembler.assemble_elevated_network(
            chunk_seed(coord),
            chunk_center(coord),
            ELEVATED_NETWORK_AREA,
            ELEVATED_NETWORK_PLATFORMS,
        ))
    }

    pub fn save_data(&self) -> SaveData {
        let mut secured: Vec<IVec2> = self
            .discovered
            .values()
            .filter(|chunk| chunk.secured)
            .map(ChunkData::coord)
            .collect();
        secured.sort_by_key(|c| (c.y, c.x));
        SaveData {
            seed: self.seed(),
            secured_chunks: secured.into_iter().map(chunk_id).collect(),
        }
    }

    /// Rebuilds the session from a save: same seed, secured chunks re-discovered.
    pub fn restore(&mut self, save: &SaveData) -> anyhow::Result<()> {
        if save.seed != self.seed() || !self.discovered.is_empty() {
            self.regenerate(save.seed)?;
        }
        for id in &save.secured_chunks {
            match parse_chunk_id(id) {
                Some(coord) => self.set_secured(coord, true),
                None => log::warn!("ignoring malformed chunk id `{id}` in save data"),
            }
        }
        log::info!(
            "restored seed {} with {} secured chunks",
            save.seed,
            save.secured_chunks.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world_core::config::WorldLayoutConfig;

    fn session(seed: u32) -> WorldSession {
        WorldSession::new(GameConfig {
            world: WorldLayoutConfig {
                seed,
                world_radius: 25,
                ..WorldLayoutConfig::default()
            },
            ..GameConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn discover_is_cached_and_idempotent() {
        let mut session = session(3);
        let first = session.discover(IVec2::new(2, -1)).clone();
        assert_eq!(session.discovered().len(), 1);
        let again = session.discover(IVec2::new(2, -1)).clone();
        assert_eq!(first, again);
        assert_eq!(session.discovered().len(), 1);
    }

    #[test]
    fn discover_around_reports_only_new_chunks() {
        let mut session = session(4);
        session.discover(IVec2::ZERO);
        let fresh = session.discover_around(Vec3::new(50.0, 0.0, 50.0), 1);
        assert_eq!(fresh.len(), 8);
        assert!(!fresh.contains(&IVec2::ZERO));
        assert_eq!(session.discovered().len(), 9);
        assert!(session.discover_around(Vec3::new(10.0, 0.0, 10.0), 1).is_empty());
    }

    #[test]
    fn prewarmed_chunks_arrive_in_the_cache() {
        let mut session = session(10);
        session.prewarm_around(Vec3::ZERO, 1);
        assert!(session.pending_chunks() <= 9);

        let mut arrived = 0;
        for _ in 0..10_000 {
            arrived += session.collect_prewarmed();
            if session.pending_chunks() == 0 {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        arrived += session.collect_prewarmed();
        assert_eq!(arrived, 9);
        assert_eq!(session.discovered().len(), 9);
        assert!(session.discover_around(Vec3::ZERO, 1).is_empty());
    }

    #[test]
    fn secured_state_round_trips_through_save_data() {
        let mut session = session(5);
        session.set_secured(IVec2::new(1, 2), true);
        session.set_secured(IVec2::new(-3, 0), true);
        session.discover(IVec2::new(4, 4));

        let save = session.save_data();
        assert_eq!(save.seed, 5);
        assert_eq!(save.secured_chunks, vec!["-3,0".to_string(), "1,2".to_string()]);

        let mut restored = WorldSession::new(GameConfig::default()).unwrap();
        restored.restore(&save).unwrap();
        assert_eq!(restored.seed(), 5);
        assert!(restored.chunk(IVec2::new(1, 2)).is_some_and(|c| c.secured));
        assert!(restored.chunk(IVec2::new(-3, 0)).is_some_and(|c| c.secured));
        assert!(restored.chunk(IVec2::new(4, 4)).is_none());
    }

    #[test]
    fn regenerate_swaps_the_layout_without_touching_the_old_one() {
        let mut session = session(6);
        session.discover(IVec2::ZERO);
        let old = Arc::clone(session.layout());
        session.regenerate(7).unwrap();
        assert_eq!(old.seed(), 6);
        assert_eq!(session.seed(), 7);
        assert!(session.discovered().is_empty());
        assert!(!Arc::ptr_eq(&old, session.layout()));
    }

    #[test]
    fn landing_zone_hosts_the_player_base() {
        let session = session(8);
        let base = session.settlement_for_chunk(IVec2::ZERO).unwrap();
        assert_eq!(base.settlement_type, SettlementType::PlayerBase);
        assert_eq!(base.faction, Faction::Ura);
    }

    #[test]
    fn settlements_follow_their_key_points() {
        let session = session(11);
        let mut assembled = 0;
        for point in session.layout().points() {
            let settlement = session.settlement_for_chunk(point.coord());
            match settlement_type_for(point.poi_type) {
                Some(expected) => {
                    let settlement = settlement.unwrap();
                    assert_eq!(settlement.settlement_type, expected);
                    assert_eq!(settlement.center, chunk_center(point.coord()));
                    assert_eq!(settlement.faction, faction_for(point.poi_type));
                    assembled += 1;
                }
                None => assert!(settlement.is_none()),
            }
        }
        assert!(assembled > 1);
        assert_eq!(
            session.settlement_for_chunk(IVec2::new(1, 2)),
            session.settlement_for_chunk(IVec2::new(1, 2))
        );
    }

    #[test]
    fn only_raft_docks_get_walkways() {
        let session = session(12);
        for point in session.layout().points() {
            let network = session.elevated_network_for_chunk(point.coord());
            assert_eq!(network.is_some(), point.poi_type == PointOfInterestType::RaftDock);
        }
    }

    #[test]
    fn factions_and_types_line_up() {
        assert_eq!(faction_for(PointOfInterestType::PrisonCamp), Faction::ScaleGuard);
        assert_eq!(faction_for(PointOfInterestType::Waypoint), Faction::Neutral);
        assert_eq!(
            settlement_type_for(PointOfInterestType::GasDepot),
            Some(SettlementType::ScaleGuardOutpost)
        );
        assert_eq!(settlement_type_for(PointOfInterestType::BossArena), None);
    }
}
