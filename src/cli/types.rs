use std::collections::BTreeMap;

use serde::Serialize;

use crate::assembly::settlement::Settlement;
use crate::world_core::chunk::ChunkData;
use crate::world_core::layout::{chunk_id, WorldLayout};

/// Full output of `--json`.
#[derive(Debug, Serialize)]
pub struct WorldReport<'a> {
    pub layout: &'a WorldLayout,
    pub chunks: &'a [ChunkData],
    pub settlement: Option<&'a Settlement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSummary {
    pub seed: u32,
    pub world_radius: i32,
    pub points: usize,
    pub paths: usize,
    pub poi_counts: BTreeMap<&'static str, usize>,
    pub rescue_locations: BTreeMap<String, String>,
}

impl LayoutSummary {
    pub fn new(layout: &WorldLayout) -> Self {
        let mut poi_counts = BTreeMap::new();
        for point in layout.points() {
            *poi_counts.entry(point.poi_type.display_name()).or_insert(0) += 1;
        }
        Self {
            seed: layout.seed(),
            world_radius: layout.world_radius(),
            points: layout.points().len(),
            paths: layout.paths().len(),
            poi_counts,
            rescue_locations: layout
                .rescue_locations()
                .map(|(character, point)| (character.to_string(), chunk_id(point.coord())))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkSummary {
    pub id: String,
    pub entity_counts: BTreeMap<&'static str, usize>,
    pub decorations: u32,
}

impl ChunkSummary {
    pub fn new(chunk: &ChunkData) -> Self {
        let mut entity_counts = BTreeMap::new();
        for entity in &chunk.entities {
            *entity_counts.entry(entity.type_name()).or_insert(0) += 1;
        }
        Self {
            id: chunk.id.clone(),
            entity_counts,
            decorations: chunk.decorations.iter().map(|d| d.count).sum(),
        }
    }
}
