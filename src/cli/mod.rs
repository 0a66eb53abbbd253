mod config;
mod types;

use std::fmt::Write as _;

use anyhow::{Context, Result};
use glam::Vec3;

use crate::assembly::settlement::SettlementAssembler;
use crate::world_core::chunk::ChunkData;
use crate::world_core::config::GameConfig;
use crate::world_runtime::session::WorldSession;

pub use config::CliConfig;
pub use types::{ChunkSummary, LayoutSummary, WorldReport};

/// Generates everything `cli` asks for and renders it as text or JSON.
pub fn run(cli: &CliConfig) -> Result<String> {
    let mut config = match &cli.config_path {
        Some(path) => GameConfig::load_from(path),
        None => GameConfig::load(),
    };
    if let Some(seed) = cli.seed {
        config.world.seed = seed;
    }

    let mut session = WorldSession::new(config).context("starting world session")?;
    let chunks: Vec<ChunkData> = cli
        .chunks
        .iter()
        .map(|&coord| session.discover(coord).clone())
        .collect();

    let settlement = cli.settlement.map(|settlement_type| {
        SettlementAssembler::new(session.config().assembly.clone()).assemble(
            session.seed(),
            settlement_type,
            Vec3::ZERO,
            settlement_type.default_faction(),
        )
    });

    if cli.json {
        let report = WorldReport {
            layout: session.layout(),
            chunks: &chunks,
            settlement: settlement.as_ref(),
        };
        return serde_json::to_string_pretty(&report).context("serializing world report");
    }

    let mut out = String::new();
    let summary = LayoutSummary::new(session.layout());
    writeln!(
        out,
        "seed {} radius {}: {} points, {} paths",
        summary.seed, summary.world_radius, summary.points, summary.paths
    )?;
    for (name, count) in &summary.poi_counts {
        writeln!(out, "  {name}: {count}")?;
    }
    for (character, id) in &summary.rescue_locations {
        writeln!(out, "  rescue {character} at {id}")?;
    }

    for chunk in &chunks {
        let chunk_summary = ChunkSummary::new(chunk);
        write!(
            out,
            "chunk {} ({:?}, seed {}): {} decorations",
            chunk_summary.id, chunk.terrain_type, chunk.seed, chunk_summary.decorations
        )?;
        for (kind, count) in &chunk_summary.entity_counts {
            write!(out, ", {count} {kind}")?;
        }
        writeln!(out)?;
    }

    if let Some(settlement) = &settlement {
        writeln!(
            out,
            "settlement {} ({:?}): {} structures, {} paths, {} inhabitants, {} decorations, radius {:.1}",
            settlement.settlement_type.name(),
            settlement.faction,
            settlement.structures.len(),
            settlement.paths.len(),
            settlement.inhabitants.len(),
            settlement.decorations.len(),
            settlement.radius
        )?;
    }

    Ok(out)
}
