use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Persisted gameplay state. Chunks themselves are regenerated from their
/// coordinates, so only the seed and which chunks were secured are kept.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    pub seed: u32,
    #[serde(default)]
    pub secured_chunks: Vec<String>,
}

#[cfg(not(target_arch = "wasm32"))]
impl SaveData {
    pub fn load(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(save) => {
                    log::info!("loaded {}", path.display());
                    Some(save)
                }
                Err(e) => {
                    log::warn!("failed to parse {}: {e}", path.display());
                    None
                }
            },
            Err(e) => {
                log::warn!("failed to read {}: {e}", path.display());
                None
            }
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("saved world state to {}", path.display());
        Ok(())
    }
}
