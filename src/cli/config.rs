use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use glam::IVec2;

use crate::assembly::settlement::SettlementType;
use crate::world_core::layout::parse_chunk_id;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CliConfig {
    pub config_path: Option<PathBuf>,
    pub seed: Option<u32>,
    pub chunks: Vec<IVec2>,
    pub settlement: Option<SettlementType>,
    pub json: bool,
}

impl CliConfig {
    pub fn from_env_args() -> Result<Self> {
        Self::from_iter(
            std::env::args_os().skip(1),
            std::env::var_os("OTTER_WORLD_SEED"),
        )
    }

    fn from_iter<I>(args: I, env_seed: Option<OsString>) -> Result<Self>
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut config = Self::default();

        if let Some(seed) = env_seed {
            config.seed = Some(parse_seed(&seed.to_string_lossy()).context("OTTER_WORLD_SEED")?);
        }

        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            let arg_str = arg.to_string_lossy();
            match arg_str.as_ref() {
                "--json" => config.json = true,
                "--config" => {
                    let Some(value) = iter.next() else {
                        bail!("--config requires a path");
                    };
                    config.config_path = Some(PathBuf::from(value));
                }
                "--seed" => {
                    let Some(value) = iter.next() else {
                        bail!("--seed requires a value");
                    };
                    config.seed = Some(parse_seed(&value.to_string_lossy())?);
                }
                "--chunk" => {
                    let Some(value) = iter.next() else {
                        bail!("--chunk requires X,Z");
                    };
                    let value = value.to_string_lossy();
                    let coord = parse_chunk_id(&value)
                        .ok_or_else(|| anyhow!("--chunk expects X,Z, got `{value}`"))?;
                    config.chunks.push(coord);
                }
                "--settlement" => {
                    let Some(value) = iter.next() else {
                        bail!("--settlement requires a type");
                    };
                    config.settlement = Some(value.to_string_lossy().parse()?);
                }
                other => log::warn!("ignoring unknown argument `{other}`"),
            }
        }

        Ok(config)
    }
}

fn parse_seed(value: &str) -> Result<u32> {
    value
        .trim()
        .parse()
        .with_context(|| format!("invalid seed `{value}`"))
}
