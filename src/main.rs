// Binary entry point, native only.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use otter_world_gen::cli::{self, CliConfig};

    env_logger::init();
    let args = CliConfig::from_env_args()?;
    log::info!(
        "seed override: {:?}, chunks: {}, settlement: {:?}",
        args.seed,
        args.chunks.len(),
        args.settlement
    );

    let output = cli::run(&args)?;
    print!("{output}");
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
