mod app;
mod camera;
mod config;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use strata_blocks::BlockRegistry;
use strata_world::Mode;

use crate::app::App;
use crate::config::StrataConfig;

#[derive(Parser, Debug)]
#[command(name = "strata", about = "Headless voxel world streaming host")]
struct Args {
    /// Path to strata.toml
    #[arg(long)]
    config: Option<PathBuf>,
    /// Block registry TOML; the built-in registry is used when absent
    #[arg(long)]
    blocks: Option<PathBuf>,
    #[arg(long, default_value_t = 600)]
    frames: u64,
    #[arg(long)]
    render_distance: Option<i32>,
    #[arg(long)]
    seed: Option<i32>,
    /// Generate a flat world
    #[arg(long)]
    flat: bool,
    /// Log filter, e.g. `info` or `chunks=debug`; RUST_LOG overrides it
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn apply(&self, cfg: &mut StrataConfig) {
        if let Some(rd) = self.render_distance {
            cfg.render.render_distance = rd;
        }
        if let Some(seed) = self.seed {
            cfg.worldgen.seed = seed;
        }
        if self.flat {
            cfg.worldgen.mode = Mode::Flat;
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    env_logger::Builder::new()
        .parse_filters(&args.log_level)
        .parse_env("RUST_LOG")
        .init();

    let mut cfg = match &args.config {
        Some(path) => StrataConfig::load(path)?,
        None => StrataConfig::default(),
    };
    args.apply(&mut cfg);

    let reg = match &args.blocks {
        Some(path) => BlockRegistry::load_from_path(path)?,
        None => BlockRegistry::builtin()?,
    };
    log::info!(
        "{} blocks, seed {}, {:?} terrain, render distance {}",
        reg.len(),
        cfg.worldgen.seed,
        cfg.worldgen.mode,
        cfg.render.render_distance
    );

    let mut app = App::new(&cfg, Arc::new(reg))?;
    app.run(args.frames)?;
    Ok(())
}
