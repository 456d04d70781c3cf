//! Command-line driver that runs a headless session and reports where
//! the player ended up.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use bevy::prelude::*;
use clap::Parser;
use log::info;
use spritefield::assets::{texture_name_from_path, TextureInfo};
use spritefield::sim_rng::DEFAULT_SEED;
use spritefield::{
    init_logging, DeviceTier, EdgePolicy, SimConfig, SimulationPlugin, SimulationSession,
    TextureRegistry,
};

/// Runs a headless exploration session
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Seed for terrain and NPC behaviour
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// Number of frames to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u32,
    /// Milliseconds per frame
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,
    /// Use the low-end device tuning
    #[arg(long)]
    low_end: bool,
    /// Number of floor layers
    #[arg(long)]
    height: Option<u32>,
    /// Number of NPCs
    #[arg(long)]
    limit: Option<usize>,
    /// Surround the grid with walls as tall as the highest layer
    #[arg(long)]
    walled: bool,
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Texture as `path:WIDTHxHEIGHT`; repeatable
    #[arg(long = "texture")]
    textures: Vec<String>,
}

fn build_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => SimConfig::from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None if args.low_end => SimConfig::for_tier(DeviceTier::LowEnd),
        None => SimConfig::default(),
    };
    if let Some(height) = args.height {
        config.terrain.max_level_height = height;
    }
    if let Some(limit) = args.limit {
        config.npc.count = limit;
    }
    if args.walled {
        config.terrain.edge = EdgePolicy::Walled {
            height: config.terrain.max_level_height,
        };
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn parse_texture(entry: &str) -> Result<(String, TextureInfo)> {
    let Some((path, size)) = entry.rsplit_once(':') else {
        bail!("texture `{entry}` must look like path:WIDTHxHEIGHT");
    };
    let Some((width, height)) = size.split_once('x') else {
        bail!("texture size `{size}` must look like WIDTHxHEIGHT");
    };
    let info = TextureInfo {
        width: width.parse().with_context(|| format!("width in `{entry}`"))?,
        height: height.parse().with_context(|| format!("height in `{entry}`"))?,
    };
    Ok((texture_name_from_path(path), info))
}

fn build_assets(entries: &[String]) -> Result<TextureRegistry> {
    if entries.is_empty() {
        return Ok(TextureRegistry::new()
            .with("player", TextureInfo { width: 96, height: 128 })
            .with("npc", TextureInfo { width: 96, height: 128 })
            .with("tree", TextureInfo { width: 32, height: 32 })
            .with("bush", TextureInfo { width: 16, height: 16 }));
    }
    let mut assets = TextureRegistry::new();
    for entry in entries {
        let (name, info) = parse_texture(entry)?;
        assets.register(name, info);
    }
    Ok(assets)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = build_config(&args)?;
    let assets = build_assets(&args.textures)?;
    let mut app = App::new();
    app.insert_resource(Time::<()>::default());
    app.add_plugins(SimulationPlugin {
        config,
        seed: args.seed,
        assets,
    });
    if app.world().get_resource::<SimulationSession>().is_none() {
        bail!("session failed to start");
    }

    let step = Duration::from_millis(args.tick_ms);
    for _ in 0..args.ticks {
        app.world_mut().resource_mut::<Time>().advance_by(step);
        app.update();
    }

    let sim = app.world().resource::<SimulationSession>();
    let session = sim.session();
    if let Some(body) = session.player_body() {
        let pose = body.pose();
        info!(
            "after {} ticks ({:.0} ms): player at ({:.2}, {:.2}, {:.2}) facing {:?}",
            session.ticks(),
            session.elapsed_ms(),
            pose.x,
            pose.y,
            pose.z,
            spritefield::Directional::direction(session.player())
        );
    }
    let camera = session.camera().position();
    info!("camera at ({:.2}, {:.2}, {:.2})", camera.x, camera.y, camera.z);
    Ok(())
}
