use std::io;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use cubist_renderer::{render, render_parallel, save_image, RenderConfig, SceneDescription};
use log::info;

mod cli;
mod logger;
mod prompt;

use cli::Args;
use logger::init_logger;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let width = match args.width {
        Some(width) => width,
        None => prompt::read_width(&mut io::stdin().lock(), &mut io::stdout())?,
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Random seed: {}", seed);

    let config = RenderConfig::default()
        .with_width(width)
        .with_aspect_ratio(args.aspect_ratio)
        .with_quality(args.samples, args.max_depth)
        .with_seed(seed);
    config.validate().context("invalid render settings")?;

    let description = match &args.scene {
        Some(path) => SceneDescription::load(path)
            .with_context(|| format!("failed to load scene {}", path.display()))?,
        None => SceneDescription::default_scene(),
    };

    let start = Instant::now();
    let world = description.build().context("failed to build scene")?;
    info!("Scene built in {:?} ({} objects)", start.elapsed(), world.len());

    info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        config.image_width,
        config.image_height(),
        config.samples_per_pixel,
        config.max_depth
    );

    let camera = config.camera();
    let image = if args.parallel {
        render_parallel(&camera, &world, &config)
    } else {
        render(&camera, &world, &config)
    };

    save_image(&args.output, &image)
        .with_context(|| format!("failed to save {}", args.output.display()))?;

    Ok(())
}
