use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "cubist")]
#[command(about = "Ray trace spheres, quads and cubes into a PPM image")]
pub struct Args {
    /// Image width in pixels; asked for interactively when omitted
    #[arg(short, long)]
    pub width: Option<u32>,

    /// Width over height
    #[arg(long, default_value_t = 16.0 / 9.0)]
    pub aspect_ratio: f32,

    /// Samples per pixel
    #[arg(short, long, default_value_t = 100)]
    pub samples: u32,

    /// Maximum bounces per sample
    #[arg(long, default_value_t = 50)]
    pub max_depth: u32,

    /// Base random seed; drawn from entropy and logged when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON scene description; the built-in scene when omitted
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Output file (.ppm or .png)
    #[arg(short, long, default_value = "image.ppm")]
    pub output: PathBuf,

    /// Spread scanlines across all cores
    #[arg(long)]
    pub parallel: bool,

    /// Logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}
