use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

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

#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "Render a sphere scene with a Monte Carlo path tracer")]
pub struct Args {
    /// JSON scene file; renders the built-in demo scene when omitted
    pub scene: Option<PathBuf>,

    /// Output image (.ppm or .png)
    #[arg(short, long, default_value = "image.ppm")]
    pub output: PathBuf,

    /// Random seed, overriding the scene's
    #[arg(long)]
    pub seed: Option<u64>,

    /// Image width in pixels, overriding the scene's
    #[arg(long)]
    pub width: Option<u32>,

    /// Samples per pixel, overriding the scene's
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum bounce depth, overriding the scene's
    #[arg(long)]
    pub depth: Option<u32>,

    /// Logging level (RUST_LOG takes precedence)
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["glint"]);
        assert!(args.scene.is_none());
        assert_eq!(args.output, PathBuf::from("image.ppm"));
        assert!(args.seed.is_none());
        assert!(matches!(args.log_level, LogLevel::Info));
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "glint", "scene.json", "-o", "out.png", "--seed", "7", "--width", "64", "-s", "4",
            "--depth", "3", "--log-level", "debug",
        ]);
        assert_eq!(args.scene, Some(PathBuf::from("scene.json")));
        assert_eq!(args.output, PathBuf::from("out.png"));
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.width, Some(64));
        assert_eq!(args.samples, Some(4));
        assert_eq!(args.depth, Some(3));
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }
}
