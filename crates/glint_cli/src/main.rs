use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

mod cli;
mod scene;

use cli::Args;
use scene::{Scene, SceneFile};

/// Initialize the logger; RUST_LOG, when set, overrides `level`.
fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Apply command-line overrides on top of the scene file.
fn apply_overrides(scene: &mut Scene, args: &Args) {
    if let Some(seed) = args.seed {
        scene.seed = seed;
    }
    if let Some(width) = args.width {
        scene.camera.image_width = width;
    }
    if let Some(samples) = args.samples {
        scene.camera.samples_per_pixel = samples;
    }
    if let Some(depth) = args.depth {
        scene.camera.max_depth = depth;
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let scene_file = match &args.scene {
        Some(path) => {
            info!("Loading scene {}", path.display());
            SceneFile::load(path)?
        }
        None => {
            info!("No scene given, rendering the built-in demo");
            SceneFile::demo().context("built-in demo scene is invalid")?
        }
    };

    let mut scene = scene_file.build()?;
    apply_overrides(&mut scene, &args);
    scene.camera.initialize();

    info!("Seed {}", scene.seed);
    let mut rng = ChaCha8Rng::seed_from_u64(scene.seed);
    let image = scene.camera.render_to_buffer(&scene.world, &mut rng)?;

    image
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!("Wrote {}", args.output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overrides() {
        let mut scene = SceneFile::demo().unwrap().build().unwrap();
        let args = Args::parse_from(["glint", "--seed", "9", "--width", "32", "-s", "2"]);

        apply_overrides(&mut scene, &args);

        assert_eq!(scene.seed, 9);
        assert_eq!(scene.camera.image_width, 32);
        assert_eq!(scene.camera.samples_per_pixel, 2);
        // Untouched settings keep the scene's values
        assert_eq!(scene.camera.max_depth, 50);
    }
}
