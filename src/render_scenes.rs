#![deny(clippy::all)]

use anyhow::Context;
use implicit_raytrace::Scene;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const SCENE_DIR: &str = "scenes";
const OUTPUT_DIR: &str = "renders";
const ITERATIONS: u32 = 3;

fn render_scene(scene_path: &Path) -> anyhow::Result<()> {
    let scene = Scene::from_path(scene_path)?;
    scene
        .validate()
        .with_context(|| format!("invalid scene {}", scene_path.display()))?;
    let scene = scene.build_raytracing_scene();

    let mut output_filename = PathBuf::from(OUTPUT_DIR);
    output_filename.push(scene_path.file_stem().context("scene path has no file name")?);
    output_filename.set_extension("png");

    info!("raytracing {}", scene_path.display());
    let mut duration_sum = Duration::new(0, 0);
    for i in 1..=ITERATIONS {
        let (image, duration) = scene.raytrace_to_image(false);
        duration_sum += duration;
        info!("iteration {}: rendered in {:.3?}", i, duration);

        if i == ITERATIONS {
            info!("average time: {:.3?}", duration_sum / ITERATIONS);
            image
                .save(&output_filename)
                .with_context(|| format!("unable to write image {}", output_filename.display()))?;
            info!("wrote rendered image to {}", output_filename.display());
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    fs::create_dir_all(OUTPUT_DIR)
        .with_context(|| format!("unable to create output directory {}", OUTPUT_DIR))?;

    let mut scene_paths = fs::read_dir(SCENE_DIR)
        .with_context(|| format!("unable to list scenes in {}", SCENE_DIR))?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().map_or(false, |extension| extension == "json"))
        .collect::<Vec<_>>();
    scene_paths.sort();

    if scene_paths.is_empty() {
        warn!("no scenes found in {}", SCENE_DIR);
    }

    for scene_path in &scene_paths {
        render_scene(scene_path)?;
    }

    Ok(())
}
