#![deny(clippy::all)]

use anyhow::Context;
use clap::{App, Arg};
use implicit_raytrace::Scene;
use log::info;
use std::path::Path;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = App::new("implicit-raytrace")
        .about("Ray traces spheres, donuts and orbiting planets")
        .arg(
            Arg::with_name("scene")
                .index(1)
                .required(true)
                .takes_value(true)
                .help("input scene as a json file"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .help(
                    "Output rendered image to file\n\
                     If omitted, the scene is animated in a window",
                ),
        )
        .arg(
            Arg::with_name("noprogress")
                .long("no-progress")
                .help("Hide progress bar"),
        )
        .arg(
            Arg::with_name("frames")
                .long("frames")
                .takes_value(true)
                .default_value("0")
                .help("Number of motion steps to run before rendering to a file"),
        )
        .get_matches();

    let scene_path = Path::new(matches.value_of("scene").context("missing scene path")?);
    let output_filename = matches.value_of("output");
    let use_progress = !matches.is_present("noprogress");
    let frames: u32 = matches
        .value_of("frames")
        .unwrap_or("0")
        .parse()
        .context("--frames must be a non-negative integer")?;

    let now = Instant::now();
    let scene = Scene::from_path(scene_path)?;
    scene
        .validate()
        .with_context(|| format!("invalid scene {}", scene_path.display()))?;
    info!(
        "loaded {} with {} objects and {} lights in {:.3?}",
        scene_path.display(),
        scene.get_num_objects(),
        scene.get_num_lights(),
        now.elapsed()
    );

    let mut scene = scene.build_raytracing_scene();

    if let Some(filename) = output_filename {
        for _ in 0..frames {
            scene.step_motion();
        }

        let (image, duration) = scene.raytrace_to_image(use_progress);
        image
            .save(filename)
            .with_context(|| format!("unable to write image {}", filename))?;
        info!("output written to {} in {:.3?}", filename, duration);
    } else {
        info!("rendering to window, press escape to exit");
        scene.raytrace_to_window()?;
    }

    Ok(())
}
