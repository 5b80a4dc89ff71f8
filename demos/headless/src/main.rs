// Copyright 2025 the Bokeh Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders a Bokeh scene to a PNG file, optionally benchmarking the renderer
//! over several animated frames or checking it against the reference renderer.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use bokeh::compare::max_difference;
use bokeh::reference::render_reference;
use bokeh::{Image, Renderer, RendererOptions};
use clap::{Parser, ValueEnum};
use scenes::{Scene, SceneSet};

/// Tolerance for `--check`, per channel.
const CHECK_TOLERANCE: f32 = 1e-4;
/// Simulated time between benchmark frames, in seconds.
const FRAME_TIME: f32 = 1.0 / 60.0;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let scenes = scenes::test_scenes();
    let scene_idx = scenes.find(&args.scene)?;
    if args.print_scenes {
        print_scenes(&scenes, scene_idx);
        return Ok(());
    }
    let example_scene = &scenes.scenes[scene_idx];
    let name = &example_scene.config.name;
    let mut scene = example_scene.build();
    log::info!(
        "scene {name}: {} circles at {}x{}",
        scene.circles.len(),
        args.size,
        args.size
    );

    let mut renderer = Renderer::new(RendererOptions {
        tile_size: args.tile_size,
        ..Default::default()
    })
    .context("creating renderer")?;

    if args.check {
        check(&mut renderer, &scene, args.size).with_context(|| format!("checking {name}"))?;
    }

    let mut image = Image::solid(args.size, args.size, scene.background);
    let frames = args.frames.max(1);
    let start = Instant::now();
    for frame in 0..frames {
        if frame > 0 {
            scene.advance(FRAME_TIME);
            image.clear(scene.background);
        }
        match args.renderer {
            Backend::Tiled => renderer.render(&scene.circles, &mut image),
            Backend::Reference => render_reference(&scene.circles, &mut image),
        }
        .with_context(|| format!("rendering frame {frame} of {name}"))?;
    }
    let elapsed = start.elapsed();
    if args.frames > 1 {
        println!(
            "{name}: {frames} frames, {:.3} ms/frame ({:?})",
            elapsed.as_secs_f64() * 1000.0 / f64::from(frames),
            args.renderer
        );
    }

    std::fs::create_dir_all(&args.out_directory)
        .with_context(|| format!("creating {}", args.out_directory.display()))?;
    let out_path = args.out_directory.join(name).with_extension("png");
    image
        .save_png(&out_path)
        .with_context(|| format!("writing {}", out_path.display()))?;
    println!("Wrote result ({0}x{0}) to {out_path:?}", args.size);
    Ok(())
}

/// Renders the scene with both renderers and fails if the images differ.
fn check(renderer: &mut Renderer, scene: &Scene, size: u32) -> Result<()> {
    let mut tiled = Image::solid(size, size, scene.background);
    renderer.render(&scene.circles, &mut tiled)?;
    let mut reference = Image::solid(size, size, scene.background);
    render_reference(&scene.circles, &mut reference)?;
    let Some(diff) = max_difference(&tiled, &reference) else {
        bail!("renderers produced images of different sizes");
    };
    if diff > CHECK_TOLERANCE {
        bail!("tiled and reference images differ by up to {diff}");
    }
    println!("Correctness check passed (max difference {diff})");
    Ok(())
}

fn print_scenes(scenes: &SceneSet, selected: usize) {
    println!("Available scenes:");
    for (idx, scene) in scenes.scenes.iter().enumerate() {
        println!(
            "{idx}: {}{}{}",
            scene.config.name,
            if scene.config.animated {
                " (animated)"
            } else {
                ""
            },
            if selected == idx { " (selected)" } else { "" }
        );
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Backend {
    /// The tiled, data-parallel pipeline
    Tiled,
    /// The sequential circle-by-circle renderer
    Reference,
}

#[derive(Parser, Debug)]
#[command(about, long_about = None, bin_name="cargo run -p headless --")]
struct Args {
    /// Which scene (name) to render
    /// If no scenes have that name, an index can be specified instead
    #[arg(long, short, default_value = "rgb", global(false))]
    scene: String,
    /// Width and height of the image in pixels
    #[arg(long, default_value_t = 512)]
    size: u32,
    /// Side of a tile in pixels
    #[arg(long, default_value_t = 16)]
    tile_size: u32,
    #[arg(long, value_enum, default_value_t = Backend::Tiled)]
    renderer: Backend,
    /// Number of frames to animate and render, reporting the time per frame
    #[arg(long, short, default_value_t = 1)]
    frames: u32,
    /// Compare the tiled renderer against the reference renderer first
    #[arg(long)]
    check: bool,
    /// Directory to store the result into
    #[arg(long, default_value_os_t = default_directory())]
    out_directory: PathBuf,
    #[arg(long, short, global(false))]
    /// Display a list of all scene names
    print_scenes: bool,
}

fn default_directory() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("outputs")
}
