// Copyright 2025 the Bokeh Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bokeh tests.

// LINEBENDER LINT SET - lib.rs - v2
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![allow(
    missing_docs,
    clippy::print_stderr,
    reason = "Test helpers report where failing images were written"
)]

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use bokeh::compare::max_difference;
use bokeh::reference::render_reference;
use bokeh::{Image, Renderer, RendererOptions};
use scenes::Scene;

pub struct TestParams {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub options: RendererOptions,
}

impl TestParams {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            options: RendererOptions::default(),
        }
    }

    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.options.tile_size = tile_size;
        self
    }

    pub fn with_group_size(mut self, group_size: u32) -> Self {
        self.options.group_size = group_size;
        self
    }
}

/// Renders a scene with the tiled renderer onto its background.
pub fn render_tiled(scene: &Scene, params: &TestParams) -> Result<Image> {
    let mut renderer = Renderer::new(params.options)?;
    let image =
        renderer.render_to_image(&scene.circles, params.width, params.height, scene.background)?;
    Ok(image)
}

/// Renders a scene with the reference renderer onto its background.
pub fn render_sequential(scene: &Scene, params: &TestParams) -> Result<Image> {
    let mut image = Image::solid(params.width, params.height, scene.background);
    render_reference(&scene.circles, &mut image)?;
    Ok(image)
}

/// A scene rendered by both the tiled and the reference renderer.
#[must_use]
pub struct TiledReferenceComparison {
    pub tiled: Image,
    pub reference: Image,
    pub name: String,
}

impl TiledReferenceComparison {
    /// Fails unless every channel of the two images agrees to within `tolerance`.
    ///
    /// On failure both images are written to `comparisons/` for inspection.
    pub fn assert_max_difference_at_most(&self, tolerance: f32) -> Result<()> {
        match max_difference(&self.tiled, &self.reference) {
            Some(diff) if diff <= tolerance => Ok(()),
            Some(diff) => {
                self.write_images()?;
                bail!(
                    "{}: tiled and reference differ by {diff}, more than {tolerance}",
                    self.name
                )
            }
            None => bail!("{}: images have different sizes", self.name),
        }
    }

    fn write_images(&self) -> Result<()> {
        let root = comparison_dir().join(&self.name);
        std::fs::create_dir_all(comparison_dir())?;
        let tiled_path = root.with_extension("tiled.png");
        let reference_path = root.with_extension("reference.png");
        self.tiled.save_png(&tiled_path)?;
        self.reference.save_png(&reference_path)?;
        eprintln!(
            "Wrote tiled result from test {} to {tiled_path:?}\n\
            Wrote reference result to {reference_path:?}\n",
            self.name
        );
        Ok(())
    }
}

fn comparison_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("comparisons")
}

/// Renders a scene with both renderers.
pub fn compare_tiled_reference(
    scene: &Scene,
    params: &TestParams,
) -> Result<TiledReferenceComparison> {
    Ok(TiledReferenceComparison {
        tiled: render_tiled(scene, params)?,
        reference: render_sequential(scene, params)?,
        name: params.name.clone(),
    })
}

/// Builds a scene from the demo set by name.
pub fn test_scene(name: &str) -> Result<Scene> {
    let set = scenes::test_scenes();
    let idx = set.find(name)?;
    Ok(set.scenes[idx].build())
}
