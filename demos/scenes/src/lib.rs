// Copyright 2025 the Bokeh Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circle scenes for the Bokeh demos and tests.

mod animation;
mod test_scenes;

use anyhow::{bail, Result};
use bokeh_encoding::CircleSet;

pub use animation::Animation;
pub use test_scenes::test_scenes;

/// A circle scene together with how it changes from frame to frame.
#[derive(Clone, Debug)]
pub struct Scene {
    pub circles: CircleSet,
    /// The color the image is cleared to before rendering.
    pub background: [f32; 4],
    pub animation: Animation,
    /// Seconds of animation applied so far.
    pub time: f32,
}

impl Scene {
    pub fn new(circles: CircleSet, background: [f32; 4], animation: Animation) -> Self {
        Self {
            circles,
            background,
            animation,
            time: 0.0,
        }
    }

    /// Advances the animation by `dt` seconds.
    ///
    /// The number of circles and the length of every circle array are unchanged.
    pub fn advance(&mut self, dt: f32) {
        self.animation.step(&mut self.circles, self.time, dt);
        self.time += dt;
    }
}

pub struct SceneConfig {
    pub animated: bool,
    pub name: String,
}

pub struct ExampleScene {
    pub function: Box<dyn Fn() -> Scene>,
    pub config: SceneConfig,
}

impl ExampleScene {
    /// Builds a fresh instance of the scene.
    pub fn build(&self) -> Scene {
        (self.function)()
    }
}

pub struct SceneSet {
    pub scenes: Vec<ExampleScene>,
}

impl SceneSet {
    /// Finds a scene by case-insensitive name, or else by index.
    pub fn find(&self, name_or_index: &str) -> Result<usize> {
        let mut found = self
            .scenes
            .iter()
            .enumerate()
            .filter(|(_, scene)| scene.config.name.eq_ignore_ascii_case(name_or_index));
        if let Some((idx, _)) = found.next() {
            return Ok(idx);
        }
        let Ok(parsed) = name_or_index.parse::<usize>() else {
            bail!("'{name_or_index}' didn't match any scene");
        };
        if parsed >= self.scenes.len() {
            bail!("{parsed} doesn't fit in scenes (len {})", self.scenes.len());
        }
        Ok(parsed)
    }
}
