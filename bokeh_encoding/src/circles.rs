// Copyright 2025 the Bokeh Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Shading variant of a scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum SceneStyle {
    /// Each circle is a disc of its own color at half opacity.
    #[default]
    Flat = 0,
    /// Circles are soft snowflakes: color and opacity fall off radially and
    /// nearer flakes (smaller z) are more opaque.
    Snowflake = 1,
}

impl SceneStyle {
    /// The raw tag as stored in [`TileConfig`](crate::TileConfig).
    pub const fn to_raw(self) -> u32 {
        self as u32
    }

    /// Decodes a raw tag. Unknown tags shade as [`SceneStyle::Flat`].
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            1 => Self::Snowflake,
            _ => Self::Flat,
        }
    }
}

/// A single circle, used to build a [`CircleSet`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Circle {
    /// Center in normalized coordinates; `z` is depth in `[0, 1]`.
    pub position: [f32; 3],
    pub velocity: [f32; 3],
    pub color: [f32; 3],
    pub radius: f32,
}

/// The circles of a scene, stored as parallel arrays.
///
/// Circle `i` has its position at `position[3 * i..3 * i + 3]`, and likewise
/// for `velocity` and `color`. Circles are composited in index order.
#[derive(Clone, Debug, Default)]
pub struct CircleSet {
    pub position: Vec<f32>,
    pub velocity: Vec<f32>,
    pub color: Vec<f32>,
    pub radius: Vec<f32>,
    pub style: SceneStyle,
}

impl CircleSet {
    /// Creates an empty set shaded with `style`.
    pub fn new(style: SceneStyle) -> Self {
        Self {
            style,
            ..Default::default()
        }
    }

    /// Creates a set from individual circles, preserving their order.
    pub fn from_circles(style: SceneStyle, circles: impl IntoIterator<Item = Circle>) -> Self {
        let mut set = Self::new(style);
        for circle in circles {
            set.push(circle);
        }
        set
    }

    /// Appends a circle; it will be composited over every circle before it.
    pub fn push(&mut self, circle: Circle) {
        self.position.extend_from_slice(&circle.position);
        self.velocity.extend_from_slice(&circle.velocity);
        self.color.extend_from_slice(&circle.color);
        self.radius.push(circle.radius);
    }

    /// The number of circles.
    pub fn len(&self) -> usize {
        self.radius.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radius.is_empty()
    }

    #[inline]
    pub fn position(&self, ix: usize) -> [f32; 3] {
        [
            self.position[3 * ix],
            self.position[3 * ix + 1],
            self.position[3 * ix + 2],
        ]
    }

    #[inline]
    pub fn color(&self, ix: usize) -> [f32; 3] {
        [
            self.color[3 * ix],
            self.color[3 * ix + 1],
            self.color[3 * ix + 2],
        ]
    }

    #[inline]
    pub fn radius(&self, ix: usize) -> f32 {
        self.radius[ix]
    }

    /// Returns the circle at `ix` as a single value.
    pub fn get(&self, ix: usize) -> Circle {
        Circle {
            position: self.position(ix),
            velocity: [
                self.velocity[3 * ix],
                self.velocity[3 * ix + 1],
                self.velocity[3 * ix + 2],
            ],
            color: self.color(ix),
            radius: self.radius(ix),
        }
    }

    /// Finds the first per-circle array whose length disagrees with the circle count.
    ///
    /// Returns the array name together with its expected and actual length.
    pub fn mismatched_array(&self) -> Option<(&'static str, usize, usize)> {
        let expected = 3 * self.len();
        [
            ("position", self.position.len()),
            ("velocity", self.velocity.len()),
            ("color", self.color.len()),
        ]
        .into_iter()
        .find(|(_, actual)| *actual != expected)
        .map(|(name, actual)| (name, expected, actual))
    }
}
