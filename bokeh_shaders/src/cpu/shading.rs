// Copyright 2025 the Bokeh Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-pixel circle shading and compositing.

use bokeh_encoding::SceneStyle;

/// Opacity of a flat circle, and the peak opacity of a snowflake.
const CIRCLE_MAX_ALPHA: f32 = 0.5;
/// Steepness of the snowflake's gaussian opacity falloff.
const FALLOFF_SCALE: f32 = 4.0;

const COLOR_RAMP: [[f32; 3]; 5] = [
    [1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [0.8, 0.9, 1.0],
    [0.8, 0.9, 1.0],
    [0.8, 0.8, 1.0],
];

/// Samples the snowflake color ramp at `coord` in `[0, 1]`, interpolating linearly.
pub fn lookup_color(coord: f32) -> [f32; 3] {
    let last = COLOR_RAMP.len() - 1;
    let scaled = coord.clamp(0.0, 1.0) * last as f32;
    let base = (scaled as usize).min(last - 1);
    let t = scaled - base as f32;
    let [a, b] = [COLOR_RAMP[base], COLOR_RAMP[base + 1]];
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

/// The color and opacity a circle contributes to one pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleShade {
    pub rgb: [f32; 3],
    pub alpha: f32,
}

impl CircleShade {
    /// Shades the pixel centered at `pixel` for a circle, or returns `None` when
    /// the pixel center lies outside the circle.
    #[inline]
    pub fn eval(
        style: SceneStyle,
        pixel: [f32; 2],
        position: [f32; 3],
        color: [f32; 3],
        radius: f32,
    ) -> Option<Self> {
        let dx = position[0] - pixel[0];
        let dy = position[1] - pixel[1];
        let dist_sq = dx * dx + dy * dy;
        if dist_sq > radius * radius {
            return None;
        }
        match style {
            SceneStyle::Flat => Some(Self {
                rgb: color,
                alpha: CIRCLE_MAX_ALPHA,
            }),
            SceneStyle::Snowflake => {
                let norm_dist = dist_sq.sqrt() / radius;
                let max_alpha = CIRCLE_MAX_ALPHA * (0.6 + 0.4 * (1.0 - position[2])).clamp(0.0, 1.0);
                Some(Self {
                    rgb: lookup_color(norm_dist),
                    alpha: max_alpha * (-FALLOFF_SCALE * norm_dist * norm_dist).exp(),
                })
            }
        }
    }
}

/// Composites `shade` over the RGBA `pixel`.
///
/// Color uses the over operator. Alpha is accumulated without clamping, so a
/// pixel under many circles can report an alpha above 1.
#[inline]
pub fn composite_over(pixel: &mut [f32], shade: CircleShade) {
    let one_minus_alpha = 1.0 - shade.alpha;
    for i in 0..3 {
        pixel[i] = shade.alpha * shade.rgb[i] + one_minus_alpha * pixel[i];
    }
    pixel[3] += shade.alpha;
}

/// Shades and composites one circle onto one pixel.
#[inline]
pub fn shade_pixel(
    style: SceneStyle,
    pixel_center: [f32; 2],
    position: [f32; 3],
    color: [f32; 3],
    radius: f32,
    pixel: &mut [f32],
) {
    if let Some(shade) = CircleShade::eval(style, pixel_center, position, color, radius) {
        composite_over(pixel, shade);
    }
}
