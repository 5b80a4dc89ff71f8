// Copyright 2025 the Bokeh Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A sequential renderer used to check the tiled pipeline.
//!
//! Circles are drawn one after another, each visiting only the pixels inside
//! its bounding box. It shares the shading code with the tiled renderer, so for
//! the same scene both produce the same image.

use bokeh_encoding::{CircleSet, TileConfig};
use bokeh_shaders::cpu::shade_pixel;

use crate::{Error, Image, Result};

/// Composites `circles` over `image`, one circle at a time.
pub fn render_reference(circles: &CircleSet, image: &mut Image) -> Result<()> {
    if let Some((array, expected, actual)) = circles.mismatched_array() {
        return Err(Error::CircleArrays {
            array,
            expected,
            actual,
        });
    }
    let width = image.width();
    let height = image.height();
    if width == 0 || height == 0 {
        return Ok(());
    }
    // Only the pixel center mapping is used; tiles don't matter here.
    let config = TileConfig::new(width, height, 1, 0, circles.style);
    let style = config.style();
    let data = image.data_mut();
    for c in 0..circles.len() {
        let position = circles.position(c);
        let color = circles.color(c);
        let radius = circles.radius(c);
        let [x0, x1] = pixel_span(position[0], radius, width);
        let [y0, y1] = pixel_span(position[1], radius, height);
        for y in y0..y1 {
            for x in x0..x1 {
                let ix = 4 * (y as usize * width as usize + x as usize);
                shade_pixel(
                    style,
                    config.pixel_center(x, y),
                    position,
                    color,
                    radius,
                    &mut data[ix..ix + 4],
                );
            }
        }
    }
    Ok(())
}

/// The range of pixels along one axis whose centers may lie within `radius` of `center`.
fn pixel_span(center: f32, radius: f32, extent: u32) -> [u32; 2] {
    let scale = extent as f32;
    let lo = ((center - radius) * scale - 1.0).floor().max(0.0);
    let hi = ((center + radius) * scale + 1.0).ceil().min(scale);
    if hi <= lo {
        return [0, 0];
    }
    [lo as u32, hi as u32]
}
