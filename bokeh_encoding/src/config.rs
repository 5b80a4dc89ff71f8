// Copyright 2025 the Bokeh Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use bytemuck::{Pod, Zeroable};

use crate::SceneStyle;

/// Per-scene configuration read by every stage.
///
/// The image is `width` by `height` pixels, split into square tiles of
/// `tile_size` pixels. The last column and row of tiles may be partial.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Zeroable, Pod)]
#[repr(C)]
pub struct TileConfig {
    /// Width of the target image in pixels.
    pub width: u32,
    /// Height of the target image in pixels.
    pub height: u32,
    /// Side of a tile in pixels.
    pub tile_size: u32,
    /// Number of tile columns, `ceil(width / tile_size)`.
    pub tiles_x: u32,
    /// Number of tile rows, `ceil(height / tile_size)`.
    pub tiles_y: u32,
    /// Number of circles in the scene.
    pub n_circles: u32,
    /// Raw [`SceneStyle`] tag.
    pub style: u32,
}

impl TileConfig {
    /// Lays out the tile grid for an image.
    ///
    /// `tile_size` must be non-zero.
    pub fn new(width: u32, height: u32, tile_size: u32, n_circles: u32, style: SceneStyle) -> Self {
        Self {
            width,
            height,
            tile_size,
            tiles_x: width.div_ceil(tile_size),
            tiles_y: height.div_ceil(tile_size),
            n_circles,
            style: style.to_raw(),
        }
    }

    pub fn n_tiles(&self) -> u32 {
        self.tiles_x * self.tiles_y
    }

    pub fn style(&self) -> SceneStyle {
        SceneStyle::from_raw(self.style)
    }

    /// The tile containing pixel `(x, y)`.
    #[inline]
    pub fn tile_of_pixel(&self, x: u32, y: u32) -> u32 {
        (y / self.tile_size) * self.tiles_x + x / self.tile_size
    }

    /// The pixel-space region `[x0, x1) x [y0, y1)` covered by tile `tile_ix`,
    /// clamped to the image.
    pub fn tile_pixels(&self, tile_ix: u32) -> [u32; 4] {
        let tx = tile_ix % self.tiles_x;
        let ty = tile_ix / self.tiles_x;
        [
            tx * self.tile_size,
            ty * self.tile_size,
            ((tx + 1) * self.tile_size).min(self.width),
            ((ty + 1) * self.tile_size).min(self.height),
        ]
    }

    /// The bounds `[left, bottom, right, top]` of tile `tile_ix` in normalized coordinates.
    pub fn tile_bounds(&self, tile_ix: u32) -> [f32; 4] {
        let [x0, y0, x1, y1] = self.tile_pixels(tile_ix);
        let inv_width = 1.0 / self.width as f32;
        let inv_height = 1.0 / self.height as f32;
        [
            x0 as f32 * inv_width,
            y0 as f32 * inv_height,
            x1 as f32 * inv_width,
            y1 as f32 * inv_height,
        ]
    }

    /// The center of pixel `(x, y)` in normalized coordinates.
    #[inline]
    pub fn pixel_center(&self, x: u32, y: u32) -> [f32; 2] {
        [
            (x as f32 + 0.5) / self.width as f32,
            (y as f32 + 0.5) / self.height as f32,
        ]
    }
}
