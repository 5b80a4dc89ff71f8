// Copyright 2025 the Bokeh Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::{Error, Result};

/// An RGBA image with `f32` channels.
///
/// Pixels are stored row by row, with row 0 at the bottom of the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl Image {
    /// Creates a transparent black image.
    pub fn new(width: u32, height: u32) -> Self {
        Self::solid(width, height, [0.0; 4])
    }

    /// Creates an image filled with `rgba`.
    pub fn solid(width: u32, height: u32, rgba: [f32; 4]) -> Self {
        let n_pixels = width as usize * height as usize;
        Self {
            width,
            height,
            data: rgba.repeat(n_pixels),
        }
    }

    /// Wraps existing pixel data, which must hold `4 * width * height` values.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        let expected = 4 * width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::ImageSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Fills the whole image with `rgba`.
    pub fn clear(&mut self, rgba: [f32; 4]) {
        for pixel in self.data.chunks_exact_mut(4) {
            pixel.copy_from_slice(&rgba);
        }
    }

    /// The pixel at column `x` and row `y`, counted from the bottom.
    ///
    /// # Panics
    ///
    /// If the pixel lies outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> [f32; 4] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let ix = 4 * (y as usize * self.width as usize + x as usize);
        [
            self.data[ix],
            self.data[ix + 1],
            self.data[ix + 2],
            self.data[ix + 3],
        ]
    }

    /// Converts to 8-bit RGBA with the top row first.
    ///
    /// Channels are clamped to `[0, 1]`; accumulated alpha above 1 saturates.
    pub fn to_rgba8(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let [r, g, b, a] = self.pixel(x, self.height - 1 - y);
            Rgba([to_u8(r), to_u8(g), to_u8(b), to_u8(a)])
        })
    }

    /// Writes the image as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.to_rgba8()
            .save_with_format(path, ImageFormat::Png)
            .map_err(Error::Png)
    }
}

fn to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
