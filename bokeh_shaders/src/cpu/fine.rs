// Copyright 2025 the Bokeh Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use bokeh_encoding::{TileConfig, SENTINEL};
use rayon::prelude::*;

use super::{as_vec3, shade_pixel};

/// Shades every pixel of `image` from the circle list of its tile.
///
/// `image` holds `width * height` RGBA pixels, row 0 at the bottom, and is
/// composited onto in place. Circles are applied in list order, which is
/// ascending circle index.
pub fn fine_main(
    config: &TileConfig,
    position: &[f32],
    color: &[f32],
    radius: &[f32],
    lists: &[u32],
    image: &mut [f32],
) {
    let width = config.width as usize;
    if width == 0 {
        return;
    }
    let stride = config.n_circles as usize + 1;
    let style = config.style();
    let (centers, colors) = (as_vec3(position), as_vec3(color));
    bytemuck::cast_slice_mut::<f32, [f32; 4]>(&mut image[..width * config.height as usize * 4])
        .par_iter_mut()
        .enumerate()
        .for_each(|(pixel_ix, pixel)| {
            let x = (pixel_ix % width) as u32;
            let y = (pixel_ix / width) as u32;
            let center = config.pixel_center(x, y);
            let tile_ix = config.tile_of_pixel(x, y) as usize;
            for &circle_ix in lists[tile_ix * stride..][..stride].iter() {
                if circle_ix == SENTINEL {
                    break;
                }
                let c = circle_ix as usize;
                shade_pixel(style, center, centers[c], colors[c], radius[c], &mut pixel[..]);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::fine_main;
    use bokeh_encoding::{SceneStyle, TileConfig, SENTINEL};

    #[test]
    fn later_circles_composite_over_earlier_ones() {
        // One 2x2 tile, both circles cover everything.
        let config = TileConfig::new(2, 2, 2, 2, SceneStyle::Flat);
        let position = [0.5, 0.5, 0.0, 0.5, 0.5, 0.0];
        let color = [1.0, 0.0, 0.0, 0.0, 0.0, 1.0];
        let radius = [1.0, 1.0];
        let lists = [0, 1, SENTINEL];
        let mut image = vec![1.0; 16];
        fine_main(&config, &position, &color, &radius, &lists, &mut image);
        for pixel in image.chunks(4) {
            assert_eq!(pixel, &[0.5, 0.25, 0.75, 2.0]);
        }
    }

    #[test]
    fn pixels_read_only_their_own_tile() {
        // Two 1x1 tiles; only the right one lists the circle.
        let config = TileConfig::new(2, 1, 1, 1, SceneStyle::Flat);
        let position = [0.5, 0.5, 0.0];
        let color = [0.0, 0.0, 0.0];
        let radius = [2.0];
        let lists = [SENTINEL, SENTINEL, 0, SENTINEL];
        let mut image = vec![1.0; 8];
        fine_main(&config, &position, &color, &radius, &lists, &mut image);
        assert_eq!(&image[..4], &[1.0, 1.0, 1.0, 1.0]);
        assert_eq!(&image[4..], &[0.5, 0.5, 0.5, 1.5]);
    }
}
