// Copyright 2025 the Bokeh Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use bokeh_encoding::TileConfig;
use bokeh_scan::Workgroup;
use rayon::prelude::*;

use super::as_vec3;

/// Whether the bounding box of a circle overlaps the box `[left, right] x [bottom, top]`.
///
/// The test is inclusive, so a circle whose bounding box just touches a tile
/// edge counts for the tiles on both sides of it. It is conservative: the
/// circle itself may miss the box near the box corners.
#[inline]
pub fn circle_in_box_conservative(
    x: f32,
    y: f32,
    radius: f32,
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
) -> bool {
    x >= left - radius && x <= right + radius && y >= bottom - radius && y <= top + radius
}

/// Flags, for each of the first `n_wg` tiles, every circle that may cover it.
///
/// One group handles one tile row of `hits`, sweeping all circles with its
/// lanes strided by the group size.
pub fn tile_mark_main(
    n_wg: u32,
    config: &TileConfig,
    group: &Workgroup,
    position: &[f32],
    radius: &[f32],
    hits: &mut [u32],
) {
    let n = config.n_circles as usize;
    if n == 0 {
        return;
    }
    let centers = as_vec3(position);
    hits[..n_wg as usize * n]
        .par_chunks_mut(n)
        .enumerate()
        .for_each(|(tile_ix, row)| {
            let [left, bottom, right, top] = config.tile_bounds(tile_ix as u32);
            group.strided(n, |_, circle_ix| {
                let [x, y, _] = centers[circle_ix];
                let hit =
                    circle_in_box_conservative(x, y, radius[circle_ix], left, right, top, bottom);
                row[circle_ix] = u32::from(hit);
            });
        });
}

#[cfg(test)]
mod tests {
    use super::{circle_in_box_conservative, tile_mark_main};
    use bokeh_encoding::{Circle, CircleSet, SceneStyle, TileConfig};
    use bokeh_scan::Workgroup;

    fn mark(circles: &CircleSet, width: u32, height: u32, tile_size: u32) -> (TileConfig, Vec<u32>) {
        let config = TileConfig::new(width, height, tile_size, circles.len() as u32, SceneStyle::Flat);
        let mut hits = vec![7; config.n_tiles() as usize * circles.len()];
        tile_mark_main(
            config.n_tiles(),
            &config,
            &Workgroup::new(2).unwrap(),
            &circles.position,
            &circles.radius,
            &mut hits,
        );
        (config, hits)
    }

    fn circle(x: f32, y: f32, radius: f32) -> Circle {
        Circle {
            position: [x, y, 0.0],
            radius,
            ..Default::default()
        }
    }

    #[test]
    fn touching_the_edge_counts() {
        assert!(circle_in_box_conservative(0.6, 0.25, 0.1, 0.0, 0.5, 0.5, 0.0));
        assert!(!circle_in_box_conservative(0.61, 0.25, 0.1, 0.0, 0.5, 0.5, 0.0));
    }

    #[test]
    fn circle_inside_one_tile_hits_only_that_tile() {
        // 4x4 tiles of 16 pixels; the circle sits in tile (1, 2).
        let circles = CircleSet::from_circles(SceneStyle::Flat, [circle(0.375, 0.625, 0.05)]);
        let (config, hits) = mark(&circles, 64, 64, 16);
        let hit_tiles: Vec<u32> = (0..config.n_tiles()).filter(|&t| hits[t as usize] == 1).collect();
        assert_eq!(hit_tiles, vec![9]);
    }

    #[test]
    fn circle_across_a_corner_hits_all_four_tiles() {
        let circles = CircleSet::from_circles(SceneStyle::Flat, [circle(0.5, 0.5, 0.05)]);
        let (config, hits) = mark(&circles, 64, 64, 16);
        let hit_tiles: Vec<u32> = (0..config.n_tiles()).filter(|&t| hits[t as usize] == 1).collect();
        assert_eq!(hit_tiles, vec![5, 6, 9, 10]);
    }

    #[test]
    fn every_circle_is_flagged_in_every_row_regardless_of_group_width() {
        let circles = CircleSet::from_circles(
            SceneStyle::Flat,
            (0..5).map(|i| circle(0.1 + 0.2 * i as f32, 0.1, 0.01)),
        );
        let (config, hits) = mark(&circles, 40, 40, 8);
        assert!(hits.iter().all(|&h| h <= 1));
        for c in 0..circles.len() {
            let rows = (0..config.n_tiles() as usize).filter(|t| hits[t * circles.len() + c] == 1);
            assert!(rows.count() >= 1, "circle {c} hit no tile");
        }
    }
}
