// Copyright 2025 the Bokeh Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Properties of the per-tile circle lists built by the renderer.

use bokeh::bokeh_encoding::{Circle, CircleSet, SceneStyle, TileConfig, SENTINEL};
use bokeh::bokeh_shaders::cpu::circle_in_box_conservative;
use bokeh::{Image, Renderer, RendererOptions};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn lists_for(circles: &CircleSet, size: u32, options: RendererOptions) -> Renderer {
    let mut renderer = Renderer::new(options).unwrap();
    let mut image = Image::solid(size, size, [1.0; 4]);
    renderer.render(circles, &mut image).unwrap();
    renderer
}

fn tiles_hit(renderer: &Renderer, circle: u32) -> Vec<usize> {
    let buffers = renderer.tile_lists();
    (0..buffers.n_tiles())
        .filter(|&t| buffers.tile_circles(t).contains(&circle))
        .collect()
}

fn one(x: f32, y: f32, radius: f32) -> CircleSet {
    CircleSet::from_circles(
        SceneStyle::Flat,
        [Circle {
            position: [x, y, 0.0],
            radius,
            ..Default::default()
        }],
    )
}

#[test]
fn circle_inside_a_tile_hits_only_that_tile() {
    // 64 pixels in tiles of 16: tile (2, 1) spans [0.5, 0.75] x [0.25, 0.5].
    let renderer = lists_for(&one(0.625, 0.375, 0.05), 64, RendererOptions::default());
    assert_eq!(tiles_hit(&renderer, 0), vec![6]);
}

#[test]
fn circle_spanning_a_boundary_hits_every_overlapped_tile() {
    let renderer = lists_for(&one(0.5, 0.375, 0.05), 64, RendererOptions::default());
    assert_eq!(tiles_hit(&renderer, 0), vec![5, 6]);
}

#[test]
fn touching_a_boundary_counts_for_both_tiles() {
    // The bounding box ends exactly on the boundary at x = 0.5.
    let renderer = lists_for(&one(0.375, 0.375, 0.125), 64, RendererOptions::default());
    assert_eq!(tiles_hit(&renderer, 0), vec![0, 1, 2, 4, 5, 6, 8, 9, 10]);
}

#[test]
fn circles_in_view_hit_at_least_one_tile() {
    let mut rng = StdRng::seed_from_u64(7);
    let circles = CircleSet::from_circles(
        SceneStyle::Flat,
        (0..300).map(|_| Circle {
            position: [rng.gen(), rng.gen(), 0.0],
            radius: rng.gen_range(0.0..0.02),
            ..Default::default()
        }),
    );
    let renderer = lists_for(&circles, 100, RendererOptions::default());
    for c in 0..circles.len() as u32 {
        assert!(!tiles_hit(&renderer, c).is_empty(), "circle {c}");
    }
}

#[test]
fn lists_are_ascending_complete_and_terminated() {
    let mut rng = StdRng::seed_from_u64(42);
    let circles = CircleSet::from_circles(
        SceneStyle::Flat,
        (0..700).map(|_| Circle {
            position: [rng.gen_range(-0.1..1.1), rng.gen_range(-0.1..1.1), rng.gen()],
            radius: rng.gen_range(0.01..0.15),
            ..Default::default()
        }),
    );
    for group_size in [1, 5, 256] {
        let options = RendererOptions {
            tile_size: 12,
            group_size,
        };
        let renderer = lists_for(&circles, 90, options);
        let config: &TileConfig = renderer.config();
        let buffers = renderer.tile_lists();
        assert_eq!(buffers.n_tiles(), 64);

        for t in 0..buffers.n_tiles() {
            let [left, bottom, right, top] = config.tile_bounds(t as u32);
            let expected: Vec<u32> = (0..circles.len())
                .filter(|&c| {
                    let [x, y, _] = circles.position(c);
                    circle_in_box_conservative(x, y, circles.radius(c), left, right, top, bottom)
                })
                .map(|c| c as u32)
                .collect();
            let live = buffers.tile_circles(t);
            assert_eq!(live, expected.as_slice(), "tile {t}, group size {group_size}");
            assert!(live.windows(2).all(|w| w[0] < w[1]));

            let row = buffers.list_row(t);
            assert_eq!(row[live.len()], SENTINEL);
            assert_eq!(row.iter().filter(|&&c| c == SENTINEL).count(), row.len() - live.len());

            let hits = buffers.hit_row(t);
            let prefix = buffers.prefix_row(t);
            let n = circles.len();
            assert_eq!((prefix[n - 1] + hits[n - 1]) as usize, live.len());
            for c in 0..n - 1 {
                assert_eq!(prefix[c + 1], prefix[c] + hits[c]);
            }
        }
    }
}

#[test]
fn tile_hit_by_every_circle_keeps_its_sentinel() {
    let circles = CircleSet::from_circles(
        SceneStyle::Flat,
        (0..10).map(|_| Circle {
            position: [0.5, 0.5, 0.0],
            radius: 0.9,
            ..Default::default()
        }),
    );
    let renderer = lists_for(&circles, 32, RendererOptions::default());
    let buffers = renderer.tile_lists();
    for t in 0..buffers.n_tiles() {
        assert_eq!(buffers.tile_circles(t), &(0..10).collect::<Vec<u32>>()[..]);
        assert_eq!(buffers.list_row(t)[10], SENTINEL);
    }
}
