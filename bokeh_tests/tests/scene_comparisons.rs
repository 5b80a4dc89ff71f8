// Copyright 2025 the Bokeh Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests which ensure that the tiled and reference renderers give the same
//! results across the demo scenes.
//!
//! Both renderers share their shading code, so any difference points at the
//! binning or compaction stages dropping or reordering circles.

use bokeh_tests::{compare_tiled_reference, test_scene, TestParams};

fn compare_scene(name: &str, params: TestParams) {
    let scene = test_scene(name).unwrap();
    compare_tiled_reference(&scene, &params)
        .unwrap()
        .assert_max_difference_at_most(1e-5)
        .unwrap();
}

#[test]
fn compare_rgb() {
    compare_scene("rgb", TestParams::new("compare_rgb", 256, 256));
}

#[test]
fn compare_rgby() {
    compare_scene(
        "rgby",
        TestParams::new("compare_rgby", 200, 150).with_tile_size(13),
    );
}

#[test]
fn compare_pattern() {
    compare_scene(
        "pattern",
        TestParams::new("compare_pattern", 128, 128).with_group_size(64),
    );
}

#[test]
fn compare_rand10k() {
    compare_scene(
        "rand10k",
        TestParams::new("compare_rand10k", 96, 96).with_tile_size(32),
    );
}

#[test]
fn compare_snowsingle() {
    compare_scene("snowsingle", TestParams::new("compare_snowsingle", 100, 100));
}

#[test]
fn compare_animated_scenes_after_a_few_frames() {
    for name in ["bouncingballs", "hypnosis", "fireworks"] {
        let mut scene = test_scene(name).unwrap();
        for _ in 0..10 {
            scene.advance(1.0 / 30.0);
        }
        let params = TestParams::new(format!("compare_{name}_animated"), 120, 120);
        compare_tiled_reference(&scene, &params)
            .unwrap()
            .assert_max_difference_at_most(1e-5)
            .unwrap();
    }
}
