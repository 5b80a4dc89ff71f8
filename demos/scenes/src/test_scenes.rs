// Copyright 2025 the Bokeh Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::f32::consts::TAU;

use bokeh_encoding::{Circle, CircleSet, SceneStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Animation, ExampleScene, Scene, SceneConfig, SceneSet};

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const NIGHT: [f32; 4] = [0.05, 0.05, 0.12, 1.0];
const SEED: u64 = 0x00b0_4e11;

macro_rules! scene {
    ($name: ident) => {
        scene!($name: false)
    };
    ($name: ident: animated) => {
        scene!($name: true)
    };
    ($name: ident: $animated: literal) => {
        scene!($name, stringify!($name), $animated)
    };
    ($func:expr, $name: expr, $animated: literal) => {
        ExampleScene {
            config: SceneConfig {
                animated: $animated,
                name: $name.to_owned(),
            },
            function: Box::new($func),
        }
    };
}

pub fn test_scenes() -> SceneSet {
    let scenes = vec![
        scene!(rgb),
        scene!(rgby),
        scene!(|| random_circles(10_000, 0.02, 0.06), "rand10k", false),
        scene!(|| random_circles(100_000, 0.005, 0.02), "rand100k", false),
        scene!(|| big_and_little(true), "biglittle", false),
        scene!(|| big_and_little(false), "littlebig", false),
        scene!(pattern),
        scene!(bouncingballs: animated),
        scene!(hypnosis: animated),
        scene!(fireworks: animated),
        scene!(|| snow(100_000), "snow", true),
        scene!(snowsingle: animated),
    ];

    SceneSet { scenes }
}

fn flat(circles: Vec<Circle>, animation: Animation) -> Scene {
    Scene::new(
        CircleSet::from_circles(SceneStyle::Flat, circles),
        WHITE,
        animation,
    )
}

/// Orders circles back to front, so that larger depths are drawn first.
fn depth_sorted(mut circles: Vec<Circle>) -> Vec<Circle> {
    circles.sort_by(|a, b| b.position[2].total_cmp(&a.position[2]));
    circles
}

fn random_color(rng: &mut StdRng) -> [f32; 3] {
    [rng.gen(), rng.gen(), rng.gen()]
}

// Scenes

fn rgb() -> Scene {
    let circle = |x: f32, z: f32, color: [f32; 3]| Circle {
        position: [x, 0.5, z],
        color,
        radius: 0.3,
        ..Default::default()
    };
    flat(
        vec![
            circle(0.4, 0.75, [1.0, 0.0, 0.0]),
            circle(0.5, 0.5, [0.0, 1.0, 0.0]),
            circle(0.6, 0.25, [0.0, 0.0, 1.0]),
        ],
        Animation::Still,
    )
}

fn rgby() -> Scene {
    let circle = |x: f32, y: f32, z: f32, radius: f32, color: [f32; 3]| Circle {
        position: [x, y, z],
        color,
        radius,
        ..Default::default()
    };
    flat(
        vec![
            circle(0.3, 0.35, 0.75, 0.25, [1.0, 0.0, 0.0]),
            circle(0.7, 0.35, 0.5, 0.25, [0.0, 1.0, 0.0]),
            circle(0.5, 0.7, 0.25, 0.25, [0.0, 0.0, 1.0]),
            circle(0.5, 0.45, 0.0, 0.15, [1.0, 1.0, 0.0]),
        ],
        Animation::Still,
    )
}

fn random_circles(count: usize, min_radius: f32, radius_range: f32) -> Scene {
    let mut rng = StdRng::seed_from_u64(SEED);
    let circles = (0..count)
        .map(|_| Circle {
            position: [rng.gen(), rng.gen(), rng.gen()],
            color: random_color(&mut rng),
            radius: min_radius + radius_range * rng.gen::<f32>(),
            ..Default::default()
        })
        .collect();
    flat(depth_sorted(circles), Animation::Still)
}

/// A few big circles and many little ones, with the big ones behind when
/// `big_behind` and in front otherwise.
fn big_and_little(big_behind: bool) -> Scene {
    const COUNT: usize = 50_000;
    const BIG: usize = 50;
    let mut rng = StdRng::seed_from_u64(SEED);
    let circles = (0..COUNT)
        .map(|i| {
            let is_big = i < BIG;
            let depth: f32 = rng.gen_range(0.0..0.5);
            let far = if is_big == big_behind { 0.5 } else { 0.0 };
            let radius = if is_big {
                rng.gen_range(0.1..0.25)
            } else {
                rng.gen_range(0.005..0.015)
            };
            Circle {
                position: [rng.gen(), rng.gen(), far + depth],
                color: random_color(&mut rng),
                radius,
                ..Default::default()
            }
        })
        .collect();
    flat(depth_sorted(circles), Animation::Still)
}

/// Concentric rings of circles colored by ring.
fn pattern() -> Scene {
    const RINGS: usize = 40;
    let mut circles = Vec::new();
    for ring in (0..RINGS).rev() {
        let ring_radius = 0.7 * ring as f32 / RINGS as f32;
        let count = (8 * ring).max(1);
        let t = ring as f32 / RINGS as f32;
        let color = [0.5 + 0.5 * (TAU * t).cos(), t, 1.0 - t];
        for k in 0..count {
            let angle = TAU * k as f32 / count as f32;
            circles.push(Circle {
                position: [
                    0.5 + ring_radius * angle.cos(),
                    0.5 + ring_radius * angle.sin(),
                    t,
                ],
                color,
                radius: 0.02 + 0.01 * (3.0 * angle).sin().abs(),
                ..Default::default()
            });
        }
    }
    flat(circles, Animation::Still)
}

fn bouncingballs() -> Scene {
    const COUNT: usize = 64;
    let mut rng = StdRng::seed_from_u64(SEED);
    let circles = (0..COUNT)
        .map(|_| {
            let radius = rng.gen_range(0.02..0.05);
            Circle {
                position: [
                    rng.gen_range(radius..1.0 - radius),
                    rng.gen_range(0.5..1.0 - radius),
                    rng.gen(),
                ],
                velocity: [rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5), 0.0],
                color: random_color(&mut rng),
                radius,
            }
        })
        .collect();
    flat(depth_sorted(circles), Animation::BouncingBalls)
}

fn hypnosis() -> Scene {
    const COUNT: usize = 32;
    let circles: Vec<Circle> = (0..COUNT)
        .map(|i| {
            let color = if i % 2 == 0 {
                [0.1, 0.1, 0.6]
            } else {
                [0.9, 0.9, 0.2]
            };
            Circle {
                position: [0.5, 0.5, 1.0 - i as f32 / COUNT as f32],
                color,
                radius: 0.45 * (COUNT - i) as f32 / COUNT as f32,
                ..Default::default()
            }
        })
        .collect();
    let base_radius = circles.iter().map(|c| c.radius).collect();
    flat(circles, Animation::Hypnosis { base_radius })
}

fn fireworks() -> Scene {
    const FIREWORKS: usize = 15;
    const SPARKS: usize = 100;
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut circles = Vec::with_capacity(FIREWORKS * (SPARKS + 1));
    for _ in 0..FIREWORKS {
        let center = [rng.gen_range(0.2..0.8), rng.gen_range(0.3..0.9)];
        let color = random_color(&mut rng);
        circles.push(Circle {
            position: [center[0], center[1], 0.0],
            color,
            radius: 0.03,
            ..Default::default()
        });
        for _ in 0..SPARKS {
            let angle = rng.gen_range(0.0..TAU);
            let speed = rng.gen_range(0.1..0.4);
            let distance = rng.gen_range(0.0..0.2);
            circles.push(Circle {
                position: [
                    center[0] + distance * angle.cos(),
                    center[1] + distance * angle.sin(),
                    0.0,
                ],
                velocity: [speed * angle.cos(), speed * angle.sin(), speed],
                color: [
                    (color[0] + 0.3).min(1.0),
                    (color[1] + 0.3).min(1.0),
                    (color[2] + 0.3).min(1.0),
                ],
                radius: rng.gen_range(0.004..0.01),
            });
        }
    }
    flat(
        circles,
        Animation::Fireworks {
            n_fireworks: FIREWORKS,
            n_sparks: SPARKS,
        },
    )
}

fn snow(count: usize) -> Scene {
    let mut rng = StdRng::seed_from_u64(SEED);
    let circles = (0..count)
        .map(|_| {
            let depth: f32 = rng.gen();
            Circle {
                position: [rng.gen(), rng.gen(), depth],
                velocity: [0.0, -(0.05 + 0.15 * (1.0 - depth)), 0.0],
                radius: 0.005 + 0.02 * (1.0 - depth),
                ..Default::default()
            }
        })
        .collect();
    Scene::new(
        CircleSet::from_circles(SceneStyle::Snowflake, depth_sorted(circles)),
        NIGHT,
        Animation::Snow,
    )
}

fn snowsingle() -> Scene {
    let flake = Circle {
        position: [0.5, 0.5, 0.0],
        velocity: [0.0, -0.1, 0.0],
        radius: 0.4,
        ..Default::default()
    };
    Scene::new(
        CircleSet::from_circles(SceneStyle::Snowflake, [flake]),
        NIGHT,
        Animation::Snow,
    )
}
