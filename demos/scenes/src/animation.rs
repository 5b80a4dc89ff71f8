// Copyright 2025 the Bokeh Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use bokeh_encoding::CircleSet;

/// Downward acceleration in normalized units per second squared.
const GRAVITY: f32 = 2.8;
/// Fraction of vertical speed kept by a ball bouncing off the floor.
const BOUNCE_DAMPING: f32 = 0.8;
/// Sparks further than this from their firework restart at its center.
const SPARK_RANGE: f32 = 0.25;
const PULSE_AMPLITUDE: f32 = 0.1;
const PULSE_FREQUENCY: f32 = 4.0;
const SNOW_DRIFT: f32 = 0.02;

/// Per-frame update rule of a scene.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Animation {
    #[default]
    Still,
    /// Balls fall under gravity and bounce off the floor and the side walls.
    BouncingBalls,
    /// Concentric circles pulse around their base radius, one ring after another.
    Hypnosis { base_radius: Vec<f32> },
    /// Each firework is a center circle followed by `n_sparks` sparks flying
    /// away from it. A spark's launch speed is kept in the `z` of its velocity.
    Fireworks { n_fireworks: usize, n_sparks: usize },
    /// Flakes fall at their own speed, drift sideways and wrap around the image.
    Snow,
}

impl Animation {
    pub fn is_animated(&self) -> bool {
        !matches!(self, Self::Still)
    }

    /// Moves `circles` from `time` to `time + dt`.
    pub fn step(&self, circles: &mut CircleSet, time: f32, dt: f32) {
        match self {
            Self::Still => {}
            Self::BouncingBalls => bounce(circles, dt),
            Self::Hypnosis { base_radius } => pulse(circles, base_radius, time + dt),
            Self::Fireworks {
                n_fireworks,
                n_sparks,
            } => fireworks(circles, *n_fireworks, *n_sparks, dt),
            Self::Snow => snow(circles, time, dt),
        }
    }
}

fn bounce(circles: &mut CircleSet, dt: f32) {
    for i in 0..circles.len() {
        let r = circles.radius[i];
        let (x, y) = (3 * i, 3 * i + 1);
        circles.velocity[y] -= GRAVITY * dt;
        circles.position[x] += circles.velocity[x] * dt;
        circles.position[y] += circles.velocity[y] * dt;

        if circles.position[y] < r {
            circles.position[y] = r;
            circles.velocity[y] = -circles.velocity[y] * BOUNCE_DAMPING;
        }
        if circles.position[x] < r {
            circles.position[x] = r;
            circles.velocity[x] = circles.velocity[x].abs();
        } else if circles.position[x] > 1.0 - r {
            circles.position[x] = 1.0 - r;
            circles.velocity[x] = -circles.velocity[x].abs();
        }
    }
}

fn pulse(circles: &mut CircleSet, base_radius: &[f32], time: f32) {
    for (i, (radius, base)) in circles.radius.iter_mut().zip(base_radius).enumerate() {
        let phase = PULSE_FREQUENCY * time - 0.5 * i as f32;
        *radius = base * (1.0 + PULSE_AMPLITUDE * phase.sin());
    }
}

fn fireworks(circles: &mut CircleSet, n_fireworks: usize, n_sparks: usize, dt: f32) {
    let stride = n_sparks + 1;
    for f in 0..n_fireworks.min(circles.len() / stride) {
        let center = circles.position(f * stride);
        for s in f * stride + 1..(f + 1) * stride {
            let v = 3 * s;
            circles.velocity[v + 1] -= 0.1 * GRAVITY * dt;
            circles.position[v] += circles.velocity[v] * dt;
            circles.position[v + 1] += circles.velocity[v + 1] * dt;

            let dx = circles.position[v] - center[0];
            let dy = circles.position[v + 1] - center[1];
            let dist = (dx * dx + dy * dy).sqrt();
            if dist > SPARK_RANGE {
                let speed = circles.velocity[v + 2];
                circles.position[v] = center[0];
                circles.position[v + 1] = center[1];
                circles.velocity[v] = dx / dist * speed;
                circles.velocity[v + 1] = dy / dist * speed;
            }
        }
    }
}

fn snow(circles: &mut CircleSet, time: f32, dt: f32) {
    for i in 0..circles.len() {
        let r = circles.radius[i];
        let p = 3 * i;
        let drift = SNOW_DRIFT * (2.0 * time + i as f32).sin();
        circles.position[p] += (circles.velocity[p] + drift) * dt;
        circles.position[p + 1] += circles.velocity[p + 1] * dt;

        let span = 1.0 + 2.0 * r;
        if circles.position[p + 1] < -r {
            circles.position[p + 1] += span;
        }
        if circles.position[p] < -r {
            circles.position[p] += span;
        } else if circles.position[p] > 1.0 + r {
            circles.position[p] -= span;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Animation;
    use bokeh_encoding::{Circle, CircleSet, SceneStyle};

    fn single(circle: Circle) -> CircleSet {
        CircleSet::from_circles(SceneStyle::Flat, [circle])
    }

    #[test]
    fn balls_bounce_off_the_floor() {
        let mut circles = single(Circle {
            position: [0.5, 0.06, 0.0],
            velocity: [0.0, -1.0, 0.0],
            radius: 0.05,
            ..Default::default()
        });
        Animation::BouncingBalls.step(&mut circles, 0.0, 0.1);
        assert!((circles.position[1] - 0.05).abs() < 1e-6);
        assert!(circles.velocity[1] > 0.0);
    }

    #[test]
    fn sparks_restart_at_their_firework() {
        let mut circles = CircleSet::from_circles(
            SceneStyle::Flat,
            [
                Circle {
                    position: [0.5, 0.5, 0.0],
                    radius: 0.03,
                    ..Default::default()
                },
                Circle {
                    position: [0.74, 0.5, 0.0],
                    velocity: [1.0, 0.0, 0.5],
                    radius: 0.01,
                    ..Default::default()
                },
            ],
        );
        let animation = Animation::Fireworks {
            n_fireworks: 1,
            n_sparks: 1,
        };
        animation.step(&mut circles, 0.0, 0.1);
        assert_eq!(circles.position(1)[..2], [0.5, 0.5]);
        assert!((circles.velocity[3] - 0.5).abs() < 1e-3);
        assert_eq!(circles.position(0), [0.5, 0.5, 0.0]);
    }

    #[test]
    fn snow_wraps_to_the_top() {
        let mut circles = single(Circle {
            position: [0.5, -0.009, 0.5],
            velocity: [0.0, -0.2, 0.0],
            radius: 0.01,
            ..Default::default()
        });
        Animation::Snow.step(&mut circles, 0.0, 0.1);
        assert!(circles.position[1] > 0.9);
        assert_eq!(circles.len(), 1);
    }

    #[test]
    fn hypnosis_pulses_around_the_base_radius() {
        let mut circles = single(Circle {
            radius: 0.4,
            ..Default::default()
        });
        let animation = Animation::Hypnosis {
            base_radius: vec![0.4],
        };
        for step in 0..20 {
            animation.step(&mut circles, step as f32 * 0.05, 0.05);
            assert!((circles.radius[0] - 0.4).abs() <= 0.04 + 1e-6);
        }
    }
}
