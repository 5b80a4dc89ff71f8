// Copyright 2025 the Bokeh Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CPU implementations of the pipeline stages.
//!
//! Each stage is a `*_main` function taking the scene's [`TileConfig`] and the
//! flat buffers it reads and writes. Stages write disjoint parts of their
//! output, so the caller only has to run them in order.
//!
//! Tiles are processed by one [`Workgroup`](bokeh_scan::Workgroup) each, and
//! groups run in parallel. Pixels are processed independently in parallel.
//!
//! [`TileConfig`]: bokeh_encoding::TileConfig

// Allow un-idiomatic Rust to more closely match the stage descriptions
#![allow(
    clippy::needless_range_loop,
    reason = "Keeps code easily comparable to the per-lane formulation"
)]

mod fine;
mod shading;
mod tile_list;
mod tile_mark;
mod tile_scan;

pub use fine::fine_main;
pub use shading::{composite_over, lookup_color, shade_pixel, CircleShade};
pub use tile_list::tile_list_main;
pub use tile_mark::{circle_in_box_conservative, tile_mark_main};
pub use tile_scan::tile_scan_main;

/// Views a flat `x, y, z` array as one `[f32; 3]` per circle.
///
/// Trailing elements that do not form a whole triple are ignored.
pub(crate) fn as_vec3(flat: &[f32]) -> &[[f32; 3]] {
    bytemuck::cast_slice(&flat[..flat.len() - flat.len() % 3])
}
