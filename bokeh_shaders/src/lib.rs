// Copyright 2025 the Bokeh Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The data-parallel stages of the Bokeh tile pipeline.
//!
//! A frame runs four stages, each of which completes before the next starts:
//!
//! 1. [`cpu::tile_mark_main`] flags, for every tile, the circles whose bounding box
//!    touches it.
//! 2. [`cpu::tile_scan_main`] turns each tile's flags into output offsets with a
//!    group-local exclusive scan.
//! 3. [`cpu::tile_list_main`] scatters circle indices to those offsets, giving every
//!    tile an ascending, sentinel-terminated circle list.
//! 4. [`cpu::fine_main`] composites, for every pixel, the circles of its tile in
//!    list order.

// LINEBENDER LINT SET - lib.rs - v2
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![forbid(unsafe_code)]

pub mod cpu;
