// Copyright 2025 the Bokeh Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Work-efficient exclusive scan (prefix sum) over `u32` data, and the stream
//! compaction built on top of it.
//!
//! Two flavors of the same up-sweep/down-sweep algorithm are provided:
//!
//! - [`exclusive_scan`] is the device-wide version. Every level of the sum tree
//!   is a separate parallel pass over the buffer, and the end of a pass is the
//!   barrier between levels.
//! - [`exclusive_scan_group`] runs inside a single [`Workgroup`], with the lanes
//!   of the group synchronizing between levels. [`exclusive_scan_chunked`]
//!   extends it to inputs wider than the group by carrying the running total
//!   from one chunk into the next.
//!
//! [`find_peaks`] is the canonical compaction example: flag, scan, scatter.

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

mod group;
mod peaks;
mod scan;

pub use group::{exclusive_scan_chunked, exclusive_scan_group, Workgroup, SCAN_BLOCK_DIM};
pub use peaks::{find_peaks, Peaks};
pub use scan::{exclusive_scan, exclusive_scan_to, next_pow2};

use thiserror::Error;

/// Violations of the scan primitives' calling contract.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    /// The backing buffer is shorter than the next power of two of the logical length.
    #[error("scan buffer holds {actual} elements but {required} are required")]
    BufferTooSmall { required: usize, actual: usize },
    /// The scratch buffer of a group scan is shorter than twice the group size.
    #[error("scan scratch holds {actual} elements but {required} are required")]
    ScratchTooSmall { required: usize, actual: usize },
    /// A single group scan was asked to cover more elements than its scratch tree holds.
    #[error("group scan over {len} elements exceeds group capacity of {capacity}")]
    GroupTooSmall { len: usize, capacity: usize },
    /// A workgroup must have at least one lane.
    #[error("workgroup size must be non-zero")]
    ZeroGroupSize,
}
