// Copyright 2025 the Bokeh Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::TryReserveError;

/// Marks the end of a tile's circle list.
///
/// This is the bit pattern of `-1_i32`; no circle index can reach it.
pub const SENTINEL: u32 = u32::MAX;

/// Per-tile working storage of the tiling pipeline.
///
/// All three arrays are flat and indexed by tile row:
///
/// - `hits[t * n + c]` is 1 when circle `c` may cover tile `t`.
/// - `prefix[t * n + c]` counts the hits of tile `t` among circles `0..c`.
/// - `lists[t * (n + 1)..]` holds the ascending indices of the circles hitting
///   tile `t`, terminated by [`SENTINEL`]. The extra slot per row leaves room
///   for the sentinel when every circle hits the tile.
///
/// The buffers are sized once per scene and reused by every frame.
#[derive(Clone, Debug, Default)]
pub struct TileBuffers {
    pub hits: Vec<u32>,
    pub prefix: Vec<u32>,
    pub lists: Vec<u32>,
    n_tiles: usize,
    n_circles: usize,
}

impl TileBuffers {
    /// Resizes the buffers for `n_tiles` tiles and `n_circles` circles.
    ///
    /// Does nothing when the shape is unchanged; returns whether storage was
    /// reallocated.
    pub fn fit(&mut self, n_tiles: usize, n_circles: usize) -> Result<bool, TryReserveError> {
        if self.n_tiles == n_tiles && self.n_circles == n_circles && !self.lists.is_empty() {
            return Ok(false);
        }
        self.hits.clear();
        self.prefix.clear();
        self.lists.clear();
        self.n_tiles = 0;
        self.n_circles = 0;

        let matrix_len = n_tiles.saturating_mul(n_circles);
        let lists_len = n_tiles.saturating_mul(n_circles.saturating_add(1));
        for (buffer, len, fill) in [
            (&mut self.hits, matrix_len, 0),
            (&mut self.prefix, matrix_len, 0),
            (&mut self.lists, lists_len, SENTINEL),
        ] {
            buffer.try_reserve_exact(len)?;
            buffer.resize(len, fill);
        }
        self.n_tiles = n_tiles;
        self.n_circles = n_circles;
        Ok(true)
    }

    pub fn n_tiles(&self) -> usize {
        self.n_tiles
    }

    pub fn n_circles(&self) -> usize {
        self.n_circles
    }

    /// Distance between the starts of two consecutive tile lists.
    pub fn list_stride(&self) -> usize {
        self.n_circles + 1
    }

    pub fn hit_row(&self, tile_ix: usize) -> &[u32] {
        &self.hits[tile_ix * self.n_circles..][..self.n_circles]
    }

    pub fn prefix_row(&self, tile_ix: usize) -> &[u32] {
        &self.prefix[tile_ix * self.n_circles..][..self.n_circles]
    }

    /// The whole list row of a tile, including the sentinel and unused slots.
    pub fn list_row(&self, tile_ix: usize) -> &[u32] {
        let stride = self.list_stride();
        &self.lists[tile_ix * stride..][..stride]
    }

    /// The circles of a tile, up to but excluding the sentinel.
    pub fn tile_circles(&self, tile_ix: usize) -> &[u32] {
        live_entries(self.list_row(tile_ix))
    }
}

/// Returns the entries of a list row before its sentinel.
#[inline]
pub fn live_entries(row: &[u32]) -> &[u32] {
    let end = row.iter().position(|&c| c == SENTINEL).unwrap_or(row.len());
    &row[..end]
}
