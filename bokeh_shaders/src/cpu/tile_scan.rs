// Copyright 2025 the Bokeh Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use bokeh_encoding::TileConfig;
use bokeh_scan::{exclusive_scan_chunked, ScanError, Workgroup};
use rayon::prelude::*;

/// Scans the hit row of each of the first `n_wg` tiles into `prefix`.
///
/// After this stage `prefix[t * n + c]` is the number of circles before `c`
/// that hit tile `t`, which is the slot of `c` in that tile's list.
pub fn tile_scan_main(
    n_wg: u32,
    config: &TileConfig,
    group: &Workgroup,
    hits: &[u32],
    prefix: &mut [u32],
) -> Result<(), ScanError> {
    let n = config.n_circles as usize;
    if n == 0 {
        return Ok(());
    }
    let len = n_wg as usize * n;
    for buffer_len in [hits.len(), prefix.len()] {
        if buffer_len < len {
            return Err(ScanError::BufferTooSmall {
                required: len,
                actual: buffer_len,
            });
        }
    }
    let scratch_len = 2 * group.size() as usize;
    prefix[..len]
        .par_chunks_mut(n)
        .zip(hits[..len].par_chunks(n))
        .try_for_each_init(
            || vec![0; scratch_len],
            |scratch, (prefix_row, hit_row)| {
                exclusive_scan_chunked(group, hit_row, prefix_row, scratch).map(|_| ())
            },
        )
}
