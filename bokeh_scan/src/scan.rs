// Copyright 2025 the Bokeh Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Device-wide exclusive scan.

use rayon::prelude::*;

use crate::ScanError;

/// Rounds `n` up to the next power of two. Zero stays zero.
pub fn next_pow2(n: usize) -> usize {
    if n == 0 {
        0
    } else {
        n.next_power_of_two()
    }
}

/// Computes the exclusive prefix sum of the first `n` elements of `data`, in place.
///
/// `data` must hold at least `next_pow2(n)` elements. Elements from `n` up to
/// `next_pow2(n)` are cleared and used as padding of the sum tree; whatever they
/// held before does not influence the first `n` results.
///
/// Each level of the up-sweep and of the down-sweep is one parallel pass over
/// the `next_pow2(n) / (2 * twod)` independent nodes of that level, so the total
/// work stays linear in the buffer length.
pub fn exclusive_scan(data: &mut [u32], n: usize) -> Result<(), ScanError> {
    let len = next_pow2(n);
    if data.len() < len {
        return Err(ScanError::BufferTooSmall {
            required: len,
            actual: data.len(),
        });
    }
    data[n..len].fill(0);
    scan_tree(&mut data[..len]);
    Ok(())
}

/// Scans a buffer whose length is zero or a power of two.
pub(crate) fn scan_tree(tree: &mut [u32]) {
    let len = tree.len();
    if len == 0 {
        return;
    }

    let mut twod = 1;
    while twod < len {
        let twod1 = twod * 2;
        tree.par_chunks_mut(twod1).for_each(|node| {
            node[twod1 - 1] += node[twod - 1];
        });
        twod = twod1;
    }

    tree[len - 1] = 0;

    let mut twod = len / 2;
    while twod >= 1 {
        let twod1 = twod * 2;
        tree.par_chunks_mut(twod1).for_each(|node| {
            let left = node[twod - 1];
            node[twod - 1] = node[twod1 - 1];
            node[twod1 - 1] += left;
        });
        twod /= 2;
    }
}

/// Returns the exclusive prefix sum of `input` in a freshly allocated vector.
///
/// The vector is padded to `next_pow2(input.len())` while scanning and truncated
/// back to `input.len()` before it is returned.
pub fn exclusive_scan_to(input: &[u32]) -> Vec<u32> {
    let mut result = vec![0; next_pow2(input.len())];
    result[..input.len()].copy_from_slice(input);
    scan_tree(&mut result);
    result.truncate(input.len());
    result
}
