// Copyright 2025 the Bokeh Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Group-local exclusive scan.

use crate::{next_pow2, ScanError};

/// Number of lanes in the cooperative group used for per-tile scans.
pub const SCAN_BLOCK_DIM: u32 = 256;

/// A cooperative group of lanes executing in lockstep.
///
/// The lanes of a group share scratch memory and synchronize at barriers.
/// Every call to [`Workgroup::step`] runs all lanes from the previous barrier
/// to the next one, so writes made by any lane in one step are visible to all
/// lanes in the following step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Workgroup {
    size: u32,
}

impl Workgroup {
    /// Creates a group with `size` lanes.
    pub fn new(size: u32) -> Result<Self, ScanError> {
        if size == 0 {
            return Err(ScanError::ZeroGroupSize);
        }
        Ok(Self { size })
    }

    /// The number of lanes in the group.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Runs every lane of the group up to the next barrier.
    #[inline]
    pub fn step(&self, mut lane: impl FnMut(u32)) {
        for local_ix in 0..self.size {
            lane(local_ix);
        }
    }

    /// Runs every lane over the indices `0..len` it owns in a sweep strided by the
    /// group size, then synchronizes.
    ///
    /// Lane `l` visits `l`, `l + size`, `l + 2 * size`, ... in increasing order.
    #[inline]
    pub fn strided(&self, len: usize, mut visit: impl FnMut(u32, usize)) {
        let stride = self.size as usize;
        self.step(|local_ix| {
            let mut ix = local_ix as usize;
            while ix < len {
                visit(local_ix, ix);
                ix += stride;
            }
        });
    }
}

impl Default for Workgroup {
    fn default() -> Self {
        Self {
            size: SCAN_BLOCK_DIM,
        }
    }
}

/// Exclusive scan of `input` by one cooperative group, written to `output`.
///
/// Each lane owns two leaves of the sum tree, so a group of `size` lanes scans
/// up to `2 * size` elements using `scratch` as shared memory; `scratch` must
/// hold at least `2 * size` elements. Returns the sum of all of `input`.
pub fn exclusive_scan_group(
    group: &Workgroup,
    input: &[u32],
    output: &mut [u32],
    scratch: &mut [u32],
) -> Result<u32, ScanError> {
    let capacity = 2 * group.size() as usize;
    if scratch.len() < capacity {
        return Err(ScanError::ScratchTooSmall {
            required: capacity,
            actual: scratch.len(),
        });
    }
    let n = input.len();
    if n > capacity {
        return Err(ScanError::GroupTooSmall { len: n, capacity });
    }
    if output.len() < n {
        return Err(ScanError::BufferTooSmall {
            required: n,
            actual: output.len(),
        });
    }
    if n == 0 {
        return Ok(0);
    }
    let len = next_pow2(n);

    group.step(|local_ix| {
        for ix in [2 * local_ix as usize, 2 * local_ix as usize + 1] {
            if ix < len {
                scratch[ix] = input.get(ix).copied().unwrap_or(0);
            }
        }
    });

    let mut twod = 1;
    while twod < len {
        let twod1 = twod * 2;
        let nodes = len / twod1;
        group.step(|local_ix| {
            let node = local_ix as usize;
            if node < nodes {
                let i = node * twod1;
                scratch[i + twod1 - 1] += scratch[i + twod - 1];
            }
        });
        twod = twod1;
    }

    let total = scratch[len - 1];
    scratch[len - 1] = 0;

    let mut twod = len / 2;
    while twod >= 1 {
        let twod1 = twod * 2;
        let nodes = len / twod1;
        group.step(|local_ix| {
            let node = local_ix as usize;
            if node < nodes {
                let i = node * twod1;
                let left = scratch[i + twod - 1];
                scratch[i + twod - 1] = scratch[i + twod1 - 1];
                scratch[i + twod1 - 1] += left;
            }
        });
        twod /= 2;
    }

    group.step(|local_ix| {
        for ix in [2 * local_ix as usize, 2 * local_ix as usize + 1] {
            if ix < n {
                output[ix] = scratch[ix];
            }
        }
    });
    Ok(total)
}

/// Exclusive scan of an input of any length by one cooperative group.
///
/// The input is consumed in chunks as wide as the group. The running total of
/// all previous chunks is carried into the results of the next chunk. Returns
/// the sum of all of `input`.
pub fn exclusive_scan_chunked(
    group: &Workgroup,
    input: &[u32],
    output: &mut [u32],
    scratch: &mut [u32],
) -> Result<u32, ScanError> {
    if output.len() < input.len() {
        return Err(ScanError::BufferTooSmall {
            required: input.len(),
            actual: output.len(),
        });
    }
    let chunk_len = group.size() as usize;
    let mut carry = 0;
    for (chunk_in, chunk_out) in input
        .chunks(chunk_len)
        .zip(output[..input.len()].chunks_mut(chunk_len))
    {
        let chunk_total = exclusive_scan_group(group, chunk_in, chunk_out, scratch)?;
        group.step(|local_ix| {
            if let Some(value) = chunk_out.get_mut(local_ix as usize) {
                *value += carry;
            }
        });
        carry += chunk_total;
    }
    Ok(carry)
}
