// Copyright 2025 the Bokeh Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Peak finding, as stream compaction over a scan.

use std::sync::atomic::{AtomicU32, Ordering};

use rayon::prelude::*;

use crate::next_pow2;
use crate::scan::scan_tree;

/// Indices of the strict local maxima of a sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Peaks {
    /// Ascending indices `i` with `input[i - 1] < input[i] > input[i + 1]`.
    pub indices: Vec<u32>,
    /// The number of peaks found, equal to `indices.len()`.
    pub count: u32,
}

/// Finds every index `i` in `1..input.len() - 1` that is strictly greater than both neighbors.
///
/// The first and last elements are never peaks. Inputs shorter than three
/// elements have no peaks.
pub fn find_peaks(input: &[i32]) -> Peaks {
    let len = input.len();
    if len < 3 {
        return Peaks::default();
    }

    let mut flags = vec![0_u32; next_pow2(len)];
    flags[..len]
        .par_iter_mut()
        .enumerate()
        .for_each(|(i, flag)| {
            let is_peak = i > 0 && i < len - 1 && input[i - 1] < input[i] && input[i] > input[i + 1];
            *flag = u32::from(is_peak);
        });

    let mut offsets = flags.clone();
    scan_tree(&mut offsets);
    let count = offsets[len - 1] + flags[len - 1];

    let slots: Vec<AtomicU32> = (0..count).map(|_| AtomicU32::new(0)).collect();
    flags[..len]
        .par_iter()
        .zip(&offsets[..len])
        .enumerate()
        .for_each(|(i, (&flag, &offset))| {
            if flag == 1 {
                slots[offset as usize].store(i as u32, Ordering::Relaxed);
            }
        });

    Peaks {
        indices: slots.into_iter().map(AtomicU32::into_inner).collect(),
        count,
    }
}
