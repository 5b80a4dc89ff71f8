// Copyright 2025 the Bokeh Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Image comparison.

use crate::Image;

/// The largest absolute difference between corresponding channels of two images.
///
/// Returns `None` when the images differ in size.
pub fn max_difference(a: &Image, b: &Image) -> Option<f32> {
    if a.width() != b.width() || a.height() != b.height() {
        return None;
    }
    Some(
        a.data()
            .iter()
            .zip(b.data())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f32::max),
    )
}

/// Whether two images have the same size and no channel differs by more than `tolerance`.
pub fn images_match(a: &Image, b: &Image, tolerance: f32) -> bool {
    max_difference(a, b).is_some_and(|diff| diff <= tolerance)
}
