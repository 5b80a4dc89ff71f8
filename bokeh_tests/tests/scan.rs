// Copyright 2025 the Bokeh Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Properties of the scan and compaction primitives on random inputs.

use bokeh::bokeh_scan::{
    exclusive_scan, exclusive_scan_chunked, exclusive_scan_to, find_peaks, next_pow2, Workgroup,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn serial_exclusive(input: &[u32]) -> Vec<u32> {
    input
        .iter()
        .scan(0, |sum, &x| {
            let before = *sum;
            *sum += x;
            Some(before)
        })
        .collect()
}

#[test]
fn device_and_group_scans_agree_with_a_serial_scan() {
    let mut rng = StdRng::seed_from_u64(1);
    for len in [0, 1, 2, 3, 255, 256, 257, 1000, 4097] {
        let input: Vec<u32> = (0..len).map(|_| rng.gen_range(0..100)).collect();
        let expected = serial_exclusive(&input);

        let mut data = input.clone();
        data.resize(next_pow2(len), 0);
        exclusive_scan(&mut data, len).unwrap();
        assert_eq!(&data[..len], expected.as_slice(), "device-wide, len {len}");
        assert_eq!(exclusive_scan_to(&input), expected);

        for group_size in [1, 7, 256] {
            let group = Workgroup::new(group_size).unwrap();
            let mut output = vec![0; len];
            let mut scratch = vec![0; 2 * group_size as usize];
            let total = exclusive_scan_chunked(&group, &input, &mut output, &mut scratch).unwrap();
            assert_eq!(output, expected, "group of {group_size}, len {len}");
            assert_eq!(total, input.iter().sum::<u32>());
        }
    }
}

#[test]
fn neighbouring_differences_give_back_the_input() {
    let mut rng = StdRng::seed_from_u64(2);
    let input: Vec<u32> = (0..777).map(|_| rng.gen_range(0..10)).collect();
    let scanned = exclusive_scan_to(&input);
    for i in 0..input.len() - 1 {
        assert_eq!(scanned[i + 1] - scanned[i], input[i]);
    }
}

#[test]
fn peaks_match_a_direct_search() {
    let mut rng = StdRng::seed_from_u64(3);
    for len in [0usize, 2, 3, 10, 1000, 5000] {
        let input: Vec<i32> = (0..len).map(|_| rng.gen_range(-20..20)).collect();
        let expected: Vec<u32> = (1..len.saturating_sub(1))
            .filter(|&i| input[i - 1] < input[i] && input[i] > input[i + 1])
            .map(|i| i as u32)
            .collect();
        let peaks = find_peaks(&input);
        assert_eq!(peaks.count as usize, expected.len(), "len {len}");
        assert_eq!(peaks.indices, expected, "len {len}");
    }
}

#[test]
fn documented_peak_example() {
    let peaks = find_peaks(&[1, 5, 2, 8, 2, 9, 1]);
    assert_eq!(peaks.indices, vec![1, 3, 5]);
    assert_eq!(peaks.count, 3);
}
