// Copyright 2025 the Bokeh Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use bokeh_encoding::{TileConfig, SENTINEL};
use bokeh_scan::Workgroup;
use rayon::prelude::*;

/// Compacts the hit rows of the first `n_wg` tiles into circle lists.
///
/// Each list row has `n + 1` slots. The circles hitting the tile are written
/// in ascending order to slots `0..total`, and every slot from `total` on holds
/// [`SENTINEL`], so a reader can stop at the first sentinel.
pub fn tile_list_main(
    n_wg: u32,
    config: &TileConfig,
    group: &Workgroup,
    hits: &[u32],
    prefix: &[u32],
    lists: &mut [u32],
) {
    let n = config.n_circles as usize;
    let stride = n + 1;
    let n_wg = n_wg as usize;
    if n == 0 {
        lists[..n_wg].fill(SENTINEL);
        return;
    }
    lists[..n_wg * stride]
        .par_chunks_mut(stride)
        .zip(hits[..n_wg * n].par_chunks(n))
        .zip(prefix[..n_wg * n].par_chunks(n))
        .for_each(|((list, hit), prefix)| {
            let total = (prefix[n - 1] + hit[n - 1]) as usize;
            group.strided(stride, |_, slot| {
                if slot < n && hit[slot] == 1 {
                    list[prefix[slot] as usize] = slot as u32;
                }
                if slot >= total {
                    list[slot] = SENTINEL;
                }
            });
        });
}

#[cfg(test)]
mod tests {
    use super::tile_list_main;
    use bokeh_encoding::{live_entries, SceneStyle, TileConfig, SENTINEL};
    use bokeh_scan::{exclusive_scan_to, Workgroup};

    fn build(n_tiles: u32, n: u32, hits: &[u32], group_size: u32) -> Vec<u32> {
        let config = TileConfig::new(n_tiles, 1, 1, n, SceneStyle::Flat);
        let prefix: Vec<u32> = hits
            .chunks(n as usize)
            .flat_map(exclusive_scan_to)
            .collect();
        // Stale data from an earlier frame must not survive.
        let mut lists = vec![42; n_tiles as usize * (n as usize + 1)];
        tile_list_main(
            n_tiles,
            &config,
            &Workgroup::new(group_size).unwrap(),
            hits,
            &prefix,
            &mut lists,
        );
        lists
    }

    #[test]
    fn lists_are_ascending_and_terminated() {
        let lists = build(2, 5, &[0, 1, 0, 1, 1, 1, 0, 0, 0, 0], 2);
        assert_eq!(&lists[..6], &[1, 3, 4, SENTINEL, SENTINEL, SENTINEL]);
        assert_eq!(&lists[6..], &[0, SENTINEL, SENTINEL, SENTINEL, SENTINEL, SENTINEL]);
    }

    #[test]
    fn tile_hit_by_every_circle_still_gets_a_sentinel() {
        let lists = build(1, 4, &[1; 4], 3);
        assert_eq!(lists, vec![0, 1, 2, 3, SENTINEL]);
    }

    #[test]
    fn empty_tile_starts_with_the_sentinel() {
        let lists = build(1, 3, &[0; 3], 256);
        assert_eq!(live_entries(&lists), &[] as &[u32]);
        assert!(lists.iter().all(|&c| c == SENTINEL));
    }
}
