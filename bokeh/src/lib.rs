// Copyright 2025 the Bokeh Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bokeh renders scenes of alpha-blended circles onto a raster image.
//!
//! The work is split into bulk-synchronous, data-parallel stages in the style
//! of a compute pipeline. The image is cut into square tiles, and every frame:
//!
//! 1. each tile flags the circles whose bounding box touches it,
//! 2. a work-efficient exclusive scan turns those flags into list offsets,
//! 3. the flagged circles are compacted into an ascending circle list per tile,
//! 4. every pixel composites the circles of its tile in list order.
//!
//! Because the over operator does not commute, step 3 keeps circles in their
//! submission order, and the result is identical to drawing the circles one
//! after another.
//!
//! ```no_run
//! use bokeh::{Image, Renderer, RendererOptions};
//! use bokeh_encoding::{Circle, CircleSet, SceneStyle};
//!
//! let circles = CircleSet::from_circles(
//!     SceneStyle::Flat,
//!     [Circle {
//!         position: [0.5, 0.5, 0.0],
//!         color: [1.0, 0.0, 0.0],
//!         radius: 0.1,
//!         ..Default::default()
//!     }],
//! );
//! let mut renderer = Renderer::new(RendererOptions::default())?;
//! let mut image = Image::solid(512, 512, [1.0; 4]);
//! renderer.render(&circles, &mut image)?;
//! image.save_png("circle.png")?;
//! # Ok::<(), bokeh::Error>(())
//! ```
//!
//! The stages themselves live in [`bokeh_shaders`], and the scan primitives
//! they are built on in [`bokeh_scan`].

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

pub mod compare;
mod raster;
pub mod reference;

use std::collections::TryReserveError;
use std::time::Instant;

use bokeh_encoding::{CircleSet, TileBuffers, TileConfig, SENTINEL};
use bokeh_scan::{ScanError, Workgroup, SCAN_BLOCK_DIM};
use bokeh_shaders::cpu;
use thiserror::Error;

pub use bokeh_encoding;
pub use bokeh_scan;
pub use bokeh_shaders;

pub use raster::Image;

/// Errors that can occur in Bokeh.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Tiles must be at least one pixel wide.
    #[error("tile size must be non-zero")]
    InvalidTileSize,
    /// The per-circle arrays of a [`CircleSet`] disagree with its circle count.
    #[error("circle array `{array}` has {actual} elements but {expected} are required")]
    CircleArrays {
        array: &'static str,
        expected: usize,
        actual: usize,
    },
    /// A pixel buffer does not hold `4 * width * height` values.
    #[error("a {width}x{height} image needs {expected} values but {actual} were given")]
    ImageSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    /// The tile buffers for this scene cannot be addressed.
    #[error("{n_tiles} tiles with {n_circles} circles exceed the addressable tile buffers")]
    TooManyTiles { n_tiles: usize, n_circles: usize },
    /// Circle indices of this scene would collide with the list terminator.
    #[error("{n_circles} circles exceed the largest listable circle index")]
    TooManyCircles { n_circles: usize },
    /// Allocating the per-scene tile buffers failed.
    #[error("couldn't allocate tile buffers")]
    Allocation(#[from] TryReserveError),
    /// A scan was invoked outside of its calling contract.
    #[error(transparent)]
    Scan(#[from] ScanError),
    /// Encoding or writing an image failed.
    #[error("couldn't write image")]
    Png(#[from] ::image::ImageError),
}

pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;

/// Options which are set at renderer creation time, used in [`Renderer::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RendererOptions {
    /// Side of a square tile in pixels.
    pub tile_size: u32,
    /// Number of lanes of the group that scans and compacts one tile.
    ///
    /// Tile rows longer than twice this are scanned in chunks.
    pub group_size: u32,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            tile_size: 16,
            group_size: SCAN_BLOCK_DIM,
        }
    }
}

/// Renders circle scenes into [`Image`]s.
///
/// The renderer owns the per-tile working buffers. They are sized for the first
/// scene rendered and reused for every following frame with the same circle
/// count and image size.
#[derive(Debug)]
pub struct Renderer {
    options: RendererOptions,
    group: Workgroup,
    config: TileConfig,
    buffers: TileBuffers,
}

impl Renderer {
    /// Creates a new renderer.
    pub fn new(options: RendererOptions) -> Result<Self> {
        if options.tile_size == 0 {
            return Err(Error::InvalidTileSize);
        }
        let group = Workgroup::new(options.group_size)?;
        Ok(Self {
            options,
            group,
            config: TileConfig::default(),
            buffers: TileBuffers::default(),
        })
    }

    pub fn options(&self) -> &RendererOptions {
        &self.options
    }

    /// The tile grid of the last rendered frame.
    pub fn config(&self) -> &TileConfig {
        &self.config
    }

    /// The tile buffers of the last rendered frame, including the compacted
    /// circle list of every tile.
    pub fn tile_lists(&self) -> &TileBuffers {
        &self.buffers
    }

    /// Composites `circles` over `image`, in ascending circle order.
    ///
    /// The image is not cleared first; its current contents are the background.
    pub fn render(&mut self, circles: &CircleSet, image: &mut Image) -> Result<()> {
        if let Some((array, expected, actual)) = circles.mismatched_array() {
            return Err(Error::CircleArrays {
                array,
                expected,
                actual,
            });
        }
        let n_circles = circles.len();
        let width = image.width();
        let height = image.height();
        let grid = TileConfig::new(width, height, self.options.tile_size, 0, circles.style);
        let n_tiles = grid.n_tiles() as usize;
        let n = listable_circles(n_circles)?;
        self.config = TileConfig {
            n_circles: n,
            ..grid
        };

        if n_tiles == 0 {
            log::debug!("nothing to render into a {width}x{height} image");
            return Ok(());
        }
        if n_circles == 0 {
            log::warn!("rendering a scene without circles");
            self.buffers.fit(n_tiles, 0)?;
            return Ok(());
        }
        if n_tiles.checked_mul(n_circles + 1).is_none() {
            return Err(Error::TooManyTiles { n_tiles, n_circles });
        }
        if self.buffers.fit(n_tiles, n_circles)? {
            log::info!("allocated tile buffers for {n_tiles} tiles and {n_circles} circles");
        }

        let n_wg = self.config.n_tiles();
        let config = &self.config;
        let group = &self.group;
        let buffers = &mut self.buffers;

        let start = Instant::now();
        cpu::tile_mark_main(
            n_wg,
            config,
            group,
            &circles.position,
            &circles.radius,
            &mut buffers.hits,
        );
        log::debug!("tile_mark: {:?}", start.elapsed());

        let start = Instant::now();
        cpu::tile_scan_main(n_wg, config, group, &buffers.hits, &mut buffers.prefix)?;
        log::debug!("tile_scan: {:?}", start.elapsed());

        let start = Instant::now();
        cpu::tile_list_main(
            n_wg,
            config,
            group,
            &buffers.hits,
            &buffers.prefix,
            &mut buffers.lists,
        );
        log::debug!("tile_list: {:?}", start.elapsed());

        let start = Instant::now();
        cpu::fine_main(
            config,
            &circles.position,
            &circles.color,
            &circles.radius,
            &buffers.lists,
            image.data_mut(),
        );
        log::debug!("fine: {:?}", start.elapsed());
        Ok(())
    }

    /// Renders `circles` into a new `width` by `height` image filled with `background`.
    pub fn render_to_image(
        &mut self,
        circles: &CircleSet,
        width: u32,
        height: u32,
        background: [f32; 4],
    ) -> Result<Image> {
        let mut image = Image::solid(width, height, background);
        self.render(circles, &mut image)?;
        Ok(image)
    }
}

/// Converts a circle count to `u32`, keeping every index below [`SENTINEL`].
fn listable_circles(n_circles: usize) -> Result<u32> {
    u32::try_from(n_circles)
        .ok()
        .filter(|&n| n < SENTINEL)
        .ok_or(Error::TooManyCircles { n_circles })
}
