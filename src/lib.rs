//! # Tile Compositor
//!
//! A tile-pyramid compositing engine for multi-channel grayscale imagery.
//!
//! This library assembles a single RGB image covering an arbitrary pixel
//! region from rectangular image tiles addressed by `(row, col)` grid
//! references at a fixed pyramid resolution level. A region may span,
//! partially overlap, and crop many tiles; each tile contribution is
//! colorized, intensity-thresholded, additively blended with saturation,
//! and the final result is gamma-corrected for display.
//!
//! ## Features
//!
//! - **Grid geometry**: map pixel regions onto the tile lattice, including
//!   partial-tile clipping and multi-tile stitching
//! - **Channel blending**: per-tile color, `[min, max]` intensity
//!   thresholding, and saturating additive accumulation
//! - **Pyramid levels**: pick the resolution level matching a target
//!   output size and transform coordinates between levels
//! - **Nearest-neighbor resampling**: scale composited output by uniform
//!   or per-axis factors
//!
//! ## Architecture
//!
//! - [`geometry`] - coordinate types, tile grid math, pyramid levels
//! - [`compose`] - subregion selection, blending, the compositor
//! - [`resample`] - nearest-neighbor resizing
//! - [`convert`] - ndarray / `image` buffer interop
//! - [`error`] - the [`RenderError`] taxonomy
//!
//! All operations are synchronous, stateless between calls, and safe to
//! invoke concurrently across independent compositing calls. Within one
//! call, tile layers are applied strictly in caller order: the saturating
//! blend makes overlapping contributions order-dependent.
//!
//! ## Example
//!
//! ```
//! use ndarray::array;
//! use tile_compositor::{
//!     composite_region, ChannelStyle, Color, Coord, Shape, TileLayer, DEFAULT_TARGET_GAMMA,
//! };
//!
//! // One 2x2 green-channel tile with a single saturated pixel
//! let tile = array![[0u8, 255], [0, 0]];
//! let layers = vec![TileLayer::new(
//!     (0, 0),
//!     tile.view(),
//!     ChannelStyle::full_range(Color::GREEN),
//! )];
//!
//! let out = composite_region(
//!     &layers,
//!     Shape::new(2, 2),
//!     Coord::new(0, 0),
//!     Shape::new(2, 2),
//!     DEFAULT_TARGET_GAMMA,
//! )
//! .unwrap();
//!
//! assert_eq!(out[[0, 1, 1]], 1.0);
//! assert_eq!(out[[0, 0, 1]], 0.0);
//! ```

pub mod compose;
pub mod convert;
pub mod error;
pub mod geometry;
pub mod resample;

// Re-export commonly used types
pub use compose::{
    adjust_gamma, blend_channel, composite_region, composite_tile, extract_subtile,
    tile_position, tile_subregion, ChannelStyle, PixelSample, TileLayer, DEFAULT_TARGET_GAMMA,
};
pub use convert::{gray_image_to_array, rgb_to_image};
pub use error::RenderError;
pub use geometry::{
    check_region, first_grid, grid_extent, level_coordinates, optimum_level, select_grids,
    validate_region, Color, Coord, GridRef, Shape,
};
pub use resample::{resample, resample_plane, ScaleFactors};
