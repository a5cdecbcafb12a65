//! Region compositing across tile layers.
//!
//! The compositor is the orchestration point of the crate. A caller hands
//! it an ordered sequence of tile layers (grid reference, pixel data,
//! rendering style) together with the tile shape and the requested output
//! region; it positions and crops each layer, blends it into a shared float
//! buffer, and gamma-corrects the result.
//!
//! ```text
//! layers ──▶ overlap check ──▶ position + crop ──▶ blend_channel ──▶ gamma
//!                 │                                      ▲
//!                 └── TileOutsideRegion                  └── saturating,
//!                                                            in caller order
//! ```
//!
//! Layer order matters: every contribution saturates the buffer in place,
//! so bright overlapping channels can clamp before later layers are added.

use ndarray::{s, Array3, ArrayView2};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::compose::blend::{adjust_gamma, blend_channel, PixelSample};
use crate::compose::subregion::{extract_subtile, tile_position};
use crate::error::RenderError;
use crate::geometry::{Color, Coord, GridRef, Shape};

/// Display gamma assumed when the caller does not specify one.
pub const DEFAULT_TARGET_GAMMA: f32 = 2.2;

// =============================================================================
// Rendering Settings
// =============================================================================

/// Rendering settings for one channel contribution.
///
/// These are plain values, typically supplied by a viewer or API caller, so
/// they serialize directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelStyle {
    /// Channel color, components within `[0, 1]`
    pub color: Color,

    /// Intensity threshold minimum, within `[0, 1]`
    pub range_min: f32,

    /// Intensity threshold maximum, within `[0, 1]`
    pub range_max: f32,
}

impl ChannelStyle {
    /// Create a style from a color and an intensity range.
    pub const fn new(color: Color, range_min: f32, range_max: f32) -> Self {
        Self {
            color,
            range_min,
            range_max,
        }
    }

    /// A style spanning the full `[0, 1]` intensity range.
    pub const fn full_range(color: Color) -> Self {
        Self::new(color, 0.0, 1.0)
    }
}

/// One tile's contribution to a composite.
///
/// Carries the tile's grid reference, a borrowed view of its single-channel
/// pixel data, and the style used to colorize it. The compositor reads the
/// layer but never mutates or retains it beyond the call.
#[derive(Debug, Clone)]
pub struct TileLayer<'a, T> {
    /// Position of the tile in the level's tile lattice
    pub grid: GridRef,

    /// Full single-channel tile image
    pub image: ArrayView2<'a, T>,

    /// Color and intensity thresholds for this contribution
    pub style: ChannelStyle,
}

impl<'a, T> TileLayer<'a, T> {
    /// Create a layer from a grid reference, tile image, and style.
    pub fn new(grid: impl Into<GridRef>, image: ArrayView2<'a, T>, style: ChannelStyle) -> Self {
        Self {
            grid: grid.into(),
            image,
            style,
        }
    }
}

// =============================================================================
// Compositing
// =============================================================================

/// True when the tile at `grid` intersects the output region.
fn overlaps(grid: GridRef, tile_shape: Shape, origin: Coord, shape: Shape) -> bool {
    let tile_y = grid.row * tile_shape.height;
    let tile_x = grid.col * tile_shape.width;

    tile_y < origin.y + shape.height
        && tile_y + tile_shape.height > origin.y
        && tile_x < origin.x + shape.width
        && tile_x + tile_shape.width > origin.x
}

/// Accumulate one extracted subtile into the output buffer.
///
/// Applies [`blend_channel`] to the placement rectangle at `position`.
/// The buffer stays clamped to `[0, 1]` after the call.
///
/// # Errors
///
/// Returns [`RenderError::InvalidArgument`] when the subtile does not fit
/// inside the buffer at `position`; nothing is written in that case.
pub fn composite_tile<T: PixelSample>(
    out: &mut Array3<f32>,
    subtile: ArrayView2<'_, T>,
    position: Coord,
    style: &ChannelStyle,
) -> Result<(), RenderError> {
    let (out_h, out_w, _) = out.dim();
    let (sub_h, sub_w) = subtile.dim();

    let y0 = position.y;
    let x0 = position.x;
    let y1 = y0 + sub_h as i64;
    let x1 = x0 + sub_w as i64;
    if y0 < 0 || x0 < 0 || y1 > out_h as i64 || x1 > out_w as i64 {
        return Err(RenderError::invalid_argument(format!(
            "subtile {sub_h}x{sub_w} at position {position} exceeds output buffer {out_h}x{out_w}"
        )));
    }

    let destination = out.slice_mut(s![y0 as usize..y1 as usize, x0 as usize..x1 as usize, ..]);
    blend_channel(
        destination,
        subtile,
        style.color,
        style.range_min,
        style.range_max,
    )
}

/// Composite tile layers into a gamma-corrected RGB region.
///
/// Allocates a zeroed `output_shape` + 3-channel float buffer, applies each
/// layer in the given order (position, crop, blend), then clamps the buffer
/// to `[0, 1]` and applies `out^(1 / target_gamma)`. Only the subregions of
/// tiles needed for the requested region are touched, so the output matches
/// the requested size exactly.
///
/// Output is deterministic for a fixed layer order.
///
/// # Errors
///
/// - [`RenderError::InvalidArgument`] — non-positive tile or output shape
///   component, or an unusable `target_gamma`
/// - [`RenderError::TileOutsideRegion`] — a layer's grid reference does not
///   overlap the requested region
pub fn composite_region<T: PixelSample>(
    layers: &[TileLayer<'_, T>],
    tile_shape: Shape,
    output_origin: Coord,
    output_shape: Shape,
    target_gamma: f32,
) -> Result<Array3<f32>, RenderError> {
    if !tile_shape.is_positive() {
        return Err(RenderError::invalid_argument(format!(
            "tile shape {tile_shape} must have strictly positive components"
        )));
    }
    if !output_shape.is_positive() {
        return Err(RenderError::invalid_argument(format!(
            "output shape {output_shape} must have strictly positive components"
        )));
    }

    debug!(
        "compositing {} layer(s) into {}x{} region at {}",
        layers.len(),
        output_shape.height,
        output_shape.width,
        output_origin
    );

    let mut out = Array3::<f32>::zeros((
        output_shape.height as usize,
        output_shape.width as usize,
        3,
    ));

    for layer in layers {
        if !overlaps(layer.grid, tile_shape, output_origin, output_shape) {
            return Err(RenderError::TileOutsideRegion { grid: layer.grid });
        }

        let position = tile_position(layer.grid, tile_shape, output_origin);
        let subtile = extract_subtile(
            layer.grid,
            tile_shape,
            output_origin,
            output_shape,
            layer.image,
        );
        trace!("layer at grid {} placed at {}", layer.grid, position);

        composite_tile(&mut out, subtile, position, &layer.style)?;
    }

    out.mapv_inplace(|v| v.clamp(0.0, 1.0));
    adjust_gamma(out, 1.0 / target_gamma)
}

// =============================================================================
// Tests
// =============================================================================
