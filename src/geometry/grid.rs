//! Tile grid arithmetic over pixel regions.
//!
//! Maps pixel-space regions onto the tile lattice of a pyramid level:
//! which tile contains a region's origin, how many tiles the region spans,
//! and the full row-major set of grid references the region touches.
//!
//! All functions here are pure. Tile shapes must have strictly positive
//! components; callers that accept untrusted shapes validate them first
//! (see [`crate::compose::composite_region`]).

use crate::error::RenderError;
use crate::geometry::types::{Coord, GridRef, Shape};

/// Ceiling division for a positive divisor.
fn div_ceil(value: i64, divisor: i64) -> i64 {
    -((-value).div_euclid(divisor))
}

/// Grid reference of the tile containing a region's top-left pixel.
///
/// Componentwise floor division of the origin by the tile shape, rounding
/// toward negative infinity so that negative origins resolve correctly.
pub fn first_grid(tile_shape: Shape, region_origin: Coord) -> GridRef {
    GridRef {
        row: region_origin.y.div_euclid(tile_shape.height),
        col: region_origin.x.div_euclid(tile_shape.width),
    }
}

/// Number of tiles a region spans along each axis, as `(rows, cols)`.
///
/// Counts from the first tile through the tile containing the region's
/// bottom-right pixel (exclusive end), each axis independently.
pub fn grid_extent(tile_shape: Shape, region_origin: Coord, region_shape: Shape) -> (i64, i64) {
    let first = first_grid(tile_shape, region_origin);

    let span_y = region_origin.y + region_shape.height - first.row * tile_shape.height;
    let span_x = region_origin.x + region_shape.width - first.col * tile_shape.width;

    (
        div_ceil(span_y, tile_shape.height),
        div_ceil(span_x, tile_shape.width),
    )
}

/// All grid references whose tiles intersect the region, in row-major order.
///
/// Row-major order (rows outer, columns inner) keeps enumeration
/// reproducible; the composite itself does not depend on it.
pub fn select_grids(tile_shape: Shape, region_origin: Coord, region_shape: Shape) -> Vec<GridRef> {
    let first = first_grid(tile_shape, region_origin);
    let (rows, cols) = grid_extent(tile_shape, region_origin, region_shape);

    let mut grids = Vec::with_capacity((rows.max(0) * cols.max(0)) as usize);
    for row in first.row..first.row + rows {
        for col in first.col..first.col + cols {
            grids.push(GridRef { row, col });
        }
    }
    grids
}

/// True when the region lies fully inside the image and has positive extent.
///
/// This is the sole admission check for region requests: the shape must be
/// strictly positive, the origin non-negative, and `origin + shape` must
/// stay within `image_shape` on both axes.
pub fn validate_region(origin: Coord, shape: Shape, image_shape: Shape) -> bool {
    shape.is_positive()
        && origin.y >= 0
        && origin.x >= 0
        && origin.y + shape.height <= image_shape.height
        && origin.x + shape.width <= image_shape.width
}

/// Reject a region that fails [`validate_region`].
///
/// # Errors
///
/// Returns [`RenderError::InvalidRegion`] carrying the offending request.
pub fn check_region(origin: Coord, shape: Shape, image_shape: Shape) -> Result<(), RenderError> {
    if validate_region(origin, shape, image_shape) {
        Ok(())
    } else {
        Err(RenderError::InvalidRegion {
            origin,
            shape,
            image_shape,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
