//! Per-tile crop rectangles and output placement.
//!
//! A requested output region rarely lines up with tile boundaries: interior
//! tiles contribute in full, edge tiles contribute a clipped sub-rectangle.
//! These functions compute, for one grid reference, the tile-local crop
//! needed and where that crop lands in the output buffer.

use ndarray::{s, ArrayView2};

use crate::geometry::{Coord, GridRef, Shape};

/// Tile-local crop rectangle needed for the output region.
///
/// Returns `(start, end)` pixel coordinates within the tile at `grid`:
/// the crop begins at the tile start or the region origin, whichever is
/// later, and ends at the tile end or the region end, whichever is earlier.
/// For any grid reference that overlaps the region,
/// `0 <= start <= end <= tile_shape` holds componentwise.
///
/// Callers must not pass a grid reference that does not overlap the output
/// region; the result is empty or meaningless there.
pub fn tile_subregion(
    grid: GridRef,
    tile_shape: Shape,
    output_origin: Coord,
    output_shape: Shape,
) -> (Coord, Coord) {
    let tile_start_y = grid.row * tile_shape.height;
    let tile_start_x = grid.col * tile_shape.width;

    let start = Coord {
        y: output_origin.y.max(tile_start_y) - tile_start_y,
        x: output_origin.x.max(tile_start_x) - tile_start_x,
    };
    let end = Coord {
        y: (tile_start_y + tile_shape.height).min(output_origin.y + output_shape.height)
            - tile_start_y,
        x: (tile_start_x + tile_shape.width).min(output_origin.x + output_shape.width)
            - tile_start_x,
    };

    (start, end)
}

/// Where a tile's extracted crop lands in the output buffer.
pub fn tile_position(grid: GridRef, tile_shape: Shape, output_origin: Coord) -> Coord {
    let tile_start_y = grid.row * tile_shape.height;
    let tile_start_x = grid.col * tile_shape.width;

    Coord {
        y: output_origin.y.max(tile_start_y) - output_origin.y,
        x: output_origin.x.max(tile_start_x) - output_origin.x,
    }
}

/// Slice the crop rectangle out of a full tile.
///
/// The crop is computed with [`tile_subregion`] and clamped to the actual
/// tile extents, so edge tiles smaller than `tile_shape` are handled. The
/// returned view is empty when the grid does not overlap the region.
pub fn extract_subtile<'a, T>(
    grid: GridRef,
    tile_shape: Shape,
    output_origin: Coord,
    output_shape: Shape,
    tile: ArrayView2<'a, T>,
) -> ArrayView2<'a, T> {
    let (start, end) = tile_subregion(grid, tile_shape, output_origin, output_shape);
    let (tile_h, tile_w) = tile.dim();

    let y0 = start.y.clamp(0, tile_h as i64) as usize;
    let x0 = start.x.clamp(0, tile_w as i64) as usize;
    let y1 = end.y.clamp(y0 as i64, tile_h as i64) as usize;
    let x1 = end.x.clamp(x0 as i64, tile_w as i64) as usize;

    tile.slice_move(s![y0..y1, x0..x1])
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_tile_subregion_ceiling_tile() {
        // Only the first pixel of tile (1, 1) is inside a 3x3 region
        let (start, end) = tile_subregion(
            GridRef::new(1, 1),
            Shape::new(2, 2),
            Coord::new(0, 0),
            Shape::new(3, 3),
        );
        assert_eq!(start, Coord::new(0, 0));
        assert_eq!(end, Coord::new(1, 1));
    }

    #[test]
    fn test_tile_subregion_full_tile() {
        let tile_shape = Shape::new(2, 2);
        let (start, end) = tile_subregion(
            GridRef::new(1, 1),
            tile_shape,
            Coord::new(2, 2),
            Shape::new(2, 2),
        );
        assert_eq!(start, Coord::new(0, 0));
        assert_eq!(end, Coord::new(tile_shape.height, tile_shape.width));
    }

    #[test]
    fn test_tile_subregion_bounds_invariant() {
        let tile_shape = Shape::new(16, 16);
        let origin = Coord::new(5, 9);
        let shape = Shape::new(40, 23);

        for grid in crate::geometry::select_grids(tile_shape, origin, shape) {
            let (start, end) = tile_subregion(grid, tile_shape, origin, shape);
            assert!(start.y >= 0 && start.x >= 0, "start {start} below zero");
            assert!(end.y >= start.y && end.x >= start.x, "end {end} before start {start}");
            assert!(
                end.y <= tile_shape.height && end.x <= tile_shape.width,
                "end {end} exceeds tile shape"
            );
        }
    }

    #[test]
    fn test_tile_position_inner_tile() {
        let result = tile_position(GridRef::new(1, 1), Shape::new(2, 2), Coord::new(0, 0));
        assert_eq!(result, Coord::new(2, 2));
    }

    #[test]
    fn test_tile_position_clipped_first_tile() {
        // Region starts mid-tile: the first tile lands at the output origin
        let result = tile_position(GridRef::new(0, 0), Shape::new(4, 4), Coord::new(2, 3));
        assert_eq!(result, Coord::new(0, 0));
    }

    #[test]
    fn test_extract_subtile_clipped() {
        let tile = array![[1.0f32, 2.0], [3.0, 4.0]];

        // Region (1, 0) + (2, 2) needs only the bottom row of tile (0, 0)
        let result = extract_subtile(
            GridRef::new(0, 0),
            Shape::new(2, 2),
            Coord::new(1, 0),
            Shape::new(2, 2),
            tile.view(),
        );
        assert_eq!(result, array![[3.0, 4.0]]);
    }

    #[test]
    fn test_extract_subtile_full_tile_round_trip() {
        let tile = array![[1u8, 2], [3, 4]];

        let result = extract_subtile(
            GridRef::new(1, 1),
            Shape::new(2, 2),
            Coord::new(2, 2),
            Shape::new(2, 2),
            tile.view(),
        );
        assert_eq!(result, tile);
    }

    #[test]
    fn test_extract_subtile_short_edge_tile() {
        // Edge tile is smaller than the nominal tile shape
        let tile = array![[7u8, 8, 9]];

        let result = extract_subtile(
            GridRef::new(0, 0),
            Shape::new(2, 4),
            Coord::new(0, 0),
            Shape::new(2, 4),
            tile.view(),
        );
        assert_eq!(result, array![[7, 8, 9]]);
    }

    #[test]
    fn test_extract_subtile_non_overlapping_is_empty() {
        let tile = array![[1u8, 2], [3, 4]];

        let result = extract_subtile(
            GridRef::new(5, 5),
            Shape::new(2, 2),
            Coord::new(0, 0),
            Shape::new(2, 2),
            tile.view(),
        );
        assert_eq!(result.len(), 0);
    }
}
