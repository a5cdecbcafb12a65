//! Pyramid level selection and coordinate transforms.
//!
//! A pyramid level `n` has linear dimensions `1 / 2^n` of level 0, so the
//! level best matching a target output size falls out of a log2 ratio, and
//! full-resolution coordinates map to a level by halving `n` times.

use crate::geometry::types::{Coord, Shape};

/// Pyramid level whose scale best matches a target output size.
///
/// `ratio = log2(max(input_shape) / output_size)` is rounded down when
/// `prefer_higher_resolution` is set (the coarsest level at least as
/// detailed as requested) and up otherwise (the finest level at most as
/// detailed as requested), then clamped to `[0, level_count - 1]`.
///
/// Monotonically non-increasing in `output_size` for fixed inputs.
pub fn optimum_level(
    input_shape: Shape,
    level_count: usize,
    output_size: i64,
    prefer_higher_resolution: bool,
) -> usize {
    if level_count <= 1 {
        return 0;
    }

    let longest_side = input_shape.height.max(input_shape.width);
    let ratio = (longest_side as f64 / output_size as f64).log2();

    let level = if prefer_higher_resolution {
        ratio.floor()
    } else {
        ratio.ceil()
    };

    level.clamp(0.0, (level_count - 1) as f64) as usize
}

/// Map full-resolution pixel coordinates to a pyramid level.
///
/// `round(c / 2^level)` componentwise, rounding ties to even. Level 0 is
/// the identity.
pub fn level_coordinates(coord: Coord, level: usize) -> Coord {
    if level == 0 {
        return coord;
    }

    let scale = 2f64.powi(level as i32);
    Coord {
        y: (coord.y as f64 / scale).round_ties_even() as i64,
        x: (coord.x as f64 / scale).round_ties_even() as i64,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimum_level_higher() {
        // Prefer a resolution exceeding the requested output size
        assert_eq!(optimum_level(Shape::new(6, 6), 2, 4, true), 0);
    }

    #[test]
    fn test_optimum_level_lower() {
        // Prefer a resolution below the requested output size
        assert_eq!(optimum_level(Shape::new(6, 6), 2, 4, false), 1);
    }

    #[test]
    fn test_optimum_level_clamps_to_range() {
        // Output larger than the image: full resolution
        assert_eq!(optimum_level(Shape::new(1024, 768), 4, 4096, false), 0);

        // Output tiny: coarsest available level
        assert_eq!(optimum_level(Shape::new(1024, 768), 4, 1, true), 3);
    }

    #[test]
    fn test_optimum_level_single_level() {
        assert_eq!(optimum_level(Shape::new(4096, 4096), 1, 128, false), 0);
    }

    #[test]
    fn test_optimum_level_monotonic_in_output_size() {
        let shape = Shape::new(8192, 8192);
        let mut previous = usize::MAX;
        for output_size in [64, 128, 256, 512, 1024, 2048, 4096, 8192] {
            let level = optimum_level(shape, 8, output_size, true);
            assert!(level <= previous);
            previous = level;
        }
    }

    #[test]
    fn test_level_coordinates_full_scale() {
        assert_eq!(
            level_coordinates(Coord::new(6, 6), 0),
            Coord::new(6, 6)
        );
    }

    #[test]
    fn test_level_coordinates_half_scale() {
        assert_eq!(
            level_coordinates(Coord::new(6, 6), 1),
            Coord::new(3, 3)
        );
    }

    #[test]
    fn test_level_coordinates_rounds_ties_to_even() {
        // 1 / 2 = 0.5 rounds to 0, 3 / 2 = 1.5 rounds to 2
        assert_eq!(
            level_coordinates(Coord::new(1, 3), 1),
            Coord::new(0, 2)
        );
    }

    #[test]
    fn test_level_coordinates_deep_level() {
        assert_eq!(
            level_coordinates(Coord::new(4096, 1024), 4),
            Coord::new(256, 64)
        );
    }
}
