//! Conversions between ndarray pixel buffers and `image` crate types.
//!
//! The two libraries disagree on axis order: ndarray uses matrix indexing
//! `[row, col] = [y, x]` with `(height, width)` dimensions, while the
//! `image` crate uses graphics indexing `(x, y)` with `(width, height)`
//! dimensions. These helpers do the swap so callers can hand decoded
//! grayscale tiles to the compositor and export composited regions for
//! display.

use image::{GrayImage, Rgb, RgbImage};
use ndarray::{Array2, ArrayView3};

use crate::error::RenderError;

/// Convert a composited `[0, 1]` float RGB array into an 8-bit image.
///
/// Values are clamped to `[0, 1]`, scaled by 255, and rounded.
///
/// # Errors
///
/// Returns [`RenderError::InvalidArgument`] when the array's channel axis
/// is not 3 wide.
pub fn rgb_to_image(image: ArrayView3<'_, f32>) -> Result<RgbImage, RenderError> {
    let (height, width, channels) = image.dim();
    if channels != 3 {
        return Err(RenderError::invalid_argument(format!(
            "expected a 3-channel array, got {channels} channel(s)"
        )));
    }

    let mut output = RgbImage::new(width as u32, height as u32);
    for y in 0..height {
        for x in 0..width {
            let sample = |c: usize| (image[[y, x, c]].clamp(0.0, 1.0) * 255.0).round() as u8;
            output.put_pixel(x as u32, y as u32, Rgb([sample(0), sample(1), sample(2)]));
        }
    }
    Ok(output)
}

/// Convert a grayscale image into a 2D sample array.
///
/// Array index `[y, x]` maps to image pixel `(x, y)`.
pub fn gray_image_to_array(image: &GrayImage) -> Array2<u8> {
    let (width, height) = image.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
        image.get_pixel(x as u32, y as u32)[0]
    })
}

// =============================================================================
// Tests
// =============================================================================
