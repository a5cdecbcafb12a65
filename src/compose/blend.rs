//! Channel blending and gamma primitives.
//!
//! The blending model: each grayscale sample is normalized against an
//! intensity range to a `[0, 1]` weight, the weight is multiplied by the
//! channel color and added to the RGB destination, and the destination is
//! clamped back to `[0, 1]` after every contribution. The clamp runs per
//! contribution, not once at the end, so overlapping bright channels
//! saturate in contribution order.

use ndarray::{Array3, ArrayView2, ArrayViewMut3};

use crate::error::RenderError;
use crate::geometry::Color;

// =============================================================================
// PixelSample
// =============================================================================

/// A grayscale sample that can be normalized against an intensity range.
///
/// Tiles arrive with whatever sample type the caller's decoder produced;
/// this trait is the seam that admits them all into the float pipeline.
pub trait PixelSample: Copy {
    /// The sample's raw intensity as a float.
    fn intensity(self) -> f32;
}

macro_rules! impl_pixel_sample {
    ($($ty:ty),*) => {
        $(
            impl PixelSample for $ty {
                #[inline]
                fn intensity(self) -> f32 {
                    self as f32
                }
            }
        )*
    };
}

impl_pixel_sample!(u8, u16, u32, f32, f64);

// =============================================================================
// Channel Blending
// =============================================================================

/// Blend one channel of samples into an RGB destination rectangle.
///
/// Every sample `v` is normalized to
/// `t = clamp((v - range_min) / (range_max - range_min), 0, 1)` and
/// accumulated as `destination[y, x, c] += t * color[c]`, with the
/// destination clamped to `[0, 1]` in place after the accumulation.
///
/// # Errors
///
/// Returns [`RenderError::InvalidArgument`] when `destination` is not
/// 3-channel or its extent differs from `samples`.
pub fn blend_channel<T: PixelSample>(
    mut destination: ArrayViewMut3<'_, f32>,
    samples: ArrayView2<'_, T>,
    color: Color,
    range_min: f32,
    range_max: f32,
) -> Result<(), RenderError> {
    let (dest_h, dest_w, channels) = destination.dim();
    let (src_h, src_w) = samples.dim();
    if channels != 3 || dest_h != src_h || dest_w != src_w {
        return Err(RenderError::invalid_argument(format!(
            "destination {dest_h}x{dest_w}x{channels} does not match samples {src_h}x{src_w}"
        )));
    }

    let span = range_max - range_min;
    let components = color.components();

    for ((y, x), sample) in samples.indexed_iter() {
        let t = ((sample.intensity() - range_min) / span).clamp(0.0, 1.0);
        for (c, weight) in components.iter().enumerate() {
            let cell = &mut destination[[y, x, c]];
            *cell = (*cell + t * *weight).clamp(0.0, 1.0);
        }
    }

    Ok(())
}

// =============================================================================
// Gamma
// =============================================================================

/// Element-wise power remapping for display gamma.
///
/// Returns `image^gamma`. For final display correction the compositor calls
/// this with `1 / target_gamma`.
///
/// # Errors
///
/// Returns [`RenderError::InvalidArgument`] unless `gamma` is a
/// non-negative finite number.
pub fn adjust_gamma(mut image: Array3<f32>, gamma: f32) -> Result<Array3<f32>, RenderError> {
    if !gamma.is_finite() || gamma < 0.0 {
        return Err(RenderError::invalid_argument(format!(
            "gamma must be a non-negative finite number, got {gamma}"
        )));
    }

    image.mapv_inplace(|v| v.powf(gamma));
    Ok(image)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array3};

    #[test]
    fn test_blend_channel_normalizes_and_colors() {
        let samples = array![[0u8, 255], [0, 0]];
        let mut out = Array3::<f32>::zeros((2, 2, 3));

        blend_channel(out.view_mut(), samples.view(), Color::GREEN, 0.0, 1.0).unwrap();

        assert_eq!(out[[0, 1, 1]], 1.0);
        assert_eq!(out[[0, 1, 0]], 0.0);
        assert_eq!(out[[0, 0, 1]], 0.0);
        assert_eq!(out[[1, 0, 1]], 0.0);
    }

    #[test]
    fn test_blend_channel_accumulates_existing_content() {
        let red_mask = array![[0u8, 0], [255, 0]];
        let green_mask = array![[0u8, 255], [0, 0]];
        let mut out = Array3::<f32>::zeros((2, 2, 3));

        blend_channel(out.view_mut(), red_mask.view(), Color::RED, 0.0, 1.0).unwrap();
        blend_channel(out.view_mut(), green_mask.view(), Color::GREEN, 0.0, 1.0).unwrap();

        assert_eq!(out[[1, 0, 0]], 1.0);
        assert_eq!(out[[0, 1, 1]], 1.0);
        assert_eq!(out[[0, 0, 0]], 0.0);
        assert_eq!(out[[0, 0, 1]], 0.0);
    }

    #[test]
    fn test_blend_channel_threshold_range() {
        // Midpoint of the [0.25, 0.75] range lands at weight 0.5
        let samples = array![[0.25f32, 0.5], [0.75, 1.0]];
        let mut out = Array3::<f32>::zeros((2, 2, 3));

        blend_channel(out.view_mut(), samples.view(), Color::WHITE, 0.25, 0.75).unwrap();

        assert_eq!(out[[0, 0, 0]], 0.0);
        assert!((out[[0, 1, 0]] - 0.5).abs() < 1e-6);
        assert_eq!(out[[1, 0, 0]], 1.0);
        // Above range_max saturates
        assert_eq!(out[[1, 1, 0]], 1.0);
    }

    #[test]
    fn test_blend_channel_saturates_per_contribution() {
        let samples = array![[255u8]];
        let mut out = Array3::<f32>::zeros((1, 1, 3));

        blend_channel(out.view_mut(), samples.view(), Color::WHITE, 0.0, 1.0).unwrap();
        blend_channel(out.view_mut(), samples.view(), Color::WHITE, 0.0, 1.0).unwrap();

        // Two saturated contributions still clamp to 1
        assert_eq!(out[[0, 0, 0]], 1.0);
        assert_eq!(out[[0, 0, 1]], 1.0);
        assert_eq!(out[[0, 0, 2]], 1.0);
    }

    #[test]
    fn test_blend_channel_shape_mismatch() {
        let samples = array![[0u8, 255]];
        let mut out = Array3::<f32>::zeros((2, 2, 3));

        let result = blend_channel(out.view_mut(), samples.view(), Color::RED, 0.0, 1.0);
        assert!(matches!(result, Err(RenderError::InvalidArgument { .. })));
    }

    #[test]
    fn test_adjust_gamma_display_correction() {
        let mut image = Array3::<f32>::zeros((1, 1, 3));
        image[[0, 0, 0]] = 0.5;
        image[[0, 0, 1]] = 1.0;

        let corrected = adjust_gamma(image, 1.0 / 2.2).unwrap();

        assert!((corrected[[0, 0, 0]] - 0.729_740_05).abs() < 1e-5);
        assert_eq!(corrected[[0, 0, 1]], 1.0);
        assert_eq!(corrected[[0, 0, 2]], 0.0);
    }

    #[test]
    fn test_adjust_gamma_identity() {
        let mut image = Array3::<f32>::zeros((1, 2, 3));
        image[[0, 1, 2]] = 0.25;

        let result = adjust_gamma(image.clone(), 1.0).unwrap();
        assert_eq!(result, image);
    }

    #[test]
    fn test_adjust_gamma_rejects_negative() {
        let image = Array3::<f32>::zeros((1, 1, 3));
        let result = adjust_gamma(image, -1.0);
        assert!(matches!(result, Err(RenderError::InvalidArgument { .. })));
    }

    #[test]
    fn test_adjust_gamma_rejects_nan() {
        let image = Array3::<f32>::zeros((1, 1, 3));
        let result = adjust_gamma(image, f32::NAN);
        assert!(matches!(result, Err(RenderError::InvalidArgument { .. })));
    }
}
