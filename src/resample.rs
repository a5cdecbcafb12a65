//! Nearest-neighbor resampling.
//!
//! Resizes composited images (or single planes) by a scale factor without
//! interpolation: each output pixel copies the nearest source pixel along
//! an inclusive linear ramp from the first to the last source index.

use ndarray::{Array2, Array3, ArrayView2, ArrayView3};

use crate::error::RenderError;

// =============================================================================
// Scale Factors
// =============================================================================

/// Per-axis scale factors: output extent over source extent.
///
/// Converts from a uniform scalar or a `(y, x)` pair, so callers can write
/// `resample(image, 0.5)` or `resample(image, (1.0, 0.75))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactors {
    pub y: f64,
    pub x: f64,
}

impl ScaleFactors {
    /// Reject factors that are not strictly positive.
    fn check(self) -> Result<Self, RenderError> {
        if self.y > 0.0 && self.x > 0.0 {
            Ok(self)
        } else {
            Err(RenderError::invalid_argument(format!(
                "scale factors must be above zero, got ({}, {})",
                self.y, self.x
            )))
        }
    }
}

impl From<f64> for ScaleFactors {
    fn from(factor: f64) -> Self {
        Self {
            y: factor,
            x: factor,
        }
    }
}

impl From<(f64, f64)> for ScaleFactors {
    fn from((y, x): (f64, f64)) -> Self {
        Self { y, x }
    }
}

// =============================================================================
// Resampling
// =============================================================================

/// Nearest source index for each output index along one axis.
///
/// The output extent is `round(source_len * factor)`; indices ramp linearly
/// from 0 to `source_len - 1` inclusive, rounding ties to even.
fn nearest_indices(source_len: usize, factor: f64) -> Vec<usize> {
    let out_len = (source_len as f64 * factor).round_ties_even() as usize;
    if source_len == 0 || out_len == 0 {
        return Vec::new();
    }

    let limit = (source_len - 1) as f64;
    (0..out_len)
        .map(|i| {
            let position = if out_len > 1 {
                limit * i as f64 / (out_len - 1) as f64
            } else {
                0.0
            };
            position.round_ties_even() as usize
        })
        .collect()
}

/// Resize a color image by nearest-neighbor sampling.
///
/// Only the spatial axes are resampled; the channel axis is carried
/// through unchanged.
///
/// # Errors
///
/// Returns [`RenderError::InvalidArgument`] when any factor is zero,
/// negative, or NaN. No work is performed in that case.
pub fn resample(
    image: ArrayView3<'_, f32>,
    factors: impl Into<ScaleFactors>,
) -> Result<Array3<f32>, RenderError> {
    let factors = factors.into().check()?;
    let (height, width, channels) = image.dim();

    let rows = nearest_indices(height, factors.y);
    let cols = nearest_indices(width, factors.x);

    let mut output = Array3::zeros((rows.len(), cols.len(), channels));
    for (out_y, &src_y) in rows.iter().enumerate() {
        for (out_x, &src_x) in cols.iter().enumerate() {
            for c in 0..channels {
                output[[out_y, out_x, c]] = image[[src_y, src_x, c]];
            }
        }
    }
    Ok(output)
}

/// Resize a single-channel plane by nearest-neighbor sampling.
///
/// # Errors
///
/// Same contract as [`resample`].
pub fn resample_plane(
    image: ArrayView2<'_, f32>,
    factors: impl Into<ScaleFactors>,
) -> Result<Array2<f32>, RenderError> {
    let factors = factors.into().check()?;
    let (height, width) = image.dim();

    let rows = nearest_indices(height, factors.y);
    let cols = nearest_indices(width, factors.x);

    let mut output = Array2::zeros((rows.len(), cols.len()));
    for (out_y, &src_y) in rows.iter().enumerate() {
        for (out_x, &src_x) in cols.iter().enumerate() {
            output[[out_y, out_x]] = image[[src_y, src_x]];
        }
    }
    Ok(output)
}

// =============================================================================
// Tests
// =============================================================================
