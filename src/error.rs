use thiserror::Error;

use crate::geometry::{Coord, GridRef, Shape};

/// Errors surfaced by geometry validation and compositing.
///
/// All variants are detected eagerly at the boundary of the offending
/// operation, before any partial work touches an output buffer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// A malformed scalar input: non-positive scale factor or shape
    /// component, negative gamma, or a mismatched buffer extent
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Requested region falls outside the full image (or has non-positive
    /// extent); the compositor never silently clips
    #[error("region at {origin} with shape {shape} is not within image {image_shape}")]
    InvalidRegion {
        origin: Coord,
        shape: Shape,
        image_shape: Shape,
    },

    /// A tile layer's grid reference does not overlap the requested output
    /// region (caller error, distinct from an out-of-bounds region)
    #[error("tile at grid {grid} does not overlap the requested output region")]
    TileOutsideRegion { grid: GridRef },
}

impl RenderError {
    /// Shorthand for an [`RenderError::InvalidArgument`] with a formatted message.
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        RenderError::InvalidArgument {
            message: message.into(),
        }
    }
}
