//! Validation errors

use crate::float_types::Real;
use crate::io::IoError;

/// Parameter problems caught before any geometry is built or any file is opened.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// (ImageTooSmall) Fewer than 2 pixels in a dimension leaves nothing to triangulate
    #[error("(ImageTooSmall) image must be at least 2x2 pixels, got {width}x{height}")]
    ImageTooSmall { width: u32, height: u32 },
    /// (NotPositive) A length that must be strictly positive
    #[error("(NotPositive) {name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: Real },
    /// (NotFinite) A parameter is NaN or infinite
    #[error("(NotFinite) {name} must be a finite number, got {value}")]
    NotFinite { name: &'static str, value: Real },
    /// (MarginOutOfRange) Margin is a percentage
    #[error("(MarginOutOfRange) margin is a percentage between 0.0 and 100.0, got {0}")]
    MarginOutOfRange(Real),
    /// (RoundnessOutOfRange) Roundness outside 1..=50
    #[error("(RoundnessOutOfRange) roundness is an integer between 1 and 50, got {0}")]
    RoundnessOutOfRange(u32),
    /// (SegmentsNotMultipleOfFour) The margin ring is built per quadrant
    #[error("(SegmentsNotMultipleOfFour) segments must be a multiple of 4, got {0}")]
    SegmentsNotMultipleOfFour(u32),
    /// (TooFewSegments) Each quadrant needs a distinct first and last segment
    #[error("(TooFewSegments) segments must be at least 8, got {0}")]
    TooFewSegments(u32),
    /// (SurfaceRadius) Some pixel value would land on or inside the axis
    #[error("(SurfaceRadius) image surface radius reaches {0}; radii must stay positive")]
    SurfaceRadius(Real),
    /// (HoleTooLarge) The bore would cut through the image surface
    #[error("(HoleTooLarge) hole radius {hole_radius} must be smaller than the smallest surface radius {min_radius}")]
    HoleTooLarge { hole_radius: Real, min_radius: Real },
}

/// Anything that can end a run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Reject NaN and infinities under `name`.
pub(crate) fn finite(name: &'static str, value: Real) -> Result<Real, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite { name, value })
    }
}

/// Reject anything that is not a finite, strictly positive length.
pub(crate) fn positive(name: &'static str, value: Real) -> Result<Real, ValidationError> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NotPositive { name, value })
    }
}
