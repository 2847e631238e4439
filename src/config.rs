//! Run parameters for the two model kinds.
//!
//! Every value is immutable once built and is passed explicitly into the
//! field builder and the mesh builders; nothing is process-wide.

use crate::errors::{ValidationError, finite, positive};
use crate::float_types::{GRAY_MAX, Real};
use crate::geometry::calc_offset;
use std::fmt;
use std::str::FromStr;

/// On-disk STL flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StlFormat {
    #[default]
    Binary,
    Ascii,
}

impl FromStr for StlFormat {
    type Err = String;

    /// Accepts the short names `bin` and `txt` as well as the long ones.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bin" | "binary" => Ok(StlFormat::Binary),
            "txt" | "text" | "ascii" => Ok(StlFormat::Ascii),
            other => Err(format!("unknown STL type '{other}' (expected 'bin' or 'txt')")),
        }
    }
}

impl fmt::Display for StlFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StlFormat::Binary => f.write_str("bin"),
            StlFormat::Ascii => f.write_str("txt"),
        }
    }
}

/// An image wrapped around a cylinder: columns go round, rows go up.
#[derive(Debug, Clone, PartialEq)]
pub struct WrapConfig {
    /// Radius of the brightest pixel (darkest when `invert`).
    pub inner_radius: Real,
    /// `outer_radius - inner_radius` is the relief depth.
    pub outer_radius: Real,
    /// Radius of an axial bore; `None` or a radius of zero or less leaves the cylinder solid.
    pub hole_radius: Option<Real>,
    /// Millimetres per pixel row.
    pub z_scale: Real,
    /// Darker pixels stick out further.
    pub invert: bool,
    /// Scan clockwise instead of counter-clockwise (mirror image).
    pub reverse_x: bool,
}

impl Default for WrapConfig {
    fn default() -> Self {
        WrapConfig {
            inner_radius: 70.0,
            outer_radius: 80.0,
            hole_radius: None,
            z_scale: 1.0,
            invert: false,
            reverse_x: false,
        }
    }
}

impl WrapConfig {
    /// Set the bore from a raw radius; zero or negative means no hole.
    pub fn with_hole_radius(mut self, hole_radius: Real) -> Self {
        self.hole_radius = (hole_radius > 0.0).then_some(hole_radius);
        self
    }

    /// The bore radius, if there is one. Zero, negative and NaN radii mean no hole,
    /// however `hole_radius` was set.
    pub fn hole(&self) -> Option<Real> {
        self.hole_radius.filter(|r| *r > 0.0)
    }

    pub fn radius_diff(&self) -> Real {
        self.outer_radius - self.inner_radius
    }

    /// Surface radius for a gray value.
    pub fn radius_for(&self, value: Real) -> Real {
        self.inner_radius + calc_offset(value, GRAY_MAX, self.radius_diff(), self.invert)
    }

    /// Smallest radius any pixel value can produce.
    pub fn min_surface_radius(&self) -> Real {
        self.radius_for(0.0).min(self.radius_for(GRAY_MAX))
    }

    pub fn validate(&self, width: u32, height: u32) -> Result<(), ValidationError> {
        check_image(width, height)?;
        finite("inner_radius", self.inner_radius)?;
        finite("outer_radius", self.outer_radius)?;
        positive("z_scale", self.z_scale)?;

        let min_radius = self.min_surface_radius();
        if min_radius <= 0.0 {
            return Err(ValidationError::SurfaceRadius(min_radius));
        }
        if let Some(hole_radius) = self.hole() {
            positive("hole_radius", hole_radius)?;
            if hole_radius >= min_radius {
                return Err(ValidationError::HoleTooLarge { hole_radius, min_radius });
            }
        }
        Ok(())
    }
}

/// An image stamped into the bottom face of a cylinder.
///
/// The stamp sits at z = 0 and the body rises to `z_height`, so by default the
/// relief goes from `low_z` = 0 down to `high_z` = -4 below the bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct StampConfig {
    pub outer_radius: Real,
    /// Blank border between the image diagonal and the rim, in percent of `outer_radius`.
    pub margin_pct: Real,
    pub low_z: Real,
    pub high_z: Real,
    /// Darker pixels reach `high_z`.
    pub invert: bool,
    /// Sample image columns right to left so the print reads correctly.
    pub mirror: bool,
    /// Arc subdivisions of the rim; a multiple of 4.
    pub segments: u32,
    /// Height of the body above the stamp plane.
    pub z_height: Real,
}

impl Default for StampConfig {
    fn default() -> Self {
        StampConfig {
            outer_radius: 20.0,
            margin_pct: 1.0,
            low_z: 0.0,
            high_z: -4.0,
            invert: true,
            mirror: true,
            segments: segments_for_roundness(6),
            z_height: 70.0,
        }
    }
}

/// Rim subdivisions for a roundness level: `(roundness + 2) * 4`.
pub const fn segments_for_roundness(roundness: u32) -> u32 {
    (roundness + 2) * 4
}

impl StampConfig {
    /// Set `segments` from a roundness level in `1..=50`.
    pub fn with_roundness(mut self, roundness: u32) -> Result<Self, ValidationError> {
        if !(1..=50).contains(&roundness) {
            return Err(ValidationError::RoundnessOutOfRange(roundness));
        }
        self.segments = segments_for_roundness(roundness);
        Ok(self)
    }

    pub fn validate(&self, width: u32, height: u32) -> Result<(), ValidationError> {
        check_image(width, height)?;
        positive("outer_radius", self.outer_radius)?;
        positive("z_height", self.z_height)?;
        finite("low_z", self.low_z)?;
        finite("high_z", self.high_z)?;

        let margin = finite("margin", self.margin_pct)?;
        if !(0.0..=100.0).contains(&margin) {
            return Err(ValidationError::MarginOutOfRange(margin));
        }
        if self.segments % 4 != 0 {
            return Err(ValidationError::SegmentsNotMultipleOfFour(self.segments));
        }
        if self.segments < 8 {
            return Err(ValidationError::TooFewSegments(self.segments));
        }
        Ok(())
    }
}

fn check_image(width: u32, height: u32) -> Result<(), ValidationError> {
    if width < 2 || height < 2 {
        return Err(ValidationError::ImageTooSmall { width, height });
    }
    Ok(())
}
