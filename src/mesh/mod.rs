//! Topology: walk a [`Field`](crate::field::Field) and emit a closed solid to a
//! [`TriangleSink`](crate::triangulated::TriangleSink).
//!
//! Winding is the only thing keeping normals outward. Every sub-feature has a
//! fixed vertex order, and the `reverse_*` flags flip it where a feature is
//! mirrored (the far end cap, a reversed scan direction).

use crate::float_types::Real;
use crate::geometry::cylindrical_coord;
use nalgebra::Point3;

pub mod stamp;
pub mod wrap;

/// Point on a circle of `radius` around the z axis at height `z`.
#[inline]
pub(crate) fn ring_point(radius: Real, angle: Real, z: Real) -> Point3<Real> {
    let (x, y) = cylindrical_coord(radius, angle);
    Point3::new(x, y, z)
}
