//! Pure math helpers shared by the field builder and the mesh builders.

use crate::float_types::Real;
use crate::triangulated::Triangle;
use nalgebra::Vector3;

/// Convert a radius and an angle (radians) to cartesian `(x, y)`.
#[inline]
pub fn cylindrical_coord(radius: Real, angle: Real) -> (Real, Real) {
    (radius * angle.cos(), radius * angle.sin())
}

/// Map `value` in `0..=max_value` to a signed offset.
///
/// * not inverted: `((value - max_value) / max_value) * scale`, so `-scale` at `0`
///   rising to `0` at `max_value`
/// * inverted: `((max_value - value) / max_value) * scale`, so `scale` at `0`
///   falling to `0` at `max_value`
///
/// The range is not centered on zero; callers add it to a base radius
/// (`inner_radius + offset`).
#[inline]
pub fn calc_offset(value: Real, max_value: Real, scale: Real, invert: bool) -> Real {
    if invert {
        ((max_value - value) / max_value) * scale
    } else {
        ((value - max_value) / max_value) * scale
    }
}

/// Linear interpolation of `fraction` (nominally `0.0..=1.0`, not clamped) from `low` to `high`.
#[inline]
pub fn lerp(low: Real, high: Real, fraction: Real) -> Real {
    (high - low) * fraction + low
}

/// Unit normal of `tri` by the right-hand rule, or `None` when the cross product
/// of its edges has no usable length (collinear or coincident vertices).
pub fn try_normal(tri: &Triangle) -> Option<Vector3<Real>> {
    let u = tri.v2 - tri.v1;
    let v = tri.v3 - tri.v1;
    let n = u.cross(&v);
    let len = n.norm();
    if len == 0.0 || !len.is_finite() {
        return None;
    }
    Some(n / len)
}

/// Unit normal of `tri`: `normalize((v2 - v1) × (v3 - v1))`.
///
/// Degenerate triangles get the zero vector, which is what ends up in the STL
/// record, and a warning is logged. Never returns NaN or infinite components.
/// Use [`try_normal`] to test for degeneracy without logging.
pub fn compute_normal(tri: &Triangle) -> Vector3<Real> {
    try_normal(tri).unwrap_or_else(|| {
        tracing::warn!(
            v1 = ?tri.v1, v2 = ?tri.v2, v3 = ?tri.v3,
            "degenerate triangle, using zero normal"
        );
        Vector3::zeros()
    })
}
