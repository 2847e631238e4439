//! Triangles and the sinks that consume them.

use crate::float_types::Real;
use crate::geometry::compute_normal;
use nalgebra::{Point3, Vector3};
use std::convert::Infallible;

/// Three vertices in winding order. The outward normal follows the right-hand
/// rule: `(v2 - v1) × (v3 - v1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v1: Point3<Real>,
    pub v2: Point3<Real>,
    pub v3: Point3<Real>,
}

impl Triangle {
    pub const fn new(v1: Point3<Real>, v2: Point3<Real>, v3: Point3<Real>) -> Self {
        Triangle { v1, v2, v3 }
    }

    /// Unit normal, or the zero vector for a degenerate triangle.
    pub fn normal(&self) -> Vector3<Real> {
        compute_normal(self)
    }

    /// Same vertices, opposite winding.
    pub const fn flipped(&self) -> Self {
        Triangle::new(self.v1, self.v3, self.v2)
    }

    pub const fn vertices(&self) -> [Point3<Real>; 3] {
        [self.v1, self.v2, self.v3]
    }

    /// Convert to an `stl_io` record, narrowing every component to `f32`.
    #[allow(clippy::unnecessary_cast)]
    pub fn to_stl(&self, normal: Vector3<Real>) -> stl_io::Triangle {
        stl_io::Triangle {
            normal: stl_io::Normal::new([normal.x as f32, normal.y as f32, normal.z as f32]),
            vertices: self
                .vertices()
                .map(|p| stl_io::Vertex::new([p.x as f32, p.y as f32, p.z as f32])),
        }
    }
}

/// Anything that accepts a stream of triangles in a fixed order.
///
/// The mesh builders only ever talk to a sink, so the same topology code
/// writes straight to an STL file or collects into memory.
pub trait TriangleSink {
    type Error;

    /// Append one triangle. A `None` normal is computed from the winding.
    fn add_triangle(
        &mut self,
        tri: Triangle,
        normal: Option<Vector3<Real>>,
    ) -> Result<(), Self::Error>;

    /// Append a quad as the two triangles `(v1, v2, v4)` and `(v2, v3, v4)`.
    ///
    /// The diagonal is always `v2`–`v4`; callers rely on that to know which
    /// triangles of a non-planar quad come out degenerate.
    fn add_quad(
        &mut self,
        v1: Point3<Real>,
        v2: Point3<Real>,
        v3: Point3<Real>,
        v4: Point3<Real>,
    ) -> Result<(), Self::Error> {
        self.add_triangle(Triangle::new(v1, v2, v4), None)?;
        self.add_triangle(Triangle::new(v2, v3, v4), None)
    }
}

/// In-memory sink. Supplied normals are dropped; `Triangle::normal` recomputes them.
impl TriangleSink for Vec<Triangle> {
    type Error = Infallible;

    fn add_triangle(
        &mut self,
        tri: Triangle,
        _normal: Option<Vector3<Real>>,
    ) -> Result<(), Self::Error> {
        self.push(tri);
        Ok(())
    }
}
