//! An image stamped into the bottom face of a cylinder.
//!
//! The stamp plane is z = 0. The image rectangle is surrounded by a flat
//! margin out to the rim, and the body is a plain cylinder up to `z_height`
//! closed by a disk.

use crate::config::StampConfig;
use crate::field::{Field, stamp_extent};
use crate::float_types::{Real, TAU};
use crate::mesh::ring_point;
use crate::triangulated::{Triangle, TriangleSink};
use nalgebra::Point3;

/// Height of the flat face the image is set into.
pub const STAMP_PLANE_Z: Real = 0.0;

/// The whole solid: image surface, margin, image sidewalls, body wall, top cap.
pub fn emit<K: TriangleSink>(
    sink: &mut K,
    field: &Field,
    cfg: &StampConfig,
) -> Result<(), K::Error> {
    let (max_x, max_y) = stamp_extent(field.width() as u32, field.height() as u32, cfg);

    draw_stamp(sink, field, false)?;
    draw_margin(sink, cfg.outer_radius, (max_x, max_y), STAMP_PLANE_Z, cfg.segments)?;
    draw_sidewalls(sink, field, (max_x, max_y), STAMP_PLANE_Z)?;
    draw_hollow_cylinder(sink, cfg.outer_radius, STAMP_PLANE_Z, cfg.z_height, cfg.segments)?;
    draw_cylinder_cap(sink, cfg.outer_radius, cfg.z_height, cfg.segments)
}

/// Image surface as flat-topped pixels with walls at every step.
///
/// Each block `(i, j)..(i+1, j+1)` is a flat quad at the height of cell
/// `(i, j)`. A wall to the next column (or row) is added only where the height
/// changes; flat regions get no internal walls. `reverse_direction` flips the
/// surface quads for a stamp facing the other way.
pub fn draw_stamp<K: TriangleSink>(
    sink: &mut K,
    field: &Field,
    reverse_direction: bool,
) -> Result<(), K::Error> {
    let at = |p: Point3<Real>, z: Real| Point3::new(p.x, p.y, z);

    for i in 0..field.width() - 1 {
        for j in 0..field.height() - 1 {
            let here = field.get(i, j);
            let next_x = field.get(i + 1, j);
            let next_y = field.get(i, j + 1);
            let diagonal = field.get(i + 1, j + 1);
            let z = here.z;

            let v1 = at(here, z);
            let v2 = at(next_x, z);
            let v3 = at(diagonal, z);
            let v4 = at(next_y, z);
            if reverse_direction {
                sink.add_quad(v1, v2, v3, v4)?;
            } else {
                sink.add_quad(v4, v3, v2, v1)?;
            }

            // step up or down to the next column
            if z != next_x.z {
                let v1 = at(next_x, z);
                let v2 = at(next_x, next_x.z);
                let v3 = at(diagonal, next_x.z);
                let v4 = at(diagonal, z);
                sink.add_quad(v4, v3, v2, v1)?;
            }

            // step up or down to the next row
            if z != next_y.z {
                let v1 = at(next_y, z);
                let v2 = at(diagonal, z);
                let v3 = at(diagonal, next_y.z);
                let v4 = at(next_y, next_y.z);
                sink.add_quad(v4, v3, v2, v1)?;
            }
        }
    }
    Ok(())
}

/// Corner of the image rectangle in quadrant `q` (counter-clockwise from +x,+y).
fn quadrant_corner(q: u32, (max_x, max_y): (Real, Real)) -> (Real, Real) {
    match q {
        0 => (max_x, max_y),
        1 => (-max_x, max_y),
        2 => (-max_x, -max_y),
        _ => (max_x, -max_y),
    }
}

/// Midpoint of the rectangle edge crossed by the axis at `q · 90°`.
fn axis_midpoint(q: u32, (max_x, max_y): (Real, Real)) -> (Real, Real) {
    match q % 4 {
        0 => (max_x, 0.0),
        1 => (0.0, max_y),
        2 => (-max_x, 0.0),
        _ => (0.0, -max_y),
    }
}

/// Flat annulus between the image rectangle and the rim circle.
///
/// Built per quadrant. The first arc segment of a quadrant is a quad to the
/// quadrant's corner and the edge midpoint it starts from, the last is a quad
/// to the next edge midpoint and the corner, and the segments between fan to
/// the corner. `segments` must be a multiple of 4 and at least 8.
pub fn draw_margin<K: TriangleSink>(
    sink: &mut K,
    radius: Real,
    extent: (Real, Real),
    z: Real,
    segments: u32,
) -> Result<(), K::Error> {
    let qtr_segments = segments / 4;
    let point = |(x, y): (Real, Real)| Point3::new(x, y, z);

    for q in 0..4 {
        let corner = point(quadrant_corner(q, extent));
        for i in q * qtr_segments..(q + 1) * qtr_segments {
            let start = (i as Real / segments as Real) * TAU;
            let stop = ((i + 1) as Real / segments as Real) * TAU;
            let v1 = ring_point(radius, start, z);
            let v2 = ring_point(radius, stop, z);

            if i == q * qtr_segments {
                let v4 = point(axis_midpoint(q, extent));
                sink.add_quad(v4, corner, v2, v1)?;
            } else if i == (q + 1) * qtr_segments - 1 {
                let v3 = point(axis_midpoint(q + 1, extent));
                sink.add_quad(corner, v3, v2, v1)?;
            } else {
                sink.add_triangle(Triangle::new(corner, v2, v1), None)?;
            }
        }
    }
    Ok(())
}

/// Walls from the image boundary to the stamp plane at `z`, all four sides.
///
/// Emitted for every boundary segment, even where the image edge already lies
/// on the plane and the quad has no area.
pub fn draw_sidewalls<K: TriangleSink>(
    sink: &mut K,
    field: &Field,
    (max_x, max_y): (Real, Real),
    z: Real,
) -> Result<(), K::Error> {
    let wm1 = field.width() - 1;
    let hm1 = field.height() - 1;

    for x in 0..wm1 {
        let (a, b) = (field.get(x, 0), field.get(x + 1, 0));
        let v1 = Point3::new(a.x, -max_y, z);
        let v2 = Point3::new(b.x, -max_y, z);
        let v3 = Point3::new(b.x, -max_y, b.z);
        let v4 = Point3::new(a.x, -max_y, a.z);
        sink.add_quad(v4, v3, v2, v1)?;

        let (a, b) = (field.get(x, hm1), field.get(x + 1, hm1));
        let v1 = Point3::new(a.x, max_y, z);
        let v2 = Point3::new(b.x, max_y, z);
        let v3 = Point3::new(b.x, max_y, b.z);
        let v4 = Point3::new(a.x, max_y, a.z);
        sink.add_quad(v1, v2, v3, v4)?;
    }

    for y in 0..hm1 {
        let (a, b) = (field.get(0, y), field.get(0, y + 1));
        let v1 = Point3::new(-max_x, a.y, z);
        let v2 = Point3::new(-max_x, b.y, z);
        let v3 = Point3::new(-max_x, b.y, b.z);
        let v4 = Point3::new(-max_x, a.y, a.z);
        sink.add_quad(v1, v2, v3, v4)?;

        let (a, b) = (field.get(wm1, y), field.get(wm1, y + 1));
        let v1 = Point3::new(max_x, a.y, z);
        let v2 = Point3::new(max_x, b.y, z);
        let v3 = Point3::new(max_x, b.y, b.z);
        let v4 = Point3::new(max_x, a.y, a.z);
        sink.add_quad(v4, v3, v2, v1)?;
    }
    Ok(())
}

/// Open cylinder wall of `radius` from `bottom_z` to `top_z`, facing outward.
pub fn draw_hollow_cylinder<K: TriangleSink>(
    sink: &mut K,
    radius: Real,
    bottom_z: Real,
    top_z: Real,
    segments: u32,
) -> Result<(), K::Error> {
    for i in 0..segments {
        let start = (i as Real / segments as Real) * TAU;
        let stop = ((i + 1) as Real / segments as Real) * TAU;

        let v1 = ring_point(radius, start, bottom_z);
        let v2 = ring_point(radius, stop, bottom_z);
        let v3 = ring_point(radius, stop, top_z);
        let v4 = ring_point(radius, start, top_z);
        sink.add_quad(v1, v2, v3, v4)?;
    }
    Ok(())
}

/// Upward-facing disk at `z`, fanned from the center.
pub fn draw_cylinder_cap<K: TriangleSink>(
    sink: &mut K,
    radius: Real,
    z: Real,
    segments: u32,
) -> Result<(), K::Error> {
    let center = Point3::new(0.0, 0.0, z);
    for i in 0..segments {
        let start = (i as Real / segments as Real) * TAU;
        let stop = ((i + 1) as Real / segments as Real) * TAU;
        let tri = Triangle::new(ring_point(radius, start, z), ring_point(radius, stop, z), center);
        sink.add_triangle(tri, None)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::GrayGrid;

    #[test]
    fn flat_image_has_no_step_walls() {
        let img = GrayGrid::filled(4, 3, 90);
        let field = Field::stamp(&img, &StampConfig::default());
        let mut tris: Vec<Triangle> = Vec::new();
        draw_stamp(&mut tris, &field, false).unwrap();
        assert_eq!(tris.len(), 3 * 2 * 2);
    }

    #[test]
    fn one_step_adds_one_wall_per_row() {
        // columns 0..2 dark, column 2 and 3 bright: one step between columns 1 and 2
        let img = GrayGrid::from_fn(4, 3, |x, _| if x >= 2 { 255 } else { 0 });
        let cfg = StampConfig { mirror: false, ..StampConfig::default() };
        let field = Field::stamp(&img, &cfg);
        let mut tris: Vec<Triangle> = Vec::new();
        draw_stamp(&mut tris, &field, false).unwrap();
        // 6 surface quads + 2 column steps (one per row pair)
        assert_eq!(tris.len(), (6 + 2) * 2);
    }

    #[test]
    fn margin_triangle_count() {
        let mut tris: Vec<Triangle> = Vec::new();
        draw_margin(&mut tris, 10.0, (3.0, 4.0), 0.0, 12).unwrap();
        // per quadrant: 2 quads + (3 - 2) fan triangles
        assert_eq!(tris.len(), 4 * (2 * 2 + 1));
    }

    #[test]
    fn margin_faces_down() {
        let mut tris: Vec<Triangle> = Vec::new();
        draw_margin(&mut tris, 10.0, (3.0, 4.0), 0.0, 16).unwrap();
        for tri in &tris {
            assert!(tri.normal().z < -0.999, "{tri:?}");
        }
    }

    #[test]
    fn body_faces_out_and_up() {
        let mut wall: Vec<Triangle> = Vec::new();
        draw_hollow_cylinder(&mut wall, 5.0, 0.0, 10.0, 8).unwrap();
        assert_eq!(wall.len(), 16);
        for tri in &wall {
            let center = (tri.v1.coords + tri.v2.coords + tri.v3.coords) / 3.0;
            let radial = nalgebra::Vector3::new(center.x, center.y, 0.0).normalize();
            assert!(tri.normal().dot(&radial) > 0.9);
        }

        let mut cap: Vec<Triangle> = Vec::new();
        draw_cylinder_cap(&mut cap, 5.0, 10.0, 8).unwrap();
        assert_eq!(cap.len(), 8);
        assert!(cap.iter().all(|t| t.normal().z > 0.999));
    }
}
