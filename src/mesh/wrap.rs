//! A relief wrapped around a cylinder, optionally with an axial bore.

use crate::config::WrapConfig;
use crate::field::Field;
use crate::float_types::{Real, TAU};
use crate::mesh::ring_point;
use crate::triangulated::{Triangle, TriangleSink};
use nalgebra::Point3;

/// Triangle count of a wrapped model, known before anything is written.
///
/// Surface (seam included) is `2·w·(h-1)`; each end cap adds `w` fan triangles,
/// or `2·w` with a hole, and the hole wall adds another `2·w`.
pub const fn expected_triangles(width: u64, height: u64, has_hole: bool) -> u64 {
    let surface = 2 * width * height.saturating_sub(1);
    if has_hole {
        surface + 6 * width
    } else {
        surface + 2 * width
    }
}

/// The whole solid: surface, bottom cap, top cap, then the bore.
pub fn emit<K: TriangleSink>(
    sink: &mut K,
    field: &Field,
    cfg: &WrapConfig,
) -> Result<(), K::Error> {
    draw_cylinder(sink, field, cfg.reverse_x)?;
    draw_end_caps(sink, field, 0, cfg, false)?;
    draw_end_caps(sink, field, field.height() - 1, cfg, true)?;

    if let Some(hole_radius) = cfg.hole() {
        draw_hole(sink, field.width(), field.height(), hole_radius, cfg.z_scale)?;
    }
    Ok(())
}

/// One quad per 2x2 block between columns `i1` and `i2`, bottom to top.
fn draw_band<K: TriangleSink>(
    sink: &mut K,
    field: &Field,
    i1: usize,
    i2: usize,
    reverse_x: bool,
) -> Result<(), K::Error> {
    for j in 0..field.height() - 1 {
        let v1 = field.get(i1, j);
        let v2 = field.get(i2, j);
        let v3 = field.get(i2, j + 1);
        let v4 = field.get(i1, j + 1);

        if reverse_x {
            sink.add_quad(v4, v3, v2, v1)?;
        } else {
            sink.add_quad(v1, v2, v3, v4)?;
        }
    }
    Ok(())
}

/// The image surface: every adjacent column pair, then the seam joining the
/// last column back to the first.
pub fn draw_cylinder<K: TriangleSink>(
    sink: &mut K,
    field: &Field,
    reverse_x: bool,
) -> Result<(), K::Error> {
    let width = field.width();
    for i in 0..width - 1 {
        draw_band(sink, field, i, i + 1, reverse_x)?;
    }
    draw_band(sink, field, width - 1, 0, reverse_x)
}

fn draw_end_cap_segment<K: TriangleSink>(
    sink: &mut K,
    field: &Field,
    (i1, i2): (usize, usize),
    j: usize,
    cfg: &WrapConfig,
    reverse_normal: bool,
) -> Result<(), K::Error> {
    let width = field.width();
    let radians_per_pixel = TAU / width as Real;
    let z = j as Real * cfg.z_scale;
    let flip = cfg.reverse_x ^ reverse_normal;

    let v1 = field.get(i1, j);
    let v2 = field.get(i2, j);

    match cfg.hole() {
        Some(hole_radius) => {
            let (fi1, fi2) = if cfg.reverse_x {
                ((width - 1 - i1) as Real, (width - 1 - i2) as Real)
            } else {
                (i1 as Real, i2 as Real)
            };
            let v3 = ring_point(hole_radius, fi2 * radians_per_pixel, z);
            let v4 = ring_point(hole_radius, fi1 * radians_per_pixel, z);

            if flip {
                sink.add_quad(v1, v2, v3, v4)
            } else {
                sink.add_quad(v4, v3, v2, v1)
            }
        },
        None => {
            let center = Point3::new(0.0, 0.0, z);
            let tri = if flip {
                Triangle::new(v1, v2, center)
            } else {
                Triangle::new(v1, center, v2)
            };
            sink.add_triangle(tri, None)
        },
    }
}

/// Close row `j`: a fan to the axis, or an annulus out to the hole ring.
///
/// `reverse_normal` marks the far (top) end so its normals point up.
pub fn draw_end_caps<K: TriangleSink>(
    sink: &mut K,
    field: &Field,
    j: usize,
    cfg: &WrapConfig,
    reverse_normal: bool,
) -> Result<(), K::Error> {
    let width = field.width();
    for i in 0..width - 1 {
        draw_end_cap_segment(sink, field, (i, i + 1), j, cfg, reverse_normal)?;
    }
    draw_end_cap_segment(sink, field, (width - 1, 0), j, cfg, reverse_normal)
}

/// The bore: a constant-radius wall from z = 0 to `height · z_scale`, facing the axis.
pub fn draw_hole<K: TriangleSink>(
    sink: &mut K,
    width: usize,
    height: usize,
    hole_radius: Real,
    z_scale: Real,
) -> Result<(), K::Error> {
    let radians_per_pixel = TAU / width as Real;
    let top = height as Real * z_scale;

    let mut wedge = |a1: Real, a2: Real| {
        let v1 = ring_point(hole_radius, a1, 0.0);
        let v2 = ring_point(hole_radius, a2, 0.0);
        let v3 = ring_point(hole_radius, a2, top);
        let v4 = ring_point(hole_radius, a1, top);
        sink.add_quad(v4, v3, v2, v1)
    };

    for i in 0..width - 1 {
        let fi = i as Real;
        wedge(fi * radians_per_pixel, (fi + 1.0) * radians_per_pixel)?;
    }
    // last wedge closes back to angle zero
    wedge((width - 1) as Real * radians_per_pixel, 0.0)
}
