mod support;

use frieze::config::StampConfig;
use frieze::field::{Field, GrayGrid, stamp_extent};
use frieze::float_types::Real;
use frieze::mesh::stamp;
use frieze::triangulated::Triangle;
use support::radial;

fn build(img: &GrayGrid, cfg: &StampConfig) -> Vec<Triangle> {
    let field = Field::stamp(img, cfg);
    let mut tris: Vec<Triangle> = Vec::new();
    stamp::emit(&mut tris, &field, cfg).unwrap();
    tris
}

/// Every piece except the step walls has a fixed size.
fn fixed_triangles(w: usize, h: usize, segments: usize) -> usize {
    let surface = 2 * (w - 1) * (h - 1);
    let margin = segments + 8;
    let sidewalls = 2 * 2 * (w - 1) + 2 * 2 * (h - 1);
    let wall = 2 * segments;
    let cap = segments;
    surface + margin + sidewalls + wall + cap
}

#[test]
fn flat_image_count() {
    let cfg = StampConfig::default();
    let tris = build(&GrayGrid::filled(5, 4, 128), &cfg);
    assert_eq!(tris.len(), fixed_triangles(5, 4, cfg.segments as usize));
}

#[test]
fn step_walls_only_where_height_changes() {
    let cfg = StampConfig { mirror: false, ..StampConfig::default() };
    // checkerboard: every neighbour differs
    let img = GrayGrid::from_fn(4, 4, |x, y| if (x + y) % 2 == 0 { 0 } else { 255 });
    let tris = build(&img, &cfg);
    // 9 blocks, each with a step in x and a step in y
    let steps = 9 * 2 * 2;
    assert_eq!(tris.len(), fixed_triangles(4, 4, cfg.segments as usize) + steps);
}

#[test]
fn boundary_sidewalls_are_emitted_even_when_flat() {
    // with invert off and black pixels, the image lies on the stamp plane
    let cfg = StampConfig { invert: false, low_z: 0.0, high_z: -4.0, ..StampConfig::default() };
    let img = GrayGrid::filled(3, 3, 0);
    let field = Field::stamp(&img, &cfg);
    let extent = stamp_extent(3, 3, &cfg);

    let mut walls: Vec<Triangle> = Vec::new();
    stamp::draw_sidewalls(&mut walls, &field, extent, stamp::STAMP_PLANE_Z).unwrap();
    assert_eq!(walls.len(), 2 * 2 * 2 + 2 * 2 * 2);
    assert!(walls.iter().all(|t| t.normal().norm() == 0.0));
}

#[test]
fn image_fits_inside_margin_circle() {
    let cfg = StampConfig { margin_pct: 10.0, outer_radius: 25.0, ..StampConfig::default() };
    let img = GrayGrid::from_fn(16, 9, |x, y| (x * 16 + y) as u8);
    let field = Field::stamp(&img, &cfg);
    for p in field.points() {
        assert!(radial(p.x, p.y) <= 0.9 * 25.0 + 1e-9);
    }
    let (max_x, max_y) = stamp_extent(16, 9, &cfg);
    assert!((max_x.hypot(max_y) - 22.5).abs() < 1e-9);
    assert!((max_x / max_y - 16.0 / 9.0).abs() < 1e-9);
}

#[test]
fn body_geometry() {
    let cfg = StampConfig { outer_radius: 15.0, z_height: 30.0, ..StampConfig::default() }
        .with_roundness(2)
        .unwrap();
    assert_eq!(cfg.segments, 16);
    let tris = build(&GrayGrid::filled(3, 3, 40), &cfg);

    // wall and cap come last: 2 * 16 + 16 triangles
    let body = &tris[tris.len() - 3 * 16..];
    for p in body.iter().flat_map(|t| t.vertices()) {
        let r = radial(p.x, p.y);
        assert!((r - 15.0).abs() < 1e-9 || (r == 0.0 && p.z == 30.0), "{p:?}");
        assert!(p.z == 0.0 || p.z == 30.0);
    }
    let cap = &tris[tris.len() - 16..];
    assert!(cap.iter().all(|t| t.normal().z > 0.999));
}

#[test]
fn stamp_surface_faces_down_unless_reversed() {
    let cfg = StampConfig::default();
    let field = Field::stamp(&GrayGrid::filled(3, 3, 10), &cfg);

    let mut down: Vec<Triangle> = Vec::new();
    stamp::draw_stamp(&mut down, &field, false).unwrap();
    assert!(down.iter().all(|t| t.normal().z < -0.999));

    let mut up: Vec<Triangle> = Vec::new();
    stamp::draw_stamp(&mut up, &field, true).unwrap();
    assert!(up.iter().all(|t| t.normal().z > 0.999));
}

#[test]
fn relief_depth_follows_low_and_high() {
    let cfg = StampConfig {
        low_z: 2.0,
        high_z: 6.0,
        invert: false,
        mirror: false,
        ..StampConfig::default()
    };
    let img = GrayGrid::from_fn(2, 2, |x, _| if x == 0 { 0 } else { 255 });
    let field = Field::stamp(&img, &cfg);
    assert_eq!(field.get(0, 1).z, 2.0);
    assert_eq!(field.get(1, 1).z, 6.0);
    let mid: Real = frieze::geometry::lerp(2.0, 6.0, 0.5);
    assert_eq!(mid, 4.0);
}
