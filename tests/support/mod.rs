//! Test support library
//! Helpers for reading output back and checking solids.

#![allow(dead_code)]

use frieze::float_types::Real;
use frieze::triangulated::Triangle;
use nalgebra::Vector3;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// Distance of a point from the z axis.
pub fn radial(x: Real, y: Real) -> Real {
    x.hypot(y)
}

/// Parse a binary STL with `stl_io`, keeping file order.
pub fn read_binary(path: &Path) -> Vec<stl_io::Triangle> {
    let mut file = File::open(path).expect("open stl");
    stl_io::create_stl_reader(&mut file)
        .expect("stl reader")
        .map(|t| t.expect("stl triangle"))
        .collect()
}

/// `(normal, [v1, v2, v3])` per facet of an ASCII STL.
pub fn read_ascii(text: &str) -> Vec<([f32; 3], [[f32; 3]; 3])> {
    fn floats<'a>(it: impl Iterator<Item = &'a str>) -> [f32; 3] {
        let v: Vec<f32> = it.map(|s| s.parse().expect("float")).collect();
        [v[0], v[1], v[2]]
    }

    let mut facets = Vec::new();
    let mut normal = [0.0; 3];
    let mut verts = Vec::new();
    for line in text.lines() {
        let mut words = line.split_whitespace();
        match words.next() {
            Some("facet") => {
                words.next(); // "normal"
                normal = floats(words);
            },
            Some("vertex") => verts.push(floats(words)),
            Some("endfacet") => {
                facets.push((normal, [verts[0], verts[1], verts[2]]));
                verts.clear();
            },
            _ => {},
        }
    }
    facets
}

/// Normal recomputed from the stored `f32` vertices, or `None` if degenerate.
pub fn recomputed_normal(v: &[[f32; 3]; 3]) -> Option<Vector3<f64>> {
    let p = |k: usize| Vector3::new(v[k][0] as f64, v[k][1] as f64, v[k][2] as f64);
    let n = (p(1) - p(0)).cross(&(p(2) - p(0)));
    let len = n.norm();
    (len > 0.0).then(|| n / len)
}

pub fn stl_vertices(t: &stl_io::Triangle) -> [[f32; 3]; 3] {
    t.vertices.map(|v| [v[0], v[1], v[2]])
}

pub fn stl_normal(t: &stl_io::Triangle) -> [f32; 3] {
    [t.normal[0], t.normal[1], t.normal[2]]
}

/// Signed volume by the divergence theorem; positive for a closed, outward-wound solid.
pub fn signed_volume(tris: &[Triangle]) -> Real {
    tris.iter()
        .map(|t| t.v1.coords.dot(&t.v2.coords.cross(&t.v3.coords)) / 6.0)
        .sum()
}

type Key = [u64; 3];

fn key(p: &nalgebra::Point3<Real>) -> Key {
    [p.x as f64, p.y as f64, p.z as f64].map(f64::to_bits)
}

/// Directed edges that have no matching reverse edge. Empty for a closed,
/// consistently wound surface.
pub fn unmatched_edges(tris: &[Triangle]) -> usize {
    let mut count: HashMap<(Key, Key), i64> = HashMap::new();
    for t in tris {
        let [a, b, c] = t.vertices().map(|p| key(&p));
        for (from, to) in [(a, b), (b, c), (c, a)] {
            *count.entry((from, to)).or_default() += 1;
            *count.entry((to, from)).or_default() -= 1;
        }
    }
    count.values().filter(|&&n| n != 0).count()
}

/// Area of a regular `n`-gon inscribed in a circle of radius `r`.
pub fn ngon_area(n: usize, r: Real) -> Real {
    0.5 * n as Real * r * r * (frieze::float_types::TAU / n as Real).sin()
}
