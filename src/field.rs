//! Sample a grayscale image into a grid of 3D points.

use crate::config::{StampConfig, WrapConfig};
use crate::float_types::{GRAY_MAX, Real, TAU};
use crate::geometry::{cylindrical_coord, lerp};
use nalgebra::Point3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// An 8-bit single channel pixel grid.
///
/// Decoding and colour conversion happen elsewhere; this is only what the
/// field builder reads.
pub trait Heightmap: Sync {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Gray value at column `x`, row `y`.
    fn pixel(&self, x: u32, y: u32) -> u8;
}

/// A plain row-major pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayGrid {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl GrayGrid {
    /// `None` if `pixels.len() != width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        (pixels.len() == width as usize * height as usize).then_some(GrayGrid {
            width,
            height,
            pixels,
        })
    }

    /// Every pixel set to `value`.
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        GrayGrid {
            width,
            height,
            pixels: vec![value; width as usize * height as usize],
        }
    }

    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> u8) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        GrayGrid { width, height, pixels }
    }
}

impl Heightmap for GrayGrid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, y: u32) -> u8 {
        self.pixels[y as usize * self.width as usize + x as usize]
    }
}

#[cfg(feature = "image-io")]
impl Heightmap for image::GrayImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixel(&self, x: u32, y: u32) -> u8 {
        self.get_pixel(x, y)[0]
    }
}

/// One point per source pixel, addressed as `(column, row)`.
///
/// Built once, read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    width: usize,
    height: usize,
    points: Vec<Point3<Real>>,
}

impl Field {
    /// Evaluate `f(i, j)` for every cell. The storage slot of each cell is
    /// fixed by its index, so the parallel build is identical to the serial one.
    fn build<F>(width: usize, height: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> Point3<Real> + Sync,
    {
        let cell = |k: usize| f(k / height, k % height);

        #[cfg(not(feature = "parallel"))]
        let points = (0..width * height).map(cell).collect();

        #[cfg(feature = "parallel")]
        let points = (0..width * height).into_par_iter().map(cell).collect();

        Field { width, height, points }
    }

    /// Cylindrical wrap: column `i` goes to angle `i · 2π / width`, row `j` to
    /// `z = j · z_scale`, and the pixel to radius `inner_radius + offset`.
    ///
    /// With `reverse_x` the angle index becomes `width - i`.
    pub fn wrap<H: Heightmap>(img: &H, cfg: &WrapConfig) -> Self {
        let (width, height) = (img.width() as usize, img.height() as usize);
        let radians_per_pixel = TAU / width as Real;

        Self::build(width, height, |i, j| {
            let fi = if cfg.reverse_x { (width - i) as Real } else { i as Real };
            let value = Real::from(img.pixel(i as u32, j as u32));
            let (x, y) = cylindrical_coord(cfg.radius_for(value), fi * radians_per_pixel);
            Point3::new(x, y, j as Real * cfg.z_scale)
        })
    }

    /// Flat stamp: the image is centered on the origin and scaled so its
    /// diagonal fits inside the margin circle. The pixel picks a z between
    /// `low_z` and `high_z`.
    ///
    /// `mirror` only changes which column is sampled; x positions always run
    /// from `-max_x` to `max_x`.
    pub fn stamp<H: Heightmap>(img: &H, cfg: &StampConfig) -> Self {
        let (width, height) = (img.width() as usize, img.height() as usize);
        let (max_x, max_y) = stamp_extent(img.width(), img.height(), cfg);
        let (wm1, hm1) = ((width - 1) as Real, (height - 1) as Real);

        Self::build(width, height, |i, j| {
            let column = if cfg.mirror { width - 1 - i } else { i };
            let value = Real::from(img.pixel(column as u32, j as u32));
            let fraction = if cfg.invert {
                (GRAY_MAX - value) / GRAY_MAX
            } else {
                value / GRAY_MAX
            };
            let x = lerp(-max_x, max_x, i as Real / wm1);
            let y = lerp(-max_y, max_y, j as Real / hm1);
            Point3::new(x, y, lerp(cfg.low_z, cfg.high_z, fraction))
        })
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Point for column `i`, row `j`. Panics when out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Point3<Real> {
        assert!(i < self.width && j < self.height, "field index ({i}, {j}) out of range");
        self.points[i * self.height + j]
    }

    /// All points, column-major.
    pub fn points(&self) -> &[Point3<Real>] {
        &self.points
    }
}

/// Half extents `(max_x, max_y)` of a stamped image: the rectangle whose
/// half-diagonal equals `(1 - margin_pct / 100) · outer_radius`.
pub fn stamp_extent(width: u32, height: u32, cfg: &StampConfig) -> (Real, Real) {
    let inner_radius = (100.0 - cfg.margin_pct) / 100.0 * cfg.outer_radius;
    let (w, h) = (width as Real, height as Real);
    let scale = inner_radius / w.hypot(h);
    (w * scale, h * scale)
}
