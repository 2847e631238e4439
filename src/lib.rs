//! Turn a grayscale image into a printable solid and write it as **STL**.
//!
//! Pixel intensity becomes a geometric offset. Two models are built from the
//! same sampled [`Field`](field::Field):
//!
//! - **wrap**: the image runs once around a cylinder, brightness sets the
//!   radius, rows stack up the z axis; optional axial bore.
//! - **stamp**: the image is set into the bottom face of a cylinder,
//!   brightness sets the depth; a flat margin and a solid body to hold.
//!
//! Triangles stream straight into a binary or ASCII [`StlWriter`](io::StlWriter);
//! nothing but the field is held in memory.
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - **image-io**: read [`image::GrayImage`] as a [`Heightmap`](field::Heightmap)
//! - **cli**: the `frieze` command line tool
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon to sample the field

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod config;
pub mod errors;
pub mod field;
pub mod float_types;
pub mod geometry;
pub mod io;
pub mod mesh;
pub mod pipeline;
pub mod triangulated;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use config::{StampConfig, StlFormat, WrapConfig};
pub use errors::{Error, ValidationError};
pub use field::{Field, GrayGrid, Heightmap};
pub use pipeline::{Model, Summary, write_stl};
pub use triangulated::{Triangle, TriangleSink};
