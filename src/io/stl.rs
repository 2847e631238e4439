//! Streaming STL output.
//!
//! Triangles are encoded as they arrive and never held in memory. A binary
//! file starts with a zero triangle count that is patched when the writer is
//! finished (or dropped), so the header always matches the records written.

use crate::config::StlFormat;
use crate::float_types::Real;
use crate::geometry::try_normal;
use crate::io::IoError;
use crate::triangulated::{Triangle, TriangleSink};
use nalgebra::Vector3;
use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

/// Bytes before the first binary record: 80-byte header plus the u32 count.
pub const BINARY_HEADER_LEN: u64 = 84;
/// Bytes per binary record: 12 `f32`s plus the u16 attribute count.
pub const BINARY_RECORD_LEN: u64 = 50;

/// Writes one STL solid to `W`, binary or ASCII.
///
/// Finalization (count patch or `endsolid` trailer) happens in [`finish`](Self::finish);
/// if the writer is dropped without it, `Drop` does the same work and logs any
/// failure, so an aborted run still leaves a well-formed file.
///
/// ```no_run
/// # use frieze::config::StlFormat;
/// # use frieze::io::StlWriter;
/// # use frieze::triangulated::TriangleSink;
/// # use nalgebra::Point3;
/// # fn main() -> Result<(), frieze::io::IoError> {
/// let mut stl = StlWriter::create("quad.stl", StlFormat::Binary, "quad")?;
/// stl.add_quad(
///     Point3::new(0.0, 0.0, 0.5),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(1.0, 1.0, 0.5),
///     Point3::new(1.0, 0.0, 0.0),
/// )?;
/// stl.finish()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct StlWriter<W: Write + Seek> {
    out: Option<W>,
    format: StlFormat,
    name: String,
    triangles: u64,
    degenerate: u64,
}

impl StlWriter<BufWriter<File>> {
    /// Create (or truncate) `path` and write the header.
    pub fn create(
        path: impl AsRef<Path>,
        format: StlFormat,
        name: &str,
    ) -> Result<Self, IoError> {
        let file = File::create(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), %format, "opened STL output");
        Self::new(BufWriter::new(file), format, name)
    }
}

impl<W: Write + Seek> StlWriter<W> {
    /// Wrap an already-open stream and write the header.
    pub fn new(mut out: W, format: StlFormat, name: &str) -> Result<Self, IoError> {
        match format {
            StlFormat::Binary => {
                out.write_all(&[0u8; 80])?;
                out.write_all(&0u32.to_le_bytes())?;
            },
            StlFormat::Ascii => {
                writeln!(out, "solid {name}")?;
            },
        }
        Ok(StlWriter {
            out: Some(out),
            format,
            name: name.to_string(),
            triangles: 0,
            degenerate: 0,
        })
    }

    pub const fn format(&self) -> StlFormat {
        self.format
    }

    /// Records written so far.
    pub const fn triangle_count(&self) -> u64 {
        self.triangles
    }

    /// Records written with a zero normal because their vertices were collinear.
    pub const fn degenerate_count(&self) -> u64 {
        self.degenerate
    }

    /// Patch the count (binary) or write `endsolid` (ASCII), flush, and hand back the stream.
    pub fn finish(mut self) -> Result<W, IoError> {
        let mut out = self.out.take().ok_or(IoError::Closed)?;
        self.finalize(&mut out)?;
        Ok(out)
    }

    fn finalize(&self, out: &mut W) -> Result<(), IoError> {
        match self.format {
            StlFormat::Binary => {
                let count = u32::try_from(self.triangles).map_err(|_| IoError::TooManyTriangles)?;
                out.seek(SeekFrom::Start(80))?;
                out.write_all(&count.to_le_bytes())?;
                out.seek(SeekFrom::End(0))?;
            },
            StlFormat::Ascii => {
                writeln!(out, "endsolid {}", self.name)?;
            },
        }
        out.flush()?;

        if self.degenerate > 0 {
            tracing::warn!(
                degenerate = self.degenerate,
                total = self.triangles,
                "wrote degenerate triangles with zero normals"
            );
        }
        tracing::debug!(triangles = self.triangles, format = %self.format, "finished STL");
        Ok(())
    }

    fn resolve_normal(&mut self, tri: &Triangle, normal: Option<Vector3<Real>>) -> Vector3<Real> {
        if let Some(n) = normal.filter(|n| n.iter().all(|c| c.is_finite())) {
            return n;
        }
        try_normal(tri).unwrap_or_else(|| {
            self.degenerate += 1;
            tracing::trace!(?tri, "degenerate triangle");
            Vector3::zeros()
        })
    }
}

fn encode_binary(rec: &stl_io::Triangle) -> [u8; BINARY_RECORD_LEN as usize] {
    let mut buf = [0u8; BINARY_RECORD_LEN as usize];
    let components = (0..3)
        .map(|k| rec.normal[k])
        .chain(rec.vertices.iter().flat_map(|v| (0..3).map(move |k| v[k])));
    for (chunk, c) in buf.chunks_exact_mut(4).zip(components) {
        chunk.copy_from_slice(&c.to_le_bytes());
    }
    // the trailing two bytes stay zero: attribute byte count
    buf
}

fn write_ascii<W: Write>(out: &mut W, rec: &stl_io::Triangle) -> std::io::Result<()> {
    let n = &rec.normal;
    writeln!(out, "  facet normal {:.3} {:.3} {:.3}", n[0], n[1], n[2])?;
    writeln!(out, "    outer loop")?;
    for v in &rec.vertices {
        writeln!(out, "      vertex {:.3} {:.3} {:.3}", v[0], v[1], v[2])?;
    }
    writeln!(out, "    endloop")?;
    writeln!(out, "  endfacet")
}

impl<W: Write + Seek> TriangleSink for StlWriter<W> {
    type Error = IoError;

    fn add_triangle(
        &mut self,
        tri: Triangle,
        normal: Option<Vector3<Real>>,
    ) -> Result<(), Self::Error> {
        if self.format == StlFormat::Binary && self.triangles >= u64::from(u32::MAX) {
            return Err(IoError::TooManyTriangles);
        }
        let normal = self.resolve_normal(&tri, normal);
        let rec = tri.to_stl(normal);

        let out = self.out.as_mut().ok_or(IoError::Closed)?;
        match self.format {
            StlFormat::Binary => out.write_all(&encode_binary(&rec))?,
            StlFormat::Ascii => write_ascii(out, &rec)?,
        }
        self.triangles += 1;
        Ok(())
    }
}

impl<W: Write + Seek> Drop for StlWriter<W> {
    fn drop(&mut self) {
        if let Some(mut out) = self.out.take() {
            if let Err(error) = self.finalize(&mut out) {
                tracing::error!(%error, "failed to finalize STL output");
            }
        }
    }
}
