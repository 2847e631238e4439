//! Validate, sample, triangulate, write.

use crate::config::{StampConfig, StlFormat, WrapConfig};
use crate::errors::{Error, ValidationError};
use crate::field::{Field, Heightmap};
use crate::io::StlWriter;
use crate::mesh::{stamp, wrap};
use crate::triangulated::TriangleSink;
use std::path::Path;

/// Which solid to build from the image.
#[derive(Debug, Clone, PartialEq)]
pub enum Model {
    /// Image wrapped around a cylinder.
    Wrap(WrapConfig),
    /// Image stamped into the bottom face of a cylinder.
    Stamp(StampConfig),
}

/// What a finished run wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub triangles: u64,
    pub degenerate: u64,
}

impl Model {
    pub fn validate(&self, width: u32, height: u32) -> Result<(), ValidationError> {
        match self {
            Model::Wrap(cfg) => cfg.validate(width, height),
            Model::Stamp(cfg) => cfg.validate(width, height),
        }
    }

    pub fn build_field<H: Heightmap>(&self, img: &H) -> Field {
        match self {
            Model::Wrap(cfg) => Field::wrap(img, cfg),
            Model::Stamp(cfg) => Field::stamp(img, cfg),
        }
    }

    /// Emit every triangle of the solid, in a fixed order, to `sink`.
    pub fn emit<K: TriangleSink>(&self, sink: &mut K, field: &Field) -> Result<(), K::Error> {
        match self {
            Model::Wrap(cfg) => wrap::emit(sink, field, cfg),
            Model::Stamp(cfg) => stamp::emit(sink, field, cfg),
        }
    }

    /// Triangle count when it can be known up front.
    ///
    /// Stamp models depend on how many height steps the image has, so they return `None`.
    pub fn expected_triangles(&self, width: u32, height: u32) -> Option<u64> {
        match self {
            Model::Wrap(cfg) => Some(wrap::expected_triangles(
                u64::from(width),
                u64::from(height),
                cfg.hole().is_some(),
            )),
            Model::Stamp(_) => None,
        }
    }
}

/// Build `model` from `img` and write it to `path`.
///
/// Parameters are checked before the file is created. Once it is open, the
/// writer is finalized on every path, so a failed run leaves a truncated but
/// well-formed STL whose header count matches its records.
pub fn write_stl<H: Heightmap>(
    model: &Model,
    img: &H,
    path: impl AsRef<Path>,
    format: StlFormat,
    name: &str,
) -> Result<Summary, Error> {
    let (width, height) = (img.width(), img.height());
    model.validate(width, height)?;

    let field = model.build_field(img);
    tracing::debug!(width, height, "sampled field");
    if let Some(expected) = model.expected_triangles(width, height) {
        tracing::debug!(expected, "expected triangle count");
    }

    let mut stl = StlWriter::create(path, format, name)?;
    let emitted = model.emit(&mut stl, &field);
    let summary = Summary {
        triangles: stl.triangle_count(),
        degenerate: stl.degenerate_count(),
    };
    let finished = stl.finish();
    emitted?;
    finished?;

    tracing::info!(triangles = summary.triangles, %format, "wrote STL");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::GrayGrid;

    #[test]
    fn invalid_parameters_create_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never.stl");
        let model = Model::Stamp(StampConfig { segments: 10, ..StampConfig::default() });

        let err = write_stl(&model, &GrayGrid::filled(4, 4, 0), &path, StlFormat::Binary, "x")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::SegmentsNotMultipleOfFour(10))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn expected_count_is_reported_for_wrap_only() {
        let wrap = Model::Wrap(WrapConfig::default());
        assert_eq!(wrap.expected_triangles(10, 5), Some(2 * 10 * 4 + 2 * 10));
        assert_eq!(Model::Stamp(StampConfig::default()).expected_triangles(10, 5), None);
    }
}
