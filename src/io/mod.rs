pub mod stl;

pub use stl::StlWriter;

/// Output errors.
///
/// The writer never retries; every variant ends the run, but the file is
/// still finalized so its header agrees with the records on disk.
#[derive(Debug)]
pub enum IoError {
    StdIo(std::io::Error),

    /// A binary STL cannot count past `u32::MAX` triangles.
    TooManyTriangles,
    /// The writer was already finished.
    Closed,
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use IoError::*;

        match self {
            StdIo(error) => write!(f, "std::io::Error: {error}"),

            TooManyTriangles => write!(f, "Binary STL triangle count would exceed {}", u32::MAX),
            Closed => write!(f, "STL writer is already finished"),
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IoError::StdIo(error) => Some(error),
            _ => None,
        }
    }
}

impl From<std::io::Error> for IoError {
    fn from(value: std::io::Error) -> Self {
        Self::StdIo(value)
    }
}
