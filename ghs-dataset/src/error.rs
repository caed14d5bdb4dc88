use crate::common::*;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures surfaced while loading samples.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("index {index} is out of range for a dataset of {len} samples")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("malformed annotation at '{}' line {line}: {reason}", .path.display())]
    MalformedAnnotation {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("annotation file '{}' does not exist", .path.display())]
    MissingAnnotationFile { path: PathBuf },

    #[error("failed to decode image '{}'", .path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to transform sample '{}'", .path.display())]
    Transform {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to read '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
