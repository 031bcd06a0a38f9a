//! Error types for the conversion module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a conversion run.
///
/// Per-file problems (unsupported sources, non-zero ffmpeg exits) are not
/// errors; they are recorded as [`FileStatus`](super::FileStatus) values and
/// the batch carries on.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The external binary could not be located.
    #[error("'{binary}' was not found. Install FFmpeg and make sure it is on your PATH")]
    MissingDependency { binary: String },

    /// A job request broke one of the job invariants.
    #[error("Invalid {field}: {reason}")]
    InvalidJob { field: &'static str, reason: String },

    /// The output directory could not be created.
    #[error("Failed to create output directory: {}", path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error while resolving sources.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    pub(crate) fn invalid_job(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidJob {
            field,
            reason: reason.into(),
        }
    }
}
