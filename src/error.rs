//! Error types shared by the inspection engine.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while locating or extracting generated artifacts.
#[derive(Debug, Error)]
pub enum InspectError {
    /// Bad or missing configuration (root directory, diff folders, cassette).
    ///
    /// Fatal: the process reports it and exits non-zero.
    #[error("{0}")]
    Config(String),

    /// A generated file could not be read.
    #[error("failed to read {}: {message}", path.display())]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// Underlying error message from the filesystem port.
        message: String,
    },

    /// The file does not look like anything the generator emits.
    #[error("unrecognized artifact shape in {}", path.display())]
    UnrecognizedShape {
        /// The offending file.
        path: PathBuf,
    },

    /// An artifact could not be encoded for `--json` output.
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A cassette could not be read, parsed or written.
    #[error("cassette error: {0}")]
    Cassette(String),
}

impl InspectError {
    /// Returns `true` for errors that must abort the whole process.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Cassette(_))
    }
}
