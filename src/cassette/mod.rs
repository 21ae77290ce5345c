//! Cassettes: recorded port interactions for deterministic replay.
//!
//! A session run with `KINSPECT_RECORD=<file>` writes every call the
//! engine makes to its ports (directory search, file reads, shell, clock,
//! menu selections) into one YAML file. Tests replay that file instead of
//! touching a real generated tree.

pub mod format;
pub mod recorder;
pub mod replayer;

use std::path::Path;

use crate::error::InspectError;
use format::Cassette;

/// Environment variable that switches a session into recording mode.
pub const RECORD_ENV: &str = "KINSPECT_RECORD";

/// Loads a cassette file from disk.
///
/// # Errors
///
/// Returns [`InspectError::Cassette`] if the file cannot be read or parsed.
pub fn load(path: &Path) -> Result<Cassette, InspectError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        InspectError::Cassette(format!("failed to read {}: {e}", path.display()))
    })?;
    serde_yaml::from_str(&content)
        .map_err(|e| InspectError::Cassette(format!("failed to parse {}: {e}", path.display())))
}
