//! Class artifacts: one `cl/C@...h` header per PHP instance class.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::params::Variable;
use super::patterns::{match_class_name, match_instance_fields};
use super::read_source;
use crate::error::InspectError;
use crate::ports::FileSystem;

/// Structural facts about one generated instance class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassArtifact {
    /// PHP name, e.g. `VK\Feed\Post`.
    pub name: String,
    /// Header the class was read from.
    pub path: PathBuf,
    /// Instance fields in declaration order.
    pub fields: Vec<Variable>,
}

/// Reads and extracts the class declared in `path`.
///
/// # Errors
///
/// Returns [`InspectError::Io`] when the file cannot be read and
/// [`InspectError::UnrecognizedShape`] when it declares no class.
pub fn extract_class(fs: &dyn FileSystem, path: &Path) -> Result<ClassArtifact, InspectError> {
    let text = read_source(fs, path)?;
    let name = match_class_name(&text)
        .ok_or_else(|| InspectError::UnrecognizedShape { path: path.to_path_buf() })?;
    let fields = match_instance_fields(&text)
        .into_iter()
        .map(|(name, cpp_type)| Variable::new(name, cpp_type))
        .collect();
    Ok(ClassArtifact { name, path: path.to_path_buf(), fields })
}
