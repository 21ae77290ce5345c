//! Artifact extraction: structural facts from one generated file.
//!
//! Everything here is heuristic text analysis over the generator's fixed
//! output conventions. There is no lexer and no symbol table; the rules in
//! [`patterns`] and [`params`] are the whole model.

pub mod class;
pub mod function;
pub mod params;
pub mod patterns;

use std::path::Path;

pub use class::{extract_class, ClassArtifact};
pub use function::{extract_function, FunctionArtifact, FunctionSource};
pub use params::Variable;

use crate::error::InspectError;
use crate::ports::FileSystem;

fn read_source(fs: &dyn FileSystem, path: &Path) -> Result<String, InspectError> {
    fs.read_to_string(path)
        .map_err(|e| InspectError::Io { path: path.to_path_buf(), message: e.to_string() })
}
