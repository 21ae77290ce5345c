//! Function artifacts: one generated `.cpp` (or inlined `.h`) per PHP function.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::params::{parse_locals, parse_parameters, Variable};
use super::patterns::{
    demangle_function, is_resumable, match_return_type, match_signature, strip_comments,
};
use super::read_source;
use crate::error::InspectError;
use crate::ports::FileSystem;

/// Structural facts about one generated function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionArtifact {
    /// PHP name, e.g. `VK\Feed\Post::analyze`.
    pub name: String,
    /// File the function was read from.
    pub path: PathBuf,
    /// Emitted into a header instead of its own translation unit.
    pub was_inlined: bool,
    /// Compiled as a suspendable coroutine.
    pub is_resumable: bool,
    /// Declared C++ return type, when it could be found.
    pub return_type: Option<String>,
    /// Parameters, receiver excluded.
    pub params: Vec<Variable>,
    /// Top-level locals, generator temporaries excluded.
    pub locals: Vec<Variable>,
    /// Number of lines in the file.
    pub line_count: usize,
    /// Verbatim file contents.
    #[serde(skip)]
    pub source: String,
}

/// Raw text of a candidate function file, read once.
#[derive(Debug, Clone)]
pub struct FunctionSource {
    path: PathBuf,
    text: String,
}

impl FunctionSource {
    /// Reads `path` through the filesystem port.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::Io`] when the file cannot be read.
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self, InspectError> {
        Ok(Self { path: path.to_path_buf(), text: read_source(fs, path)? })
    }

    /// The demangled function name, without extracting anything else.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::UnrecognizedShape`] when no signature matches.
    pub fn name(&self) -> Result<String, InspectError> {
        match_signature(&self.text)
            .map(|sig| demangle_function(sig.mangled))
            .ok_or_else(|| InspectError::UnrecognizedShape { path: self.path.clone() })
    }

    /// Extracts every fact about the function.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::UnrecognizedShape`] when no signature matches.
    pub fn extract(self) -> Result<FunctionArtifact, InspectError> {
        let Some(sig) = match_signature(&self.text) else {
            return Err(InspectError::UnrecognizedShape { path: self.path });
        };
        let resumable = is_resumable(&self.text);
        let name = demangle_function(sig.mangled);
        let params = parse_parameters(sig.params);
        let locals = parse_locals(&strip_comments(&self.text), resumable);
        let return_type = match_return_type(&self.text);
        if return_type.is_none() {
            log::debug!("no return type found in {}", self.path.display());
        }

        Ok(FunctionArtifact {
            name,
            was_inlined: self.path.extension().is_some_and(|e| e == "h"),
            is_resumable: resumable,
            return_type,
            params,
            locals,
            line_count: self.text.split('\n').count(),
            path: self.path,
            source: self.text,
        })
    }
}

/// Reads and extracts the function declared in `path`.
///
/// # Errors
///
/// Returns an error when the file cannot be read or has no recognizable
/// signature.
pub fn extract_function(
    fs: &dyn FileSystem,
    path: &Path,
) -> Result<FunctionArtifact, InspectError> {
    FunctionSource::load(fs, path)?.extract()
}
