//! Filesystem port for reading the generated tree.

use std::path::{Path, PathBuf};

/// Provides read-only access to generated sources.
///
/// The inspector never writes into the generated tree, so the port has no
/// write operations. Copies made by the diff comparator go through the
/// shell port instead.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// Reads at most `len` bytes from the start of a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    fn read_head(
        &self,
        path: &Path,
        len: usize,
    ) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>>;

    /// Returns `true` if the path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Lists every regular file below `root`, recursively.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` cannot be traversed.
    fn walk_files(
        &self,
        root: &Path,
    ) -> Result<Vec<PathBuf>, Box<dyn std::error::Error + Send + Sync>>;
}
