//! Live directory search: a recursive, case-insensitive `find -iname`.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::ports::search::{DirectorySearch, NamePattern};

/// Walks the tree with `walkdir` and matches file names against a pattern.
///
/// Entries are visited sorted by file name, which keeps candidate menus
/// stable between runs.
pub struct WalkDirSearch;

impl DirectorySearch for WalkDirSearch {
    fn find(
        &self,
        root: &Path,
        pattern: &NamePattern,
    ) -> Result<Vec<PathBuf>, Box<dyn std::error::Error + Send + Sync>> {
        if !root.is_dir() {
            return Err(format!("search root {} is not a directory", root.display()).into());
        }
        let mut found = Vec::new();
        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if entry.file_name().to_str().is_some_and(|name| pattern.matches(name)) {
                found.push(entry.into_path());
            }
        }
        Ok(found)
    }
}
