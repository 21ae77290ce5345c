//! Recording adapter for the `DirectorySearch` port.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{DirectorySearch, NamePattern};

/// Records directory searches while delegating to an inner implementation.
pub struct RecordingSearch {
    inner: Box<dyn DirectorySearch>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSearch {
    /// Creates a new recording search wrapping the given implementation.
    pub fn new(inner: Box<dyn DirectorySearch>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct FindInput<'a> {
    root: &'a str,
    pattern: &'a NamePattern,
}

impl DirectorySearch for RecordingSearch {
    fn find(
        &self,
        root: &Path,
        pattern: &NamePattern,
    ) -> Result<Vec<PathBuf>, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.find(root, pattern);
        let input = FindInput { root: &root.display().to_string(), pattern };
        record_result(&self.recorder, "search", "find", &input, &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::search::WalkDirSearch;

    #[test]
    fn records_pattern_and_matches() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("reorderTags.cpp"), "").unwrap();
        let cassette_path = dir.path().join("search.cassette.yaml");

        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&cassette_path, "s", "/gen")));
        {
            let search = RecordingSearch::new(Box::new(WalkDirSearch), Arc::clone(&recorder));
            let found = search.find(dir.path(), &NamePattern::Substring("reordertags".into()));
            assert_eq!(found.unwrap().len(), 1);
        }
        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let content = std::fs::read_to_string(&cassette_path).unwrap();
        assert!(content.contains("substring"));
        assert!(content.contains("reorderTags.cpp"));
    }
}
