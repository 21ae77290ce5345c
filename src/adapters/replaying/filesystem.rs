//! Replaying adapter for the `FileSystem` port.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::FileSystem;

/// Replays recorded filesystem reads from a cassette.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(
        &self,
        _path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "fs", "read_to_string");
        replay_result(&output, "fs::read_to_string")
    }

    fn read_head(
        &self,
        _path: &Path,
        _len: usize,
    ) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "fs", "read_head");
        replay_result(&output, "fs::read_head")
    }

    fn is_dir(&self, _path: &Path) -> bool {
        let output = next_output(&self.replayer, "fs", "is_dir");
        output.as_bool().expect("fs::is_dir: expected boolean output")
    }

    fn walk_files(
        &self,
        _root: &Path,
    ) -> Result<Vec<PathBuf>, Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "fs", "walk_files");
        replay_result(&output, "fs::walk_files")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::test_support::replayer;
    use serde_json::json;

    #[test]
    fn replays_text_bytes_and_errors() {
        let fs = ReplayingFileSystem::new(replayer(vec![
            ("fs", "read_to_string", json!({"ok": "struct C$A {\n};\n"})),
            ("fs", "read_to_string", json!({"err": "No such file or directory"})),
            ("fs", "read_head", json!({"ok": [47, 47]})),
            ("fs", "is_dir", json!(false)),
        ]));
        assert_eq!(fs.read_to_string(Path::new("cl/C@A.h")).unwrap(), "struct C$A {\n};\n");
        assert!(fs.read_to_string(Path::new("gone.h")).is_err());
        assert_eq!(fs.read_head(Path::new("a.cpp"), 2).unwrap(), b"//");
        assert!(!fs.is_dir(Path::new("/gen/cl")));
    }
}
