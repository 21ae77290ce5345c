//! Replaying adapter for the `DirectorySearch` port.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::search::{DirectorySearch, NamePattern};

/// Replays recorded search results from a cassette.
pub struct ReplayingSearch {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingSearch {
    /// Creates a new replaying search from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl DirectorySearch for ReplayingSearch {
    fn find(
        &self,
        _root: &Path,
        _pattern: &NamePattern,
    ) -> Result<Vec<PathBuf>, Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "search", "find");
        replay_result(&output, "search::find")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::test_support::replayer;
    use serde_json::json;

    #[test]
    fn replays_recorded_paths() {
        let search = ReplayingSearch::new(replayer(vec![(
            "search",
            "find",
            json!({"ok": ["/gen/o_1/reorderTags.cpp"]}),
        )]));
        let found = search.find(Path::new("/gen"), &NamePattern::Substring("reordertags".into()));
        assert_eq!(found.unwrap(), vec![PathBuf::from("/gen/o_1/reorderTags.cpp")]);
    }
}
