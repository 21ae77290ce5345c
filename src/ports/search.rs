//! Directory search port: the `find -iname` primitive.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File-name pattern understood by [`DirectorySearch`].
///
/// Matching is case-insensitive and applies to the file name only, never to
/// the directories above it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum NamePattern {
    /// The file name contains the text anywhere (`*text*`).
    Substring(String),
    /// The file name starts with the text (`text*`).
    Prefix(String),
}

impl NamePattern {
    /// Returns `true` if `file_name` matches this pattern.
    #[must_use]
    pub fn matches(&self, file_name: &str) -> bool {
        let name = file_name.to_lowercase();
        match self {
            Self::Substring(text) => name.contains(&text.to_lowercase()),
            Self::Prefix(text) => name.starts_with(&text.to_lowercase()),
        }
    }
}

/// Finds files below a root whose names match a pattern.
///
/// Callers must treat the order of the returned paths as arbitrary.
pub trait DirectorySearch: Send + Sync {
    /// Returns every file below `root` whose name matches `pattern`.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` does not exist or cannot be traversed.
    fn find(
        &self,
        root: &Path,
        pattern: &NamePattern,
    ) -> Result<Vec<PathBuf>, Box<dyn std::error::Error + Send + Sync>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_matches_case_insensitively() {
        let pattern = NamePattern::Substring("post".into());
        assert!(pattern.matches("VK@Feed@Post@@analyze.cpp"));
        assert!(!pattern.matches("VK@Feed@Wall.cpp"));
    }

    #[test]
    fn prefix_is_anchored() {
        let pattern = NamePattern::Prefix("VK@Feed@Post@@analyze.".into());
        assert!(pattern.matches("vk@feed@post@@analyze.cpp"));
        assert!(!pattern.matches("old_VK@Feed@Post@@analyze.cpp"));
        assert!(!pattern.matches("VK@Feed@Post@@analyzeAll.cpp"));
    }
}
