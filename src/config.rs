//! Process-wide inspector configuration.

use std::path::{Path, PathBuf};

use crate::error::InspectError;
use crate::ports::FileSystem;

/// Environment variable consulted when `--root` is not given.
pub const ROOT_ENV: &str = "KINSPECT_ROOT";

/// Name of the class subtree below the generated root.
pub const CLASS_SUBDIR: &str = "cl";

/// Read-only settings established once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectConfig {
    root: PathBuf,
}

impl InspectConfig {
    /// Validates the generated root and freezes the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::Config`] when no root is given or it is not a
    /// directory.
    pub fn load(root: Option<&Path>, fs: &dyn FileSystem) -> Result<Self, InspectError> {
        match root {
            Some(root) if fs.is_dir(root) => Ok(Self {
                root: root.to_path_buf(),
            }),
            _ => Err(InspectError::Config("invalid --root cmd argument".into())),
        }
    }

    /// Root of the generated C++ tree.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one header per instance class.
    #[must_use]
    pub fn class_root(&self) -> PathBuf {
        self.root.join(CLASS_SUBDIR)
    }
}
