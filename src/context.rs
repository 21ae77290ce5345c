//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::live::clock::LiveClock;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::search::WalkDirSearch;
use crate::adapters::live::selector::{ListingSelector, TerminalSelector};
use crate::adapters::live::shell::LiveShellExecutor;
use crate::adapters::recording::{
    RecordingClock, RecordingFileSystem, RecordingSearch, RecordingSelector,
    RecordingShellExecutor,
};
use crate::adapters::replaying::{
    ReplayingClock, ReplayingFileSystem, ReplayingSearch, ReplayingSelector,
    ReplayingShellExecutor,
};
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::error::InspectError;
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::search::DirectorySearch;
use crate::ports::selector::Selector;
use crate::ports::shell::ShellExecutor;

/// How ambiguous queries are settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Arrow-key menu in the terminal.
    Menu,
    /// Print the candidates and choose none (one-shot commands).
    List,
}

/// Bundles all port trait objects into a single context.
///
/// Each field is one external boundary. Constructors wire up live,
/// recording or replaying adapters.
pub struct ServiceContext {
    /// Read access to the generated tree.
    pub fs: Box<dyn FileSystem>,
    /// The `find -iname` primitive.
    pub search: Box<dyn DirectorySearch>,
    /// Runs `diff` and `cp` for the tree comparator.
    pub shell: Box<dyn ShellExecutor>,
    /// Times diff runs.
    pub clock: Box<dyn Clock>,
    /// Settles ambiguous queries.
    pub selector: Box<dyn Selector>,
    /// Cassette recorder, written out on drop.
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Creates a live context.
    #[must_use]
    pub fn live(mode: SelectionMode) -> Self {
        Self {
            fs: Box::new(LiveFileSystem),
            search: Box::new(WalkDirSearch),
            shell: Box::new(LiveShellExecutor),
            clock: Box::new(LiveClock),
            selector: live_selector(mode),
            recorder: None,
        }
    }

    /// Creates a live context that also records every port call to `path`.
    ///
    /// The cassette is written when the context is dropped.
    #[must_use]
    pub fn recording(path: &Path, mode: SelectionMode) -> Self {
        let name = path
            .file_stem()
            .map_or_else(|| "kinspect-session".to_string(), |s| s.to_string_lossy().into_owned());
        let root = std::env::var(crate::config::ROOT_ENV).unwrap_or_default();
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(path, name, root)));

        Self {
            fs: Box::new(RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&recorder))),
            search: Box::new(RecordingSearch::new(Box::new(WalkDirSearch), Arc::clone(&recorder))),
            shell: Box::new(RecordingShellExecutor::new(
                Box::new(LiveShellExecutor),
                Arc::clone(&recorder),
            )),
            clock: Box::new(RecordingClock::new(Box::new(LiveClock), Arc::clone(&recorder))),
            selector: Box::new(RecordingSelector::new(
                live_selector(mode),
                Arc::clone(&recorder),
            )),
            recorder: Some(recorder),
        }
    }

    /// Creates a context that serves every port from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, InspectError> {
        let cassette = crate::cassette::load(path)?;
        // Each port gets its own replayer so per-port cursors are independent.
        let replayer = || CassetteReplayer::new(&cassette);
        Ok(Self {
            fs: Box::new(ReplayingFileSystem::new(replayer())),
            search: Box::new(ReplayingSearch::new(replayer())),
            shell: Box::new(ReplayingShellExecutor::new(replayer())),
            clock: Box::new(ReplayingClock::new(replayer())),
            selector: Box::new(ReplayingSelector::new(replayer())),
            recorder: None,
        })
    }
}

fn live_selector(mode: SelectionMode) -> Box<dyn Selector> {
    match mode {
        SelectionMode::Menu => Box::new(TerminalSelector),
        SelectionMode::List => Box::new(ListingSelector),
    }
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        let Some(recorder) = self.recorder.take() else {
            return;
        };
        let written = match recorder.lock() {
            Ok(guard) => guard.write(),
            Err(_) => return,
        };
        match written {
            Ok(path) => eprintln!("Recording saved to: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to write cassette: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Cassette;
    use crate::ports::NamePattern;

    #[test]
    fn recording_context_writes_cassette_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("reorderTags.cpp"), "void f$reorderTags() {\n}\n").unwrap();
        let cassette_path = dir.path().join("session.yaml");

        {
            let ctx = ServiceContext::recording(&cassette_path, SelectionMode::List);
            let found = ctx.search.find(dir.path(), &NamePattern::Substring("reorder".into()));
            let found = found.unwrap();
            assert_eq!(found.len(), 1);
            assert!(ctx.fs.read_to_string(&found[0]).is_ok());
        }

        let cassette: Cassette =
            serde_yaml::from_str(&std::fs::read_to_string(&cassette_path).unwrap()).unwrap();
        assert_eq!(cassette.name, "session");
        let calls: Vec<_> =
            cassette.interactions.iter().map(|i| format!("{}::{}", i.port, i.method)).collect();
        assert_eq!(calls, ["search::find", "fs::read_to_string"]);
    }

    #[test]
    fn replaying_context_serves_recorded_session() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.cpp");
        std::fs::write(&source, "int64_t f$a() {\n}\n").unwrap();
        let cassette_path = dir.path().join("session.yaml");
        {
            let ctx = ServiceContext::recording(&cassette_path, SelectionMode::List);
            let _ = ctx.fs.read_to_string(&source);
            let _ = ctx.fs.is_dir(dir.path());
        }

        let ctx = ServiceContext::replaying(&cassette_path).unwrap();
        assert_eq!(ctx.fs.read_to_string(Path::new("ignored")).unwrap(), "int64_t f$a() {\n}\n");
        assert!(ctx.fs.is_dir(Path::new("ignored")));
    }

    #[test]
    fn missing_cassette_is_reported() {
        let err = ServiceContext::replaying(Path::new("/no/such/cassette.yaml")).err().unwrap();
        assert!(matches!(err, InspectError::Cassette(_)));
    }
}
