//! Replaying adapter for the `ShellExecutor` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::shell::{ShellExecutor, ShellOutput};

/// Replays recorded shell command results from a cassette.
pub struct ReplayingShellExecutor {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingShellExecutor {
    /// Creates a new replaying shell executor from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl ShellExecutor for ReplayingShellExecutor {
    fn run(&self, _command: &str) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "shell", "run");
        replay_result(&output, "shell::run")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::test_support::replayer;
    use serde_json::json;

    #[test]
    fn replays_output_and_spawn_failure() {
        let shell = ReplayingShellExecutor::new(replayer(vec![
            ("shell", "run", json!({"ok": {"exit_code": 1, "stdout": "", "stderr": ""}})),
            ("shell", "run", json!({"err": "sh: not found"})),
        ]));
        assert_eq!(shell.run("diff -u a b").unwrap().exit_code, 1);
        assert!(shell.run("cp a b").is_err());
    }
}
