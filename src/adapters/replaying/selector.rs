//! Replaying adapter for the `Selector` port.

use std::sync::Mutex;

use super::next_output;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::selector::Selector;

/// Replays recorded menu choices; `null` replays a cancelled menu.
pub struct ReplayingSelector {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingSelector {
    /// Creates a new replaying selector from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl Selector for ReplayingSelector {
    fn select(&self, _labels: &[String]) -> Option<usize> {
        let output = next_output(&self.replayer, "selector", "select");
        output.as_u64().and_then(|i| usize::try_from(i).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::test_support::replayer;
    use serde_json::json;

    #[test]
    fn replays_choice_and_cancel() {
        let selector = ReplayingSelector::new(replayer(vec![
            ("selector", "select", json!(1)),
            ("selector", "select", json!(null)),
        ]));
        let labels = vec!["A\\f".to_string(), "B\\f".to_string()];
        assert_eq!(selector.select(&labels), Some(1));
        assert_eq!(selector.select(&labels), None);
    }
}
