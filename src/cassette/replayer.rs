//! Replays recorded interactions from a cassette.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Serves a cassette's interactions back in recorded order, one independent
/// stream per `port::method` pair.
pub struct CassetteReplayer {
    streams: HashMap<(String, String), VecDeque<Interaction>>,
    consumed: HashMap<(String, String), u64>,
}

impl CassetteReplayer {
    /// Splits a loaded cassette into per-call streams.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut streams: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            streams
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { streams, consumed: HashMap::new() }
    }

    /// Takes the next interaction recorded for `port::method`.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no (more) interactions for the pair. A
    /// replayed session that asks for more than was recorded means the code
    /// under test diverged from the recording.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Interaction {
        let key = (port.to_string(), method.to_string());
        if !self.streams.contains_key(&key) {
            let mut available: Vec<String> =
                self.streams.keys().map(|(p, m)| format!("{p}::{m}")).collect();
            available.sort();
            panic!(
                "Cassette exhausted: no interactions recorded for {port}::{method}. \
                 Recorded pairs: [{}]",
                available.join(", ")
            );
        }
        let stream = self.streams.entry(key.clone()).or_default();
        let consumed = self.consumed.entry(key).or_insert(0);
        let Some(interaction) = stream.pop_front() else {
            panic!(
                "Cassette exhausted: all {consumed} {port}::{method} interactions were consumed"
            );
        };
        *consumed += 1;
        interaction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn interaction(seq: u64, port: &str, method: &str, output: serde_json::Value) -> Interaction {
        Interaction { seq, port: port.into(), method: method.into(), input: json!({}), output }
    }

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette { name: "test".into(), recorded_at: Utc::now(), root: "/gen".into(), interactions }
    }

    #[test]
    fn streams_are_independent_per_port_and_method() {
        let cassette = make_cassette(vec![
            interaction(0, "search", "find", json!({"ok": ["a.cpp"]})),
            interaction(1, "fs", "read_to_string", json!({"ok": "int64_t f$a() {"})),
            interaction(2, "search", "find", json!({"ok": []})),
        ]);
        let mut replayer = CassetteReplayer::new(&cassette);

        assert_eq!(replayer.next_interaction("search", "find").seq, 0);
        assert_eq!(replayer.next_interaction("search", "find").seq, 2);
        assert_eq!(replayer.next_interaction("fs", "read_to_string").seq, 1);
    }

    #[test]
    #[should_panic(expected = "Cassette exhausted")]
    fn exhausted_stream_panics() {
        let cassette = make_cassette(vec![interaction(
            0,
            "clock",
            "now",
            json!("2024-01-01T00:00:00Z"),
        )]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_interaction("clock", "now");
        let _ = replayer.next_interaction("clock", "now");
    }

    #[test]
    #[should_panic(expected = "no interactions recorded for selector::select")]
    fn unknown_port_panics() {
        let mut replayer = CassetteReplayer::new(&make_cassette(vec![]));
        let _ = replayer.next_interaction("selector", "select");
    }
}
