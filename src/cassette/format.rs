//! Cassette data structures for recording and replaying interactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded call to a port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port name (`search`, `fs`, `shell`, `clock`, `selector`).
    pub port: String,
    /// Method name invoked on the port.
    pub method: String,
    /// Arguments the engine passed.
    pub input: serde_json::Value,
    /// What the port returned. `Result`s use `{"ok": ..}` / `{"err": ..}`.
    pub output: serde_json::Value,
}

/// A recorded inspection session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Generated root the session inspected (informational only).
    pub root: String,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn yaml_keeps_interaction_payloads() {
        let cassette = Cassette {
            name: "lookup-analyze".into(),
            recorded_at: Utc::now(),
            root: "/tmp/kphp_out".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "search".into(),
                method: "find".into(),
                input: json!({
                    "root": "/tmp/kphp_out",
                    "pattern": {"kind": "substring", "value": "analyze"}
                }),
                output: json!({"ok": ["/tmp/kphp_out/o_1/VK@Post@@analyze.cpp"]}),
            }],
        };
        let yaml = serde_yaml::to_string(&cassette).expect("serialize");
        assert!(yaml.contains("VK@Post@@analyze.cpp"));
        let back: Cassette = serde_yaml::from_str(&yaml).expect("deserialize");
        assert_eq!(back.interactions[0].output, cassette.interactions[0].output);
    }
}
