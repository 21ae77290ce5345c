//! Recording adapters that capture interactions to a cassette.
//!
//! Each adapter delegates to an inner (normally live) implementation and
//! appends the call and its result to a shared [`CassetteRecorder`].

pub mod clock;
pub mod filesystem;
pub mod search;
pub mod selector;
pub mod shell;

pub use clock::RecordingClock;
pub use filesystem::RecordingFileSystem;
pub use search::RecordingSearch;
pub use selector::RecordingSelector;
pub use shell::RecordingShellExecutor;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

/// Record an interaction with a plain (non-`Result`) return value.
///
/// Mirror of `replaying::next_output`.
pub(crate) fn record_interaction<I, O>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize,
    O: Serialize,
{
    let input_json = serde_json::to_value(input).unwrap_or(serde_json::Value::Null);
    let output_json = serde_json::to_value(output).unwrap_or(serde_json::Value::Null);
    push(recorder, port, method, input_json, output_json);
}

/// Record a `Result` interaction as `{"ok": v}` or `{"err": "message"}`.
///
/// Mirror of `replaying::replay_result`.
pub(crate) fn record_result<T, E, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let input_json = serde_json::to_value(input).unwrap_or(serde_json::Value::Null);
    let output_json = match result {
        Ok(v) => {
            serde_json::json!({ "ok": serde_json::to_value(v).unwrap_or(serde_json::Value::Null) })
        }
        Err(e) => serde_json::json!({ "err": e.to_string() }),
    };
    push(recorder, port, method, input_json, output_json);
}

fn push(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: serde_json::Value,
    output: serde_json::Value,
) {
    match recorder.lock() {
        Ok(mut guard) => guard.record(port, method, input, output),
        Err(_) => log::warn!("cassette recorder lock poisoned; dropped {port}::{method}"),
    }
}
