//! Recording adapter for the `Selector` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_interaction;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::Selector;

/// Records menu choices while delegating to an inner selector.
pub struct RecordingSelector {
    inner: Box<dyn Selector>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSelector {
    /// Creates a new recording selector wrapping the given implementation.
    pub fn new(inner: Box<dyn Selector>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct SelectInput<'a> {
    labels: &'a [String],
}

impl Selector for RecordingSelector {
    fn select(&self, labels: &[String]) -> Option<usize> {
        let choice = self.inner.select(labels);
        record_interaction(&self.recorder, "selector", "select", &SelectInput { labels }, &choice);
        choice
    }
}
