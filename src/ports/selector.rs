//! Selection port: the interactive "pick one of these" menu.

/// Lets the user choose one entry from a list of labels.
///
/// Selection is modal: the call blocks until the user confirms or cancels.
pub trait Selector: Send + Sync {
    /// Returns the index of the chosen label, or `None` when cancelled.
    fn select(&self, labels: &[String]) -> Option<usize>;
}
