//! Disambiguation: many candidates -> exactly one, or none.

use crate::context::ServiceContext;
use crate::extract::{extract_class, FunctionSource};
use crate::locate::{ArtifactKind, Candidate};

/// Label shown for a candidate whose name could not be extracted.
pub const ERROR_LABEL: &str = "<error>";

/// Outcome of settling a candidate list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing matched.
    NotFound,
    /// Exactly one candidate, either the only one or the user's choice.
    Chosen(Candidate),
    /// The user dismissed the menu (or the selector chose nothing).
    Cancelled,
}

/// Settles `candidates` to a single file.
///
/// Zero or one candidate never reaches the selector. With more, every
/// candidate is labelled with its qualified name and the selector decides.
#[must_use]
pub fn resolve(ctx: &ServiceContext, candidates: Vec<Candidate>, kind: ArtifactKind) -> Resolution {
    if candidates.len() <= 1 {
        return candidates.into_iter().next().map_or(Resolution::NotFound, Resolution::Chosen);
    }

    let labels: Vec<String> = candidates.iter().map(|c| label(ctx, c, kind)).collect();
    match ctx.selector.select(&labels) {
        Some(index) => candidates
            .into_iter()
            .nth(index)
            .map_or(Resolution::Cancelled, Resolution::Chosen),
        None => Resolution::Cancelled,
    }
}

fn label(ctx: &ServiceContext, candidate: &Candidate, kind: ArtifactKind) -> String {
    let name = match kind {
        ArtifactKind::Function => {
            FunctionSource::load(ctx.fs.as_ref(), &candidate.path).and_then(|s| s.name())
        }
        ArtifactKind::Class => extract_class(ctx.fs.as_ref(), &candidate.path).map(|c| c.name),
    };
    name.unwrap_or_else(|e| {
        log::warn!("{e}");
        ERROR_LABEL.to_string()
    })
}
