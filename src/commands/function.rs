//! `kinspect f` and `kinspect src`.

use crate::config::InspectConfig;
use crate::context::ServiceContext;
use crate::error::InspectError;
use crate::extract::extract_function;
use crate::locate::{ArtifactKind, Locator};
use crate::print::{format_function_info, format_function_source};
use crate::query::Query;
use crate::resolve::{resolve, Resolution};

use super::{emit, not_found};

/// Which rendering of a function to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionView {
    /// Return type, flags, arguments and locals.
    Info,
    /// The generated source.
    Source,
}

/// Execute `f` / `src` for one query and print the result.
///
/// # Errors
///
/// Returns an error string only for configuration problems; a missing or
/// malformed function is reported and is not an error.
pub fn run(
    ctx: &ServiceContext,
    config: &InspectConfig,
    raw: &str,
    view: FunctionView,
    json: bool,
) -> Result<(), String> {
    emit(render(ctx, config, raw, view, json), &mut std::io::stdout())
}

/// Locates, disambiguates and renders the function named by `raw`.
///
/// Returns an empty string when the user cancelled the selection.
///
/// # Errors
///
/// Returns an error when the tree cannot be searched or the chosen file
/// cannot be read or recognized.
pub fn render(
    ctx: &ServiceContext,
    config: &InspectConfig,
    raw: &str,
    view: FunctionView,
    json: bool,
) -> Result<String, InspectError> {
    let query = Query::parse(raw);
    let candidates = Locator::new(ctx, config).find_function_candidates(&query)?;
    let candidate = match resolve(ctx, candidates, ArtifactKind::Function) {
        Resolution::Chosen(candidate) => candidate,
        Resolution::NotFound => return Ok(not_found(ArtifactKind::Function, query.as_str())),
        Resolution::Cancelled => return Ok(String::new()),
    };

    let artifact = extract_function(ctx.fs.as_ref(), &candidate.path)?;
    if json {
        return Ok(serde_json::to_string_pretty(&artifact)? + "\n");
    }
    Ok(match view {
        FunctionView::Info => format_function_info(&artifact),
        FunctionView::Source => format_function_source(&artifact),
    })
}
