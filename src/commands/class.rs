//! `kinspect cl` command.

use crate::config::InspectConfig;
use crate::context::ServiceContext;
use crate::error::InspectError;
use crate::extract::extract_class;
use crate::locate::{ArtifactKind, Locator};
use crate::print::format_class_info;
use crate::query::Query;
use crate::resolve::{resolve, Resolution};

use super::{emit, not_found};

/// Execute `cl` for one query and print the result.
///
/// # Errors
///
/// Returns an error string only for configuration problems.
pub fn run(
    ctx: &ServiceContext,
    config: &InspectConfig,
    raw: &str,
    json: bool,
) -> Result<(), String> {
    emit(render(ctx, config, raw, json), &mut std::io::stdout())
}

/// Locates, disambiguates and renders the class named by `raw`.
///
/// # Errors
///
/// Returns an error when `<root>/cl` cannot be searched or the chosen
/// header cannot be read or recognized.
pub fn render(
    ctx: &ServiceContext,
    config: &InspectConfig,
    raw: &str,
    json: bool,
) -> Result<String, InspectError> {
    let query = Query::parse(raw);
    let candidates = Locator::new(ctx, config).find_class_candidates(&query)?;
    let candidate = match resolve(ctx, candidates, ArtifactKind::Class) {
        Resolution::Chosen(candidate) => candidate,
        Resolution::NotFound => return Ok(not_found(ArtifactKind::Class, query.as_str())),
        Resolution::Cancelled => return Ok(String::new()),
    };

    let artifact = extract_class(ctx.fs.as_ref(), &candidate.path)?;
    if json {
        return Ok(serde_json::to_string_pretty(&artifact)? + "\n");
    }
    Ok(format_class_info(&artifact))
}
