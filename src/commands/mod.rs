//! Command dispatch and handlers.

pub mod class;
pub mod diff;
pub mod function;
pub mod shell;

use std::env;
use std::io::Write;
use std::path::Path;

use crossterm::style::Stylize;

use crate::cassette::RECORD_ENV;
use crate::cli::{Cli, Command};
use crate::config::InspectConfig;
use crate::context::{SelectionMode, ServiceContext};
use crate::diff::DiffOptions;
use crate::error::InspectError;
use crate::locate::ArtifactKind;
use function::FunctionView;

/// Dispatch a parsed command line to its handler.
///
/// When `KINSPECT_RECORD` is set to a file path, every port interaction is
/// recorded to that cassette file.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    // One-shot commands cannot open a menu under a pipe; they list instead.
    let mode = match cli.command {
        None | Some(Command::Shell) => SelectionMode::Menu,
        Some(_) => SelectionMode::List,
    };
    let ctx = match env::var(RECORD_ENV) {
        Ok(path) => ServiceContext::recording(Path::new(&path), mode),
        Err(_) => ServiceContext::live(mode),
    };
    dispatch_with_context(cli, &ctx)
}

/// Dispatch a command line with the given service context.
///
/// # Errors
///
/// Returns an error string if configuration is invalid or the handler fails.
pub fn dispatch_with_context(cli: &Cli, ctx: &ServiceContext) -> Result<(), String> {
    let config = || {
        InspectConfig::load(cli.root.as_deref(), ctx.fs.as_ref())
            .map_err(|e| e.to_string())
    };

    match &cli.command {
        Some(Command::Function { query, json }) => {
            function::run(ctx, &config()?, &query.join(" "), FunctionView::Info, *json)
        }
        Some(Command::Source { query }) => {
            function::run(ctx, &config()?, &query.join(" "), FunctionView::Source, false)
        }
        Some(Command::Class { query, json }) => {
            class::run(ctx, &config()?, &query.join(" "), *json)
        }
        Some(Command::Shell) | None => shell::run(ctx, &config()?),
        Some(Command::Diff { master, cmp, out, skip_comments }) => diff::run(
            ctx,
            &DiffOptions {
                master: master.clone(),
                cmp: cmp.clone(),
                out: out.clone(),
                skip_comments: *skip_comments,
            },
        ),
    }
}

/// Message printed when a query matches nothing.
fn not_found(kind: ArtifactKind, query: &str) -> String {
    let message = match kind {
        ArtifactKind::Function => format!("No function found for query '{query}'"),
        ArtifactKind::Class => {
            format!("No class found for query '{query}' (maybe, it's not an instance class?)")
        }
    };
    format!("{}\n", message.red())
}

/// Writes a rendered result; non-fatal lookup errors go to stderr.
fn emit(result: Result<String, InspectError>, out: &mut impl Write) -> Result<(), String> {
    match result {
        Ok(text) => out.write_all(text.as_bytes()).map_err(|e| e.to_string()),
        Err(e) if e.is_fatal() => Err(e.to_string()),
        Err(e) => {
            eprintln!("{}", format!("error: {e}").red());
            Ok(())
        }
    }
}
