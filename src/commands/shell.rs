//! Interactive shell: a `> ` prompt reading one command per line.

use std::io::{self, BufRead, Write};

use crossterm::style::Stylize;

use crate::config::InspectConfig;
use crate::context::ServiceContext;

use super::emit;
use super::function::{self, FunctionView};

/// One parsed shell line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand<'a> {
    /// Blank line.
    Empty,
    /// Leave the shell.
    Quit,
    /// Print usage.
    Help,
    /// `f <query>`.
    FunctionInfo(&'a str),
    /// `src <query>`.
    FunctionSource(&'a str),
    /// `cl <query>` / `class <query>`.
    ClassInfo(&'a str),
    /// Anything else, trimmed.
    Unrecognized(&'a str),
}

/// Parses one line of shell input.
#[must_use]
pub fn parse_command(line: &str) -> ShellCommand<'_> {
    let line = line.trim();
    match line {
        "" => ShellCommand::Empty,
        "q" | "quit" | "exit" => ShellCommand::Quit,
        "?" | "h" | "help" | "about" | "f" => ShellCommand::Help,
        _ => {
            // Cyrillic `а` sits on the `f` key.
            if let Some(q) = line.strip_prefix("f ").or_else(|| line.strip_prefix("а ")) {
                ShellCommand::FunctionInfo(q.trim())
            } else if let Some(q) = line.strip_prefix("src ") {
                ShellCommand::FunctionSource(q.trim())
            } else if let Some(q) = line
                .strip_prefix("cl ")
                .or_else(|| line.strip_prefix("class "))
            {
                ShellCommand::ClassInfo(q.trim())
            } else {
                ShellCommand::Unrecognized(line)
            }
        }
    }
}

/// Usage text printed by `help`.
#[must_use]
pub fn help_text() -> String {
    format!(
        "{}   print info of function\n\
         {} print cpp source code of function\n\
         {}  print info about class instance\n\
         {}      close interactive console\n\
         Examples of {{query}}: reorderTags, messages_send, ClassName method, \
         \\Full\\FQN::method(). If many functions are found, a menu is displayed.\n",
        "f {query}".bold(),
        "src {query}".bold(),
        "cl {query}".bold(),
        "q[uit]".bold(),
    )
}

/// Run the shell on the process's stdin/stdout until `quit` or end of input.
///
/// # Errors
///
/// Returns an error string on terminal I/O failure or a fatal configuration
/// error.
pub fn run(ctx: &ServiceContext, config: &InspectConfig) -> Result<(), String> {
    let stdin = io::stdin();
    run_loop(ctx, config, stdin.lock(), &mut io::stdout())
}

/// Reads commands from `input` and writes results to `out`.
///
/// Lookup failures are reported and the loop continues; only fatal errors
/// end it early.
///
/// # Errors
///
/// Returns an error string on I/O failure or a fatal configuration error.
pub fn run_loop(
    ctx: &ServiceContext,
    config: &InspectConfig,
    mut input: impl BufRead,
    out: &mut impl Write,
) -> Result<(), String> {
    let mut line = String::new();
    loop {
        write!(out, "> ").and_then(|()| out.flush()).map_err(|e| e.to_string())?;
        line.clear();
        if input.read_line(&mut line).map_err(|e| e.to_string())? == 0 {
            return writeln!(out).map_err(|e| e.to_string());
        }

        let result = match parse_command(&line) {
            ShellCommand::Empty => continue,
            ShellCommand::Quit => return Ok(()),
            ShellCommand::Help => Ok(help_text()),
            ShellCommand::FunctionInfo(q) => {
                function::render(ctx, config, q, FunctionView::Info, false)
            }
            ShellCommand::FunctionSource(q) => {
                function::render(ctx, config, q, FunctionView::Source, false)
            }
            ShellCommand::ClassInfo(q) => super::class::render(ctx, config, q, false),
            ShellCommand::Unrecognized(cmd) => Ok(format!("Unrecognized command: {cmd}\n")),
        };
        emit(result, out)?;
    }
}
