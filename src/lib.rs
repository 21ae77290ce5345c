//! Core library entry for the `kinspect` CLI.
//!
//! `kinspect` answers "what C++ did KPHP generate for this PHP function or
//! class?" without recompiling: a query is turned into a file search over
//! the generated tree ([`locate`]), ambiguous hits are settled by the user
//! ([`resolve`]), and the chosen file is read with a handful of pattern
//! rules ([`extract`]). A second tool, [`diff`], lists which generated files
//! changed between two compiler runs.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod diff;
pub mod error;
pub mod extract;
pub mod locate;
pub mod menu;
pub mod ports;
pub mod print;
pub mod query;
pub mod resolve;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    init_logging(cli.verbose);
    commands::dispatch(&cli)
}

/// Logs go to stderr. `RUST_LOG` wins; otherwise `-v` means debug and the
/// default is warn.
fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose && std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(log::LevelFilter::Debug);
    }
    // A second call (tests run many sessions in one process) keeps the first logger.
    let _ = builder.target(env_logger::Target::Stderr).try_init();
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_errors_on_unknown_subcommand() {
        assert!(run(["kinspect", "unknown"]).is_err());
    }

    #[test]
    fn run_rejects_missing_root() {
        let err = run(["kinspect", "--root", "/definitely/not/a/dir", "f", "x"]).unwrap_err();
        assert_eq!(err, "invalid --root cmd argument");
    }

    #[test]
    fn run_reports_unknown_function_without_failing() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        assert!(run(["kinspect", "--root", root, "f", "reorderTags"]).is_ok());
    }
}
