//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `kinspect`.
#[derive(Debug, Parser)]
#[command(
    name = "kinspect",
    version,
    about = "Find and inspect the C++ that KPHP generated for a PHP function or class"
)]
pub struct Cli {
    /// Root of the generated C++ tree.
    #[arg(long, env = "KINSPECT_ROOT", global = true)]
    pub root: Option<PathBuf>,

    /// Print debug logs to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to execute; the interactive shell when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show a function's return type, arguments and local variables.
    #[command(name = "f")]
    Function {
        /// Function name: `\Fully\Qualified::name` or free words.
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print a function's generated source.
    #[command(name = "src")]
    Source {
        /// Function name: `\Fully\Qualified::name` or free words.
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Show an instance class's fields.
    #[command(name = "cl", alias = "class")]
    Class {
        /// Class name: `\Fully\Qualified` or free words.
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Start the interactive shell.
    Shell,
    /// Compare two generated trees and write per-file diffs.
    Diff {
        /// Output of the reference compiler.
        #[arg(long)]
        master: PathBuf,
        /// Output of the modified compiler.
        #[arg(long)]
        cmp: PathBuf,
        /// Folder receiving per-file diffs and copies.
        #[arg(long, visible_alias = "diff")]
        out: PathBuf,
        /// Do not report files whose code is unchanged.
        #[arg(long)]
        skip_comments: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn parses_function_query_words() {
        let cli = Cli::parse_from(["kinspect", "--root", "/g", "f", "post", "analyze", "--json"]);
        let Some(Command::Function { query, json }) = cli.command else {
            panic!("expected function command");
        };
        assert_eq!(query, ["post", "analyze"]);
        assert!(json);
    }

    #[test]
    fn class_alias_is_accepted() {
        let cli = Cli::parse_from(["kinspect", "class", "\\VK\\Post"]);
        assert!(matches!(cli.command, Some(Command::Class { .. })));
    }

    #[test]
    fn no_subcommand_means_shell() {
        let cli = Cli::parse_from(["kinspect", "-v"]);
        assert!(cli.command.is_none());
        assert!(cli.verbose);
    }

    #[test]
    fn diff_accepts_legacy_flag_name() {
        let cli = Cli::parse_from([
            "kinspect", "diff", "--master", "a", "--cmp", "b", "--diff", "c",
        ]);
        let Some(Command::Diff { out, skip_comments, .. }) = cli.command else {
            panic!("expected diff command");
        };
        assert_eq!(out, std::path::PathBuf::from("c"));
        assert!(!skip_comments);
    }

    #[test]
    fn function_requires_a_query() {
        assert!(Cli::try_parse_from(["kinspect", "f"]).is_err());
    }
}
