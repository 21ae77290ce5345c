//! Terminal rendering of extracted artifacts.

use std::fmt::Write as _;
use std::sync::LazyLock;

use crossterm::style::Stylize;
use regex::{Captures, Regex};

use crate::extract::{ClassArtifact, FunctionArtifact, Variable};

/// Width that variable names are right-aligned to.
pub const NAME_COLUMN: usize = 24;

const RULE: &str = "========================";

static CLASS_INSTANCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"class_instance<C(\$.+?)>").expect("valid regex"));

static SOURCE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^//(crc|source|\d+:).+$").expect("valid regex"));

/// Rewrites a C++ type in PHP terms.
///
/// `array< class_instance<C$VK$Post> >` becomes `array< \VK\Post >`,
/// `int64_t` becomes `int` and `std::tuple` becomes `tuple`.
#[must_use]
pub fn pretty_type(cpp_type: &str) -> String {
    CLASS_INSTANCE
        .replace_all(cpp_type, |caps: &Captures<'_>| caps[1].replace('$', "\\"))
        .replace("int64_t", "int")
        .replace("std::tuple", "tuple")
}

fn styled_type(cpp_type: &str) -> String {
    let pretty = pretty_type(cpp_type);
    if pretty == "var" {
        pretty.red().to_string()
    } else {
        pretty.magenta().to_string()
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

fn push_section(out: &mut String, title: &str, vars: &[Variable]) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{RULE} {}", title.underlined());
    for var in vars {
        let name = format!("{:>width$} ", var.name, width = NAME_COLUMN);
        let _ = writeln!(out, "{}{}", name.bold(), styled_type(&var.cpp_type));
    }
}

/// Summary of a function: file, size, return type, flags, parameters and
/// locals.
#[must_use]
pub fn format_function_info(f: &FunctionArtifact) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "{RULE} {}", format!("{}()", f.name).underlined());
    let _ = writeln!(out, "Source file: {}", f.path.display());
    let _ = writeln!(out, "Complexity:  {}", format!("{} lines", f.line_count).cyan());
    let return_type = f.return_type.as_deref().map_or_else(|| "<unknown>".to_string(), styled_type);
    let _ = writeln!(out, "{}{return_type}", "@return      ".bold());
    if f.was_inlined {
        let _ = writeln!(out, "{}", "Was inlined".cyan());
    }
    if f.is_resumable {
        let _ = writeln!(out, "{}", "Is resumable".cyan());
    }
    push_section(&mut out, &plural(f.params.len(), "argument"), &f.params);
    push_section(&mut out, &plural(f.locals.len(), "local var"), &f.locals);
    out
}

/// The function's full source with generator header comments dimmed.
#[must_use]
pub fn format_function_source(f: &FunctionArtifact) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "{RULE} {}", format!("{}()", f.name).underlined());
    let _ = writeln!(out);
    for line in f.source.trim().lines() {
        if SOURCE_HEADER.is_match(line) {
            let _ = writeln!(out, "{}", line.dim());
        } else {
            let _ = writeln!(out, "{line}");
        }
    }
    out
}

/// Summary of a class: file and instance fields.
#[must_use]
pub fn format_class_info(c: &ClassArtifact) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "{RULE} {}", c.name.as_str().underlined());
    let _ = writeln!(out, "Source file: {}", c.path.display());
    push_section(&mut out, &plural(c.fields.len(), "instance var"), &c.fields);
    out
}
