//! Parameter and local-variable declarations.

use serde::Serialize;

use super::patterns::{match_local_name, SYNTHETIC_LOCALS};

/// Name of the receiver parameter of instance methods.
pub const RECEIVER: &str = "$this";

/// A named, typed slot: parameter, local or instance field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    /// PHP-side name, `$` included.
    pub name: String,
    /// C++ type as written by the generator.
    pub cpp_type: String,
}

impl Variable {
    /// Creates a variable.
    pub fn new(name: impl Into<String>, cpp_type: impl Into<String>) -> Self {
        Self { name: name.into(), cpp_type: cpp_type.into() }
    }
}

/// Splits a parameter list on commas that are not nested inside `()` or
/// `<>`.
///
/// A final fragment shorter than three characters is dropped, which turns
/// an empty or blank list into no parameters.
#[must_use]
pub fn split_top_level(params: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;
    for (i, c) in params.char_indices() {
        match c {
            '(' | '<' => depth += 1,
            ')' | '>' => depth -= 1,
            ',' if depth <= 0 => {
                fragments.push(&params[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    let tail = &params[start..];
    if tail.len() > 2 {
        fragments.push(tail);
    }
    fragments
}

/// Parses one declaration such as `array< string > const &v$tags`.
#[must_use]
pub fn parse_declaration(decl: &str) -> Variable {
    let split = decl.rfind(' ').unwrap_or(0);
    let name = decl[split..].trim_start_matches([' ', '&', 'v']).trim_end();
    let cpp_type = decl[..split].trim_start();
    let cpp_type = cpp_type.strip_suffix(" const").unwrap_or(cpp_type);
    Variable::new(name, cpp_type)
}

/// Parameters in declaration order, receiver excluded.
#[must_use]
pub fn parse_parameters(params: &str) -> Vec<Variable> {
    split_top_level(params)
        .into_iter()
        .map(parse_declaration)
        .filter(|v| v.name != RECEIVER)
        .collect()
}

/// Local variables declared at the top level of the function body.
///
/// Expects comment-stripped text. Suspendable bodies are nested one level
/// deeper inside their generated struct, so their declarations are
/// indented by four spaces instead of two.
#[must_use]
pub fn parse_locals(stripped: &str, resumable: bool) -> Vec<Variable> {
    let indent = if resumable { "    " } else { "  " };
    stripped.lines().filter_map(|line| parse_local(line, indent)).collect()
}

fn parse_local(line: &str, indent: &str) -> Option<Variable> {
    let marker = line.find(" v$")?;
    let before = &line[..marker];

    let body = line.strip_prefix(indent)?;
    let declares = !body.starts_with(' ')
        && !body.starts_with("v$")
        && !body.starts_with("return")
        && !SYNTHETIC_LOCALS.iter().any(|s| line.contains(s))
        && !before.contains(['(', '}', '=']);
    if !declares {
        return None;
    }

    let token = match_local_name(line)?;
    let at = line.find(token)?;
    Some(Variable::new(&token[1..], line[..at].trim()))
}
