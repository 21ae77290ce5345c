//! Named pattern rules over generated C++ text.
//!
//! Each rule is one compiled regex plus the smallest amount of code needed
//! to apply it, so every heuristic can be tested on its own.

use std::sync::LazyLock;

use regex::Regex;

/// Base-class marker of a suspendable (forked) function.
pub const RESUMABLE_MARKER: &str = "public Resumable";

/// Locals the generator introduces on its own; never part of the PHP source.
pub const SYNTHETIC_LOCALS: [&str; 5] = [
    "v$tmp_expr",
    "v$shorthand_ternary_cond$",
    "v$resumable_temp_var$",
    "v$condition_on_switch$",
    "v$matched_with_one_case$",
];

static COMMENT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^//.+?\n").expect("valid regex"));

static SUSPENDABLE_SIGNATURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s(f\$fork\$[\w$]+)\((.*?)\)\s(noexcept\s+)?\{").expect("valid regex")
});

static PLAIN_SIGNATURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s(f\$[\w$]+)\((.*?)\)\s(noexcept\s+)?\{").expect("valid regex")
});

static RETURN_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(\w.+?)\sf\$[\w$]+\(").expect("valid regex"));

static LOCAL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s(v\$[\w$]+)").expect("valid regex"));

static CLASS_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^struct\sC\$([\w$]+)").expect("valid regex"));

static INSTANCE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s\s(.+?)\s\$(\w+)\{").expect("valid regex"));

/// A matched function signature: mangled name and the raw parameter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature<'a> {
    /// Mangled name, `f$` or `f$fork$` prefix included.
    pub mangled: &'a str,
    /// Text between the parentheses, unsplit.
    pub params: &'a str,
}

/// Removes every full line starting with `//`.
#[must_use]
pub fn strip_comments(src: &str) -> String {
    COMMENT_LINE.replace_all(src, "").into_owned()
}

/// Returns `true` when the text declares a suspendable function.
#[must_use]
pub fn is_resumable(src: &str) -> bool {
    src.contains(RESUMABLE_MARKER)
}

/// Finds the function signature.
///
/// Suspendable functions carry both a `f$fork$` entry point and plain
/// helpers, so the fork rule is tried first for them; otherwise only the
/// plain rule applies.
#[must_use]
pub fn match_signature(src: &str) -> Option<Signature<'_>> {
    let fork = if is_resumable(src) { SUSPENDABLE_SIGNATURE.captures(src) } else { None };
    let caps = fork.or_else(|| PLAIN_SIGNATURE.captures(src))?;
    Some(Signature { mangled: caps.get(1)?.as_str(), params: caps.get(2)?.as_str() })
}

/// Turns a mangled function name back into its PHP spelling.
///
/// `f$VK$Feed$Post$$analyze` becomes `VK\Feed\Post::analyze`. A second `$$`
/// (a method inherited from a base class) becomes `__`.
#[must_use]
pub fn demangle_function(mangled: &str) -> String {
    let name = mangled.strip_prefix("f$fork$").unwrap_or(mangled);
    let name = name.strip_prefix("f$").unwrap_or(name);
    name.replacen("$$", "::", 1).replacen("$$", "__", 1).replace('$', "\\")
}

/// The declared return type, `inline ` removed.
#[must_use]
pub fn match_return_type(src: &str) -> Option<String> {
    let caps = RETURN_TYPE.captures(src)?;
    Some(caps.get(1)?.as_str().replacen("inline ", "", 1))
}

/// The first `v$...` token on a line.
#[must_use]
pub fn match_local_name(line: &str) -> Option<&str> {
    LOCAL_NAME.captures(line).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// The PHP class name from a `struct C$...` declaration.
#[must_use]
pub fn match_class_name(src: &str) -> Option<String> {
    let caps = CLASS_DECLARATION.captures(src)?;
    Some(caps.get(1)?.as_str().replace('$', "\\"))
}

/// `(name, type)` of every instance field, in declaration order.
#[must_use]
pub fn match_instance_fields(src: &str) -> Vec<(String, String)> {
    INSTANCE_FIELD
        .captures_iter(src)
        .filter_map(|c| Some((c.get(2)?.as_str().to_string(), c.get(1)?.as_str().to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_lines_are_removed_but_trailing_comments_stay() {
        let src = "//crc64:123\n//source = [a.php]\nint64_t f$a() {\n  return 1; // one\n}\n";
        assert_eq!(strip_comments(src), "int64_t f$a() {\n  return 1; // one\n}\n");
    }

    #[test]
    fn plain_signature_is_matched() {
        let src = "int64_t f$reorderTags(array< string > const &v$tags, bool v$desc) noexcept {\n";
        let sig = match_signature(src).unwrap();
        assert_eq!(sig.mangled, "f$reorderTags");
        assert_eq!(sig.params, "array< string > const &v$tags, bool v$desc");
    }

    #[test]
    fn fork_signature_is_preferred_for_resumable_functions() {
        let src = "struct c$f$load final : public Resumable {\n};\n\
                   bool f$load(int64_t v$id) {\n}\n\
                   int64_t f$fork$load(int64_t v$id) {\n}\n";
        assert_eq!(match_signature(src).unwrap().mangled, "f$fork$load");
    }

    #[test]
    fn first_plain_signature_wins_without_resumable_marker() {
        let src = "\nbool f$load() {\n}\nint64_t f$fork$load(int64_t v$id) {\n}\n";
        assert_eq!(match_signature(src).unwrap().mangled, "f$load");
    }

    #[test]
    fn missing_signature_is_none() {
        assert_eq!(match_signature("#pragma once\nstruct C$A;\n"), None);
    }

    #[test]
    fn demangling_restores_php_spelling() {
        assert_eq!(demangle_function("f$reorderTags"), "reorderTags");
        assert_eq!(demangle_function("f$VK$Feed$Post$$analyze"), "VK\\Feed\\Post::analyze");
        assert_eq!(demangle_function("f$fork$VK$Api$$load"), "VK\\Api::load");
        assert_eq!(demangle_function("f$A$$run$$B"), "A::run__B");
    }

    #[test]
    fn return_type_drops_inline() {
        assert_eq!(
            match_return_type("inline array< string > f$a(bool v$x) {\n").as_deref(),
            Some("array< string >")
        );
        assert_eq!(match_return_type("  f$a();\n"), None);
    }

    #[test]
    fn class_name_and_fields() {
        let src = "struct C$VK$Feed$Post : public refcountable_php_classes<C$VK$Feed$Post> {\n\
                   \x20 int64_t $id{0L};\n\
                   \x20 array< string > $tags{};\n\
                   \x20 const char *get_class() const noexcept;\n\
                   };\n";
        assert_eq!(match_class_name(src).as_deref(), Some("VK\\Feed\\Post"));
        assert_eq!(
            match_instance_fields(src),
            [("id".to_string(), "int64_t".to_string()), ("tags".into(), "array< string >".into())]
        );
    }

    #[test]
    fn local_name_is_first_variable_token() {
        assert_eq!(match_local_name("  int64_t v$count = 0;"), Some("v$count"));
        assert_eq!(match_local_name("  return;"), None);
    }
}
