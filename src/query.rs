//! Query normalization.
//!
//! A query is either fully qualified (`\VK\Feed\Post::analyze`) and maps
//! one-to-one onto the generator's file naming, or fuzzy (`post analyze`)
//! and becomes a set of lower-cased tokens matched against file paths.

/// Leading character that marks a fully-qualified query.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Separator between a class name and a method name in PHP.
pub const METHOD_SEPARATOR: &str = "::";

const SPLIT_CHARS: [char; 6] = [NAMESPACE_SEPARATOR, ',', '+', ':', '(', ')'];

/// A parsed user query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Exact namespace-qualified symbol, leading separator included.
    Qualified(String),
    /// Free-form words.
    Fuzzy(String),
}

impl Query {
    /// Classifies raw user input.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with(NAMESPACE_SEPARATOR) {
            Self::Qualified(trimmed.to_string())
        } else {
            Self::Fuzzy(trimmed.to_string())
        }
    }

    /// The query text as typed (trimmed).
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Qualified(s) | Self::Fuzzy(s) => s,
        }
    }
}

/// Lower-cased search tokens in the order the user typed them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenSet {
    tokens: Vec<String>,
}

impl TokenSet {
    /// Splits raw input on namespace separators, commas, pluses, colons,
    /// parentheses and whitespace, dropping empty fragments.
    ///
    /// `"VK\Post::analyze"` becomes `["vk", "post", "analyze"]`.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let tokens = raw
            .trim()
            .to_lowercase()
            .split(|c: char| c.is_whitespace() || SPLIT_CHARS.contains(&c))
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();
        Self { tokens }
    }

    /// Returns `true` when no token survived normalization.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The tokens in typed order.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The longest token; the first one wins a tie.
    #[must_use]
    pub fn longest(&self) -> Option<&str> {
        let mut best: Option<&str> = None;
        for token in &self.tokens {
            if best.map_or(true, |b| token.len() > b.len()) {
                best = Some(token);
            }
        }
        best
    }
}

/// Converts a fully-qualified name into the generator's file-name fragment.
///
/// `\VK\Feed\Post::analyze` becomes `VK@Feed@Post@@analyze`. A trailing `()`
/// is tolerated, and stray single colons are dropped so the result never
/// contains a separator character; a fragment that matches nothing simply
/// yields no candidates.
#[must_use]
pub fn to_generator_path(fqn: &str) -> String {
    let name = fqn.trim();
    let name = name.strip_prefix(NAMESPACE_SEPARATOR).unwrap_or(name);
    let name = name.strip_suffix("()").unwrap_or(name);
    name.replace(METHOD_SEPARATOR, "@@")
        .replace(NAMESPACE_SEPARATOR, "@")
        .replace(':', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_separator_makes_query_qualified() {
        assert_eq!(
            Query::parse("  \\VK\\Post::analyze "),
            Query::Qualified("\\VK\\Post::analyze".into())
        );
        assert_eq!(Query::parse("post analyze"), Query::Fuzzy("post analyze".into()));
    }

    #[test]
    fn normalize_splits_on_every_separator() {
        let tokens = TokenSet::normalize(" VK\\Feed\\Post::analyze(a, b)+Extra  more ");
        assert_eq!(tokens.tokens(), ["vk", "feed", "post", "analyze", "a", "b", "extra", "more"]);
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = TokenSet::normalize("ClassName method");
        let twice = TokenSet::normalize(&once.tokens().join(" "));
        assert_eq!(once, twice);
        assert_eq!(once, TokenSet::normalize("ClassName method"));
    }

    #[test]
    fn blank_input_yields_no_tokens() {
        assert!(TokenSet::normalize("  ,: () ").is_empty());
        assert_eq!(TokenSet::normalize("").longest(), None);
    }

    #[test]
    fn longest_prefers_first_on_tie() {
        let tokens = TokenSet::normalize("feed post wall");
        assert_eq!(tokens.longest(), Some("feed"));
        let tokens = TokenSet::normalize("vk messages_send");
        assert_eq!(tokens.longest(), Some("messages_send"));
    }

    #[test]
    fn generator_path_uses_marker_characters() {
        assert_eq!(to_generator_path("\\VK\\Feed\\Post::analyze"), "VK@Feed@Post@@analyze");
        assert_eq!(to_generator_path("\\reorderTags"), "reorderTags");
        assert_eq!(to_generator_path("\\VK\\Post::analyze()"), "VK@Post@@analyze");
    }

    #[test]
    fn generator_path_is_deterministic_and_separator_free() {
        for fqn in ["\\A\\B::c", "\\A:B", "\\\\A\\\\B::::c", "\\x"] {
            let first = to_generator_path(fqn);
            assert_eq!(first, to_generator_path(fqn));
            assert!(!first.contains(NAMESPACE_SEPARATOR), "{first}");
            assert!(!first.contains(':'), "{first}");
        }
    }
}
