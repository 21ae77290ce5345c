//! Candidate location: query -> files that may hold the artifact.
//!
//! The search is two-phase. A cheap file-name search with one pattern
//! narrows the tree down, then every surviving path is checked against all
//! query tokens, filtered by artifact kind and, for functions, peeked into.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::config::{InspectConfig, CLASS_SUBDIR};
use crate::context::ServiceContext;
use crate::error::InspectError;
use crate::query::{to_generator_path, Query, TokenSet};
use crate::ports::NamePattern;

/// Marker every generated function definition carries.
const FUNCTION_MARKER: &str = " f$";

/// File-name prefix of class headers.
const CLASS_FILE_PREFIX: &str = "C@";

/// What a query is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// A PHP function or method.
    Function,
    /// A PHP instance class.
    Class,
}

impl ArtifactKind {
    /// Lower-case noun used in user-facing messages.
    #[must_use]
    pub fn noun(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Class => "class",
        }
    }
}

/// A file believed to hold the requested artifact. Content is read lazily.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Location of the generated file.
    pub path: PathBuf,
}

/// Runs candidate searches against one generated tree.
pub struct Locator<'a> {
    ctx: &'a ServiceContext,
    config: &'a InspectConfig,
}

impl<'a> Locator<'a> {
    /// Creates a locator over `config.root()`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, config: &'a InspectConfig) -> Self {
        Self { ctx, config }
    }

    /// Finds files that may define the function named by `query`.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::Config`] if the root cannot be searched.
    pub fn find_function_candidates(&self, query: &Query) -> Result<Vec<Candidate>, InspectError> {
        let root = self.config.root().to_path_buf();
        let found = match query {
            Query::Qualified(fqn) => {
                self.search(&root, &NamePattern::Prefix(format!("{}.", to_generator_path(fqn))))?
            }
            Query::Fuzzy(raw) => {
                let tokens = TokenSet::normalize(raw);
                let Some(longest) = tokens.longest() else {
                    return Ok(Vec::new());
                };
                let found = self.search(&root, &NamePattern::Substring(longest.to_string()))?;
                found
                    .into_iter()
                    .filter(|p| satisfies_tokens(&relative(p, &root), tokens.tokens()))
                    .collect()
            }
        };

        let kept = keep_function_files(found);
        log::debug!("{} function file(s) after kind filter", kept.len());
        let candidates: Vec<Candidate> = kept
            .into_iter()
            .filter(|p| self.contains_function(p))
            .map(|path| Candidate { path })
            .collect();
        log::debug!("{} function candidate(s) for {:?}", candidates.len(), query.as_str());
        Ok(candidates)
    }

    /// Finds class headers that may declare the class named by `query`.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::Config`] if the class directory cannot be
    /// searched.
    pub fn find_class_candidates(&self, query: &Query) -> Result<Vec<Candidate>, InspectError> {
        let root = self.config.class_root();
        let found = match query {
            Query::Qualified(fqn) => {
                let prefix = format!("{CLASS_FILE_PREFIX}{}.", to_generator_path(fqn));
                self.search(&root, &NamePattern::Prefix(prefix))?
            }
            Query::Fuzzy(raw) => {
                let tokens = TokenSet::normalize(raw);
                let Some(longest) = tokens.longest() else {
                    return Ok(Vec::new());
                };
                let found = self.search(&root, &NamePattern::Substring(longest.to_string()))?;
                found
                    .into_iter()
                    .filter(|p| satisfies_tokens(&relative(p, &root), tokens.tokens()))
                    .collect()
            }
        };

        let candidates: Vec<Candidate> = found
            .into_iter()
            .filter(|p| has_extension(p, "h"))
            .map(|path| Candidate { path })
            .collect();
        log::debug!("{} class candidate(s) for {:?}", candidates.len(), query.as_str());
        Ok(candidates)
    }

    fn search(&self, root: &Path, pattern: &NamePattern) -> Result<Vec<PathBuf>, InspectError> {
        if !self.ctx.fs.is_dir(root) {
            return Err(InspectError::Config(format!("{} is not a directory", root.display())));
        }
        log::debug!("searching {} for {pattern:?}", root.display());
        self.ctx
            .search
            .find(root, pattern)
            .map_err(|e| InspectError::Config(format!("cannot search {}: {e}", root.display())))
    }

    fn contains_function(&self, path: &Path) -> bool {
        match self.ctx.fs.read_to_string(path) {
            Ok(text) => text.contains(FUNCTION_MARKER) && text.contains('('),
            Err(e) => {
                log::warn!("skipping unreadable {}: {e}", path.display());
                false
            }
        }
    }
}

/// Returns `true` when every token occurs in `path` at a word boundary.
///
/// A token sits at a word boundary when the characters on both sides of it
/// are not ASCII alphanumeric (or are the ends of the path). Any occurrence
/// may satisfy the token; `path` is compared lower-cased.
#[must_use]
pub fn satisfies_tokens(path: &str, tokens: &[String]) -> bool {
    let path = path.to_lowercase();
    tokens.iter().all(|token| occurs_at_boundary(&path, token))
}

fn occurs_at_boundary(haystack: &str, token: &str) -> bool {
    if token.is_empty() {
        return true;
    }
    let bytes = haystack.as_bytes();
    let mut from = 0;
    // Occurrences may overlap, so resume one character past each hit.
    while let Some(offset) = haystack[from..].find(token) {
        let start = from + offset;
        let end = start + token.len();
        let left_ok = start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
        let right_ok = end == bytes.len() || !bytes[end].is_ascii_alphanumeric();
        if left_ok && right_ok {
            return true;
        }
        from = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
    }
    false
}

/// Keeps the files that can hold a function definition.
///
/// `.cpp` files always stay. A `.h` file stays only when the scan did not
/// also return a `.cpp` with the same stem next to it (an inlined function
/// has no translation unit of its own) and it is not a class header.
#[must_use]
pub fn keep_function_files(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let cpp_stems: HashSet<PathBuf> =
        paths.iter().filter(|p| has_extension(p, "cpp")).map(|p| p.with_extension("")).collect();

    paths
        .into_iter()
        .filter(|p| {
            if has_extension(p, "cpp") {
                return true;
            }
            has_extension(p, "h")
                && !cpp_stems.contains(&p.with_extension(""))
                && !is_class_header(p)
        })
        .collect()
}

fn is_class_header(path: &Path) -> bool {
    let in_class_dir = path.parent().and_then(Path::file_name) == Some(OsStr::new(CLASS_SUBDIR));
    let named_like_class =
        path.file_name().and_then(OsStr::to_str).is_some_and(|n| n.starts_with(CLASS_FILE_PREFIX));
    in_class_dir && named_like_class
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().is_some_and(|e| e == ext)
}

fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).to_string_lossy().into_owned()
}
