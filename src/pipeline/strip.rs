//! Dialect stripping: delete MDX-only syntax with no portable meaning.
//!
//! Three things are removed unconditionally and nothing is generated in their
//! place: the leading preamble, `import` declarations, and `{/* … */}`
//! comments (which may span lines).

use once_cell::sync::Lazy;
use regex::Regex;

static RE_FRONTMATTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\A---\n.*?\n---(?:\n|\z)").unwrap());

static RE_IMPORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^import\s.*$").unwrap());

static RE_JSX_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{/\*.*?\*/\}").unwrap());

/// Apply all three removals in order.
pub fn strip_dialect(input: &str) -> String {
    let s = remove_frontmatter(input);
    let s = remove_imports(&s);
    remove_jsx_comments(&s)
}

fn remove_frontmatter(input: &str) -> String {
    RE_FRONTMATTER.replace(input, "").into_owned()
}

fn remove_imports(input: &str) -> String {
    RE_IMPORT.replace_all(input, "").into_owned()
}

fn remove_jsx_comments(input: &str) -> String {
    RE_JSX_COMMENT.replace_all(input, "").into_owned()
}
