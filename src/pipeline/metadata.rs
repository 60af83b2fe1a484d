//! Metadata extraction: title and description of a source article.
//!
//! The title is looked up in three places, most explicit first: the `title:`
//! field of the leading preamble, the first top-level heading, and finally a
//! caller-supplied identifier. The description only ever comes from the
//! preamble. Missing metadata is a valid state and never an error.

use crate::output::{DocumentMetadata, TitleSource};
use once_cell::sync::Lazy;
use regex::Regex;

/// Leading `---` … `---` preamble. Group 1 is the body between the fences.
static RE_FRONTMATTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\A---\n(.*?)\n---(?:\n|\z)").unwrap());

/// Extract title and description from `source`.
///
/// `fallback_title` is used when neither the preamble nor a heading names the
/// document (typically the file stem).
pub fn extract_metadata(source: &str, fallback_title: &str) -> DocumentMetadata {
    let (title, title_source) = resolve_title(source, fallback_title);
    DocumentMetadata {
        title,
        title_source,
        description: extract_description(source),
    }
}

/// The document title; never empty unless `fallback_title` is.
pub fn extract_title(source: &str, fallback_title: &str) -> String {
    resolve_title(source, fallback_title).0
}

/// The preamble `description:` value, if any.
pub fn extract_description(source: &str) -> Option<String> {
    frontmatter_field(source, "description")
}

fn resolve_title(source: &str, fallback_title: &str) -> (String, TitleSource) {
    if let Some(t) = frontmatter_field(source, "title") {
        (t, TitleSource::Frontmatter)
    } else if let Some(h) = first_heading(source) {
        (h, TitleSource::Heading)
    } else {
        (fallback_title.to_string(), TitleSource::Fallback)
    }
}

/// Body of the leading preamble block, if the source starts with one.
pub fn frontmatter_block(source: &str) -> Option<&str> {
    RE_FRONTMATTER
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Value of a top-level `key: value` line in the preamble.
///
/// Surrounding whitespace and one pair of matching quotes are removed; an
/// empty value counts as absent.
pub fn frontmatter_field(source: &str, key: &str) -> Option<String> {
    let block = frontmatter_block(source)?;
    block.lines().find_map(|line| {
        let (k, v) = line.split_once(':')?;
        if k.trim() != key || k.starts_with(char::is_whitespace) {
            return None;
        }
        let value = unquote(v.trim());
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// Text of the first `# ` heading outside fenced code.
pub fn first_heading(source: &str) -> Option<String> {
    let mut in_fence = false;
    for line in source.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(rest) = line.strip_prefix('#') {
            if rest.starts_with([' ', '\t']) {
                let text = rest.trim();
                if !text.is_empty() {
                    return Some(text.to_string());
                }
            }
        }
    }
    None
}

fn unquote(value: &str) -> &str {
    for q in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(q) && value.ends_with(q) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    const WITH_PREAMBLE: &str = "---\ntitle: 为什么需要 CLAUDE.md\ndescription: \"一份配置文件的价值\"\n---\n\n# 另一个标题\n";

    #[test]
    fn title_from_preamble() {
        let meta = extract_metadata(WITH_PREAMBLE, "stem");
        assert_eq!(meta.title, "为什么需要 CLAUDE.md");
        assert_eq!(meta.title_source, TitleSource::Frontmatter);
        assert_eq!(meta.description(), "一份配置文件的价值");
    }

    #[test]
    fn title_from_heading_when_no_preamble() {
        let meta = extract_metadata("intro\n\n# Workflow Guide\n\n## Sub\n", "stem");
        assert_eq!(meta.title, "Workflow Guide");
        assert_eq!(meta.title_source, TitleSource::Heading);
        assert_eq!(meta.description, None);
        assert_eq!(meta.description(), "");
    }

    #[test]
    fn heading_inside_code_is_ignored() {
        let src = "```bash\n# install\nnpm i\n```\n\n# Real Title\n";
        assert_eq!(first_heading(src).as_deref(), Some("Real Title"));
    }

    #[test]
    fn fallback_title() {
        let meta = extract_metadata("no headings here\n## only h2\n", "my-article");
        assert_eq!(meta.title, "my-article");
        assert_eq!(meta.title_source, TitleSource::Fallback);
    }

    #[test]
    fn subtitle_key_does_not_shadow_title() {
        let src = "---\nsubtitle: nope\ntitle: yes\n---\n";
        assert_eq!(frontmatter_field(src, "title").as_deref(), Some("yes"));
    }

    #[test]
    fn nested_keys_are_ignored() {
        let src = "---\nseo:\n  title: nested\n---\n# Heading\n";
        let meta = extract_metadata(src, "x");
        assert_eq!(meta.title, "Heading");
    }

    #[test]
    fn empty_title_counts_as_absent() {
        let src = "---\ntitle:\n---\n# H\n";
        assert_eq!(extract_metadata(src, "x").title, "H");
    }

    #[test]
    fn title_and_description_helpers() {
        assert_eq!(extract_title(WITH_PREAMBLE, "x"), "为什么需要 CLAUDE.md");
        assert_eq!(extract_title("", "x"), "x");
        assert_eq!(extract_description("# no preamble\n"), None);
        assert_eq!(
            extract_description(WITH_PREAMBLE).as_deref(),
            Some("一份配置文件的价值")
        );
    }

    #[test]
    fn preamble_must_lead() {
        assert!(frontmatter_block("text\n---\ntitle: x\n---\n").is_none());
    }
}
