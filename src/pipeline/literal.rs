//! Literal-region protection: keep fenced code out of reach of text rewriting.
//!
//! Every later stage works with regexes over raw text, and code samples are
//! exactly the text most likely to contain things that look like markup
//! (`<div>`, `**kwargs`, `| pipes |`). Before any rewriting, each fenced block
//! is swapped for an opaque placeholder token and its content is recorded in a
//! [`LiteralTable`]. Each output pipeline restores the blocks at its very end,
//! in its own surrounding syntax.
//!
//! Tokens are framed by two Unicode private-use characters, which never occur
//! in authored prose, and carry the table index of the region they stand for.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const TOKEN_OPEN: char = '\u{E000}';
const TOKEN_CLOSE: char = '\u{E001}';
const TOKEN_TAG: &str = "MDXLIT:";

/// A fenced block: the container prefix in front of the opening fence
/// (indentation and `>` markers), optional language tag, rest of the info
/// line, body up to the next closing fence.
static RE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?ms)^([ \t>]*)```([\w+#.-]*)[^\n`]*\n(.*?)```").unwrap()
});

/// A placeholder token, optionally preceded by the line's quote/indent prefix.
static RE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)(^[ \t>]*)?\x{E000}MDXLIT:(\d+)\x{E001}").unwrap()
});

/// One extracted code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralRegion {
    /// Language tag from the opening fence, if any.
    pub language: Option<String>,
    /// Block body with leading blank lines and trailing whitespace removed.
    pub content: String,
}

/// Ordered placeholder table: region `i` is stood in for by token `i`.
#[derive(Debug, Clone, Default)]
pub struct LiteralTable {
    regions: Vec<LiteralRegion>,
}

impl LiteralTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&LiteralRegion> {
        self.regions.get(id)
    }

    /// Replace every fenced block in `text` with a fresh placeholder.
    ///
    /// Ids continue from the current table length, so protecting a second
    /// text with the same table never reuses a token. The container prefix
    /// stays in front of the token and is removed from every body line, so
    /// the recorded content is the code alone.
    pub fn protect(&mut self, text: &str) -> String {
        RE_FENCE
            .replace_all(text, |caps: &Captures<'_>| {
                let prefix = &caps[1];
                let language = Some(caps[2].to_string()).filter(|l| !l.is_empty());
                let body = strip_container(&caps[3], prefix);
                let content = trim_literal(&body).to_string();
                let id = self.regions.len();
                self.regions.push(LiteralRegion { language, content });
                format!("{prefix}{}", placeholder(id))
            })
            .into_owned()
    }

    /// Restore every placeholder as a fenced markdown block.
    ///
    /// When the token sits behind a quote or indent prefix, every line of the
    /// restored block carries the same prefix so it stays inside its container.
    pub fn restore_markdown(&self, text: &str) -> String {
        RE_TOKEN
            .replace_all(text, |caps: &Captures<'_>| {
                let prefix = caps.get(1).map_or("", |m| m.as_str());
                match self.lookup(&caps[2]) {
                    Some(region) => prefix_lines(&render_fenced(region), prefix),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    /// Restore every placeholder through `render`; the line prefix in front of
    /// the token is kept as-is.
    pub fn restore_with<F>(&self, text: &str, render: F) -> String
    where
        F: Fn(&LiteralRegion) -> String,
    {
        RE_TOKEN
            .replace_all(text, |caps: &Captures<'_>| {
                let prefix = caps.get(1).map_or("", |m| m.as_str());
                match self.lookup(&caps[2]) {
                    Some(region) => format!("{prefix}{}", render(region)),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    fn lookup(&self, id: &str) -> Option<&LiteralRegion> {
        id.parse::<usize>().ok().and_then(|i| self.regions.get(i))
    }
}

/// The token standing in for region `id`.
pub fn placeholder(id: usize) -> String {
    format!("{TOKEN_OPEN}{TOKEN_TAG}{id}{TOKEN_CLOSE}")
}

/// Whether `line` (after indentation) begins with a placeholder token.
pub fn starts_with_placeholder(line: &str) -> bool {
    line.trim_start().starts_with(TOKEN_OPEN)
}

/// Number of placeholder tokens present in `text`.
pub fn count_placeholders(text: &str) -> usize {
    RE_TOKEN.find_iter(text).count()
}

fn render_fenced(region: &LiteralRegion) -> String {
    format!(
        "```{}\n{}\n```",
        region.language.as_deref().unwrap_or(""),
        region.content
    )
}

fn prefix_lines(block: &str, prefix: &str) -> String {
    let mut out = String::with_capacity(block.len() + prefix.len() * 4);
    for (i, line) in block.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if line.is_empty() {
            out.push_str(prefix.trim_end());
        } else {
            out.push_str(prefix);
            out.push_str(line);
        }
    }
    out
}

/// Remove the fence's container prefix from each body line. Blank quoted
/// lines carry the prefix without its trailing space.
fn strip_container(body: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return body.to_string();
    }
    let bare = prefix.trim_end();
    body.split('\n')
        .map(|line| {
            line.strip_prefix(prefix)
                .or_else(|| line.strip_prefix(bare))
                .unwrap_or(line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drop leading blank lines and trailing whitespace; first-line indentation
/// is content.
fn trim_literal(body: &str) -> &str {
    let body = body.trim_end();
    let mut start = 0;
    for line in body.split_inclusive('\n') {
        if line.trim().is_empty() && line.ends_with('\n') {
            start += line.len();
        } else {
            break;
        }
    }
    &body[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protect_assigns_sequential_ids() {
        let mut table = LiteralTable::new();
        let text = "a\n```rust\nfn main() {}\n```\nb\n```\nplain\n```\n";
        let protected = table.protect(text);

        assert_eq!(table.len(), 2);
        assert_eq!(count_placeholders(&protected), 2);
        assert!(protected.contains(&placeholder(0)));
        assert!(protected.contains(&placeholder(1)));
        assert!(!protected.contains("```"));

        assert_eq!(table.get(0).unwrap().language.as_deref(), Some("rust"));
        assert_eq!(table.get(0).unwrap().content, "fn main() {}");
        assert_eq!(table.get(1).unwrap().language, None);
    }

    #[test]
    fn restore_markdown_is_verbatim() {
        let body = "  indented first\n\n\tinner   spacing\n<div>**not markup**</div>";
        let text = format!("# T\n\n```yaml\n{body}\n```\n\ntail\n");
        let mut table = LiteralTable::new();
        let protected = table.protect(&text);
        let restored = table.restore_markdown(&protected);
        assert_eq!(restored, format!("# T\n\n```yaml\n{body}\n```\n\ntail\n"));
    }

    #[test]
    fn restore_keeps_quote_prefix() {
        let mut table = LiteralTable::new();
        let protected = table.protect("```sh\nls\n\npwd\n```");
        let quoted = format!("> {protected}");
        assert_eq!(
            table.restore_markdown(&quoted),
            "> ```sh\n> ls\n>\n> pwd\n> ```"
        );
    }

    #[test]
    fn list_nested_fence_keeps_indent_once() {
        let text = "- step\n\n  ```bash\n  npm i\n\n  npm test\n  ```\n";
        let mut table = LiteralTable::new();
        let protected = table.protect(text);
        assert_eq!(protected, format!("- step\n\n  {}\n", placeholder(0)));
        assert_eq!(table.get(0).unwrap().content, "npm i\n\nnpm test");
        assert_eq!(
            table.restore_markdown(&protected),
            "- step\n\n  ```bash\n  npm i\n\n  npm test\n  ```\n"
        );
    }

    #[test]
    fn quoted_fence_keeps_marker_once() {
        let text = "> ```sh\n> ls\n>\n> pwd\n> ```\n";
        let mut table = LiteralTable::new();
        let protected = table.protect(text);
        assert_eq!(table.get(0).unwrap().content, "ls\n\npwd");
        assert_eq!(table.restore_markdown(&protected), text);
    }

    #[test]
    fn deeper_body_indent_is_content() {
        let mut table = LiteralTable::new();
        table.protect("  ```py\n  def f():\n      return 1\n  ```\n");
        assert_eq!(table.get(0).unwrap().content, "def f():\n    return 1");
    }

    #[test]
    fn second_protect_continues_numbering() {
        let mut table = LiteralTable::new();
        table.protect("```\none\n```");
        let second = table.protect("```\ntwo\n```");
        assert_eq!(second, placeholder(1));
        assert_eq!(table.get(1).unwrap().content, "two");
    }

    #[test]
    fn restore_with_custom_renderer() {
        let mut table = LiteralTable::new();
        let protected = table.protect("x\n```js\na < b\n```\n");
        let out = table.restore_with(&protected, |r| format!("[{}]", r.content));
        assert_eq!(out, "x\n[a < b]\n");
    }

    #[test]
    fn unknown_token_left_alone() {
        let table = LiteralTable::new();
        let text = format!("before {} after", placeholder(7));
        assert_eq!(table.restore_markdown(&text), text);
    }

    #[test]
    fn unclosed_fence_is_not_protected() {
        let mut table = LiteralTable::new();
        let text = "```\nnever closed\n";
        assert_eq!(table.protect(text), text);
        assert!(table.is_empty());
    }

    #[test]
    fn trim_literal_keeps_first_line_indent() {
        assert_eq!(trim_literal("\n\n    x\n  y  \n\n"), "    x\n  y");
    }
}
