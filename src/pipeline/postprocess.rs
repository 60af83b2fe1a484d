//! Post-processing: deterministic whitespace cleanup of the rewritten text.
//!
//! The dialect stripper and block rewriter delete markup without caring about
//! the blank lines they leave behind, and authored MDX is indented to match its
//! JSX nesting. This module puts the text back into canonical shape so the
//! portable markdown reads as if it had been written by hand.
//!
//! ## Rule Order
//!
//! Whitespace-only lines must be emptied before blank runs are collapsed,
//! otherwise an indented blank line splits a run into two short ones that each
//! survive the collapse.

use once_cell::sync::Lazy;
use regex::Regex;

/// Canonicalise whitespace in rewritten markdown.
///
/// Rules (applied in order):
/// 1. Empty every line consisting only of spaces and tabs
/// 2. Collapse 3+ consecutive newlines down to 2 (one blank line)
/// 3. Strip leading blank lines
/// 4. Ensure the text ends with exactly one newline
///
/// The function is idempotent: its output is a fixed point.
pub fn canonicalize_whitespace(input: &str) -> String {
    let s = clear_whitespace_lines(input);
    let s = collapse_blank_lines(&s);
    let s = strip_leading_blank_lines(&s);
    ensure_final_newline(s)
}

// ── Rule 1: Empty whitespace-only lines ─────────────────────────────────────

static RE_WHITESPACE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]+$").unwrap());

fn clear_whitespace_lines(input: &str) -> String {
    RE_WHITESPACE_LINE.replace_all(input, "").to_string()
}

// ── Rule 2: Collapse excessive blank lines ───────────────────────────────────

static RE_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

fn collapse_blank_lines(input: &str) -> String {
    RE_BLANK_LINES.replace_all(input, "\n\n").to_string()
}

// ── Rule 3: Strip leading blank lines ────────────────────────────────────────

fn strip_leading_blank_lines(input: &str) -> &str {
    input.trim_start_matches('\n')
}

// ── Rule 4: Ensure file ends with single newline ─────────────────────────────

fn ensure_final_newline(input: &str) -> String {
    let trimmed = input.trim_end_matches('\n');
    format!("{}\n", trimmed)
}

// ── Source normalisation ─────────────────────────────────────────────────────

/// Normalise CRLF and lone CR line endings to LF.
pub fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

/// Strip invisible Unicode that editors leave in sources (BOM, zero-width
/// spaces and joiners, soft hyphens).
pub fn remove_invisible_chars(input: &str) -> String {
    input.replace(
        [
            '\u{200B}', '\u{FEFF}', '\u{00AD}', '\u{200C}', '\u{200D}', '\u{2060}',
        ],
        "",
    )
}

// ── Table-row helpers (shared with the styled renderer) ──────────────────────

/// A pipe-delimited table row: starts and ends with `|`.
pub(crate) fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('|') && trimmed.ends_with('|') && trimmed.len() > 2
}

/// A table separator row: only `|`, `-`, `:` and spaces, with at least one `-`.
pub(crate) fn is_separator_row(line: &str) -> bool {
    let trimmed = line.trim();
    if !trimmed.starts_with('|') || !trimmed.contains('-') {
        return false;
    }
    trimmed
        .chars()
        .all(|c| c == '|' || c == '-' || c == ':' || c == ' ' || c == '\t')
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_whitespace_lines() {
        assert_eq!(clear_whitespace_lines("a\n   \n\t\nb"), "a\n\n\nb");
    }

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(collapse_blank_lines("a\n\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_ensure_final_newline() {
        assert_eq!(ensure_final_newline("hello"), "hello\n");
        assert_eq!(ensure_final_newline("hello\n\n\n"), "hello\n");
        assert_eq!(ensure_final_newline(""), "\n");
    }

    #[test]
    fn indented_blank_lines_collapse_together() {
        let input = "\n\n# Title\n  \n\t\n   \nBody text\n\n\n\n";
        assert_eq!(canonicalize_whitespace(input), "# Title\n\nBody text\n");
    }

    #[test]
    fn canonicalize_is_idempotent() {
        let inputs = [
            "",
            "\n\n\n",
            "  \n# A\n\n\n\n  b  \n\t\n\n- c\n",
            "> quote\n>\n> more\n\n\n\n| a | b |\n",
            "no trailing newline",
        ];
        for input in inputs {
            let once = canonicalize_whitespace(input);
            let twice = canonicalize_whitespace(&once);
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_normalise_line_endings() {
        assert_eq!(normalise_line_endings("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_remove_invisible() {
        let input = "hello\u{200B}world\u{FEFF}foo\u{00AD}bar";
        assert_eq!(remove_invisible_chars(input), "helloworldfoobar");
    }

    #[test]
    fn test_table_row_detection() {
        assert!(is_table_row("| A | B |"));
        assert!(!is_table_row("A | B"));
        assert!(is_separator_row("|:------|:-----|"));
        assert!(is_separator_row("| --- | --- |"));
        assert!(!is_separator_row("| A | B |"));
        assert!(!is_separator_row("| | |"));
    }
}
