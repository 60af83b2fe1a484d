//! Styled-markup renderer: portable markdown → inline-styled HTML fragment.
//!
//! The target platform strips `<style>` blocks and external stylesheets, so
//! every element carries its presentation in a `style` attribute.
//!
//! ## Pass Order
//!
//! Passes run in a fixed order over the whole text; later passes see the
//! output of earlier ones.
//!
//! 1. Protect fenced blocks still present (the curated diagram substitutes)
//! 2. Headings `###`, `##`, `#`
//! 3. Bold, then italic
//! 4. Inline code
//! 5. Blockquote lines, adjacent quotes merged with `<br>`
//! 6. `- ` list items, runs wrapped in `<ul>`
//! 7. Pipe tables
//! 8. Paragraph wrapping of the remaining plain lines
//! 9. Images, then links
//! 10. Horizontal rules
//! 11. Literal restoration as escaped `<pre><code>`
//!
//! Every pass is a total function: text that matches nothing passes through.

use super::literal::{starts_with_placeholder, LiteralRegion, LiteralTable};
use super::postprocess::{is_separator_row, is_table_row};
use crate::templates::WECHAT_SHELL;
use once_cell::sync::Lazy;
use regex::Regex;

const H1_STYLE: &str =
    "font-size: 24px; font-weight: bold; color: #1f1f1f; margin: 30px 0 20px; text-align: center;";
const H2_STYLE: &str = "font-size: 20px; font-weight: bold; color: #2f2f2f; margin: 25px 0 15px; border-bottom: 1px solid #eee; padding-bottom: 8px;";
const H3_STYLE: &str = "font-size: 18px; font-weight: bold; color: #3f3f3f; margin: 20px 0 10px;";
const CODE_STYLE: &str = "background: #f5f5f5; padding: 2px 6px; border-radius: 3px; font-family: Consolas, monospace; font-size: 14px; color: #e83e8c;";
const QUOTE_STYLE: &str =
    "border-left: 4px solid #4caf50; padding: 10px 15px; margin: 15px 0; background: #f9f9f9; color: #666;";
const UL_STYLE: &str = "padding-left: 20px; margin: 10px 0;";
const LI_STYLE: &str = "margin: 5px 0;";
const TABLE_STYLE: &str = "width: 100%; border-collapse: collapse; margin: 15px 0; font-size: 14px;";
const TH_STYLE: &str =
    "background: #f5f5f5; padding: 10px; border: 1px solid #ddd; text-align: left; font-weight: bold;";
const TD_STYLE: &str = "padding: 10px; border: 1px solid #ddd;";
const P_STYLE: &str = "margin: 10px 0; line-height: 1.8; color: #333;";
const IMG_STYLE: &str = "max-width: 100%; display: block; margin: 15px auto;";
const A_STYLE: &str = "color: #576b95; text-decoration: none;";
const HR_STYLE: &str = "border: none; border-top: 1px solid #eee; margin: 20px 0;";
const PRE_STYLE: &str = "background: #f8f8f8; padding: 15px; border-radius: 5px; overflow-x: auto; font-size: 13px; line-height: 1.5; white-space: pre; font-family: 'Courier New', Consolas, monospace;";

/// Tag names that start a block-level line and so are never paragraph-wrapped.
const BLOCK_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li", "p", "blockquote", "pre", "table",
    "thead", "tbody", "tr", "hr", "section", "div", "br",
];

static RE_H3: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^### (.*)$").unwrap());
static RE_H2: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^## (.*)$").unwrap());
static RE_H1: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^# (.*)$").unwrap());
static RE_BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*\n]+)\*\*").unwrap());
static RE_ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*\n]+)\*").unwrap());
static RE_INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`\n]+)`").unwrap());
static RE_QUOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^>[ \t]*(.*)$").unwrap());
static RE_QUOTE_JOIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</blockquote>[ \t]*\n[ \t]*<blockquote[^>]*>").unwrap());
static RE_LIST_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^- (.*)$").unwrap());
static RE_IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)\s]+)\)").unwrap());
static RE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)").unwrap());
static RE_RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(?:-{3,}|\*{3,}|_{3,})[ \t]*$").unwrap());

/// Render protected portable markdown into the styled HTML fragment.
///
/// `table` holds the literal regions already extracted from `markdown`; any
/// fence still present is added to it before rendering.
pub fn render(markdown: &str, table: &mut LiteralTable) -> String {
    let html = table.protect(markdown);
    let html = render_headings(&html);
    let html = render_emphasis(&html);
    let html = render_inline_code(&html);
    let html = render_blockquotes(&html);
    let html = render_lists(&html);
    let html = render_tables(&html);
    let html = wrap_paragraphs(&html);
    let html = render_images_and_links(&html);
    let html = render_rules(&html);
    table.restore_with(&html, render_literal)
}

/// Place a rendered fragment into the outer document shell.
pub fn wrap_document(fragment: &str) -> String {
    WECHAT_SHELL.replace("{{content}}", fragment)
}

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

// ── Pass 2: headings ─────────────────────────────────────────────────────────

fn render_headings(text: &str) -> String {
    let s = RE_H3.replace_all(text, format!(r#"<h3 style="{H3_STYLE}">$1</h3>"#));
    let s = RE_H2.replace_all(&s, format!(r#"<h2 style="{H2_STYLE}">$1</h2>"#));
    RE_H1
        .replace_all(&s, format!(r#"<h1 style="{H1_STYLE}">$1</h1>"#))
        .into_owned()
}

// ── Pass 3: emphasis ─────────────────────────────────────────────────────────

fn render_emphasis(text: &str) -> String {
    let s = RE_BOLD.replace_all(text, r#"<strong style="color: #333;">$1</strong>"#);
    RE_ITALIC.replace_all(&s, "<em>$1</em>").into_owned()
}

// ── Pass 4: inline code ──────────────────────────────────────────────────────

fn render_inline_code(text: &str) -> String {
    RE_INLINE_CODE
        .replace_all(text, format!(r#"<code style="{CODE_STYLE}">$1</code>"#))
        .into_owned()
}

// ── Pass 5: blockquotes ──────────────────────────────────────────────────────

fn render_blockquotes(text: &str) -> String {
    let s = RE_QUOTE.replace_all(
        text,
        format!(r#"<blockquote style="{QUOTE_STYLE}">$1</blockquote>"#),
    );
    RE_QUOTE_JOIN.replace_all(&s, "<br>").into_owned()
}

// ── Pass 6: lists ────────────────────────────────────────────────────────────

fn render_lists(text: &str) -> String {
    let items = RE_LIST_ITEM.replace_all(text, format!(r#"<li style="{LI_STYLE}">$1</li>"#));

    let mut out: Vec<String> = Vec::new();
    let mut run: Vec<&str> = Vec::new();
    for line in items.split('\n') {
        if line.starts_with("<li ") {
            run.push(line);
            continue;
        }
        flush_list(&mut out, &mut run);
        out.push(line.to_string());
    }
    flush_list(&mut out, &mut run);
    out.join("\n")
}

fn flush_list(out: &mut Vec<String>, run: &mut Vec<&str>) {
    if run.is_empty() {
        return;
    }
    out.push(format!(r#"<ul style="{UL_STYLE}">{}</ul>"#, run.concat()));
    run.clear();
}

// ── Pass 7: tables ───────────────────────────────────────────────────────────

/// Replace each header + separator + body-row run with a single-line table.
fn render_tables(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let is_table_start = is_table_row(lines[i])
            && !is_separator_row(lines[i])
            && lines.get(i + 1).is_some_and(|l| is_separator_row(l));
        if !is_table_start {
            out.push(lines[i].to_string());
            i += 1;
            continue;
        }

        let header = split_cells(lines[i]);
        i += 2;
        let mut rows = Vec::new();
        while i < lines.len() && is_table_row(lines[i]) {
            rows.push(split_cells(lines[i]));
            i += 1;
        }
        out.push(table_html(&header, &rows));
    }

    out.join("\n")
}

/// Cells between the outer pipes, trimmed; empty cells are kept.
fn split_cells(row: &str) -> Vec<&str> {
    let trimmed = row.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(str::trim).collect()
}

fn table_html(header: &[&str], rows: &[Vec<&str>]) -> String {
    let mut html = format!(r#"<table style="{TABLE_STYLE}"><thead><tr>"#);
    for cell in header {
        html.push_str(&format!(r#"<th style="{TH_STYLE}">{cell}</th>"#));
    }
    html.push_str("</tr></thead><tbody>");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!(r#"<td style="{TD_STYLE}">{cell}</td>"#));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}

// ── Pass 8: paragraphs ───────────────────────────────────────────────────────

fn wrap_paragraphs(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            if is_paragraph_line(line) {
                format!(r#"<p style="{P_STYLE}">{line}</p>"#)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_paragraph_line(line: &str) -> bool {
    if line.trim().is_empty() || starts_with_placeholder(line) || RE_RULE.is_match(line) {
        return false;
    }
    match line.strip_prefix('<') {
        Some(rest) if rest.starts_with('/') => false,
        Some(rest) => {
            let name: String = rest
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_ascii_lowercase();
            !BLOCK_TAGS.contains(&name.as_str())
        }
        None => true,
    }
}

// ── Pass 9: images and links ─────────────────────────────────────────────────

fn render_images_and_links(text: &str) -> String {
    let s = RE_IMAGE.replace_all(
        text,
        format!(r#"<img src="$2" alt="$1" style="{IMG_STYLE}">"#),
    );
    RE_LINK
        .replace_all(&s, format!(r#"<a href="$2" style="{A_STYLE}">$1</a>"#))
        .into_owned()
}

// ── Pass 10: horizontal rules ────────────────────────────────────────────────

fn render_rules(text: &str) -> String {
    RE_RULE
        .replace_all(text, format!(r#"<hr style="{HR_STYLE}">"#))
        .into_owned()
}

// ── Pass 11: literal restoration ─────────────────────────────────────────────

fn render_literal(region: &LiteralRegion) -> String {
    format!(
        r#"<pre style="{PRE_STYLE}"><code>{}</code></pre>"#,
        escape_html(&region.content)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_plain(md: &str) -> String {
        let mut table = LiteralTable::new();
        let protected = table.protect(md);
        render(&protected, &mut table)
    }

    #[test]
    fn headings_are_styled() {
        let html = render_headings("# A\n## B\n### C\n#### D");
        assert!(html.contains(&format!(r#"<h1 style="{H1_STYLE}">A</h1>"#)));
        assert!(html.contains(&format!(r#"<h2 style="{H2_STYLE}">B</h2>"#)));
        assert!(html.contains(&format!(r#"<h3 style="{H3_STYLE}">C</h3>"#)));
        assert!(html.ends_with("#### D"));
    }

    #[test]
    fn bold_then_italic() {
        assert_eq!(
            render_emphasis("**b** and *i*"),
            r#"<strong style="color: #333;">b</strong> and <em>i</em>"#
        );
    }

    #[test]
    fn emphasis_does_not_cross_lines() {
        assert_eq!(render_emphasis("*a\nb*"), "*a\nb*");
    }

    #[test]
    fn adjacent_quotes_merge() {
        let html = render_blockquotes("> ⚠️ **注意**\n>\n> body");
        assert_eq!(html.matches("<blockquote").count(), 1);
        assert_eq!(html.matches("<br>").count(), 2);
        assert!(html.ends_with("body</blockquote>"));
    }

    #[test]
    fn list_runs_share_one_ul() {
        let html = render_lists("- a\n- b\n\n- c");
        assert_eq!(html.matches("<ul ").count(), 2);
        assert_eq!(html.matches("<li ").count(), 3);
        assert!(!html.contains("<li style=\"margin: 5px 0;\">a</li>\n"));
    }

    #[test]
    fn table_shape() {
        let md = "| A | B |\n|---|:--|\n| 1 | 2 |\n| 3 | |\n";
        let html = render_tables(md);
        assert_eq!(html.matches("<table").count(), 1);
        assert_eq!(html.matches("<th ").count(), 2);
        assert_eq!(html.matches("<tr>").count(), 3);
        assert_eq!(html.matches("<td ").count(), 4);
        assert!(!html.contains("|---"));
    }

    #[test]
    fn table_rows_are_not_paragraph_wrapped() {
        let html = render_plain("| A | B |\n|---|---|\n| 1 | 2 |\n");
        assert!(!html.contains("<p"));
    }

    #[test]
    fn lone_pipe_line_is_not_a_table() {
        assert_eq!(render_tables("| not a table |\nplain"), "| not a table |\nplain");
    }

    #[test]
    fn paragraph_exclusions() {
        assert!(is_paragraph_line("hello"));
        assert!(is_paragraph_line("<strong style=\"color: #333;\">x</strong> tail"));
        assert!(!is_paragraph_line(""));
        assert!(!is_paragraph_line("   "));
        assert!(!is_paragraph_line("<h2 style=\"\">x</h2>"));
        assert!(!is_paragraph_line("<pre>"));
        assert!(!is_paragraph_line("</ul>"));
        assert!(!is_paragraph_line("---"));
        assert!(!is_paragraph_line(&crate::pipeline::literal::placeholder(0)));
    }

    #[test]
    fn images_before_links() {
        let html = render_images_and_links("![alt](https://x/a.png) [site](https://x)");
        assert!(html.starts_with(r#"<img src="https://x/a.png" alt="alt""#));
        assert!(html.contains(r#"<a href="https://x" style="#));
    }

    #[test]
    fn rules_in_all_three_spellings() {
        let html = render_rules("---\n***\n___\n--");
        assert_eq!(html.matches("<hr ").count(), 3);
        assert!(html.ends_with("\n--"));
    }

    #[test]
    fn literal_is_escaped_and_untouched() {
        let html = render_plain("```html\n<div>**x**</div>\n```\n");
        assert!(html.contains("<code>&lt;div&gt;**x**&lt;/div&gt;</code>"));
        assert!(!html.contains("<strong"));
    }

    #[test]
    fn curated_fence_is_protected_by_renderer() {
        let mut table = LiteralTable::new();
        let md = "intro\n\n```\n│ **a** │ - b │\n```\n";
        let html = render(md, &mut table);
        assert_eq!(table.len(), 1);
        assert!(html.contains("│ **a** │ - b │"));
        assert!(!html.contains("<li"));
    }

    #[test]
    fn quoted_literal_keeps_container() {
        let html = render_plain("> ```sh\n> ls\n> ```\n");
        // Restored code sits inside the quote element.
        assert!(html.contains("<blockquote"));
        assert!(html.contains("<pre"));
        assert!(html.contains("<code>ls</code>"));
    }

    #[test]
    fn escape_html_five_chars() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#039;");
    }

    #[test]
    fn wrap_document_fills_shell() {
        let doc = wrap_document("<p>x</p>");
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<p>x</p>"));
        assert!(!doc.contains("{{content}}"));
    }
}
