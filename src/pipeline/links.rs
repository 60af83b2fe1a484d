//! Link normalisation: make site-relative image paths absolute.
//!
//! Only root-relative paths (`/images/x.png`) are rewritten. Absolute URLs,
//! protocol-relative URLs (`//cdn…`), and document-relative paths pass through.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static RE_MD_IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)\s]+)\)").unwrap());

/// `src` of an `<img>` tag, wherever it sits among the attributes. Group 1 is
/// everything up to and including `src=`.
static RE_HTML_IMG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(<img\b[^>]*?\ssrc=)(["'])([^"']+)["']"#).unwrap());

/// Prefix root-relative image references in `text` with `base_url`.
///
/// A trailing slash on `base_url` is ignored so the result never contains `//`
/// at the join.
pub fn absolutize_paths(text: &str, base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');

    let s = RE_MD_IMAGE.replace_all(text, |caps: &Captures<'_>| {
        format!("![{}]({})", &caps[1], absolutize(&caps[2], base))
    });

    RE_HTML_IMG
        .replace_all(&s, |caps: &Captures<'_>| {
            let quote = &caps[2];
            format!("{}{quote}{}{quote}", &caps[1], absolutize(&caps[3], base))
        })
        .into_owned()
}

fn absolutize(path: &str, base: &str) -> String {
    if is_root_relative(path) {
        format!("{base}{path}")
    } else {
        path.to_string()
    }
}

fn is_root_relative(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//")
}
