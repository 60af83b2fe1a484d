//! Output types produced by a conversion.

use crate::pipeline::blocks::BlockStats;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything derived from one source document.
///
/// Produced once per input; each field is independent of the others, so a
/// caller can cache or publish them separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// Title and description extracted from the source.
    pub metadata: DocumentMetadata,
    /// Portable markdown with every dialect construct removed.
    pub markdown: String,
    /// Self-contained inline-styled HTML document.
    pub wechat_html: String,
    /// Promotional summary chosen from the title.
    pub summary: String,
    /// Themed cover-image HTML document.
    pub cover_html: String,
    /// Counters describing what the pipeline did.
    pub stats: ConversionStats,
}

/// Where the title came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleSource {
    /// `title:` field of the leading preamble.
    Frontmatter,
    /// First top-level `# ` heading.
    Heading,
    /// Caller-supplied identifier (usually the file stem).
    Fallback,
}

/// Document-level metadata.
///
/// Absence of a title or description is a normal state, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: String,
    pub title_source: TitleSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DocumentMetadata {
    /// The description, or `""` when the preamble has none.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// Per-document pipeline counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Fenced literal regions protected before rewriting.
    pub literal_blocks: usize,
    /// Matches per presentational-block kind.
    pub blocks: BlockStats,
    pub markdown_bytes: usize,
    pub html_bytes: usize,
    pub duration_us: u64,
}

/// Files written for one article by [`crate::convert::convert_to_dir`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleFiles {
    /// Source document.
    pub source: PathBuf,
    /// `<output_dir>/<stem>/`.
    pub dir: PathBuf,
    /// Every file written, in write order.
    pub files: Vec<PathBuf>,
    pub title: String,
    pub summary: String,
    pub markdown_len: usize,
}
