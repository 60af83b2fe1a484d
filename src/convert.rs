//! Single-document conversion entry points.
//!
//! [`convert_str`] is the pure core: text in, every artifact out, no I/O.
//! The async wrappers add exactly one read of the source and, for
//! [`convert_to_dir`], the writes of the artifact files. Use
//! [`crate::stream::convert_stream`] to convert many documents concurrently.

use crate::artifacts;
use crate::config::ConversionConfig;
use crate::error::MdxConvError;
use crate::output::{ArticleFiles, ConversionOutput, ConversionStats, DocumentMetadata};
use crate::pipeline::input::{self, SourceDocument};
use crate::pipeline::literal::LiteralTable;
use crate::pipeline::{blocks, links, metadata, postprocess, strip, wechat};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Portable-markdown file names, one per destination platform.
pub const MARKDOWN_FILES: [&str; 2] = ["zhihu.md", "juejin.md"];
pub const WECHAT_FILE: &str = "wechat.html";
pub const SUMMARY_FILE: &str = "summary.txt";
pub const COVER_FILE: &str = "cover.html";

/// Convert MDX source text into every output artifact.
///
/// `fallback_title` names the document when neither the preamble nor a
/// top-level heading does (callers pass the file stem).
///
/// Never fails: blocks that match nothing pass through, and missing metadata
/// falls back to defaults.
pub fn convert_str(
    source: &str,
    fallback_title: &str,
    config: &ConversionConfig,
) -> ConversionOutput {
    let start = Instant::now();
    let source = input::normalise_source(source);

    // ── Step 1: Metadata from the untouched source ───────────────────────
    let metadata = metadata::extract_metadata(&source, fallback_title);
    debug!(
        "Title '{}' ({:?}), description: {}",
        metadata.title,
        metadata.title_source,
        metadata.description.is_some()
    );

    // ── Step 2: Protect literal regions ──────────────────────────────────
    let mut table = LiteralTable::new();
    let protected = table.protect(&source);
    let literal_blocks = table.len();

    // ── Step 3: Dialect and presentational blocks ────────────────────────
    let stripped = strip::strip_dialect(&protected);
    let (rewritten, block_stats) = blocks::rewrite_blocks(&stripped);

    // ── Step 4: Paths and whitespace ─────────────────────────────────────
    let linked = links::absolutize_paths(&rewritten, config.base_url_trimmed());
    let portable = postprocess::canonicalize_whitespace(&linked);

    // ── Step 5: Per-target restoration ───────────────────────────────────
    let markdown = table.restore_markdown(&portable);
    let fragment = wechat::render(&portable, &mut table);
    let wechat_html = wechat::wrap_document(&fragment);

    // ── Step 6: Derived artifacts ────────────────────────────────────────
    let summary = artifacts::generate_summary(&metadata.title).to_string();
    let cover_html = artifacts::generate_cover(&metadata.title, metadata.description());

    let stats = ConversionStats {
        literal_blocks,
        blocks: block_stats,
        markdown_bytes: markdown.len(),
        html_bytes: wechat_html.len(),
        duration_us: start.elapsed().as_micros() as u64,
    };

    ConversionOutput {
        metadata,
        markdown,
        wechat_html,
        summary,
        cover_html,
        stats,
    }
}

/// Read an MDX file and convert it.
///
/// # Errors
/// Only source-read failures are returned: missing file, permission denied,
/// a directory, or bytes that are not UTF-8.
pub async fn convert(
    path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, MdxConvError> {
    let path = path.as_ref();
    info!("Converting {}", path.display());
    let doc = input::load_source(path).await?;
    Ok(convert_document(&doc, config))
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, MdxConvError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| MdxConvError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert(path, config))
}

/// Convert an MDX file and write its artifacts under `<out_dir>/<stem>/`.
///
/// The source is read before the article directory is created, so a missing
/// source leaves nothing behind. Each file is written atomically (temp file +
/// rename). Which files are written follows `config.format`.
pub async fn convert_to_dir(
    path: impl AsRef<Path>,
    out_dir: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ArticleFiles, MdxConvError> {
    let path = path.as_ref();
    let doc = input::load_source(path).await?;
    let output = convert_document(&doc, config);

    let dir = out_dir.as_ref().join(&doc.stem);
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| MdxConvError::OutputWriteFailed {
            path: dir.clone(),
            source: e,
        })?;

    let mut files = Vec::new();
    if config.format.includes_markdown() {
        for name in MARKDOWN_FILES {
            files.push(write_atomic(&dir.join(name), &output.markdown).await?);
        }
    }
    if config.format.includes_wechat() {
        files.push(write_atomic(&dir.join(WECHAT_FILE), &output.wechat_html).await?);
        files.push(write_atomic(&dir.join(SUMMARY_FILE), &output.summary).await?);
        files.push(write_atomic(&dir.join(COVER_FILE), &output.cover_html).await?);
    }

    info!(
        "Wrote {} file(s) for '{}' to {}",
        files.len(),
        output.metadata.title,
        dir.display()
    );

    Ok(ArticleFiles {
        source: path.to_path_buf(),
        dir,
        files,
        title: output.metadata.title,
        summary: output.summary,
        markdown_len: output.markdown.len(),
    })
}

/// Extract title and description without converting content.
pub async fn inspect(path: impl AsRef<Path>) -> Result<DocumentMetadata, MdxConvError> {
    let doc = input::load_source(path.as_ref()).await?;
    Ok(metadata::extract_metadata(&doc.text, &doc.stem))
}

// ── Internal helpers ─────────────────────────────────────────────────────

fn convert_document(doc: &SourceDocument, config: &ConversionConfig) -> ConversionOutput {
    let output = convert_str(&doc.text, &doc.stem, config);
    info!(
        "Converted {}: {} literal block(s), {} markdown bytes, {} html bytes in {}µs",
        doc.path.display(),
        output.stats.literal_blocks,
        output.stats.markdown_bytes,
        output.stats.html_bytes,
        output.stats.duration_us
    );
    output
}

/// Write `contents` to `path` via a sibling temp file and rename.
async fn write_atomic(path: &Path, contents: &str) -> Result<PathBuf, MdxConvError> {
    let tmp_path = tmp_path_for(path);
    tokio::fs::write(&tmp_path, contents)
        .await
        .map_err(|e| MdxConvError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| MdxConvError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    debug!("Wrote {} ({} bytes)", path.display(), contents.len());
    Ok(path.to_path_buf())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
