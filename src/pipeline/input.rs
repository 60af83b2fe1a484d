//! Input resolution: read a source article from disk into memory.
//!
//! The file is read exactly once, before any transformation begins. A missing
//! or unreadable source is the only fatal condition of a conversion, so it is
//! detected here, before any output directory is created.

use crate::error::MdxConvError;
use crate::pipeline::postprocess::{normalise_line_endings, remove_invisible_chars};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A source article loaded into memory.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Path the source was read from.
    pub path: PathBuf,
    /// File name without extension; used as the article folder name and as
    /// the title of last resort.
    pub stem: String,
    /// Full text with LF line endings.
    pub text: String,
}

impl SourceDocument {
    /// Build a document from in-memory text, applying the same normalisation
    /// as a file read.
    pub fn from_text(path: impl Into<PathBuf>, text: &str) -> Self {
        let path = path.into();
        let stem = file_stem(&path);
        Self {
            path,
            stem,
            text: normalise_source(text),
        }
    }
}

/// Read and validate a source file.
pub async fn load_source(path: &Path) -> Result<SourceDocument, MdxConvError> {
    let meta = tokio::fs::metadata(path)
        .await
        .map_err(|e| map_read_error(path, e.kind()))?;
    if !meta.is_file() {
        return Err(MdxConvError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| map_read_error(path, e.kind()))?;
    let text = decode_source(path, bytes)?;

    debug!("Loaded source {} ({} bytes)", path.display(), text.len());
    Ok(SourceDocument {
        path: path.to_path_buf(),
        stem: file_stem(path),
        text: normalise_source(&text),
    })
}

/// Decode raw bytes as UTF-8, reporting the first invalid offset.
pub fn decode_source(path: &Path, bytes: Vec<u8>) -> Result<String, MdxConvError> {
    String::from_utf8(bytes).map_err(|e| MdxConvError::InvalidUtf8 {
        path: path.to_path_buf(),
        offset: e.utf8_error().valid_up_to(),
    })
}

pub(crate) fn normalise_source(text: &str) -> String {
    remove_invisible_chars(&normalise_line_endings(text))
}

fn map_read_error(path: &Path, kind: ErrorKind) -> MdxConvError {
    match kind {
        ErrorKind::PermissionDenied => MdxConvError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => MdxConvError::FileNotFound {
            path: path.to_path_buf(),
        },
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "article".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_drops_extension() {
        assert_eq!(
            file_stem(Path::new("pages/config/why-claude-md-matters.mdx")),
            "why-claude-md-matters"
        );
        assert_eq!(file_stem(Path::new("")), "article");
    }

    #[test]
    fn from_text_normalises_line_endings() {
        let doc = SourceDocument::from_text("a.mdx", "\u{FEFF}# T\r\nbody\r\n");
        assert_eq!(doc.text, "# T\nbody\n");
        assert_eq!(doc.stem, "a");
    }

    #[test]
    fn invalid_utf8_reports_offset() {
        let err = decode_source(Path::new("x.mdx"), vec![b'o', b'k', 0xFF]).unwrap_err();
        assert!(matches!(err, MdxConvError::InvalidUtf8 { offset: 2, .. }));
    }

    #[tokio::test]
    async fn missing_file_is_fatal() {
        let err = load_source(Path::new("/definitely/not/here.mdx"))
            .await
            .unwrap_err();
        assert!(matches!(err, MdxConvError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_source(dir.path()).await.unwrap_err();
        assert!(matches!(err, MdxConvError::NotAFile { .. }));
    }
}
