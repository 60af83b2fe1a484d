//! Error types for the mdxconv library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`MdxConvError`]: **Fatal**: the conversion of a document cannot
//!   proceed at all (missing source file, unreadable bytes, output directory
//!   not writable). Returned as `Err(MdxConvError)` from the top-level
//!   `convert*` functions.
//!
//! * [`DocumentError`]: **Non-fatal**: one document in a batch failed but the
//!   others are fine. Yielded by [`crate::stream::convert_stream`] so callers
//!   can report partial success instead of aborting the whole batch.
//!
//! The text-transformation stages themselves never fail: a presentational block
//! that does not match its signature degrades to generic wrapper handling, and
//! missing metadata falls back to defaults. Failures are confined to I/O.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the mdxconv library.
#[derive(Debug, Error)]
pub enum MdxConvError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Source file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The path exists but names a directory or other non-file entry.
    #[error("Not a regular file: '{path}'")]
    NotAFile { path: PathBuf },

    /// The file was read but is not valid UTF-8 text.
    #[error("Source '{path}' is not valid UTF-8 (invalid byte at offset {offset})")]
    InvalidUtf8 { path: PathBuf, offset: usize },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create the article directory or write one of its files.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single document within a batch.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum DocumentError {
    /// The source could not be read or decoded.
    #[error("{path}: read failed: {detail}")]
    ReadFailed { path: PathBuf, detail: String },

    /// One of the article files could not be written.
    #[error("{path}: write failed: {detail}")]
    WriteFailed { path: PathBuf, detail: String },
}

impl DocumentError {
    /// Classify a fatal single-document error for batch reporting.
    pub fn from_fatal(path: PathBuf, err: &MdxConvError) -> Self {
        match err {
            MdxConvError::OutputWriteFailed { .. } => DocumentError::WriteFailed {
                path,
                detail: err.to_string(),
            },
            _ => DocumentError::ReadFailed {
                path,
                detail: err.to_string(),
            },
        }
    }

    /// The source path this error refers to.
    pub fn path(&self) -> &PathBuf {
        match self {
            DocumentError::ReadFailed { path, .. } | DocumentError::WriteFailed { path, .. } => {
                path
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_not_found_display() {
        let e = MdxConvError::FileNotFound {
            path: PathBuf::from("pages/missing.mdx"),
        };
        let msg = e.to_string();
        assert!(msg.contains("pages/missing.mdx"), "got: {msg}");
    }

    #[test]
    fn invalid_utf8_display() {
        let e = MdxConvError::InvalidUtf8 {
            path: PathBuf::from("a.mdx"),
            offset: 17,
        };
        assert!(e.to_string().contains("offset 17"));
    }

    #[test]
    fn write_failure_classified_as_write() {
        let fatal = MdxConvError::OutputWriteFailed {
            path: PathBuf::from("dist/articles/a/zhihu.md"),
            source: std::io::Error::other("disk full"),
        };
        let e = DocumentError::from_fatal(PathBuf::from("a.mdx"), &fatal);
        assert!(matches!(e, DocumentError::WriteFailed { .. }));
        assert!(e.to_string().contains("disk full"));
        assert_eq!(e.path(), &PathBuf::from("a.mdx"));
    }

    #[test]
    fn read_failure_classified_as_read() {
        let fatal = MdxConvError::FileNotFound {
            path: PathBuf::from("b.mdx"),
        };
        let e = DocumentError::from_fatal(PathBuf::from("b.mdx"), &fatal);
        assert!(matches!(e, DocumentError::ReadFailed { .. }));
    }
}
