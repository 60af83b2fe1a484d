//! Pipeline stages for MDX-to-markdown/HTML conversion.
//!
//! Each submodule implements exactly one transformation step, as a total
//! function over text. Only [`input`] touches the filesystem.
//!
//! ## Data Flow
//!
//! ```text
//!                      ┌──▶ metadata (title, description)
//!                      │
//! input ──▶ literal ──▶ strip ──▶ blocks ──▶ links ──▶ postprocess
//! (read)    (protect)   (dialect)  (JSX)     (paths)   (whitespace)
//!                                                          │
//!                               ┌──────────────────────────┤
//!                               ▼                          ▼
//!                     literal::restore_markdown     wechat::render
//!                        (portable markdown)       (styled HTML)
//! ```
//!
//! 1. [`input`]   : read the source once; normalise line endings
//! 2. [`metadata`]: title/description from the raw source
//! 3. [`literal`] : swap fenced code for placeholders before any rewriting
//! 4. [`strip`]   : delete the preamble, imports and JSX comments
//! 5. [`blocks`]  : rewrite presentational JSX blocks via a fixed catalogue
//! 6. [`links`]   : absolutise root-relative image paths
//! 7. [`postprocess`]: canonicalise blank lines and the final newline
//! 8. [`wechat`]  : render the protected markdown to inline-styled HTML

pub mod blocks;
pub mod input;
pub mod links;
pub mod literal;
pub mod metadata;
pub mod postprocess;
pub mod strip;
pub mod wechat;
