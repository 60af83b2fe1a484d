//! # mdxconv
//!
//! Convert enriched-markdown (MDX) articles into publishable artifacts for
//! platforms that accept neither JSX components nor external stylesheets.
//!
//! ## Why this crate?
//!
//! Documentation sites written in MDX mix plain markdown with imports, JSX
//! comments, `<Callout>`/`<Steps>` components and hand-styled `<div>`
//! diagrams. None of that survives a paste into a blogging platform. This
//! crate rewrites one article into:
//!
//! * **portable markdown** (`zhihu.md`, `juejin.md`): only standard syntax;
//! * **inline-styled HTML** (`wechat.html`): every element carries its own
//!   `style` attribute;
//! * a **promotional summary** (`summary.txt`) chosen from the title;
//! * a **cover document** (`cover.html`) themed by the title.
//!
//! ## Pipeline Overview
//!
//! ```text
//! MDX
//!  │
//!  ├─ 1. Input     read once, normalise line endings
//!  ├─ 2. Metadata  title (preamble → heading → file stem), description
//!  ├─ 3. Protect   fenced code → opaque placeholders
//!  ├─ 4. Strip     preamble, imports, JSX comments
//!  ├─ 5. Blocks    Callout, Steps, curated diagrams, generic wrappers
//!  ├─ 6. Links     root-relative images → absolute URLs
//!  ├─ 7. Tidy      blank-line canonicalisation
//!  └─ 8. Targets   markdown restore │ styled HTML │ summary │ cover
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mdxconv::{convert_to_dir, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let files = convert_to_dir("pages/why-claude-md.mdx", "dist/articles", &config).await?;
//!     println!("{} → {}", files.title, files.dir.display());
//!     println!("{}", files.summary);
//!     Ok(())
//! }
//! ```
//!
//! The text core is also available without any I/O:
//!
//! ```rust
//! use mdxconv::{convert_str, ConversionConfig};
//!
//! let out = convert_str("# Hello\n\n<Callout type=\"info\">hi</Callout>\n", "hello", &ConversionConfig::default());
//! assert!(out.markdown.contains("> 💡 **提示**"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `mdxconv` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! mdxconv = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod artifacts;
pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod stream;
pub mod templates;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use artifacts::{cover_theme, generate_cover, generate_summary, ThemeProfile};
pub use config::{ConversionConfig, ConversionConfigBuilder, OutputFormat};
pub use convert::{convert, convert_str, convert_sync, convert_to_dir, inspect};
pub use error::{DocumentError, MdxConvError};
pub use output::{ArticleFiles, ConversionOutput, ConversionStats, DocumentMetadata, TitleSource};
pub use pipeline::blocks::{BlockKind, BlockStats};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
pub use stream::{convert_stream, DocumentStream};
