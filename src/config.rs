//! Configuration types for MDX article conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs across concurrent document conversions and to
//! log exactly what a run was asked to do.

use crate::error::MdxConvError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Site address prepended to root-relative image paths.
pub const DEFAULT_BASE_URL: &str = "https://claude-code-academy.com";

/// Directory the CLI writes article folders into when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "dist/articles";

/// Configuration for converting one or more MDX articles.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use mdxconv::{ConversionConfig, OutputFormat};
///
/// let config = ConversionConfig::builder()
///     .base_url("https://docs.example.org")
///     .format(OutputFormat::Markdown)
///     .build()
///     .unwrap();
/// assert_eq!(config.base_url, "https://docs.example.org");
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Absolute site address used to rewrite root-relative image references.
    /// Default: [`DEFAULT_BASE_URL`]. A trailing `/` is ignored.
    pub base_url: String,

    /// Which artifacts [`crate::convert::convert_to_dir`] writes. Default: all.
    pub format: OutputFormat,

    /// Number of documents converted at once in batch mode. Default: 4.
    ///
    /// Each document owns its own working text and placeholder table, so
    /// conversions never contend; the bound only limits open files.
    pub concurrency: usize,

    /// Optional per-document progress events for batch conversions.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            format: OutputFormat::default(),
            concurrency: 4,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("base_url", &self.base_url)
            .field("format", &self.format)
            .field("concurrency", &self.concurrency)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }

    /// The base address without a trailing slash.
    pub fn base_url_trimmed(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.config.format = format;
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n.max(1);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, MdxConvError> {
        let c = &self.config;
        let base = c.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(MdxConvError::InvalidConfig(format!(
                "base URL must be absolute http(s), got '{}'",
                c.base_url
            )));
        }
        if c.concurrency == 0 {
            return Err(MdxConvError::InvalidConfig(
                "Concurrency must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// The subset of artifacts written for each article.
///
/// | Format     | Files                                        |
/// |------------|----------------------------------------------|
/// | `All`      | every file below                             |
/// | `Markdown` | `zhihu.md`, `juejin.md`                      |
/// | `Wechat`   | `wechat.html`, `summary.txt`, `cover.html`   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Portable markdown and the styled bundle. (default)
    #[default]
    All,
    /// Portable markdown only.
    Markdown,
    /// Styled HTML plus the summary and cover.
    Wechat,
}

impl OutputFormat {
    pub fn includes_markdown(self) -> bool {
        matches!(self, OutputFormat::All | OutputFormat::Markdown)
    }

    pub fn includes_wechat(self) -> bool {
        matches!(self, OutputFormat::All | OutputFormat::Wechat)
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = MdxConvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(OutputFormat::All),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "wechat" | "html" => Ok(OutputFormat::Wechat),
            other => Err(MdxConvError::InvalidConfig(format!(
                "unknown output format '{other}' (expected all, markdown or wechat)"
            ))),
        }
    }
}
