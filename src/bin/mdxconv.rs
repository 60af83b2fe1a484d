//! CLI binary for mdxconv.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use mdxconv::config::{DEFAULT_BASE_URL, DEFAULT_OUTPUT_DIR};
use mdxconv::{
    convert, convert_stream, inspect, ArticleFiles, ConversionConfig, ConversionProgressCallback,
    OutputFormat, ProgressCallback,
};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar for the batch plus a log line per
/// article. Articles may finish out of order.
struct CliProgressCallback {
    bar: ProgressBar,
    /// Per-document wall-clock start times for elapsed reporting.
    start_times: Mutex<HashMap<PathBuf, Instant>>,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_batch_start

        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} articles  \
             ⏱ {elapsed_precise}  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(style);
        bar.set_prefix("Converting");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            start_times: Mutex::new(HashMap::new()),
        })
    }

    fn elapsed_secs(&self, path: &Path) -> f64 {
        self.start_times
            .lock()
            .unwrap()
            .remove(path)
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total_documents: usize) {
        self.bar.set_length(total_documents as u64);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Converting {total_documents} article(s)…"))
        ));
    }

    fn on_document_start(&self, path: &Path) {
        self.start_times
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), Instant::now());
        self.bar.set_message(display_name(path));
    }

    fn on_document_complete(&self, path: &Path, markdown_len: usize) {
        let secs = self.elapsed_secs(path);
        self.bar.println(format!(
            "  {} {:<40}  {:<12}  {}",
            green("✓"),
            display_name(path),
            dim(&format!("{markdown_len:>6} bytes")),
            dim(&format!("{:.2}s", secs)),
        ));
        self.bar.inc(1);
    }

    fn on_document_error(&self, path: &Path, error: &str) {
        let secs = self.elapsed_secs(path);

        // Keep the log line to one terminal row.
        let first_line = error.lines().next().unwrap_or(error);
        let msg: String = if first_line.chars().count() > 80 {
            format!("{}\u{2026}", first_line.chars().take(79).collect::<String>())
        } else {
            first_line.to_string()
        };

        self.bar.println(format!(
            "  {} {:<40}  {}  {}",
            red("✗"),
            display_name(path),
            red(&msg),
            dim(&format!("{:.2}s", secs)),
        ));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, total_documents: usize, success_count: usize) {
        let failed = total_documents.saturating_sub(success_count);
        self.bar.finish_and_clear();

        if failed == 0 {
            eprintln!(
                "{} {} article(s) converted successfully",
                green("✔"),
                bold(&success_count.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} article(s) converted  ({} failed)",
                if failed == total_documents {
                    red("✘")
                } else {
                    cyan("⚠")
                },
                bold(&success_count.to_string()),
                total_documents,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert one article to every format
  mdxconv pages/config/why-claude-md.mdx

  # Convert a whole section, 8 at a time
  mdxconv pages/config/*.mdx -c 8

  # Portable markdown only, into a custom folder
  mdxconv --format markdown -o out/ article.mdx

  # Images hosted elsewhere
  mdxconv --base-url https://docs.example.org article.mdx

  # Print every artifact as JSON instead of writing files
  mdxconv --json article.mdx > article.json

  # Title and description only
  mdxconv --inspect-only article.mdx

OUTPUT LAYOUT:
  <output-dir>/<file-stem>/
    zhihu.md       portable markdown           (format: all, markdown)
    juejin.md      portable markdown           (format: all, markdown)
    wechat.html    inline-styled article       (format: all, wechat)
    summary.txt    promotional summary         (format: all, wechat)
    cover.html     2.35:1 cover, screenshot it (format: all, wechat)

ENVIRONMENT VARIABLES:
  MDXCONV_OUTPUT_DIR    Default for --output-dir
  MDXCONV_FORMAT        Default for --format
  MDXCONV_BASE_URL      Default for --base-url
  MDXCONV_CONCURRENCY   Default for --concurrency
  RUST_LOG              Override log filter (e.g. mdxconv=debug)
"#;

/// Convert MDX articles into portable markdown, inline-styled HTML and cover art.
#[derive(Parser, Debug)]
#[command(
    name = "mdxconv",
    version,
    about = "Convert MDX articles into portable markdown, inline-styled HTML and cover art",
    long_about = "Convert enriched-markdown (MDX) articles into artifacts for platforms that \
accept neither JSX components nor external stylesheets: standard markdown, a self-contained \
inline-styled HTML article, a promotional summary and a themed cover document.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// One or more MDX source files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory that receives one folder per article.
    #[arg(short, long, env = "MDXCONV_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Which artifacts to write: all, markdown (md), wechat (html).
    #[arg(
        short,
        long,
        env = "MDXCONV_FORMAT",
        value_parser = OutputFormat::from_str,
        default_value = "all"
    )]
    format: OutputFormat,

    /// Site address prepended to root-relative image paths.
    #[arg(long, env = "MDXCONV_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Number of articles converted at once.
    #[arg(short, long, env = "MDXCONV_CONCURRENCY", default_value_t = 4)]
    concurrency: usize,

    /// Print the full ConversionOutput as JSON (single input) instead of writing files.
    #[arg(long, env = "MDXCONV_JSON")]
    json: bool,

    /// Print title and description only, no conversion.
    #[arg(long)]
    inspect_only: bool,

    /// Disable progress bar.
    #[arg(long, env = "MDXCONV_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MDXCONV_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MDXCONV_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO-level library logs.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && !cli.inspect_only;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        for path in &cli.inputs {
            let meta = inspect(path)
                .await
                .with_context(|| format!("Failed to inspect {}", path.display()))?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&meta).context("Failed to serialize metadata")?
                );
            } else {
                println!("File:         {}", path.display());
                println!("Title:        {} ({:?})", meta.title, meta.title_source);
                if let Some(ref d) = meta.description {
                    println!("Description:  {}", d);
                }
            }
        }
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        let cb = CliProgressCallback::new();
        Some(cb as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb)?;

    // ── JSON mode: one document, nothing written ─────────────────────────
    if cli.json {
        if cli.inputs.len() != 1 {
            anyhow::bail!(
                "--json takes exactly one input (got {})",
                cli.inputs.len()
            );
        }
        let output = convert(&cli.inputs[0], &config)
            .await
            .context("Conversion failed")?;
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
        return Ok(());
    }

    // ── Run conversion ───────────────────────────────────────────────────
    let total = cli.inputs.len();
    let mut converted: Vec<ArticleFiles> = Vec::with_capacity(total);
    let mut failures = Vec::new();

    let mut stream = convert_stream(cli.inputs.clone(), &cli.output_dir, &config);
    while let Some(item) = stream.next().await {
        match item {
            Ok(files) => converted.push(files),
            Err(e) => failures.push(e),
        }
    }

    if !cli.quiet {
        for files in &converted {
            print_article(files, !show_progress);
        }
    }
    for e in &failures {
        eprintln!("{} {}", red("error:"), e);
    }

    if !failures.is_empty() {
        anyhow::bail!("{} of {} article(s) failed", failures.len(), total);
    }
    Ok(())
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder()
        .base_url(cli.base_url.clone())
        .format(cli.format)
        .concurrency(cli.concurrency);

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Print where an article went and its summary text.
fn print_article(files: &ArticleFiles, with_files: bool) {
    println!("{} {}", green("✔"), bold(&files.title));
    println!("   {} {}", dim("→"), files.dir.display());
    if with_files {
        for f in &files.files {
            println!("     {}", dim(&display_name(f)));
        }
    }
    println!("   📝 简介内容:\n   {}\n", files.summary);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_accepts_library_aliases() {
        let cli = Cli::try_parse_from(["mdxconv", "-f", "md", "a.mdx"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Markdown);
        let cli = Cli::try_parse_from(["mdxconv", "--format", "html", "a.mdx"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Wechat);
        assert!(Cli::try_parse_from(["mdxconv", "-f", "pdf", "a.mdx"]).is_err());
    }
}
