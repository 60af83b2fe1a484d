//! Batch conversion API: emit articles as they complete.
//!
//! Unlike [`crate::convert::convert_to_dir`], which handles one document,
//! [`convert_stream`] converts many documents concurrently (bounded by
//! `config.concurrency`) and yields one item per document as soon as its
//! files are written. Items arrive in completion order, not input order.
//!
//! A failing document never stops the batch: its fatal error is downgraded to
//! a [`DocumentError`] item and the remaining documents carry on.

use crate::config::ConversionConfig;
use crate::convert::convert_to_dir;
use crate::error::DocumentError;
use crate::output::ArticleFiles;
use futures::stream::{self, StreamExt};
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio_stream::Stream;
use tracing::{info, warn};

/// A boxed stream of per-document results.
pub type DocumentStream = Pin<Box<dyn Stream<Item = Result<ArticleFiles, DocumentError>> + Send>>;

/// Convert every path in `paths`, writing each article under `out_dir`.
///
/// Progress events go to `config.progress_callback`: `on_batch_start` fires
/// immediately, `on_batch_complete` after the last document finishes.
///
/// # Example
/// ```rust,no_run
/// use mdxconv::{convert_stream, ConversionConfig};
/// use futures::StreamExt;
///
/// # #[tokio::main]
/// # async fn main() {
/// let config = ConversionConfig::default();
/// let mut stream = convert_stream(vec!["a.mdx", "b.mdx"], "dist/articles", &config);
/// while let Some(item) = stream.next().await {
///     match item {
///         Ok(a) => println!("{} → {}", a.title, a.dir.display()),
///         Err(e) => eprintln!("Error: {e}"),
///     }
/// }
/// # }
/// ```
pub fn convert_stream<I, P>(
    paths: I,
    out_dir: impl Into<PathBuf>,
    config: &ConversionConfig,
) -> DocumentStream
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let paths: Vec<PathBuf> = paths.into_iter().map(Into::into).collect();
    let out_dir = out_dir.into();
    let total = paths.len();
    info!("Starting batch conversion: {} document(s)", total);

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(total);
        if total == 0 {
            cb.on_batch_complete(0, 0);
        }
    }

    let finished = Arc::new(AtomicUsize::new(0));
    let succeeded = Arc::new(AtomicUsize::new(0));
    let concurrency = config.concurrency.max(1);
    let config = config.clone();

    let s = stream::iter(paths.into_iter().map(move |path| {
        let cfg = config.clone();
        let out_dir = out_dir.clone();
        let finished = Arc::clone(&finished);
        let succeeded = Arc::clone(&succeeded);
        async move {
            if let Some(ref cb) = cfg.progress_callback {
                cb.on_document_start(&path);
            }

            let result = convert_to_dir(&path, &out_dir, &cfg)
                .await
                .map_err(|e| DocumentError::from_fatal(path.clone(), &e));

            match &result {
                Ok(files) => {
                    succeeded.fetch_add(1, Ordering::SeqCst);
                    if let Some(ref cb) = cfg.progress_callback {
                        cb.on_document_complete(&path, files.markdown_len);
                    }
                }
                Err(e) => {
                    warn!("{}", e);
                    if let Some(ref cb) = cfg.progress_callback {
                        cb.on_document_error(&path, &e.to_string());
                    }
                }
            }

            if finished.fetch_add(1, Ordering::SeqCst) + 1 == total {
                let ok = succeeded.load(Ordering::SeqCst);
                info!("Batch complete: {}/{} document(s) converted", ok, total);
                if let Some(ref cb) = cfg.progress_callback {
                    cb.on_batch_complete(total, ok);
                }
            }

            result
        }
    }))
    .buffer_unordered(concurrency);

    Box::pin(s)
}
