//! Concurrent page downloads for a resolved episode.

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;

use crate::api::MangaApi;
use crate::config::{Config, FailurePolicy};
use crate::download::task::DownloadTask;
use crate::error::{Error, Result};
use crate::output::create_page_bar;

/// Default number of pages downloaded at once.
pub const DEFAULT_MAX_CONCURRENT: usize = 16;

/// Fan-out behaviour.
#[derive(Debug, Clone)]
pub struct FanoutOptions {
    /// Upper bound on pages in flight.
    pub max_concurrent: usize,
    /// What a failed page does to its siblings.
    pub failure_policy: FailurePolicy,
    /// Draw a progress bar while downloading.
    pub show_progress: bool,
}

impl Default for FanoutOptions {
    fn default() -> Self {
        Self {
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            failure_policy: FailurePolicy::default(),
            show_progress: false,
        }
    }
}

impl FanoutOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_concurrent: config.options.max_concurrent_downloads,
            failure_policy: config.options.failure_policy,
            show_progress: config.options.show_downloads,
        }
    }
}

/// Outcome of an episode's page downloads, ordinals sorted ascending.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FanoutReport {
    pub downloaded: Vec<u32>,
    pub failed: Vec<(u32, String)>,
}

impl FanoutReport {
    /// Whether every page was written.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Download every task, at most `options.max_concurrent` at a time.
///
/// Returns once all tasks have finished. Under [`FailurePolicy::BestEffort`]
/// failed pages are logged and listed in the report; under
/// [`FailurePolicy::FailFast`] the first failure cancels the remaining pages
/// and is returned. Cancelling `cancel` stops in-flight fetches and yields
/// [`Error::Cancelled`].
pub async fn download_all(
    api: &MangaApi,
    tasks: Vec<DownloadTask>,
    options: &FanoutOptions,
    cancel: &CancellationToken,
) -> Result<FanoutReport> {
    let progress = options
        .show_progress
        .then(|| create_page_bar(tasks.len() as u64));

    // Fail-fast cancels this batch only, never the caller's token.
    let batch = cancel.child_token();
    let mut report = FanoutReport::default();
    let mut first_error = None;

    let mut results = stream::iter(tasks)
        .map(|task| {
            let batch = batch.clone();
            async move {
                let result = download_page(api, &task, &batch).await;
                (task.ordinal, result)
            }
        })
        .buffer_unordered(options.max_concurrent.max(1));

    while let Some((ordinal, result)) = results.next().await {
        if let Some(ref pb) = progress {
            pb.inc(1);
        }

        match result {
            Ok(()) => report.downloaded.push(ordinal),
            Err(Error::Cancelled) => {
                tracing::debug!("Page {} cancelled", ordinal);
                report.failed.push((ordinal, Error::Cancelled.to_string()));
            }
            Err(e) => {
                tracing::warn!("Failed to download page {}: {}", ordinal, e);
                report.failed.push((ordinal, e.to_string()));

                if options.failure_policy == FailurePolicy::FailFast && first_error.is_none() {
                    batch.cancel();
                    first_error = Some(e);
                }
            }
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    if let Some(e) = first_error {
        return Err(e);
    }
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }

    report.downloaded.sort_unstable();
    report.failed.sort_by_key(|(ordinal, _)| *ordinal);
    Ok(report)
}

/// Fetch one page and write it verbatim to its destination.
async fn download_page(
    api: &MangaApi,
    task: &DownloadTask,
    cancel: &CancellationToken,
) -> Result<()> {
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }

    let bytes = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(Error::Cancelled),
        result = api.download_image(&task.url) => result?,
    };

    tokio::fs::write(&task.destination, &bytes).await?;
    tracing::debug!(
        "Wrote page {} ({} bytes) to {}",
        task.ordinal,
        bytes.len(),
        task.destination.display()
    );

    Ok(())
}
