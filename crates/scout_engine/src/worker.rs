use scout_core::{ScrapeResult, Task};
use scout_logging::{scout_debug, scout_warn};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::query::{parse_document, FragmentSelector};
use crate::{FailureKind, FetchOutput, Fetcher, ScrapeError};

/// How a single worker invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerOutcome {
    /// Zero or more results were emitted.
    Completed { results: usize },
    /// Exactly one error was emitted.
    Failed,
}

/// Fetch, query and filter one task, then emit its results or its error.
pub async fn execute(
    fetcher: &dyn Fetcher,
    task: &Task,
    cancel: &CancellationToken,
    results: &mpsc::Sender<ScrapeResult>,
    errors: &mpsc::Sender<ScrapeError>,
) -> WorkerOutcome {
    match scrape(fetcher, task, cancel).await {
        Ok(found) => {
            let count = found.len();
            for result in found {
                if results.send(result).await.is_err() {
                    scout_warn!("result stream closed early for {}", task.source_url());
                    break;
                }
            }
            scout_debug!("{} yielded {} result(s)", task.source_url(), count);
            WorkerOutcome::Completed { results: count }
        }
        Err(err) => {
            scout_debug!("{} failed: {}", task.source_url(), err.kind);
            let _ = errors.send(err).await;
            WorkerOutcome::Failed
        }
    }
}

/// Runs the fetch and extraction stages without emitting anything.
pub async fn scrape(
    fetcher: &dyn Fetcher,
    task: &Task,
    cancel: &CancellationToken,
) -> Result<Vec<ScrapeResult>, ScrapeError> {
    let url = task.source_url();
    scout_debug!("fetching {}", url);
    let output = fetcher
        .fetch(url, cancel)
        .await
        .map_err(|err| ScrapeError::from_fetch(url, err))?;
    extract(task, &output)
}

/// Parses a fetched body and applies the task's selector and filter.
///
/// Results are attributed to the task url, not the post-redirect url.
pub fn extract(task: &Task, output: &FetchOutput) -> Result<Vec<ScrapeResult>, ScrapeError> {
    let url = task.source_url();
    let parse_err = |err: crate::QueryError| ScrapeError::new(url, FailureKind::Parse, err.to_string());

    let selector = FragmentSelector::parse(task.selector()).map_err(parse_err)?;
    let document = parse_document(&output.bytes, output.content_type.as_deref())
        .map_err(parse_err)?;

    let extraction = task.extraction();
    Ok(document
        .fragments(&selector)
        .filter(|fragment| extraction.accepts(fragment))
        .map(|title| ScrapeResult::new(title, url))
        .collect())
}
