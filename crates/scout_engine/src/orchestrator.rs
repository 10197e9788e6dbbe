use std::sync::Arc;
use std::time::Duration;

use scout_core::{ScrapeResult, Task};
use scout_logging::{scout_debug, scout_error, scout_info, scout_warn};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::worker::{self, WorkerOutcome};
use crate::{FailureKind, FetchSettings, Fetcher, ReqwestFetcher, ScrapeError};

/// Largest accepted `results_per_task`.
pub const MAX_RESULTS_PER_TASK: usize = 1024;

/// Ceiling on either channel's buffer, however many tasks or slots are requested.
const MAX_CHANNEL_CAPACITY: usize = 1 << 16;

#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
    /// Shared deadline for every worker of one run.
    pub timeout: Duration,
    /// Result channel slots reserved per task.
    pub results_per_task: usize,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            results_per_task: 10,
        }
    }
}

/// The two merged output streams of a run. Each closes independently once
/// every worker has terminated.
pub struct ScrapeStreams {
    pub results: mpsc::Receiver<ScrapeResult>,
    pub errors: mpsc::Receiver<ScrapeError>,
}

#[derive(Clone)]
pub struct Orchestrator {
    fetcher: Arc<dyn Fetcher>,
    settings: OrchestratorSettings,
}

impl Orchestrator {
    pub fn new(fetcher: Arc<dyn Fetcher>, settings: OrchestratorSettings) -> Self {
        Self { fetcher, settings }
    }

    pub fn with_reqwest(fetch: FetchSettings, settings: OrchestratorSettings) -> Self {
        Self::new(Arc::new(ReqwestFetcher::new(fetch)), settings)
    }

    /// Spawns one worker per task and returns the merged streams.
    ///
    /// Must be called from within a tokio runtime.
    pub fn run(&self, tasks: Vec<Task>) -> ScrapeStreams {
        let task_count = tasks.len();
        let (result_tx, result_rx) =
            mpsc::channel(channel_capacity(task_count, self.settings.results_per_task));
        let (error_tx, error_rx) = mpsc::channel(channel_capacity(task_count, 1));

        let cancel = CancellationToken::new();
        spawn_deadline(cancel.clone(), self.settings.timeout);

        scout_info!(
            "starting {} worker(s) with a {:?} deadline",
            task_count,
            self.settings.timeout
        );
        let mut workers = JoinSet::new();
        for (index, task) in tasks.iter().cloned().enumerate() {
            let fetcher = self.fetcher.clone();
            let cancel = cancel.clone();
            let result_tx = result_tx.clone();
            let error_tx = error_tx.clone();
            workers.spawn(async move {
                let outcome =
                    worker::execute(fetcher.as_ref(), &task, &cancel, &result_tx, &error_tx).await;
                (index, outcome)
            });
        }

        tokio::spawn(supervise(workers, tasks, cancel, result_tx, error_tx));

        ScrapeStreams {
            results: result_rx,
            errors: error_rx,
        }
    }
}

fn channel_capacity(task_count: usize, per_task: usize) -> usize {
    task_count
        .saturating_mul(per_task)
        .clamp(1, MAX_CHANNEL_CAPACITY)
}

fn spawn_deadline(cancel: CancellationToken, timeout: Duration) {
    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(timeout) => {
                scout_warn!("deadline of {:?} elapsed; cancelling outstanding fetches", timeout);
                cancel.cancel();
            }
            _ = cancel.cancelled() => {}
        }
    });
}

/// Waits for every worker, reports workers that never returned, then closes
/// both streams by dropping the last senders.
async fn supervise(
    mut workers: JoinSet<(usize, WorkerOutcome)>,
    tasks: Vec<Task>,
    cancel: CancellationToken,
    result_tx: mpsc::Sender<ScrapeResult>,
    error_tx: mpsc::Sender<ScrapeError>,
) {
    let mut finished = vec![false; tasks.len()];
    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok((index, outcome)) => {
                finished[index] = true;
                scout_debug!("worker {} finished: {:?}", index, outcome);
            }
            Err(err) => scout_error!("worker task ended abnormally: {}", err),
        }
    }

    for (task, _) in tasks.iter().zip(&finished).filter(|(_, done)| !**done) {
        let err = ScrapeError::new(
            task.source_url(),
            FailureKind::Panicked,
            "worker terminated without reporting",
        );
        let _ = error_tx.send(err).await;
    }

    // Stops the deadline timer; every worker is already done.
    cancel.cancel();
    scout_info!("all {} worker(s) finished", tasks.len());
    drop(result_tx);
    drop(error_tx);
}
