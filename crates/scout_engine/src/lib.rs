//! Scout engine: fetching, document queries, and the concurrent scrape pipeline.
mod fetch;
mod orchestrator;
mod query;
mod sink;
mod types;
pub mod worker;

pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use orchestrator::{Orchestrator, OrchestratorSettings, ScrapeStreams, MAX_RESULTS_PER_TASK};
pub use query::{parse_document, Document, FragmentSelector, QueryError};
pub use sink::{consume, ConsoleReporter, Reporter};
pub use types::{FailureKind, FetchError, FetchOutput, ScrapeError};
pub use worker::WorkerOutcome;
