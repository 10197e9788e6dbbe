use std::io::{self, Write};

use scout_core::{update, Effect, Msg, ScrapeResult, SinkModel, SinkView};
use scout_logging::{scout_error, scout_warn};

use crate::ScrapeStreams;

/// Output side of the sink: where first-seen results and errors go.
pub trait Reporter: Send {
    fn result(&mut self, result: &ScrapeResult);
    fn error(&mut self, message: &str);
}

/// Writes one `"<title> (<url>)"` line per result and logs errors.
pub struct ConsoleReporter<W: Write + Send> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write + Send> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Reporter for ConsoleReporter<W> {
    fn result(&mut self, result: &ScrapeResult) {
        if let Err(err) = writeln!(self.out, "{result}") {
            scout_warn!("failed to write result: {}", err);
        }
    }

    fn error(&mut self, message: &str) {
        scout_error!("Error: {}", message);
    }
}

/// Drains both streams, printing each distinct title once and every error.
///
/// Returns once both streams have closed.
pub async fn consume(streams: ScrapeStreams, reporter: &mut dyn Reporter) -> SinkView {
    let ScrapeStreams {
        mut results,
        mut errors,
    } = streams;
    let mut model = SinkModel::new();

    while !model.is_drained() {
        let state = model.state();
        let msg = tokio::select! {
            received = results.recv(), if state.results_open() => match received {
                Some(result) => Msg::ResultArrived(result),
                None => Msg::ResultsClosed,
            },
            received = errors.recv(), if state.errors_open() => match received {
                Some(err) => Msg::ErrorArrived(err.to_string()),
                None => Msg::ErrorsClosed,
            },
            else => break,
        };

        let (next, effects) = update(model, msg);
        model = next;
        for effect in effects {
            match effect {
                Effect::Print(result) => reporter.result(&result),
                Effect::LogError(message) => reporter.error(&message),
            }
        }
    }

    model.view()
}
