use std::collections::HashSet;

use crate::view_model::SinkView;

/// Which input streams the sink is still waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SinkState {
    #[default]
    WaitingBoth,
    /// The error stream has closed.
    WaitingResultsOnly,
    /// The result stream has closed.
    WaitingErrorsOnly,
    Drained,
}

impl SinkState {
    pub fn results_open(self) -> bool {
        matches!(self, SinkState::WaitingBoth | SinkState::WaitingResultsOnly)
    }

    pub fn errors_open(self) -> bool {
        matches!(self, SinkState::WaitingBoth | SinkState::WaitingErrorsOnly)
    }

    pub(crate) fn close_results(self) -> Self {
        match self {
            SinkState::WaitingBoth => SinkState::WaitingErrorsOnly,
            SinkState::WaitingResultsOnly | SinkState::Drained => SinkState::Drained,
            SinkState::WaitingErrorsOnly => SinkState::WaitingErrorsOnly,
        }
    }

    pub(crate) fn close_errors(self) -> Self {
        match self {
            SinkState::WaitingBoth => SinkState::WaitingResultsOnly,
            SinkState::WaitingErrorsOnly | SinkState::Drained => SinkState::Drained,
            SinkState::WaitingResultsOnly => SinkState::WaitingResultsOnly,
        }
    }
}

/// Titles already printed during this run. Grows monotonically.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeenTitles {
    titles: HashSet<String>,
}

impl SeenTitles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check-and-insert; true only the first time a title is offered.
    pub fn insert(&mut self, title: &str) -> bool {
        if self.titles.contains(title) {
            return false;
        }
        self.titles.insert(title.to_owned())
    }

    pub fn contains(&self, title: &str) -> bool {
        self.titles.contains(title)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SinkModel {
    state: SinkState,
    seen: SeenTitles,
    printed: usize,
    duplicates: usize,
    errors: usize,
}

impl SinkModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SinkState {
        self.state
    }

    pub fn seen(&self) -> &SeenTitles {
        &self.seen
    }

    pub fn is_drained(&self) -> bool {
        self.state == SinkState::Drained
    }

    pub fn view(&self) -> SinkView {
        SinkView {
            state: self.state,
            printed: self.printed,
            duplicates: self.duplicates,
            errors: self.errors,
        }
    }

    pub(crate) fn set_state(&mut self, state: SinkState) {
        self.state = state;
    }

    /// Records a result; returns whether it should be printed.
    pub(crate) fn accept_title(&mut self, title: &str) -> bool {
        if self.seen.insert(title) {
            self.printed += 1;
            true
        } else {
            self.duplicates += 1;
            false
        }
    }

    pub(crate) fn count_error(&mut self) {
        self.errors += 1;
    }
}
