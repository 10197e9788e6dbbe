use crate::SinkState;

/// Snapshot of sink counters, reported once the run is drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SinkView {
    pub state: SinkState,
    /// Distinct titles forwarded to output.
    pub printed: usize,
    /// Results suppressed because their title was already printed.
    pub duplicates: usize,
    pub errors: usize,
}
