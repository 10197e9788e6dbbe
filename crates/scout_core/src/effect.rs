use crate::ScrapeResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// First sighting of a title; write it to output.
    Print(ScrapeResult),
    LogError(String),
}
