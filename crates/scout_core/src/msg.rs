use crate::ScrapeResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A worker produced a result.
    ResultArrived(ScrapeResult),
    /// A worker failed; carries the rendered error message.
    ErrorArrived(String),
    /// The result stream closed.
    ResultsClosed,
    /// The error stream closed.
    ErrorsClosed,
}
