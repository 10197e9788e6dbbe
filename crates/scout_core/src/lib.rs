//! Scout core: task definitions and the pure deduplicating sink state machine.
mod effect;
mod msg;
mod state;
mod task;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{SeenTitles, SinkModel, SinkState};
pub use task::{Extraction, KeywordFilter, ScrapeResult, Task, TaskError};
pub use update::update;
pub use view_model::SinkView;
