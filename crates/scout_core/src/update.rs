use crate::{Effect, Msg, SinkModel};

/// Pure update function: applies a message to the sink and returns any effects.
///
/// Messages for a stream that has already closed are ignored.
pub fn update(mut model: SinkModel, msg: Msg) -> (SinkModel, Vec<Effect>) {
    let effects = match msg {
        Msg::ResultArrived(result) => {
            if !model.state().results_open() {
                return (model, Vec::new());
            }
            if model.accept_title(&result.title) {
                vec![Effect::Print(result)]
            } else {
                Vec::new()
            }
        }
        Msg::ErrorArrived(message) => {
            if !model.state().errors_open() {
                return (model, Vec::new());
            }
            model.count_error();
            vec![Effect::LogError(message)]
        }
        Msg::ResultsClosed => {
            let next = model.state().close_results();
            model.set_state(next);
            Vec::new()
        }
        Msg::ErrorsClosed => {
            let next = model.state().close_errors();
            model.set_state(next);
            Vec::new()
        }
    };

    (model, effects)
}
