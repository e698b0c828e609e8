use crate::{CoordinatorState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: CoordinatorState, msg: Msg) -> (CoordinatorState, Vec<Effect>) {
    let effects = match msg {
        Msg::LookupRequested(url) => {
            state.enqueue(url);
            start_next(&mut state)
        }
        Msg::Drain => start_next(&mut state),
        Msg::LookupFinished(outcome) => {
            state.finish(outcome);
            // Never start the next request from here; the runner posts a
            // continuation so draining does not recurse.
            vec![Effect::ResumeDrain]
        }
        Msg::TabRemoved(tab_id) => {
            state.forget_tab(tab_id);
            Vec::new()
        }
    };

    (state, effects)
}

fn start_next(state: &mut CoordinatorState) -> Vec<Effect> {
    match state.start_next() {
        Some((url, managed)) => vec![Effect::OpenOrUpdateTab { url, managed }],
        None => Vec::new(),
    }
}
