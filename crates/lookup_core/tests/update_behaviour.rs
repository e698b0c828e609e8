use std::sync::Once;

use lookup_core::{update, CoordinatorState, Effect, LookupOutcome, ManagedTab, Msg};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn request(state: CoordinatorState, url: &str) -> (CoordinatorState, Vec<Effect>) {
    update(state, Msg::LookupRequested(url.to_string()))
}

const TAB: ManagedTab = ManagedTab {
    tab_id: 7,
    window_id: Some(1),
};

#[test]
fn first_request_starts_immediately() {
    init_logging();
    let (state, effects) = request(CoordinatorState::new(), "https://d.example/a");

    assert_eq!(
        effects,
        vec![Effect::OpenOrUpdateTab {
            url: "https://d.example/a".to_string(),
            managed: None,
        }]
    );
    let view = state.view();
    assert!(view.in_flight);
    assert_eq!(view.queued, 0);
    assert!(!view.is_idle());
}

#[test]
fn requests_while_in_flight_are_queued() {
    init_logging();
    let (state, _) = request(CoordinatorState::new(), "https://d.example/a");
    let (state, effects) = request(state, "https://d.example/b");
    assert!(effects.is_empty());
    let (state, effects) = request(state, "https://d.example/c");
    assert!(effects.is_empty());

    assert_eq!(state.queue_len(), 2);
    assert!(state.is_in_flight());
}

#[test]
fn finishing_posts_continuation_instead_of_starting_next() {
    init_logging();
    let (state, _) = request(CoordinatorState::new(), "https://d.example/a");
    let (state, _) = request(state, "https://d.example/b");

    let (state, effects) = update(state, Msg::LookupFinished(LookupOutcome::Created(TAB)));
    assert_eq!(effects, vec![Effect::ResumeDrain]);
    assert!(!state.is_in_flight());
    assert_eq!(state.queue_len(), 1);
    assert_eq!(state.managed(), Some(TAB));

    let (state, effects) = update(state, Msg::Drain);
    assert_eq!(
        effects,
        vec![Effect::OpenOrUpdateTab {
            url: "https://d.example/b".to_string(),
            managed: Some(TAB),
        }]
    );
    assert!(state.is_in_flight());
}

#[test]
fn queue_is_drained_in_submission_order() {
    init_logging();
    let urls = ["https://d.example/1", "https://d.example/2", "https://d.example/3"];
    let mut state = CoordinatorState::new();
    let mut started = Vec::new();
    for url in urls {
        let (next, effects) = request(state, url);
        state = next;
        started.extend(effects);
    }

    loop {
        let (next, _) = update(state, Msg::LookupFinished(LookupOutcome::Reused));
        let (next, effects) = update(next, Msg::Drain);
        state = next;
        if effects.is_empty() {
            break;
        }
        started.extend(effects);
    }

    let order: Vec<_> = started
        .into_iter()
        .filter_map(|effect| match effect {
            Effect::OpenOrUpdateTab { url, .. } => Some(url),
            Effect::ResumeDrain => None,
        })
        .collect();
    assert_eq!(order, urls.map(String::from).to_vec());
    assert!(state.view().is_idle());
    assert_eq!(state.view().completed, 3);
}

#[test]
fn drain_while_in_flight_does_not_start_a_second_request() {
    init_logging();
    let (state, _) = request(CoordinatorState::new(), "https://d.example/a");
    let (state, _) = request(state, "https://d.example/b");

    let (state, effects) = update(state, Msg::Drain);
    assert!(effects.is_empty());
    assert_eq!(state.queue_len(), 1);
}

#[test]
fn removal_of_managed_tab_clears_handle() {
    init_logging();
    let (state, _) = request(CoordinatorState::new(), "https://d.example/a");
    let (state, _) = update(state, Msg::LookupFinished(LookupOutcome::Created(TAB)));

    let (state, effects) = update(state, Msg::TabRemoved(99));
    assert!(effects.is_empty());
    assert_eq!(state.managed(), Some(TAB));

    let (state, _) = update(state, Msg::TabRemoved(TAB.tab_id));
    assert_eq!(state.managed(), None);

    let (_, effects) = request(state, "https://d.example/b");
    assert_eq!(
        effects,
        vec![Effect::OpenOrUpdateTab {
            url: "https://d.example/b".to_string(),
            managed: None,
        }]
    );
}

#[test]
fn failures_clear_the_handle() {
    init_logging();
    for outcome in [LookupOutcome::Failed, LookupOutcome::CreatedWithoutId] {
        let (state, _) = request(CoordinatorState::new(), "https://d.example/a");
        let (state, _) = update(state, Msg::LookupFinished(LookupOutcome::Created(TAB)));
        let (state, _) = update(state, Msg::Drain);
        let (state, _) = request(state, "https://d.example/b");
        let (state, _) = update(state, Msg::LookupFinished(outcome));

        assert_eq!(state.managed(), None, "outcome {outcome:?}");
        assert!(!state.is_in_flight());
    }
}

#[test]
fn reuse_keeps_the_existing_handle() {
    init_logging();
    let (state, _) = request(CoordinatorState::new(), "https://d.example/a");
    let (state, _) = update(state, Msg::LookupFinished(LookupOutcome::Created(TAB)));
    let (state, _) = request(state, "https://d.example/a");
    let (state, _) = update(state, Msg::LookupFinished(LookupOutcome::Reused));

    assert_eq!(state.managed(), Some(TAB));
    assert_eq!(state.view().completed, 2);
}

#[test]
fn tab_closed_while_being_created_never_becomes_the_handle() {
    init_logging();
    let (state, _) = request(CoordinatorState::new(), "https://d.example/a");
    let (state, effects) = update(state, Msg::TabRemoved(TAB.tab_id));
    assert!(effects.is_empty());

    let (state, _) = update(state, Msg::LookupFinished(LookupOutcome::Created(TAB)));
    assert_eq!(state.managed(), None);

    let (_, effects) = update(state, Msg::Drain);
    assert!(effects.is_empty());
}

#[test]
fn removals_from_an_earlier_request_are_forgotten() {
    init_logging();
    let (state, _) = request(CoordinatorState::new(), "https://d.example/a");
    let (state, _) = update(state, Msg::TabRemoved(TAB.tab_id));
    let (state, _) = update(state, Msg::LookupFinished(LookupOutcome::Failed));
    let (state, _) = update(state, Msg::Drain);

    let (state, _) = request(state, "https://d.example/b");
    let (state, _) = update(state, Msg::LookupFinished(LookupOutcome::Created(TAB)));
    assert_eq!(state.managed(), Some(TAB));
}
