use lookup_core::{update, CoordinatorState, Msg};

#[test]
fn drain_on_empty_queue_is_noop() {
    let state = CoordinatorState::new();
    let (next, effects) = update(state.clone(), Msg::Drain);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
