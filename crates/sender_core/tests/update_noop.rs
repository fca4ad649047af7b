use sender_core::{update, FormState, Msg};

#[test]
fn tick_is_noop() {
    let state = FormState::new();
    let (next, effects) = update(state.clone(), Msg::Tick);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
