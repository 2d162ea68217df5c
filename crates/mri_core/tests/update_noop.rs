use mri_core::{update, AppState, Msg};

#[test]
fn idle_ignores_actions_it_does_not_offer() {
    let state = AppState::new();
    for msg in [
        Msg::AnalyzeClicked,
        Msg::RetryClicked,
        Msg::ExportClicked,
        Msg::ResetClicked,
        Msg::DismissError,
    ] {
        let (mut next, effects) = update(state.clone(), msg);
        assert_eq!(state, next);
        assert!(effects.is_empty());
        assert!(!next.consume_dirty());
    }
}

#[test]
fn cancelled_picker_is_noop() {
    let state = AppState::new();
    let (mut next, effects) = update(state.clone(), Msg::FileSelected(None));

    assert_eq!(state, next);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}
