//! Loading indicator driven by request lifecycles.

use super::action::{Action, ActionKind, Lifecycle};
use super::reducer::{Reducer, Slice};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpinnerState {
    pub is_loading: bool,
}

impl Slice for SpinnerState {}

/// Shows on any REQUEST, hides on any SUCCESS, FAILURE or COMPLETE.
///
/// Requests are not counted: when two overlap, the first to finish hides
/// the spinner while the other is still in flight.
pub struct SpinnerReducer;

impl Reducer for SpinnerReducer {
    type State = SpinnerState;

    fn reduce(&self, state: Self::State, action: &Action) -> Self::State {
        match action.kind {
            ActionKind::SetSpinner => return SpinnerState { is_loading: true },
            ActionKind::ResetSpinner => return SpinnerState { is_loading: false },
            _ => {}
        }

        match action.phase() {
            Some(Lifecycle::Requested) => SpinnerState { is_loading: true },
            Some(phase) if phase.is_terminal() => SpinnerState { is_loading: false },
            _ => state,
        }
    }
}
