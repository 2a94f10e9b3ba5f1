//! Reducer trait for the store.

use super::action::Action;

/// Marker trait for state slices.
///
/// Slices should be:
/// - Immutable (Clone to create new states)
/// - Comparable (PartialEq for detecting changes)
/// - Resettable (Default is the initial state restored on logout)
pub trait Slice: Clone + PartialEq + Default + Send + 'static {}

/// Reducer transforms a slice based on dispatched actions.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Action) -> State. Actions a reducer
/// does not care about return the state unchanged.
pub trait Reducer {
    /// The slice this reducer operates on.
    type State: Slice;

    /// Process an action and return the new state.
    fn reduce(&self, state: Self::State, action: &Action) -> Self::State;
}
