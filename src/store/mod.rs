//! Centralized state: lifecycle actions, reducers and the store container.
//!
//! # Architecture
//!
//! ```text
//! action creator ──→ Store::dispatch ──→ RootReducer ──→ AppState
//!        ↑                                    │
//!        └──────────── listeners ←────────────┘
//! ```
//!
//! - **Action**: a lifecycle-tagged message (REQUEST, SUCCESS, FAILURE, COMPLETE)
//! - **Reducer**: pure function that transforms one slice
//! - **AppState**: spinner, alert and one cached list per domain

mod action;
mod alert;
mod container;
mod domain;
mod reducer;
mod resource;
mod spinner;
mod state;

pub use action::{
    success_message, Action, ActionKind, Lifecycle, MessageType, Payload, Verb,
    SOMETHING_WENT_WRONG,
};
pub use alert::{AlertReducer, AlertState};
pub use container::{Store, Subscription};
pub use domain::Domain;
pub use reducer::{Reducer, Slice};
pub use resource::{FetchStatus, RequestMetadata, ResourceReducer, ResourceSlice};
pub use spinner::{SpinnerReducer, SpinnerState};
pub use state::{AppState, RootReducer};
