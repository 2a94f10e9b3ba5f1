//! Success/failure banner derived from lifecycle actions.

use super::action::{Action, ActionKind, Lifecycle, MessageType, Payload};
use super::reducer::{Reducer, Slice};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlertState {
    pub message_type: Option<MessageType>,
    pub message_text: String,
}

impl Slice for AlertState {}

impl AlertState {
    pub fn is_empty(&self) -> bool {
        self.message_type.is_none() && self.message_text.is_empty()
    }

    fn banner(message_type: MessageType, message_text: &str) -> Self {
        Self {
            message_type: Some(message_type),
            message_text: message_text.to_string(),
        }
    }
}

pub struct AlertReducer;

impl Reducer for AlertReducer {
    type State = AlertState;

    fn reduce(&self, state: Self::State, action: &Action) -> Self::State {
        match (&action.kind, &action.payload) {
            (
                ActionKind::SetAlert,
                Some(Payload::Alert {
                    message_type,
                    message_text,
                }),
            ) => return AlertState::banner(*message_type, message_text),
            (ActionKind::SetAlert, _) => return state,
            (ActionKind::ResetAlert, _) | (ActionKind::Unmount { .. }, _) => {
                return AlertState::default()
            }
            _ => {}
        }

        // FAILURE is checked before SUCCESS; either only applies with its message.
        let error = action.error.as_deref().filter(|e| !e.is_empty());
        let success = action.success.as_deref().filter(|s| !s.is_empty());
        match (action.phase(), error, success) {
            (Some(Lifecycle::Failed), Some(error), _) => {
                AlertState::banner(MessageType::Failure, error)
            }
            (Some(Lifecycle::Succeeded), _, Some(success)) => {
                AlertState::banner(MessageType::Success, success)
            }
            _ => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::action::Verb;
    use crate::store::Domain;

    fn failure_banner(text: &str) -> AlertState {
        AlertState::banner(MessageType::Failure, text)
    }

    #[test]
    fn failure_with_error_sets_banner() {
        for domain in Domain::ALL {
            let state = AlertReducer.reduce(
                AlertState::default(),
                &Action::failure(domain, Verb::Read, "X"),
            );
            assert_eq!(state, failure_banner("X"));
        }
    }

    #[test]
    fn success_with_message_sets_banner() {
        let state = AlertReducer.reduce(
            AlertState::default(),
            &Action::success(Domain::Clients, Verb::Create).with_success("Y"),
        );
        assert_eq!(state, AlertState::banner(MessageType::Success, "Y"));
    }

    #[test]
    fn data_only_success_keeps_prior_state() {
        let prior = failure_banner("earlier");
        let state = AlertReducer.reduce(prior.clone(), &Action::success(Domain::Clients, Verb::Read));
        assert_eq!(state, prior);
    }

    #[test]
    fn empty_messages_are_ignored() {
        let state = AlertReducer.reduce(
            AlertState::default(),
            &Action::failure(Domain::Clients, Verb::Read, ""),
        );
        assert!(state.is_empty());
    }

    #[test]
    fn set_and_reset() {
        let state = AlertReducer.reduce(
            AlertState::default(),
            &Action::set_alert(MessageType::Success, "Saved"),
        );
        assert_eq!(state, AlertState::banner(MessageType::Success, "Saved"));

        assert!(AlertReducer.reduce(state.clone(), &Action::reset_alert()).is_empty());
        assert!(AlertReducer
            .reduce(state, &Action::unmount(Domain::Filings))
            .is_empty());
    }

    #[test]
    fn request_and_complete_do_not_touch_banner() {
        let prior = failure_banner("kept");
        let state = AlertReducer.reduce(prior.clone(), &Action::request(Domain::Courts, Verb::Read));
        let state = AlertReducer.reduce(state, &Action::complete(Domain::Courts));
        assert_eq!(state, prior);
    }
}
