//! Actions dispatched through the store.
//!
//! Every network-backed action carries an explicit [`Lifecycle`] phase, so
//! reducers switch on a tag instead of matching suffixes of a type string.
//! [`Action::type_name`] still renders the conventional
//! `<DOMAIN>_<VERB>_<PHASE>` name for logging and interop.

use super::domain::Domain;
use super::resource::RequestMetadata;
use crate::models::EntityBatch;

/// Fallback banner text for unexpected failures.
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong! Please try again!!!";

/// Phase of a network-backed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    Requested,
    Succeeded,
    Failed,
    Completed,
}

impl Lifecycle {
    pub fn suffix(self) -> &'static str {
        match self {
            Lifecycle::Requested => "REQUEST",
            Lifecycle::Succeeded => "SUCCESS",
            Lifecycle::Failed => "FAILURE",
            Lifecycle::Completed => "COMPLETE",
        }
    }

    /// SUCCESS, FAILURE and COMPLETE end a request.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Lifecycle::Requested)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Read,
    Create,
    Update,
    Delete,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Read => "READ",
            Verb::Create => "CREATE",
            Verb::Update => "UPDATE",
            Verb::Delete => "DELETE",
        }
    }

    /// Word used in canned success banners.
    pub fn past_tense(self) -> &'static str {
        match self {
            Verb::Read => "RETRIEVED",
            Verb::Create => "ADDED",
            Verb::Update => "UPDATED",
            Verb::Delete => "DELETED",
        }
    }

    pub fn is_mutation(self) -> bool {
        !matches!(self, Verb::Read)
    }
}

/// Banner category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Failure,
}

impl MessageType {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageType::Success => "SUCCESS",
            MessageType::Failure => "FAILURE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// REQUEST, SUCCESS or FAILURE of a domain operation.
    Lifecycle {
        domain: Domain,
        verb: Verb,
        phase: Lifecycle,
    },
    /// Always dispatched last, whatever the outcome.
    Complete { domain: Domain },
    SetAlert,
    ResetAlert,
    SetSpinner,
    ResetSpinner,
    UserLogout,
    /// The view owning a domain went away.
    Unmount { domain: Domain },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Fetched records plus the filter they were fetched with.
    Batch {
        batch: EntityBatch,
        metadata: Option<RequestMetadata>,
    },
    Alert {
        message_type: MessageType,
        message_text: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub kind: ActionKind,
    pub error: Option<String>,
    pub success: Option<String>,
    pub payload: Option<Payload>,
}

impl Action {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            error: None,
            success: None,
            payload: None,
        }
    }

    pub fn lifecycle(domain: Domain, verb: Verb, phase: Lifecycle) -> Self {
        Self::new(ActionKind::Lifecycle {
            domain,
            verb,
            phase,
        })
    }

    pub fn request(domain: Domain, verb: Verb) -> Self {
        Self::lifecycle(domain, verb, Lifecycle::Requested)
    }

    pub fn success(domain: Domain, verb: Verb) -> Self {
        Self::lifecycle(domain, verb, Lifecycle::Succeeded)
    }

    pub fn failure(domain: Domain, verb: Verb, error: impl Into<String>) -> Self {
        Self::lifecycle(domain, verb, Lifecycle::Failed).with_error(error)
    }

    pub fn complete(domain: Domain) -> Self {
        Self::new(ActionKind::Complete { domain })
    }

    pub fn set_alert(message_type: MessageType, message_text: impl Into<String>) -> Self {
        Self::new(ActionKind::SetAlert).with_payload(Payload::Alert {
            message_type,
            message_text: message_text.into(),
        })
    }

    pub fn reset_alert() -> Self {
        Self::new(ActionKind::ResetAlert)
    }

    pub fn set_spinner() -> Self {
        Self::new(ActionKind::SetSpinner)
    }

    pub fn reset_spinner() -> Self {
        Self::new(ActionKind::ResetSpinner)
    }

    pub fn user_logout() -> Self {
        Self::new(ActionKind::UserLogout)
    }

    pub fn unmount(domain: Domain) -> Self {
        Self::new(ActionKind::Unmount { domain })
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_success(mut self, success: impl Into<String>) -> Self {
        self.success = Some(success.into());
        self
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Lifecycle phase, with COMPLETE reported as `Completed`.
    pub fn phase(&self) -> Option<Lifecycle> {
        match self.kind {
            ActionKind::Lifecycle { phase, .. } => Some(phase),
            ActionKind::Complete { .. } => Some(Lifecycle::Completed),
            _ => None,
        }
    }

    pub fn domain(&self) -> Option<Domain> {
        match self.kind {
            ActionKind::Lifecycle { domain, .. }
            | ActionKind::Complete { domain }
            | ActionKind::Unmount { domain } => Some(domain),
            _ => None,
        }
    }

    /// Conventional action-type string, e.g. `COURT_CASE_CREATE_FAILURE`.
    pub fn type_name(&self) -> String {
        match self.kind {
            ActionKind::Lifecycle {
                domain,
                verb: Verb::Read,
                phase,
            } => format!("{}_READ_{}", domain.plural(), phase.suffix()),
            ActionKind::Lifecycle {
                domain,
                verb,
                phase,
            } => format!("{}_{}_{}", domain.singular(), verb.as_str(), phase.suffix()),
            ActionKind::Complete { domain } => format!("{}_COMPLETE", domain.plural()),
            ActionKind::SetAlert => "SET_ALERT".to_string(),
            ActionKind::ResetAlert => "RESET_ALERT".to_string(),
            ActionKind::SetSpinner => "SET_SPINNER".to_string(),
            ActionKind::ResetSpinner => "RESET_SPINNER".to_string(),
            ActionKind::UserLogout => "USER_LOGOUT".to_string(),
            ActionKind::Unmount { domain } => format!("{}_UNMOUNT", domain.plural()),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.type_name())
    }
}

/// Canned banner for a successful mutation, e.g. `"Court Case ADDED successfully!"`.
pub fn success_message(domain: Domain, verb: Verb) -> String {
    format!("{} {} successfully!", domain.display_name(), verb.past_tense())
}
