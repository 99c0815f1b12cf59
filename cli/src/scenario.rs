//! Command-line stand-ins for the host's runtime state and session store.

use backoffice_gate_core::{RequestContext, SessionValidator, ValidationOutcome, ValidationQuery};
use clap::ValueEnum;

/// Session outcome to simulate. `none` means no session validator at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SessionArg {
    Success,
    NoSession,
    Expired,
    NotApproved,
    NoPrivileges,
    Error,
    #[value(name = "none")]
    Detached,
}

impl SessionArg {
    fn outcome(self) -> Option<ValidationOutcome> {
        match self {
            SessionArg::Success => Some(ValidationOutcome::Success),
            SessionArg::NoSession => Some(ValidationOutcome::FailedNoSession),
            SessionArg::Expired => Some(ValidationOutcome::FailedExpired),
            SessionArg::NotApproved => Some(ValidationOutcome::FailedNotApproved),
            SessionArg::NoPrivileges => Some(ValidationOutcome::FailedNoPrivileges),
            SessionArg::Error => Some(ValidationOutcome::error("simulated validator failure")),
            SessionArg::Detached => None,
        }
    }
}

/// A request whose session validator always answers with a fixed outcome.
#[derive(Debug)]
pub struct ScriptedRequest {
    outcome: Option<ValidationOutcome>,
}

impl ScriptedRequest {
    #[must_use]
    pub fn new(session: SessionArg) -> Self {
        Self {
            outcome: session.outcome(),
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&ValidationOutcome> {
        self.outcome.as_ref()
    }
}

impl SessionValidator for ScriptedRequest {
    fn validate_current_user(&self, query: ValidationQuery) -> ValidationOutcome {
        tracing::debug!(
            require_full_login = query.require_full_login,
            require_approval = query.require_approval,
            "Scripted session validation"
        );
        self.outcome
            .clone()
            .unwrap_or(ValidationOutcome::FailedNoSession)
    }
}

impl RequestContext for ScriptedRequest {
    fn session_validator(&self) -> Option<&dyn SessionValidator> {
        if self.outcome.is_some() {
            Some(self)
        } else {
            None
        }
    }
}
