use serde::{Deserialize, Serialize};
use std::fmt;

/// Flags passed to the session validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ValidationQuery {
    /// Ask the validator for its strictest login check. The gate passes
    /// `false`, leaving the default strictness to the validator.
    pub require_full_login: bool,
    /// Require the user account to be approved.
    pub require_approval: bool,
}

/// Result of validating the session carried by the current request.
///
/// Validators report their own failures through [`ValidationOutcome::Error`]
/// instead of panicking; callers treat every variant except `Success` alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Success,
    FailedNoSession,
    FailedExpired,
    FailedNotApproved,
    FailedNoPrivileges,
    /// The validator could not reach a decision (store unavailable, corrupt ticket, ...).
    Error { message: String },
}

impl ValidationOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ValidationOutcome::Success)
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        ValidationOutcome::Error {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationOutcome::Success => "success",
            ValidationOutcome::FailedNoSession => "failed_no_session",
            ValidationOutcome::FailedExpired => "failed_expired",
            ValidationOutcome::FailedNotApproved => "failed_not_approved",
            ValidationOutcome::FailedNoPrivileges => "failed_no_privileges",
            ValidationOutcome::Error { .. } => "error",
        }
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationOutcome::Error { message } => write!(f, "error: {message}"),
            other => f.write_str(other.as_str()),
        }
    }
}
