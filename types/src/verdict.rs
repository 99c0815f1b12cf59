use serde::Serialize;

use crate::RedirectUrl;

/// HTTP status for [`Verdict::Redirect`]: 302 Found, a temporary redirect.
pub const REDIRECT_STATUS: u16 = 302;
/// HTTP status for [`Verdict::Reject`]. Always 403; the gate never issues a challenge.
pub const FORBIDDEN_STATUS: u16 = 403;

/// Outcome of one gate evaluation.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", content = "location", rename_all = "snake_case")]
pub enum Verdict {
    /// Continue to the protected handler.
    Allow,
    /// Send the caller elsewhere, typically the login surface.
    Redirect(RedirectUrl),
    /// Respond with 403 Forbidden.
    Reject,
}

impl Verdict {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allow)
    }

    /// Status code the host should answer with, or `None` to continue processing.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Verdict::Allow => None,
            Verdict::Redirect(_) => Some(REDIRECT_STATUS),
            Verdict::Reject => Some(FORBIDDEN_STATUS),
        }
    }

    /// Value for the `Location` header when redirecting.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        match self {
            Verdict::Redirect(url) => Some(url.as_str()),
            Verdict::Allow | Verdict::Reject => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Allow => "allow",
            Verdict::Redirect(_) => "redirect",
            Verdict::Reject => "reject",
        }
    }
}
