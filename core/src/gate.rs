//! The back-office access gate.
//!
//! One [`AccessGate`] is built at startup and shared by every request to the
//! protected routes. Each call to [`AccessGate::evaluate`] produces exactly one
//! [`Verdict`]:
//!
//! ```text
//! enforcement disabled ─────────────────────────────► Allow
//! level Install | Upgrade ──────────────────────────► Allow
//! session validator returns Success ────────────────► Allow
//! otherwise, redirect_to_login ─────────────────────► Redirect(login url)
//! otherwise, explicit redirect_url ─────────────────► Redirect(redirect_url)
//! otherwise ────────────────────────────────────────► Reject
//! ```
//!
//! Authorization fails closed: a missing validator and a validator reporting
//! [`ValidationOutcome::Error`] count as an invalid session. Only login URL
//! generation can surface an error to the host, and a blank login URL is not
//! an error: it yields `Reject`.

use std::fmt;
use std::sync::Arc;

use backoffice_gate_types::{RedirectUrl, ValidationOutcome, ValidationQuery, Verdict};
use thiserror::Error;

use crate::collaborators::{LoginUrlGenerator, RequestContext, RuntimeState};
use crate::hosting::{HostingEnvironment, LinkError};

/// Whether the gate enforces anything at all.
///
/// `Disabled` exists for test harnesses that exercise protected handlers
/// without a session store. It is never read from configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Enforcement {
    #[default]
    Enforcing,
    Disabled,
}

/// Per-gate behaviour, fixed at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateOptions {
    /// Require the user account to be approved.
    pub require_approval: bool,
    /// Redirect unauthorized callers to the generated back-office login URL.
    /// Takes precedence over `redirect_url`.
    pub redirect_to_login: bool,
    /// Explicit redirect target for unauthorized callers.
    pub redirect_url: Option<RedirectUrl>,
}

impl GateOptions {
    /// Redirect unauthorized callers to `url`.
    #[must_use]
    pub fn redirect_to(url: RedirectUrl) -> Self {
        Self {
            redirect_url: Some(url),
            ..Self::default()
        }
    }

    /// Redirect unauthorized callers to the back-office login surface.
    #[must_use]
    pub fn login_redirect(require_approval: bool) -> Self {
        Self {
            require_approval,
            redirect_to_login: true,
            redirect_url: None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateConfigError {
    #[error("access gate requires a {0}")]
    MissingCollaborator(&'static str),
}

/// Failure while turning a negative decision into a verdict.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("failed to build the back-office login url")]
    LoginUrl(#[from] LinkError),
}

#[derive(Clone)]
pub struct AccessGate {
    options: GateOptions,
    enforcement: Enforcement,
    runtime: Arc<dyn RuntimeState>,
    links: Arc<dyn LoginUrlGenerator>,
    hosting: HostingEnvironment,
}

impl fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessGate")
            .field("options", &self.options)
            .field("enforcement", &self.enforcement)
            .field("level", &self.runtime.level())
            .field("hosting", &self.hosting)
            .finish_non_exhaustive()
    }
}

impl AccessGate {
    #[must_use]
    pub fn builder() -> GateBuilder {
        GateBuilder::default()
    }

    #[must_use]
    pub fn options(&self) -> &GateOptions {
        &self.options
    }

    #[must_use]
    pub fn enforcement(&self) -> Enforcement {
        self.enforcement
    }

    /// Decide what happens to one request.
    pub fn evaluate<C>(&self, request: &C) -> Result<Verdict, GateError>
    where
        C: RequestContext + ?Sized,
    {
        if self.is_authorized(request) {
            return Ok(Verdict::Allow);
        }

        // Resolved per call; the configured target is never overwritten.
        let verdict = match self.redirect_target()? {
            Some(url) => Verdict::Redirect(url),
            None => Verdict::Reject,
        };
        tracing::debug!(
            verdict = verdict.as_str(),
            location = verdict.location().unwrap_or_default(),
            "Back-office request denied"
        );
        Ok(verdict)
    }

    /// Lifecycle and session checks alone, without building a verdict.
    #[must_use]
    pub fn is_authorized<C>(&self, request: &C) -> bool
    where
        C: RequestContext + ?Sized,
    {
        if self.enforcement == Enforcement::Disabled {
            return true;
        }

        let level = self.runtime.level();
        if level.bypasses_session_check() {
            tracing::debug!(%level, "Back-office open during install/upgrade");
            return true;
        }

        let Some(validator) = request.session_validator() else {
            tracing::debug!(%level, "No session validator attached to request");
            return false;
        };

        match validator.validate_current_user(self.validation_query()) {
            ValidationOutcome::Success => true,
            ValidationOutcome::Error { message } => {
                tracing::warn!(%level, error = %message, "Session validation failed; denying");
                false
            }
            outcome => {
                tracing::debug!(%level, outcome = outcome.as_str(), "Session rejected");
                false
            }
        }
    }

    fn validation_query(&self) -> ValidationQuery {
        ValidationQuery {
            require_full_login: false,
            require_approval: self.options.require_approval,
        }
    }

    fn redirect_target(&self) -> Result<Option<RedirectUrl>, GateError> {
        if self.options.redirect_to_login {
            // A blank login URL replaces the explicit target and falls through to Reject.
            return match self.links.backoffice_url(&self.hosting) {
                Ok(url) => Ok(Some(url)),
                Err(LinkError::Blank(_)) => {
                    tracing::warn!("Login url generator returned a blank url; rejecting");
                    Ok(None)
                }
                Err(err) => Err(err.into()),
            };
        }
        Ok(self.options.redirect_url.clone())
    }
}

/// Builder for [`AccessGate`].
///
/// Runtime state, link generator and hosting environment are mandatory;
/// [`GateBuilder::build`] fails immediately when one is missing.
#[derive(Default)]
pub struct GateBuilder {
    runtime: Option<Arc<dyn RuntimeState>>,
    links: Option<Arc<dyn LoginUrlGenerator>>,
    hosting: Option<HostingEnvironment>,
    options: GateOptions,
    enforcement: Enforcement,
}

impl GateBuilder {
    pub fn runtime_state(mut self, runtime: Arc<dyn RuntimeState>) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn link_generator(mut self, links: Arc<dyn LoginUrlGenerator>) -> Self {
        self.links = Some(links);
        self
    }

    pub fn hosting(mut self, hosting: HostingEnvironment) -> Self {
        self.hosting = Some(hosting);
        self
    }

    pub fn options(mut self, options: GateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn enforcement(mut self, enforcement: Enforcement) -> Self {
        self.enforcement = enforcement;
        self
    }

    pub fn build(self) -> Result<AccessGate, GateConfigError> {
        let runtime = self
            .runtime
            .ok_or(GateConfigError::MissingCollaborator("runtime state"))?;
        let links = self
            .links
            .ok_or(GateConfigError::MissingCollaborator("login url generator"))?;
        let hosting = self
            .hosting
            .ok_or(GateConfigError::MissingCollaborator("hosting environment"))?;

        Ok(AccessGate {
            options: self.options,
            enforcement: self.enforcement,
            runtime,
            links,
            hosting,
        })
    }
}
