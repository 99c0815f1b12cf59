//! Shared test utilities and fixtures
//!
//! Fake collaborators standing in for the host's session store and URL
//! generation.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use backoffice_gate_core::{
    AccessGate, BackOfficeLinks, Enforcement, GateOptions, HostingEnvironment, LinkError,
    LoginUrlGenerator, RedirectUrl, RequestContext, RuntimeLevel, RuntimeState, SessionValidator,
    ValidationOutcome, ValidationQuery,
};
use backoffice_gate_types::BlankRedirectUrl;
use url::ParseError;

/// Login URL produced by [`BackOfficeLinks::default`] at the site root.
pub const LOGIN_URL: &str = "/umbraco";

/// Request whose session always validates to the same outcome.
#[derive(Debug)]
pub struct FixedSession {
    outcome: ValidationOutcome,
    calls: AtomicUsize,
}

impl FixedSession {
    pub fn new(outcome: ValidationOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SessionValidator for FixedSession {
    fn validate_current_user(&self, _query: ValidationQuery) -> ValidationOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

impl RequestContext for FixedSession {
    fn session_validator(&self) -> Option<&dyn SessionValidator> {
        Some(self)
    }
}

/// Request without any session validator attached.
#[derive(Debug)]
pub struct Detached;

impl RequestContext for Detached {
    fn session_validator(&self) -> Option<&dyn SessionValidator> {
        None
    }
}

/// Link generator whose join onto the base URL always fails.
#[derive(Debug)]
pub struct FailingLinks;

impl LoginUrlGenerator for FailingLinks {
    fn backoffice_url(&self, _hosting: &HostingEnvironment) -> Result<RedirectUrl, LinkError> {
        Err(LinkError::Join {
            base: "mailto:admin@example.com".to_string(),
            path: LOGIN_URL.to_string(),
            source: ParseError::RelativeUrlWithCannotBeABaseBase,
        })
    }
}

/// Link generator that produces a blank login URL.
#[derive(Debug)]
pub struct BlankLinks;

impl LoginUrlGenerator for BlankLinks {
    fn backoffice_url(&self, _hosting: &HostingEnvironment) -> Result<RedirectUrl, LinkError> {
        Err(LinkError::Blank(BlankRedirectUrl))
    }
}

pub fn every_failure() -> Vec<ValidationOutcome> {
    vec![
        ValidationOutcome::FailedNoSession,
        ValidationOutcome::FailedExpired,
        ValidationOutcome::FailedNotApproved,
        ValidationOutcome::FailedNoPrivileges,
        ValidationOutcome::error("session store unavailable"),
    ]
}

pub fn url(value: &str) -> RedirectUrl {
    RedirectUrl::new(value).expect("test url is not blank")
}

pub fn gate_with_runtime(runtime: Arc<dyn RuntimeState>, options: GateOptions) -> AccessGate {
    AccessGate::builder()
        .runtime_state(runtime)
        .link_generator(Arc::new(BackOfficeLinks::default()))
        .hosting(HostingEnvironment::default())
        .options(options)
        .build()
        .expect("all collaborators provided")
}

pub fn gate(level: RuntimeLevel, options: GateOptions) -> AccessGate {
    gate_with_runtime(Arc::new(level), options)
}

pub fn disabled_gate(level: RuntimeLevel, options: GateOptions) -> AccessGate {
    AccessGate::builder()
        .runtime_state(Arc::new(level))
        .link_generator(Arc::new(BackOfficeLinks::default()))
        .hosting(HostingEnvironment::default())
        .options(options)
        .enforcement(Enforcement::Disabled)
        .build()
        .expect("all collaborators provided")
}
