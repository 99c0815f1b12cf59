//! Seams between the gate and the host application.
//!
//! The gate owns none of these concerns. Hosts plug in their runtime state,
//! their session store and their URL generation through the traits below.

use std::sync::Arc;

use backoffice_gate_types::{RedirectUrl, RuntimeLevel, ValidationOutcome, ValidationQuery};

use crate::hosting::{HostingEnvironment, LinkError};

/// Source of the host's current deployment lifecycle level.
pub trait RuntimeState: Send + Sync {
    fn level(&self) -> RuntimeLevel;
}

/// A fixed level. Useful for hosts that never install or upgrade in-process.
impl RuntimeState for RuntimeLevel {
    fn level(&self) -> RuntimeLevel {
        *self
    }
}

impl<T: RuntimeState + ?Sized> RuntimeState for Arc<T> {
    fn level(&self) -> RuntimeLevel {
        (**self).level()
    }
}

/// Validates the user session bound to one request.
pub trait SessionValidator {
    fn validate_current_user(&self, query: ValidationQuery) -> ValidationOutcome;
}

impl<T: SessionValidator + ?Sized> SessionValidator for &T {
    fn validate_current_user(&self, query: ValidationQuery) -> ValidationOutcome {
        (**self).validate_current_user(query)
    }
}

/// What the gate needs to know about a request.
pub trait RequestContext {
    /// The session validator attached to this request, if the host attached one.
    ///
    /// `None` is treated exactly like a failed validation.
    fn session_validator(&self) -> Option<&dyn SessionValidator>;
}

/// Builds the URL of the back-office login surface.
pub trait LoginUrlGenerator: Send + Sync {
    fn backoffice_url(&self, hosting: &HostingEnvironment) -> Result<RedirectUrl, LinkError>;
}
