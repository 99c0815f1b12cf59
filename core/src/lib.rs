//! Request-time access gate for the back office.
//!
//! The gate combines the host's deployment lifecycle level with the validity
//! of the session attached to each request and answers with a
//! [`Verdict`](backoffice_gate_types::Verdict). Hosts translate the verdict
//! into "continue", a 302 redirect, or a 403 response.

pub mod collaborators;
pub mod gate;
pub mod hosting;
mod runtime_state;

pub use collaborators::{LoginUrlGenerator, RequestContext, RuntimeState, SessionValidator};
pub use gate::{AccessGate, Enforcement, GateBuilder, GateConfigError, GateError, GateOptions};
pub use hosting::{BackOfficeLinks, DEFAULT_BACKOFFICE_PATH, HostingEnvironment, LinkError};
pub use runtime_state::SharedRuntimeState;

pub use backoffice_gate_types::{
    RedirectUrl, RuntimeLevel, ValidationOutcome, ValidationQuery, Verdict,
};
