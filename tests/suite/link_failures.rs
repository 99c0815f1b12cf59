//! Login URL generation failures reach the host; authorization never depends on them.

use std::sync::Arc;

use backoffice_gate_core::{
    AccessGate, GateError, GateOptions, HostingEnvironment, LinkError, LoginUrlGenerator,
    RuntimeLevel, ValidationOutcome, Verdict,
};

use crate::common::{BlankLinks, FailingLinks, FixedSession, url};

fn gate_with_links(links: Arc<dyn LoginUrlGenerator>, options: GateOptions) -> AccessGate {
    AccessGate::builder()
        .runtime_state(Arc::new(RuntimeLevel::Run))
        .link_generator(links)
        .hosting(HostingEnvironment::default())
        .options(options)
        .build()
        .unwrap()
}

fn gate_with_failing_links(options: GateOptions) -> AccessGate {
    gate_with_links(Arc::new(FailingLinks), options)
}

#[test]
fn link_failure_propagates_when_redirecting_to_login() {
    let gate = gate_with_failing_links(GateOptions::login_redirect(false));
    let anonymous = FixedSession::new(ValidationOutcome::FailedNoSession);

    let err = gate.evaluate(&anonymous).unwrap_err();
    assert!(matches!(err, GateError::LoginUrl(LinkError::Join { .. })));
}

#[test]
fn blank_login_url_rejects_even_with_explicit_redirect() {
    let options = GateOptions {
        redirect_to_login: true,
        redirect_url: Some(url("/account/denied")),
        ..GateOptions::default()
    };
    let gate = gate_with_links(Arc::new(BlankLinks), options);
    let anonymous = FixedSession::new(ValidationOutcome::FailedNoSession);

    let verdict = gate.evaluate(&anonymous).unwrap();
    assert_eq!(verdict, Verdict::Reject);
    assert_eq!(verdict.status_code(), Some(403));
}

#[test]
fn blank_login_url_does_not_affect_authorized_requests() {
    let gate = gate_with_links(Arc::new(BlankLinks), GateOptions::login_redirect(false));
    let valid = FixedSession::new(ValidationOutcome::Success);

    assert_eq!(gate.evaluate(&valid).unwrap(), Verdict::Allow);
}

#[test]
fn link_generator_is_not_consulted_for_authorized_requests() {
    let gate = gate_with_failing_links(GateOptions::login_redirect(false));
    let valid = FixedSession::new(ValidationOutcome::Success);

    assert_eq!(gate.evaluate(&valid).unwrap(), Verdict::Allow);
}

#[test]
fn link_generator_is_not_consulted_without_login_redirect() {
    let gate = gate_with_failing_links(GateOptions::redirect_to(url("/denied")));
    let anonymous = FixedSession::new(ValidationOutcome::FailedNoSession);

    assert_eq!(
        gate.evaluate(&anonymous).unwrap(),
        Verdict::Redirect(url("/denied"))
    );
}
