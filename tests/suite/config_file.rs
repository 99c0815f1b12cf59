//! Gates assembled from a configuration file.

use std::io::Write;
use std::sync::Arc;

use backoffice_gate_config::GateFileConfig;
use backoffice_gate_core::{AccessGate, RuntimeLevel, ValidationOutcome, Verdict};
use tempfile::NamedTempFile;

use crate::common::{FixedSession, url};

fn gate_from_toml(content: &str, level: RuntimeLevel) -> AccessGate {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    let config = GateFileConfig::load_from(file.path()).unwrap();

    AccessGate::builder()
        .runtime_state(Arc::new(level))
        .link_generator(Arc::new(config.backoffice_links()))
        .hosting(config.hosting_environment().unwrap())
        .options(config.gate_options())
        .build()
        .unwrap()
}

#[test]
fn login_redirect_uses_hosting_section() {
    let gate = gate_from_toml(
        r#"
        [gate]
        redirect_to_login = true
        redirect_url = "/ignored"

        [hosting]
        application_virtual_path = "/cms"
        public_base_url = "https://cms.example.com"

        [backoffice]
        path = "/admin"
        "#,
        RuntimeLevel::Run,
    );
    let anonymous = FixedSession::new(ValidationOutcome::FailedNoSession);

    assert_eq!(
        gate.evaluate(&anonymous).unwrap(),
        Verdict::Redirect(url("https://cms.example.com/cms/admin"))
    );
}

#[test]
fn blank_explicit_redirect_rejects() {
    let gate = gate_from_toml(
        "[gate]\nrequire_approval = true\nredirect_url = \"  \"\n",
        RuntimeLevel::Run,
    );
    let unapproved = FixedSession::new(ValidationOutcome::FailedNotApproved);

    assert_eq!(gate.evaluate(&unapproved).unwrap(), Verdict::Reject);
    assert!(gate.options().require_approval);
}

#[test]
fn empty_file_builds_a_rejecting_gate() {
    let gate = gate_from_toml("", RuntimeLevel::Unknown);
    let anonymous = FixedSession::new(ValidationOutcome::FailedNoSession);

    assert_eq!(gate.evaluate(&anonymous).unwrap(), Verdict::Reject);
}
