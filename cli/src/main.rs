//! backoffice-gate CLI - evaluate access decisions from the command line.
//!
//! ```text
//! main() -> load GateFileConfig -> apply flag overrides -> AccessGate::builder()
//!                                                               |
//!                                                               v
//!                                          evaluate(ScriptedRequest) -> JSON on stdout
//! ```
//!
//! Logs go to stderr (filter via `RUST_LOG`) so stdout stays machine-readable.

mod scenario;

use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use backoffice_gate_config::GateFileConfig;
use backoffice_gate_core::{
    AccessGate, Enforcement, GateOptions, LoginUrlGenerator, RedirectUrl, RuntimeLevel,
};
use scenario::{ScriptedRequest, SessionArg};

#[derive(Parser)]
#[command(name = "backoffice-gate")]
#[command(about = "Evaluate back-office access decisions against a gate configuration")]
struct Cli {
    /// Config file (defaults to $BACKOFFICE_GATE_CONFIG or ~/.backoffice-gate/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one simulated request and print the verdict
    Evaluate(EvaluateArgs),
    /// Validate the config file and print the effective settings
    CheckConfig,
}

#[derive(Args)]
struct EvaluateArgs {
    /// Deployment lifecycle level of the host (unknown, boot-failed, install, upgrade, run)
    #[arg(long, value_parser = RuntimeLevel::from_str, default_value = "run")]
    level: RuntimeLevel,
    /// Outcome the session validator reports
    #[arg(long, value_enum)]
    session: SessionArg,
    /// Require an approved user account; `=false` overrides the config file
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    require_approval: Option<bool>,
    /// Redirect unauthorized requests to the back-office login URL; `=false` overrides the config file
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    redirect_to_login: Option<bool>,
    /// Explicit redirect target for unauthorized requests; blank clears the config file value
    #[arg(long)]
    redirect_url: Option<String>,
    /// Build the gate with enforcement disabled
    #[arg(long)]
    disabled: bool,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<GateFileConfig> {
    match path {
        Some(path) => GateFileConfig::load_from(path)
            .with_context(|| format!("loading {}", path.display())),
        None => Ok(GateFileConfig::load()
            .context("loading default config")?
            .unwrap_or_default()),
    }
}

/// Flags given on the command line replace the file's values; omitted flags keep them.
fn apply_overrides(mut options: GateOptions, args: &EvaluateArgs) -> GateOptions {
    if let Some(require_approval) = args.require_approval {
        options.require_approval = require_approval;
    }
    if let Some(redirect_to_login) = args.redirect_to_login {
        options.redirect_to_login = redirect_to_login;
    }
    if let Some(url) = args.redirect_url.as_deref() {
        options.redirect_url = RedirectUrl::from_optional(Some(url));
    }
    options
}

fn evaluate(config: &GateFileConfig, args: &EvaluateArgs) -> Result<()> {
    let level = args.level;
    let enforcement = if args.disabled {
        Enforcement::Disabled
    } else {
        Enforcement::Enforcing
    };

    let gate = AccessGate::builder()
        .runtime_state(Arc::new(level))
        .link_generator(Arc::new(config.backoffice_links()))
        .hosting(config.hosting_environment()?)
        .options(apply_overrides(config.gate_options(), args))
        .enforcement(enforcement)
        .build()?;
    tracing::debug!(?gate, "Gate constructed");

    let request = ScriptedRequest::new(args.session);
    let verdict = gate.evaluate(&request)?;

    let report = json!({
        "level": level,
        "enforcing": gate.enforcement() == Enforcement::Enforcing,
        "session": request.outcome().map(|outcome| outcome.as_str()),
        "verdict": verdict.as_str(),
        "allowed": verdict.is_allowed(),
        "location": verdict.location(),
        "status": verdict.status_code(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn check_config(config: &GateFileConfig) -> Result<()> {
    let options = config.gate_options();
    let hosting = config.hosting_environment()?;
    let links = config.backoffice_links();
    let login_url = links
        .backoffice_url(&hosting)
        .context("building back-office login url")?;

    let report = json!({
        "require_approval": options.require_approval,
        "redirect_to_login": options.redirect_to_login,
        "redirect_url": options.redirect_url.as_ref().map(RedirectUrl::as_str),
        "application_virtual_path": hosting.application_virtual_path(),
        "public_base_url": hosting.public_base_url().map(|url| url.as_str()),
        "backoffice_path": links.path(),
        "login_url": login_url.as_str(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match &cli.command {
        Commands::Evaluate(args) => evaluate(&config, args),
        Commands::CheckConfig => check_config(&config),
    }
}
