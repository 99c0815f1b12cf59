//! Core domain types for the back-office access gate.
//!
//! This crate contains pure domain types with no IO and minimal dependencies.
//! The gate itself, its collaborators and configuration loading live in the
//! crates layered on top of this one.

mod session;
mod verdict;

pub use session::{ValidationOutcome, ValidationQuery};
pub use verdict::{FORBIDDEN_STATUS, REDIRECT_STATUS, Verdict};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Redirect targets
// ============================================================================

/// A redirect target guaranteed to be non-blank (after trimming).
///
/// Hosts hand this straight to a `Location` header, so the surrounding
/// whitespace is stripped on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RedirectUrl(String);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("redirect url must not be blank")]
pub struct BlankRedirectUrl;

impl RedirectUrl {
    pub fn new(value: impl Into<String>) -> Result<Self, BlankRedirectUrl> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Err(BlankRedirectUrl)
        } else if trimmed.len() == value.len() {
            Ok(Self(value))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    /// Parse an optional configured value; blank input means "not configured".
    #[must_use]
    pub fn from_optional(value: Option<&str>) -> Option<Self> {
        value.and_then(|raw| Self::new(raw).ok())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RedirectUrl {
    type Error = BlankRedirectUrl;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for RedirectUrl {
    type Error = BlankRedirectUrl;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RedirectUrl> for String {
    fn from(value: RedirectUrl) -> Self {
        value.0
    }
}

impl Deref for RedirectUrl {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for RedirectUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RedirectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Deployment lifecycle
// ============================================================================

/// Operational phase of the host application.
///
/// Read fresh on every evaluation: a long-lived process moves from
/// `Install` or `Upgrade` to `Run` without restarting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeLevel {
    /// The runtime has not determined its level yet.
    #[default]
    Unknown,
    /// Boot failed; the application cannot serve content.
    BootFailed,
    /// First-time installation is in progress.
    Install,
    /// An upgrade of an existing installation is in progress.
    Upgrade,
    /// Normal operation.
    Run,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown runtime level: {0}")]
pub struct RuntimeLevelParseError(String);

impl RuntimeLevel {
    pub const ALL: [RuntimeLevel; 5] = [
        RuntimeLevel::Unknown,
        RuntimeLevel::BootFailed,
        RuntimeLevel::Install,
        RuntimeLevel::Upgrade,
        RuntimeLevel::Run,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RuntimeLevel::Unknown => "unknown",
            RuntimeLevel::BootFailed => "boot_failed",
            RuntimeLevel::Install => "install",
            RuntimeLevel::Upgrade => "upgrade",
            RuntimeLevel::Run => "run",
        }
    }

    /// Whether the back office is open without a session at this level.
    ///
    /// Only true while installing or upgrading, when no user store may exist yet.
    #[must_use]
    pub const fn bypasses_session_check(self) -> bool {
        matches!(self, RuntimeLevel::Install | RuntimeLevel::Upgrade)
    }

    /// Stable discriminant used by atomically stored levels.
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        match self {
            RuntimeLevel::Unknown => 0,
            RuntimeLevel::BootFailed => 1,
            RuntimeLevel::Install => 2,
            RuntimeLevel::Upgrade => 3,
            RuntimeLevel::Run => 4,
        }
    }

    /// Inverse of [`RuntimeLevel::to_u8`]. Unrecognized values map to `Unknown`.
    #[must_use]
    pub const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => RuntimeLevel::BootFailed,
            2 => RuntimeLevel::Install,
            3 => RuntimeLevel::Upgrade,
            4 => RuntimeLevel::Run,
            _ => RuntimeLevel::Unknown,
        }
    }
}

impl FromStr for RuntimeLevel {
    type Err = RuntimeLevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "unknown" => Ok(RuntimeLevel::Unknown),
            "boot_failed" | "bootfailed" => Ok(RuntimeLevel::BootFailed),
            "install" | "installing" => Ok(RuntimeLevel::Install),
            "upgrade" | "upgrading" => Ok(RuntimeLevel::Upgrade),
            "run" | "running" => Ok(RuntimeLevel::Run),
            _ => Err(RuntimeLevelParseError(s.to_string())),
        }
    }
}

impl fmt::Display for RuntimeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
