//! Configuration loading for the back-office access gate.
//!
//! ```toml
//! [gate]
//! require_approval = false
//! redirect_to_login = true
//! redirect_url = "/account/denied"
//!
//! [hosting]
//! application_virtual_path = "/"
//! public_base_url = "https://cms.example.com"
//!
//! [backoffice]
//! path = "/umbraco"
//! ```
//!
//! String values may reference environment variables as `${NAME}`.

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use backoffice_gate_core::{BackOfficeLinks, GateOptions, HostingEnvironment, RedirectUrl};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Environment variable that overrides the default config location.
pub const CONFIG_PATH_ENV: &str = "BACKOFFICE_GATE_CONFIG";

#[derive(Debug, Default, Deserialize)]
pub struct GateFileConfig {
    pub gate: Option<GateSection>,
    pub hosting: Option<HostingSection>,
    pub backoffice: Option<BackOfficeSection>,
}

/// `[gate]`: how unauthorized requests are answered.
#[derive(Debug, Default, Deserialize)]
pub struct GateSection {
    #[serde(default)]
    pub require_approval: bool,
    /// Redirect to the back-office login URL. Wins over `redirect_url`.
    #[serde(default)]
    pub redirect_to_login: bool,
    /// Blank values are treated as unset.
    pub redirect_url: Option<String>,
}

/// `[hosting]`: where the application is mounted.
#[derive(Debug, Default, Deserialize)]
pub struct HostingSection {
    pub application_virtual_path: Option<String>,
    pub public_base_url: Option<String>,
}

/// `[backoffice]`
#[derive(Debug, Default, Deserialize)]
pub struct BackOfficeSection {
    pub path: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config at {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid public_base_url {value:?}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => {
                Some(path.as_path())
            }
            ConfigError::InvalidBaseUrl { .. } => None,
        }
    }
}

impl GateFileConfig {
    /// Load from [`config_path`]. A missing file is not an error.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No gate config file; using defaults");
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn gate_options(&self) -> GateOptions {
        let Some(gate) = &self.gate else {
            return GateOptions::default();
        };
        let redirect_url = gate.redirect_url.as_deref().map(expand_env_vars);
        GateOptions {
            require_approval: gate.require_approval,
            redirect_to_login: gate.redirect_to_login,
            redirect_url: RedirectUrl::from_optional(redirect_url.as_deref()),
        }
    }

    pub fn hosting_environment(&self) -> Result<HostingEnvironment, ConfigError> {
        let Some(hosting) = &self.hosting else {
            return Ok(HostingEnvironment::default());
        };

        let virtual_path = hosting
            .application_virtual_path
            .as_deref()
            .map_or_else(|| "/".to_string(), expand_env_vars);
        let mut environment = HostingEnvironment::new(virtual_path);

        let base = hosting
            .public_base_url
            .as_deref()
            .map(expand_env_vars)
            .filter(|value| !value.trim().is_empty());
        if let Some(value) = base {
            let url = Url::parse(value.trim())
                .map_err(|source| ConfigError::InvalidBaseUrl { value, source })?;
            environment = environment.with_public_base_url(url);
        }
        Ok(environment)
    }

    #[must_use]
    pub fn backoffice_links(&self) -> BackOfficeLinks {
        self.backoffice
            .as_ref()
            .and_then(|section| section.path.as_deref())
            .map(expand_env_vars)
            .filter(|path| !path.trim().is_empty())
            .map_or_else(BackOfficeLinks::default, BackOfficeLinks::new)
    }
}

/// `$BACKOFFICE_GATE_CONFIG`, else `~/.backoffice-gate/config.toml`.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    if let Some(explicit) = env::var_os(CONFIG_PATH_ENV).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(explicit));
    }
    dirs::home_dir().map(|home| home.join(".backoffice-gate").join("config.toml"))
}

/// Replace `${NAME}` with the value of `NAME`. Unset variables become empty;
/// an unterminated `${` is kept verbatim.
#[must_use]
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after[..end];
        if !name.is_empty() {
            out.push_str(&env::var(name).unwrap_or_default());
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}
