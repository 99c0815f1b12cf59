//! Hosting context and the reference back-office login URL generator.

use backoffice_gate_types::{BlankRedirectUrl, RedirectUrl};
use thiserror::Error;
use url::Url;

use crate::collaborators::LoginUrlGenerator;

/// Default mount point of the back office under the application root.
pub const DEFAULT_BACKOFFICE_PATH: &str = "/umbraco";

/// Where the application is mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostingEnvironment {
    application_virtual_path: String,
    public_base_url: Option<Url>,
}

impl HostingEnvironment {
    /// `virtual_path` is normalized to start with `/`; blank means the site root.
    #[must_use]
    pub fn new(virtual_path: impl AsRef<str>) -> Self {
        let trimmed = virtual_path.as_ref().trim();
        let application_virtual_path = if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };
        Self {
            application_virtual_path,
            public_base_url: None,
        }
    }

    /// Generate absolute login URLs against `base` instead of site-relative paths.
    #[must_use]
    pub fn with_public_base_url(mut self, base: Url) -> Self {
        self.public_base_url = Some(base);
        self
    }

    #[must_use]
    pub fn application_virtual_path(&self) -> &str {
        &self.application_virtual_path
    }

    #[must_use]
    pub fn public_base_url(&self) -> Option<&Url> {
        self.public_base_url.as_ref()
    }
}

impl Default for HostingEnvironment {
    fn default() -> Self {
        Self::new("/")
    }
}

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("cannot join back-office path {path:?} onto {base}")]
    Join {
        base: String,
        path: String,
        #[source]
        source: url::ParseError,
    },
    #[error(transparent)]
    Blank(#[from] BlankRedirectUrl),
}

/// Login URL generator that points at the back-office mount point.
///
/// `path` may be relative to the application (`/umbraco`) or an absolute
/// `http`/`https` URL of an external login surface, which is returned as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackOfficeLinks {
    path: String,
}

impl BackOfficeLinks {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Default for BackOfficeLinks {
    fn default() -> Self {
        Self::new(DEFAULT_BACKOFFICE_PATH)
    }
}

impl LoginUrlGenerator for BackOfficeLinks {
    fn backoffice_url(&self, hosting: &HostingEnvironment) -> Result<RedirectUrl, LinkError> {
        if let Some(absolute) = external_login_url(&self.path) {
            return Ok(RedirectUrl::new(String::from(absolute))?);
        }

        let relative = join_paths(hosting.application_virtual_path(), &self.path);
        match hosting.public_base_url() {
            Some(base) => {
                let absolute = base.join(&relative).map_err(|source| LinkError::Join {
                    base: base.to_string(),
                    path: relative.clone(),
                    source,
                })?;
                Ok(RedirectUrl::new(String::from(absolute))?)
            }
            None => Ok(RedirectUrl::new(relative)?),
        }
    }
}

/// Only `http`/`https` URLs name an external login surface; anything else,
/// including `scheme:rest` lookalikes such as `admin:login`, is a path.
fn external_login_url(path: &str) -> Option<Url> {
    Url::parse(path.trim())
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}

fn join_paths(virtual_path: &str, path: &str) -> String {
    let prefix = virtual_path.trim_end_matches('/');
    let suffix = path.trim().trim_start_matches('/');
    format!("{prefix}/{suffix}")
}
