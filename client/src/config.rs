//! Client configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `TODO_CLIENT_*` environment variables, or a
//! config file, in OrthoConfig's usual precedence. The anti-forgery policy is
//! deliberately an explicit per-deployment choice: the gateway-enforced
//! constant-header deployment and the app-enforced cookie deployment need
//! different client behaviour, and guessing a hybrid would satisfy neither.

use std::str::FromStr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::NavigationTargets;
use crate::outbound::http::{XsrfPolicy, ensure_trailing_slash};

const DEFAULT_API_BASE_URL: &str = "https://localhost:3000";
const DEFAULT_HOME_PAGE: &str = "https://localhost:9001";
const DEFAULT_XSRF_CONSTANT: &str = "constant-value";

/// Which anti-forgery deployment variant this client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum XsrfPolicyKind {
    /// Fixed header value matching gateway policy configuration.
    Constant,
    /// Header value mirrored from the `XSRF-TOKEN` cookie.
    Cookie,
}

impl FromStr for XsrfPolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "constant" => Ok(Self::Constant),
            "cookie" => Ok(Self::Cookie),
            other => Err(format!(
                "unknown anti-forgery policy '{other}' (expected 'constant' or 'cookie')"
            )),
        }
    }
}

/// Settings for the todo client.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TODO_CLIENT")]
pub struct ClientSettings {
    /// Base URL of the access-management gateway fronting the todo API.
    pub api_base_url: Option<String>,
    /// Home page navigated to after a scoped logout.
    pub home_page: Option<String>,
    /// Anti-forgery policy variant; exactly one is active per deployment.
    pub xsrf_policy: Option<XsrfPolicyKind>,
    /// Header value for the constant policy.
    pub xsrf_constant: Option<String>,
    /// Periodic session refresh interval in seconds.
    #[ortho_config(default = 5)]
    pub refresh_interval_seconds: u64,
}

impl ClientSettings {
    /// Gateway base URL, falling back to the default deployment.
    ///
    /// # Errors
    ///
    /// Returns the parse error for a malformed configured URL.
    pub fn api_base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL))
    }

    /// Home page URL, falling back to the default deployment.
    ///
    /// # Errors
    ///
    /// Returns the parse error for a malformed configured URL.
    pub fn home_page(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.home_page.as_deref().unwrap_or(DEFAULT_HOME_PAGE))
    }

    /// Resolved anti-forgery policy.
    pub fn xsrf_policy(&self) -> XsrfPolicy {
        match self.xsrf_policy.unwrap_or(XsrfPolicyKind::Constant) {
            XsrfPolicyKind::Constant => XsrfPolicy::Constant(
                self.xsrf_constant
                    .clone()
                    .unwrap_or_else(|| DEFAULT_XSRF_CONSTANT.to_owned()),
            ),
            XsrfPolicyKind::Cookie => XsrfPolicy::FromCookie,
        }
    }

    /// Periodic refresh interval.
    pub const fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_seconds)
    }

    /// Full-page navigation targets derived from the configured URLs.
    ///
    /// # Errors
    ///
    /// Returns the parse error when a configured URL is malformed or cannot
    /// be joined.
    pub fn navigation_targets(&self) -> Result<NavigationTargets, url::ParseError> {
        let base = ensure_trailing_slash(self.api_base_url()?);
        Ok(NavigationTargets {
            interactive_login: base.join("login")?,
            global_logout: base.join("logout")?,
            home: self.home_page()?,
        })
    }
}
