//! Client configuration
//!
//! A [`ClientConfig`] can be written in YAML:
//!
//! ```yaml
//! base_url: https://gitlab.example.com/api/v4
//! token: glpat-xxxxxxxx
//! timeout_secs: 20
//! default_per_page: 50
//! languages:
//!   interval_ms: 500
//!   timeout_ms: 5000
//! ```
//!
//! or assembled from `GITLAB_URL` / `GITLAB_TOKEN`.

use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use crate::polling::PollConfig;
use crate::query::MAX_PER_PAGE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the API root
pub const ENV_URL: &str = "GITLAB_URL";

/// Environment variable holding the access token
pub const ENV_TOKEN: &str = "GITLAB_TOKEN";

/// Header GitLab reads personal and project access tokens from
pub const TOKEN_HEADER: &str = "PRIVATE-TOKEN";

const DEFAULT_BASE_URL: &str = "https://gitlab.com/api/v4";

/// Settings for a [`crate::GitLabClient`]
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API root, including `/api/v4`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Access token sent as `PRIVATE-TOKEN`
    #[serde(default)]
    pub token: Option<String>,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Overrides the default user agent
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Page size for list requests that do not set one
    #[serde(default)]
    pub default_per_page: Option<u32>,

    /// Polling of the languages endpoint
    #[serde(default)]
    pub languages: PollConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            default_per_page: None,
            languages: PollConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Config for an API root with no token
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the access token
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the languages poll settings
    #[must_use]
    pub fn with_languages_poll(mut self, poll: PollConfig) -> Self {
        self.languages = poll;
        self
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse client config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Build from `GITLAB_URL` and `GITLAB_TOKEN`
    ///
    /// A missing URL falls back to gitlab.com; a missing token leaves the
    /// client unauthenticated.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = url;
        }
        config.token = lookup(ENV_TOKEN).filter(|v| !v.trim().is_empty());
        config.validate()?;
        Ok(config)
    }

    /// Check values that would otherwise fail at request time
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| Error::config(format!("Invalid base_url '{}': {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "base_url must be http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }

        if let Some(per_page) = self.default_per_page {
            if per_page == 0 || per_page > MAX_PER_PAGE {
                return Err(Error::config(format!(
                    "default_per_page must be between 1 and {MAX_PER_PAGE}, got {per_page}"
                )));
            }
        }

        if self.languages.interval.is_zero() {
            return Err(Error::config("languages.interval_ms must be greater than zero"));
        }

        Ok(())
    }

    /// Transport settings derived from this config
    pub fn to_http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.timeout_secs));

        if let Some(token) = &self.token {
            builder = builder.header(TOKEN_HEADER, token);
        }
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }

        builder.build()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("default_per_page", &self.default_per_page)
            .field("languages", &self.languages)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_yaml("{}").unwrap();
        assert_eq!(config.base_url, "https://gitlab.com/api/v4");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.token.is_none());
        assert_eq!(config.languages.interval, Duration::from_secs(1));
        assert_eq!(config.languages.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r"
base_url: https://gitlab.example.com/api/v4
token: secret
timeout_secs: 5
user_agent: ci-bot
default_per_page: 50
languages:
  interval_ms: 200
  timeout_ms: 1000
";
        let config = ClientConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.base_url, "https://gitlab.example.com/api/v4");
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.default_per_page, Some(50));
        assert_eq!(config.languages.interval, Duration::from_millis(200));
        assert_eq!(config.languages.timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "base_url: http://localhost:8080/api/v4\ntoken: abc").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/api/v4");
        assert_eq!(config.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_missing_file() {
        let err = ClientConfig::from_file("/nonexistent/gitlab.yaml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/gitlab.yaml"));
    }

    #[test]
    fn test_invalid_values() {
        assert!(ClientConfig::from_yaml("base_url: not a url").is_err());
        assert!(ClientConfig::from_yaml("base_url: ftp://example.com").is_err());
        assert!(ClientConfig::from_yaml("timeout_secs: 0").is_err());
        assert!(ClientConfig::from_yaml("default_per_page: 101").is_err());
        assert!(ClientConfig::from_yaml("languages:\n  interval_ms: 0").is_err());
        assert!(ClientConfig::from_yaml("timeout_secs: [1]").is_err());
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (ENV_URL, "https://git.internal/api/v4"),
            (ENV_TOKEN, "t0k3n"),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::from_lookup(|k| vars.get(k).map(|v| (*v).to_string())).unwrap();
        assert_eq!(config.base_url, "https://git.internal/api/v4");
        assert_eq!(config.token.as_deref(), Some("t0k3n"));

        let config = ClientConfig::from_lookup(|_| Some("  ".to_string())).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.token.is_none());
    }

    #[test]
    fn test_http_config_carries_token() {
        let config = ClientConfig::new("http://localhost/api/v4").with_token("abc");
        let http = config.to_http_config();
        assert_eq!(http.base_url.as_deref(), Some("http://localhost/api/v4"));
        assert_eq!(http.default_headers.get(TOKEN_HEADER).map(String::as_str), Some("abc"));
        assert_eq!(http.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::default().with_token("super-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
