//! API endpoint configuration. One override (flag or `LEGALEYES_API_URL`)
//! replaces the local default; running without it is "demo mode", which the
//! dashboard announces. Configuration values are public; do not store secrets here.

use anyhow::{anyhow, Result};
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Default request timeout applied by the session client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub demo_mode: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            demo_mode: true,
        }
    }
}

impl ApiConfig {
    /// Builds the config from an optional base URL override. Blank overrides
    /// count as absent.
    ///
    /// # Errors
    /// Returns an error if the override is not an absolute http(s) URL.
    pub fn new(base_url: Option<&str>, timeout: Duration) -> Result<Self> {
        let Some(base_url) = base_url.and_then(normalize_value) else {
            return Ok(Self {
                timeout,
                ..Self::default()
            });
        };

        let parsed = Url::parse(&base_url)?;
        match parsed.scheme() {
            "http" | "https" => {}
            scheme => return Err(anyhow!("Error parsing URL: unsupported scheme {scheme}")),
        }
        if parsed.host().is_none() {
            return Err(anyhow!("Error parsing URL: no host specified"));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            demo_mode: false,
        })
    }

    /// Joins the base URL and an endpoint path with exactly one slash.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.trim().trim_end_matches('/');
        let path = path.trim();

        if base.is_empty() {
            path.to_string()
        } else {
            format!("{}/{}", base, path.trim_start_matches('/'))
        }
    }
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_backend_in_demo_mode() -> Result<()> {
        let config = ApiConfig::new(None, DEFAULT_TIMEOUT)?;
        assert_eq!(config, ApiConfig::default());
        assert!(config.demo_mode);
        assert_eq!(config.base_url, "http://localhost:8000/api");
        Ok(())
    }

    #[test]
    fn blank_override_is_ignored() -> Result<()> {
        let config = ApiConfig::new(Some("   "), DEFAULT_TIMEOUT)?;
        assert!(config.demo_mode);
        assert_eq!(config.base_url, DEFAULT_API_BASE_URL);
        Ok(())
    }

    #[test]
    fn override_disables_demo_mode() -> Result<()> {
        let config = ApiConfig::new(
            Some(" https://api.legaleyes.dev/api/ "),
            Duration::from_secs(3),
        )?;
        assert!(!config.demo_mode);
        assert_eq!(config.base_url, "https://api.legaleyes.dev/api");
        assert_eq!(config.timeout, Duration::from_secs(3));
        Ok(())
    }

    #[test]
    fn rejects_unsupported_scheme() {
        let err = ApiConfig::new(Some("ftp://legaleyes.dev"), DEFAULT_TIMEOUT).err();
        assert!(err.is_some_and(|e| e.to_string().contains("unsupported scheme")));
    }

    #[test]
    fn rejects_relative_url() {
        assert!(ApiConfig::new(Some("/api"), DEFAULT_TIMEOUT).is_err());
    }

    #[test]
    fn endpoint_joins_with_single_slash() {
        let config = ApiConfig::default();
        assert_eq!(
            config.endpoint("/auth/login/"),
            "http://localhost:8000/api/auth/login/"
        );
        assert_eq!(
            config.endpoint("auth/me/"),
            "http://localhost:8000/api/auth/me/"
        );
    }
}
