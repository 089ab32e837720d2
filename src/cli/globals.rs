use crate::auth::{ApiConfig, AuthGuard, FileStore, KeyValueStore, SessionClient};
use anyhow::Result;
use std::{env, path::PathBuf, sync::Arc, time::Duration};

/// Settings shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalArgs {
    pub api_url: Option<String>,
    pub store_path: PathBuf,
    pub timeout: Duration,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(store_path: PathBuf) -> Self {
        Self {
            api_url: None,
            store_path,
            timeout: crate::auth::config::DEFAULT_TIMEOUT,
        }
    }

    /// # Errors
    /// Returns an error if the API URL override is invalid.
    pub fn api_config(&self) -> Result<ApiConfig> {
        ApiConfig::new(self.api_url.as_deref(), self.timeout)
    }

    #[must_use]
    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        Arc::new(FileStore::new(&self.store_path))
    }

    /// Client and guard sharing one store.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the HTTP client cannot be built.
    pub fn session(&self) -> Result<(SessionClient, AuthGuard)> {
        let store = self.store();
        let client = SessionClient::new(self.api_config()?, store.clone())?;
        Ok((client, AuthGuard::with_system_clock(store)))
    }
}

/// `$HOME/.legaleyes/session.json`, or the working directory when `HOME` is unset.
#[must_use]
pub fn default_store_path() -> PathBuf {
    env::var_os("HOME")
        .map_or_else(|| PathBuf::from("."), PathBuf::from)
        .join(".legaleyes")
        .join("session.json")
}
