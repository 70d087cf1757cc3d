use crate::api::auth::{ApiKey, AuthWriter, InvalidCredential, UserLogin};
use crate::api::TransportError;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "https://api.elastic-cloud.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no credentials configured: set EC_API_KEY or EC_USER and EC_PASS")]
    MissingCredentials,
    #[error("invalid EC_TIMEOUT '{0}': expected a positive number of seconds")]
    InvalidTimeout(String),
    #[error(transparent)]
    Credential(#[from] InvalidCredential),
    #[error("failed to build HTTP client: {0}")]
    Transport(TransportError),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub api_key: Option<String>,
    pub user: Option<String>,
    pub pass: Option<String>,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            api_key: None,
            user: None,
            pass: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("deployment-api/{}", env!("CARGO_PKG_VERSION"))
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from `EC_*` variables resolved through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let timeout = match var("EC_TIMEOUT") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            host: var("EC_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            api_key: var("EC_API_KEY"),
            user: var("EC_USER"),
            pass: var("EC_PASS"),
            timeout,
            user_agent: var("EC_USER_AGENT").unwrap_or_else(default_user_agent),
        })
    }

    /// An API key takes precedence over user and password.
    pub fn auth_writer(&self) -> Result<Arc<dyn AuthWriter>, ConfigError> {
        if let Some(key) = &self.api_key {
            return Ok(Arc::new(ApiKey::new(key)?));
        }

        match (&self.user, &self.pass) {
            (Some(user), Some(pass)) => Ok(Arc::new(UserLogin::new(user, pass)?)),
            _ => Err(ConfigError::MissingCredentials),
        }
    }
}
