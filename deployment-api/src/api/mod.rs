//! The shared API handle every endpoint binding dispatches through.
//!
//! An [`Api`] pairs a [`Transport`] with an [`AuthWriter`]. It holds no
//! per-call state, so one instance can serve any number of concurrent calls.

pub mod auth;
pub mod context;
pub mod request;
pub mod transport;

use crate::client::deployments::Deployments;
use crate::config::{Config, ConfigError};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

pub use auth::{ApiKey, AuthWriter, UserLogin};
pub use context::{CancelHandle, Context, ContextError};
pub use request::ApiRequest;
pub use transport::{HttpTransport, Transport, TransportError};

pub type SharedTransport = Arc<dyn Transport + Send + Sync>;

#[derive(Clone)]
pub struct Api {
    transport: SharedTransport,
    auth_writer: Arc<dyn AuthWriter>,
}

impl Api {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let transport = HttpTransport::new(&config.host, config.timeout, &config.user_agent)
            .map_err(ConfigError::Transport)?;

        Ok(Self::with_transport(
            Arc::new(transport),
            config.auth_writer()?,
        ))
    }

    pub fn with_transport(transport: SharedTransport, auth_writer: Arc<dyn AuthWriter>) -> Self {
        Self {
            transport,
            auth_writer,
        }
    }

    pub async fn send(&self, request: ApiRequest) -> Result<Value, TransportError> {
        self.transport
            .send(request, self.auth_writer.as_ref())
            .await
    }

    pub fn deployments(&self) -> Deployments<'_> {
        Deployments::new(self)
    }
}

impl fmt::Debug for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Api")
            .field("auth_writer", &self.auth_writer)
            .finish_non_exhaustive()
    }
}
