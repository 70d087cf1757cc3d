use super::auth::AuthWriter;
use super::context::ContextError;
use super::request::ApiRequest;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("request cancelled")]
    Cancelled,
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Http(err)
        }
    }
}

impl From<ContextError> for TransportError {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::DeadlineExceeded => TransportError::Timeout,
            ContextError::Cancelled => TransportError::Cancelled,
        }
    }
}

/// Sends authenticated requests to the API. Only 2xx responses are `Ok`.
#[async_trait]
pub trait Transport {
    async fn send(
        &self,
        request: ApiRequest,
        auth: &dyn AuthWriter,
    ) -> Result<Value, TransportError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub const API_PREFIX: &'static str = "/api/v1";

    pub fn new(host: &str, timeout: Duration, user_agent: &str) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: format!("{}{}", host.trim_end_matches('/'), Self::API_PREFIX),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        request: ApiRequest,
        auth: &dyn AuthWriter,
    ) -> Result<Value, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!("{} {} query={:?}", request.method, url, request.query);

        let mut builder = self.client.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let builder = auth.authenticate(builder);

        let context = &request.context;
        let response = match context.run(builder.send()).await? {
            Ok(response) => response,
            Err(e) => {
                warn!("{} {} failed: {}", request.method, url, e);
                return Err(e.into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = context.run(response.text()).await??;
            warn!("{} {} responded with status: {}", request.method, url, status);
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = context.run(response.bytes()).await??;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}
