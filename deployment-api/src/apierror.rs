//! Uniform error returned by every endpoint binding once a call is dispatched.

use crate::api::TransportError;
use crate::models::{BasicFailedReply, BasicFailedReplyElement};
use thiserror::Error;

/// Raised by bindings invoked without an [`Api`](crate::api::Api).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("api reference is required for the operation")]
pub struct MissingApi;

#[derive(Error, Debug)]
#[error("{message}")]
pub struct ApiError {
    message: String,
    status: Option<u16>,
    errors: Vec<BasicFailedReplyElement>,
    #[source]
    source: TransportError,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Error elements reported by the API, empty when the failure was local.
    pub fn errors(&self) -> &[BasicFailedReplyElement] {
        &self.errors
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    pub fn transport(&self) -> &TransportError {
        &self.source
    }
}

pub fn wrap(err: TransportError) -> ApiError {
    let mut status = None;
    let mut errors = Vec::new();

    let message = match &err {
        TransportError::Status { status: code, body } => {
            status = Some(*code);
            match serde_json::from_str::<BasicFailedReply>(body) {
                Ok(reply) if !reply.errors.is_empty() => {
                    let joined = reply
                        .errors
                        .iter()
                        .map(|e| format!("{}: {}: {}", code, e.code, e.message))
                        .collect::<Vec<_>>()
                        .join("; ");
                    errors = reply.errors;
                    joined
                }
                _ if body.trim().is_empty() => format!("{}: unknown error", code),
                _ => format!("{}: {}", code, body.trim()),
            }
        }
        TransportError::Timeout => "operation timed out".to_string(),
        TransportError::Cancelled => "operation cancelled".to_string(),
        TransportError::Http(e) => format!("request failed: {}", e),
        TransportError::Serialization(e) => format!("failed to decode payload: {}", e),
    };

    ApiError {
        message,
        status,
        errors,
        source: err,
    }
}
