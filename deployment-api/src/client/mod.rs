//! Typed request builders for the API's endpoints.

pub mod deployments;
