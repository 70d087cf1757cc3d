//! Client bindings for the cloud control-plane deployments API.
//!
//! Bindings validate their parameters, dispatch one request through a shared
//! [`api::Api`] and return either the decoded payload or a uniform
//! [`apierror::ApiError`].

pub mod api;
pub mod apierror;
pub mod client;
pub mod config;
pub mod deploymentapi;
pub mod error;
pub mod models;
pub mod multierror;

pub use error::Error;
