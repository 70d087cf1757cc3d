//! Bindings for the deployments endpoints.

pub mod search;

pub use search::{search, SearchParams};
