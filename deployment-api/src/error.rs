use crate::apierror::ApiError;
use crate::multierror::Prefixed;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Parameters rejected before any request was sent.
    #[error(transparent)]
    Validation(#[from] Prefixed),
    #[error(transparent)]
    Api(#[from] ApiError),
}
