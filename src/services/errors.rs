//! Error type shared by the service layer.

use thiserror::Error;

use crate::forms::errors::{FieldErrors, ItemError};
use crate::repository::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Unknown entity, empty search or out of range page.
    #[error("{0}")]
    NotFound(String),

    /// Field errors of one payload or of the query string.
    #[error("Invalid input: {} field(s) rejected", .0.len())]
    Validation(FieldErrors),

    /// Per-item errors of a rejected batch. Nothing was persisted.
    #[error("Batch rejected: {} item(s) failed", .0.len())]
    Batch(Vec<ItemError>),

    #[error("{0}")]
    Conflict(String),

    #[error("The submitted order query ({field}) is invalid! Use one of: {allowed:?}")]
    InvalidOrdering {
        field: String,
        allowed: Vec<&'static str>,
    },

    #[error("{0}")]
    MalformedBatch(String),

    /// A DELETE batch removed some rows but named ids that do not exist.
    /// The deletions stay committed.
    #[error(
        "{deleted} employees deleted. However, the following employee IDs do not exist: {}",
        .missing.join(", ")
    )]
    PartialDelete { deleted: usize, missing: Vec<String> },

    #[error("Method \"{0}\" not allowed.")]
    MethodNotAllowed(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<FieldErrors> for ServiceError {
    fn from(errors: FieldErrors) -> Self {
        ServiceError::Validation(errors)
    }
}

#[cfg(feature = "server")]
impl From<actix_web::error::BlockingError> for ServiceError {
    fn from(err: actix_web::error::BlockingError) -> Self {
        ServiceError::Internal(err.to_string())
    }
}
