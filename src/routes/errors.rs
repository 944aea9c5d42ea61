//! HTTP mapping for service errors.
//!
//! Handlers return `Result<HttpResponse, ServiceError>`; this impl turns the
//! error into the status code and JSON body clients see.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use log::error;
use serde_json::{Value, json};

use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;

fn error_body(error: impl Into<Value>) -> Value {
    json!({ "error": error.into() })
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) | ServiceError::Repository(RepositoryError::NotFound) => {
                StatusCode::NOT_FOUND
            }
            ServiceError::Validation(_)
            | ServiceError::Batch(_)
            | ServiceError::Conflict(_)
            | ServiceError::InvalidOrdering { .. }
            | ServiceError::MalformedBatch(_)
            | ServiceError::PartialDelete { .. }
            | ServiceError::Repository(RepositoryError::Conflict(_)) => StatusCode::BAD_REQUEST,
            ServiceError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ServiceError::Repository(_) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ServiceError::Validation(errors) => error_body(json!(errors)),
            ServiceError::Batch(items) => json!({ "errors": items }),
            ServiceError::InvalidOrdering { allowed, .. } => error_body(json!({
                "code": "invalid_ordering",
                "message": self.to_string(),
                "valid_fields": allowed,
            })),
            ServiceError::PartialDelete { deleted, missing } => json!({
                "message": self.to_string(),
                "deleted": deleted,
                "missing": missing,
            }),
            ServiceError::Repository(RepositoryError::NotFound) => error_body("Not found."),
            ServiceError::Repository(RepositoryError::Conflict(message)) => {
                error_body(message.as_str())
            }
            ServiceError::Repository(err) => {
                error!("Storage failure: {err}");
                error_body("Internal server error")
            }
            ServiceError::Internal(message) => {
                error!("Internal failure: {message}");
                error_body("Internal server error")
            }
            ServiceError::NotFound(_)
            | ServiceError::Conflict(_)
            | ServiceError::MalformedBatch(_)
            | ServiceError::MethodNotAllowed(_) => error_body(self.to_string()),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
