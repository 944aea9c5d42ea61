use diesel::r2d2::{Error as R2D2Error, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    /// Uniqueness, foreign key or delete-guard violation detected by the store.
    #[error("{0}")]
    Conflict(String),

    /// A stored row no longer satisfies the domain invariants.
    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,
            DieselError::DatabaseError(kind, info) => {
                let message = info.message().to_string();
                match kind {
                    DatabaseErrorKind::UniqueViolation => {
                        RepositoryError::Conflict(format!("Unique constraint violation: {message}"))
                    }
                    DatabaseErrorKind::ForeignKeyViolation => RepositoryError::Conflict(format!(
                        "Foreign key constraint violation: {message}"
                    )),
                    DatabaseErrorKind::CheckViolation => {
                        RepositoryError::Conflict(format!("Check constraint violation: {message}"))
                    }
                    _ => RepositoryError::DatabaseError(message),
                }
            }
            DieselError::DeserializationError(e) => RepositoryError::CorruptRecord(e.to_string()),
            DieselError::RollbackTransaction | DieselError::BrokenTransactionManager => {
                RepositoryError::DatabaseError(format!("Transaction failed: {err}"))
            }
            _ => RepositoryError::Unexpected(format!("Unexpected diesel error: {err}")),
        }
    }
}

impl From<R2D2Error> for RepositoryError {
    fn from(err: R2D2Error) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}

impl From<PoolError> for RepositoryError {
    fn from(err: PoolError) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_through() {
        assert!(matches!(
            RepositoryError::from(DieselError::NotFound),
            RepositoryError::NotFound
        ));
    }

    #[test]
    fn rollback_is_a_database_error() {
        assert!(matches!(
            RepositoryError::from(DieselError::RollbackTransaction),
            RepositoryError::DatabaseError(_)
        ));
    }
}
