//! Error conversion glue between the domain, repository and form layers.
//!
//! Value objects know nothing about storage or request handling, so the
//! mapping of [`TypeConstraintError`] into the outer error types lives here.

use crate::domain::types::TypeConstraintError;
use crate::forms::errors::{ErrorKind, FieldError};
use crate::repository::errors::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::CorruptRecord(val.to_string())
    }
}

impl From<&TypeConstraintError> for ErrorKind {
    fn from(val: &TypeConstraintError) -> Self {
        match val {
            TypeConstraintError::EmptyString => ErrorKind::FieldRequired,
            TypeConstraintError::TooLong(_) => ErrorKind::FieldTooLong,
            TypeConstraintError::InvalidEmail
            | TypeConstraintError::InvalidPhone
            | TypeConstraintError::InvalidUuid
            | TypeConstraintError::AgeTooLarge(_) => ErrorKind::InvalidFormat,
            TypeConstraintError::InvalidJobTitle(_) => ErrorKind::InvalidChoice,
            TypeConstraintError::BelowMinimumAge => ErrorKind::BelowMinimum,
        }
    }
}

impl From<TypeConstraintError> for FieldError {
    fn from(val: TypeConstraintError) -> Self {
        FieldError::new(ErrorKind::from(&val), val.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_errors_keep_their_message() {
        let error = FieldError::from(TypeConstraintError::TooLong(100));
        assert_eq!(error.code, ErrorKind::FieldTooLong);
        assert_eq!(
            error.message,
            "Ensure this field has no more than 100 characters."
        );
    }

    #[test]
    fn invalid_job_title_is_a_choice_error() {
        let error = FieldError::from(TypeConstraintError::InvalidJobTitle("ceo".into()));
        assert_eq!(error.code, ErrorKind::InvalidChoice);
        assert_eq!(error.message, "\"ceo\" is not a valid choice.");
    }

    #[test]
    fn oversized_age_is_a_format_error() {
        let error = FieldError::from(TypeConstraintError::AgeTooLarge(2_147_483_647));
        assert_eq!(error.code, ErrorKind::InvalidFormat);
    }

    #[test]
    fn corrupt_rows_surface_as_repository_errors() {
        assert!(matches!(
            RepositoryError::from(TypeConstraintError::InvalidUuid),
            RepositoryError::CorruptRecord(_)
        ));
    }
}
