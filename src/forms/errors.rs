//! Structured validation errors keyed by field name.

use std::collections::BTreeMap;

use serde::Serialize;
use validator::ValidationErrors;

/// Machine readable error categories surfaced to API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    FieldRequired,
    FieldTooLong,
    InvalidFormat,
    InvalidChoice,
    BelowMinimum,
    Conflict,
    NotFound,
    InvalidOrdering,
    MethodNotAllowed,
    MalformedBatch,
}

impl ErrorKind {
    pub const fn code(self) -> &'static str {
        match self {
            ErrorKind::FieldRequired => "field_required",
            ErrorKind::FieldTooLong => "field_too_long",
            ErrorKind::InvalidFormat => "invalid_format",
            ErrorKind::InvalidChoice => "invalid_choice",
            ErrorKind::BelowMinimum => "below_minimum",
            ErrorKind::Conflict => "conflict",
            ErrorKind::NotFound => "not_found",
            ErrorKind::InvalidOrdering => "invalid_ordering",
            ErrorKind::MethodNotAllowed => "method_not_allowed",
            ErrorKind::MalformedBatch => "malformed_batch",
        }
    }

    /// Maps a `validator` error code back to its kind. Unknown codes are
    /// treated as format errors.
    pub fn from_code(code: &str) -> Self {
        match code {
            "field_required" => ErrorKind::FieldRequired,
            "field_too_long" => ErrorKind::FieldTooLong,
            "invalid_choice" => ErrorKind::InvalidChoice,
            "below_minimum" => ErrorKind::BelowMinimum,
            "conflict" => ErrorKind::Conflict,
            "not_found" => ErrorKind::NotFound,
            _ => ErrorKind::InvalidFormat,
        }
    }
}

/// One problem with one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub code: ErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(code: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Every error found in one payload, grouped by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<FieldError>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for a single error.
    pub fn single(field: impl Into<String>, code: ErrorKind, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, code, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, code: ErrorKind, message: impl Into<String>) {
        self.push(field, FieldError::new(code, message));
    }

    pub fn push(&mut self, field: impl Into<String>, error: FieldError) {
        self.0.entry(field.into()).or_default().push(error);
    }

    /// Records the standard "missing field" error.
    pub fn required(&mut self, field: &str) {
        self.add(field, ErrorKind::FieldRequired, "This field is required.");
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[FieldError]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Error kinds recorded for `field`, in insertion order.
    pub fn codes(&self, field: &str) -> Vec<ErrorKind> {
        self.get(field)
            .map(|errors| errors.iter().map(|e| e.code).collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Merges `other` keeping its field names.
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, errors) in other.0 {
            self.0.entry(field).or_default().extend(errors);
        }
    }

    /// Merges `other` under `prefix`, e.g. `employees[2].age`.
    pub fn extend_prefixed(&mut self, prefix: &str, other: FieldErrors) {
        for (field, errors) in other.0 {
            self.0
                .entry(format!("{prefix}.{field}"))
                .or_default()
                .extend(errors);
        }
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut result = FieldErrors::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| error.code.to_string());
                result.add(field.to_string(), ErrorKind::from_code(&error.code), message);
            }
        }
        result
    }
}

/// Errors for one element of a batch request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemError {
    /// Position of the item in the submitted list.
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub errors: FieldErrors,
}
