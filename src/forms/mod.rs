//! JSON payload definitions and their field-level validation.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::domain::types::TypeConstraintError;
use crate::forms::errors::{ErrorKind, FieldError, FieldErrors};

pub mod bulk;
pub mod company;
pub mod employee;
pub mod errors;
pub mod query;

/// Context a payload is validated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Single create: every field is mandatory and the company must exist.
    Create,
    /// One item of a bulk create.
    CreateBulk,
    /// Employee nested in a company create; the parent supplies the company.
    CreateNested,
    /// PUT: every field is mandatory.
    UpdateFull,
    /// PATCH: omitted fields are left untouched.
    UpdatePartial,
}

impl ValidationMode {
    pub const fn requires_all(self) -> bool {
        !matches!(self, ValidationMode::UpdatePartial)
    }

    pub const fn reads_company(self) -> bool {
        !matches!(self, ValidationMode::CreateNested)
    }

    pub const fn is_bulk(self) -> bool {
        matches!(self, ValidationMode::CreateBulk)
    }
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent key (`None`).
pub(crate) fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Key for errors that belong to the payload as a whole.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

const INVALID_INTEGER: &str = "A valid integer is required.";

/// JSON shape a payload field is read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Strings; numbers are accepted and kept as their decimal text.
    Text,
    /// Integers, integral floats and numeric strings.
    Integer,
    List,
}

/// A payload read one field at a time, so a value of the wrong JSON type
/// is reported under its own key instead of rejecting the whole body.
pub trait FieldwisePayload: DeserializeOwned {
    const FIELDS: &'static [(&'static str, FieldKind)];

    /// Keeps the type errors found by [`decode`] for the validation pass.
    fn set_type_errors(&mut self, errors: FieldErrors);
}

/// Python-style type name used in type error messages.
fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

fn coerce(value: Value, kind: FieldKind) -> Result<Value, String> {
    match (kind, value) {
        (_, Value::Null) => Ok(Value::Null),
        (FieldKind::Text, Value::String(text)) => Ok(Value::String(text)),
        (FieldKind::Text, Value::Number(number)) => Ok(Value::String(number.to_string())),
        (FieldKind::Text, _) => Err("Not a valid string.".to_string()),
        (FieldKind::Integer, Value::Number(number)) => number
            .as_i64()
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            })
            .map(Value::from)
            .ok_or_else(|| INVALID_INTEGER.to_string()),
        (FieldKind::Integer, Value::String(text)) => text
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| INVALID_INTEGER.to_string()),
        (FieldKind::Integer, _) => Err(INVALID_INTEGER.to_string()),
        (FieldKind::List, Value::Array(items)) => Ok(Value::Array(items)),
        (FieldKind::List, other) => Err(format!(
            "Expected a list of items but got type \"{}\".",
            json_type(&other)
        )),
    }
}

/// Decodes a JSON body into `T`. Fields of the wrong type are dropped and
/// recorded on the payload; only a body that is not an object fails here.
pub fn decode<T: FieldwisePayload>(value: Value) -> Result<T, FieldErrors> {
    let mut object = match value {
        Value::Object(object) => object,
        other => {
            return Err(FieldErrors::single(
                NON_FIELD_ERRORS,
                ErrorKind::InvalidFormat,
                format!(
                    "Invalid data. Expected a dictionary, but got {}.",
                    json_type(&other)
                ),
            ));
        }
    };

    let mut errors = FieldErrors::new();
    let mut accepted = Map::new();
    for (field, kind) in T::FIELDS {
        if let Some(raw) = object.remove(*field) {
            match coerce(raw, *kind) {
                Ok(value) => {
                    accepted.insert((*field).to_string(), value);
                }
                Err(message) => errors.add(*field, ErrorKind::InvalidFormat, message),
            }
        }
    }

    let mut payload = T::deserialize(Value::Object(accepted)).map_err(|err| {
        FieldErrors::single(
            NON_FIELD_ERRORS,
            ErrorKind::InvalidFormat,
            format!("Invalid data: {err}"),
        )
    })?;
    payload.set_type_errors(errors);
    Ok(payload)
}

/// Runs `build` on a present value unless the field already failed.
pub(crate) fn typed_field<T>(
    errors: &mut FieldErrors,
    field: &str,
    raw: Option<&str>,
    build: impl FnOnce(&str) -> Result<T, TypeConstraintError>,
) -> Option<T> {
    if errors.has(field) {
        return None;
    }
    match build(raw?) {
        Ok(value) => Some(value),
        Err(err) => {
            errors.push(field, FieldError::from(err));
            None
        }
    }
}

/// Records a missing-field error when `value` is absent and nothing else
/// was reported for it.
pub(crate) fn require<T>(errors: &mut FieldErrors, field: &str, value: Option<T>) -> Option<T> {
    if value.is_none() && !errors.has(field) {
        errors.required(field);
    }
    value
}
