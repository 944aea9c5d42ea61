//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce the field invariants of companies and employees
//! (length bounds, phone format, email syntax, job title choices, age floor)
//! so that once a value reaches the domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::ValidateEmail;

/// Phone numbers accepted for companies: `+36` or `06` followed by 9 digits.
pub static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\+36|06)\d{9}$").expect("phone pattern is valid"));

/// Youngest age at which an employee may be registered.
pub const MINIMUM_AGE: i64 = 16;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("This field may not be blank.")]
    EmptyString,
    /// Provided string exceeded the column length.
    #[error("Ensure this field has no more than {0} characters.")]
    TooLong(usize),
    /// Provided email failed format validation.
    #[error("Enter a valid email address.")]
    InvalidEmail,
    /// Phone number did not meet expected format.
    #[error("The phone number must begin with the prefix '+36' or '06' and contain 9 digits.")]
    InvalidPhone,
    /// Job title outside the fixed list.
    #[error("\"{0}\" is not a valid choice.")]
    InvalidJobTitle(String),
    /// Age under [`MINIMUM_AGE`].
    #[error("Individuals under the age of 16 are not permitted to engage in employment.")]
    BelowMinimumAge,
    /// Age too large to store.
    #[error("Ensure this value is less than or equal to {0}.")]
    AgeTooLarge(i64),
    /// Provided uuid failed format validation.
    #[error("Must be a valid UUID.")]
    InvalidUuid,
}

/// Macro to generate UUID backed identifiers.
macro_rules! uuid_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            /// Returns the wrapped [`Uuid`].
            pub const fn get(self) -> Uuid {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|_| TypeConstraintError::InvalidUuid)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }
    };
}

uuid_newtype!(CompanyId, "Unique identifier for a company.");
uuid_newtype!(EmployeeId, "Unique identifier for an employee.");

/// Trims the value and enforces non-emptiness plus a character limit.
fn bounded(value: String, max: usize) -> Result<String, TypeConstraintError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    if trimmed.chars().count() > max {
        return Err(TypeConstraintError::TooLong(max));
    }
    Ok(trimmed.to_string())
}

macro_rules! bounded_string_newtype {
    ($name:ident, $max:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Maximum number of characters accepted.
            pub const MAX_LENGTH: usize = $max;

            /// Constructs a trimmed, non-empty, length-bounded value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                bounded(value.into(), Self::MAX_LENGTH).map(Self)
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

bounded_string_newtype!(CompanyName, 100, "Company name, at most 100 characters.");
bounded_string_newtype!(CompanyAddress, 200, "Postal address, at most 200 characters.");
bounded_string_newtype!(EmployeeName, 100, "Employee name, at most 100 characters.");

/// Optional free text describing a company. Blank input means "no description".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CompanyDescription(String);

impl CompanyDescription {
    pub const MAX_LENGTH: usize = 200;

    /// Returns `Ok(None)` for blank input so callers can store `NULL`.
    pub fn parse<S: Into<String>>(value: S) -> Result<Option<Self>, TypeConstraintError> {
        match bounded(value.into(), Self::MAX_LENGTH) {
            Ok(text) => Ok(Some(Self(text))),
            Err(TypeConstraintError::EmptyString) => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CompanyDescription {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Company phone number in the national format.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        if !PHONE_REGEX.is_match(trimmed) {
            return Err(TypeConstraintError::InvalidPhone);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Lower-cased and validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EmployeeEmail(String);

impl EmployeeEmail {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = email.into().trim().to_lowercase();
        if normalized.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        if normalized.validate_email() {
            Ok(Self(normalized))
        } else {
            Err(TypeConstraintError::InvalidEmail)
        }
    }

    /// Borrow the email as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for EmployeeEmail {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for EmployeeEmail {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Fixed set of job titles an employee can hold.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum JobTitle {
    Developer,
    Designer,
    Manager,
    Tester,
}

impl JobTitle {
    pub const ALL: [JobTitle; 4] = [
        JobTitle::Developer,
        JobTitle::Designer,
        JobTitle::Manager,
        JobTitle::Tester,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            JobTitle::Developer => "developer",
            JobTitle::Designer => "designer",
            JobTitle::Manager => "manager",
            JobTitle::Tester => "tester",
        }
    }
}

impl Display for JobTitle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobTitle {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        JobTitle::ALL
            .into_iter()
            .find(|title| title.as_str() == trimmed)
            .ok_or_else(|| TypeConstraintError::InvalidJobTitle(trimmed.to_string()))
    }
}

/// Employee age, never below [`MINIMUM_AGE`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Age(i32);

impl Age {
    pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
        if value < MINIMUM_AGE {
            return Err(TypeConstraintError::BelowMinimumAge);
        }
        i32::try_from(value)
            .map(Self)
            .map_err(|_| TypeConstraintError::AgeTooLarge(i64::from(i32::MAX)))
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Display for Age {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for Age {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
    }
}
