use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{Age, CompanyId, EmployeeEmail, EmployeeName, JobTitle};
use crate::forms::errors::FieldErrors;
use crate::forms::{FieldKind, FieldwisePayload, ValidationMode, require, typed_field};

/// Employee body as accepted by the single, nested and bulk endpoints.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct EmployeePayload {
    /// Only read by bulk updates, where it selects the row to change.
    #[serde(default)]
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub job_title: Option<String>,
    #[validate(range(
        min = 16,
        code = "below_minimum",
        message = "Individuals under the age of 16 are not permitted to engage in employment."
    ))]
    pub age: Option<i64>,
    /// Company id as a UUID string.
    pub company: Option<String>,
    #[serde(skip)]
    type_errors: FieldErrors,
}

impl FieldwisePayload for EmployeePayload {
    const FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("id", FieldKind::Text),
        ("name", FieldKind::Text),
        ("email", FieldKind::Text),
        ("job_title", FieldKind::Text),
        ("age", FieldKind::Integer),
        ("company", FieldKind::Text),
    ];

    fn set_type_errors(&mut self, errors: FieldErrors) {
        self.type_errors = errors;
    }
}

/// Typed fields that passed field-level validation. Absent values are
/// either omitted by a partial update or already reported as errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeFields {
    pub name: Option<EmployeeName>,
    pub email: Option<EmployeeEmail>,
    pub job_title: Option<JobTitle>,
    pub age: Option<Age>,
    pub company: Option<CompanyId>,
}

impl EmployeePayload {
    /// Field-level pass: syntax, bounds and choices for present fields, plus
    /// presence when `mode` needs every field. Cross-entity rules (email
    /// ownership, company existence) are left to the service layer.
    pub fn parse_fields(&self, mode: ValidationMode) -> (EmployeeFields, FieldErrors) {
        let mut errors = self.type_errors.clone();
        if let Err(invalid) = self.validate() {
            errors.merge(invalid.into());
        }

        let age = if errors.has("age") {
            None
        } else {
            match self.age.map(Age::new) {
                Some(Ok(age)) => Some(age),
                Some(Err(err)) => {
                    errors.push("age", err.into());
                    None
                }
                None => None,
            }
        };

        let mut fields = EmployeeFields {
            name: typed_field(&mut errors, "name", self.name.as_deref(), |v| {
                EmployeeName::new(v)
            }),
            email: typed_field(&mut errors, "email", self.email.as_deref(), |v| {
                EmployeeEmail::new(v)
            }),
            job_title: typed_field(&mut errors, "job_title", self.job_title.as_deref(), |v| {
                v.parse::<JobTitle>()
            }),
            age,
            company: None,
        };

        if mode.reads_company() {
            fields.company = typed_field(&mut errors, "company", self.company.as_deref(), |v| {
                v.parse::<CompanyId>()
            });
        }

        if mode.requires_all() {
            fields.name = require(&mut errors, "name", fields.name.take());
            fields.email = require(&mut errors, "email", fields.email.take());
            fields.job_title = require(&mut errors, "job_title", fields.job_title.take());
            fields.age = require(&mut errors, "age", fields.age.take());
            if mode.reads_company() {
                fields.company = require(&mut errors, "company", fields.company.take());
            }
        }

        (fields, errors)
    }
}
