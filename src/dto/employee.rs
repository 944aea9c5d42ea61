//! Employee response bodies.

use serde::{Serialize, Serializer};
use serde_json::{Value, json};

use crate::domain::employee::EmployeeDetails;
use crate::dto::company::EMBEDDED_COMPANY_FIELDS;
use crate::dto::projection::{Projectable, Projection};

pub const EMPLOYEE_FIELDS: &[&str] = &["id", "name", "email", "job_title", "age", "company"];

impl Projectable for EmployeeDetails {
    const RELATIONSHIP: Option<&'static str> = Some("company");

    fn field(&self, name: &str) -> Option<Value> {
        let employee = &self.employee;
        match name {
            "id" => Some(json!(employee.id.to_string())),
            "name" => Some(json!(employee.name.as_str())),
            "email" => Some(json!(employee.email.as_str())),
            "job_title" => Some(json!(employee.job_title.as_str())),
            "age" => Some(json!(employee.age.get())),
            "company" => Some(Value::Object(
                Projection::new(EMBEDDED_COMPANY_FIELDS).apply(&self.company),
            )),
            _ => None,
        }
    }
}

/// An employee as returned by the API.
#[derive(Debug, Clone)]
pub struct EmployeeView(pub EmployeeDetails);

impl From<EmployeeDetails> for EmployeeView {
    fn from(details: EmployeeDetails) -> Self {
        Self(details)
    }
}

impl Serialize for EmployeeView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Projection::new(EMPLOYEE_FIELDS)
            .apply(&self.0)
            .serialize(serializer)
    }
}
