//! Company response bodies.

use serde::{Serialize, Serializer};
use serde_json::{Value, json};

use crate::domain::company::{CompanyOverview, CompanyRef};
use crate::domain::employee::EmployeeSummary;
use crate::dto::projection::{Projectable, Projection};

/// Fields of a company in list, detail and write responses.
pub const COMPANY_FIELDS: &[&str] = &[
    "id",
    "name",
    "address",
    "phone",
    "description",
    "employee_count",
];

/// Fields of the company embedded in an employee.
pub const EMBEDDED_COMPANY_FIELDS: &[&str] = &["id", "name"];

/// Fields of each employee nested under a company.
pub const EMPLOYEE_SUMMARY_FIELDS: &[&str] = &["id", "name", "job_title"];

impl Projectable for CompanyOverview {
    fn field(&self, name: &str) -> Option<Value> {
        let company = &self.company;
        match name {
            "id" => Some(json!(company.id.to_string())),
            "name" => Some(json!(company.name.as_str())),
            "address" => Some(json!(company.address.as_str())),
            "phone" => Some(json!(company.phone.as_str())),
            "description" => Some(json!(company.description.as_ref().map(|d| d.as_str()))),
            "employee_count" => Some(json!(self.employee_count)),
            _ => None,
        }
    }
}

impl Projectable for CompanyRef {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(json!(self.id.to_string())),
            "name" => Some(json!(self.name.as_str())),
            _ => None,
        }
    }
}

impl Projectable for EmployeeSummary {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(json!(self.id.to_string())),
            "name" => Some(json!(self.name.as_str())),
            "job_title" => Some(json!(self.job_title.as_str())),
            _ => None,
        }
    }
}

/// A company as returned by the API, optionally with its employees.
#[derive(Debug, Clone)]
pub struct CompanyView {
    pub overview: CompanyOverview,
    pub employees: Option<Vec<EmployeeSummary>>,
    projection: Projection,
}

impl CompanyView {
    pub fn new(overview: CompanyOverview) -> Self {
        Self {
            overview,
            employees: None,
            projection: Projection::new(COMPANY_FIELDS),
        }
    }

    /// Attaches the nested `employees` list.
    pub fn with_employees(mut self, employees: Vec<EmployeeSummary>) -> Self {
        self.employees = Some(employees);
        self.projection = self.projection.with("employees");
        self
    }
}

impl Projectable for CompanyView {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "employees" => self.employees.as_ref().map(|employees| {
                let summaries = Projection::new(EMPLOYEE_SUMMARY_FIELDS);
                Value::Array(
                    employees
                        .iter()
                        .map(|employee| Value::Object(summaries.apply(employee)))
                        .collect(),
                )
            }),
            other => self.overview.field(other),
        }
    }
}

impl Serialize for CompanyView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.projection.apply(self).serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::company::Company;
    use crate::domain::types::{
        CompanyAddress, CompanyId, CompanyName, EmployeeId, EmployeeName, JobTitle, PhoneNumber,
    };

    fn overview() -> CompanyOverview {
        CompanyOverview {
            company: Company {
                id: CompanyId::generate(),
                name: CompanyName::new("Acme").unwrap(),
                address: CompanyAddress::new("1 Main St").unwrap(),
                phone: PhoneNumber::new("06301234567").unwrap(),
                description: None,
            },
            employee_count: 1,
        }
    }

    #[test]
    fn company_fields_in_order() {
        let value = serde_json::to_value(CompanyView::new(overview())).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, COMPANY_FIELDS);
        assert_eq!(value["description"], Value::Null);
        assert_eq!(value["employee_count"], 1);
    }

    #[test]
    fn nested_employees_expose_summary_fields_only() {
        let view = CompanyView::new(overview()).with_employees(vec![EmployeeSummary {
            id: EmployeeId::generate(),
            name: EmployeeName::new("Jane").unwrap(),
            job_title: JobTitle::Manager,
        }]);
        let value = serde_json::to_value(view).unwrap();
        let employee = value["employees"][0].as_object().unwrap();
        let keys: Vec<&str> = employee.keys().map(String::as_str).collect();
        assert_eq!(keys, EMPLOYEE_SUMMARY_FIELDS);
        assert_eq!(employee["job_title"], "manager");
    }
}
