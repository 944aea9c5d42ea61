//! Diesel models for the `employees` table.

use diesel::prelude::*;

use crate::domain::company::CompanyRef;
use crate::domain::employee::{
    Employee as DomainEmployee, EmployeeDetails, NewEmployee as DomainNewEmployee,
    UpdateEmployee as DomainUpdateEmployee,
};
use crate::domain::types::{
    Age, CompanyName, EmployeeEmail, EmployeeName, JobTitle, TypeConstraintError,
};
use crate::models::company::Company;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Company, foreign_key = company_id))]
#[diesel(table_name = crate::schema::employees)]
/// Diesel model for [`crate::domain::employee::Employee`].
pub struct Employee {
    pub id: String,
    pub name: String,
    pub email: String,
    pub job_title: String,
    pub age: i32,
    pub company_id: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::employees)]
/// Insertable form of [`Employee`].
pub struct NewEmployee<'a> {
    pub id: String,
    pub name: &'a str,
    pub email: &'a str,
    pub job_title: &'static str,
    pub age: i32,
    pub company_id: String,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::employees)]
pub struct UpdateEmployee<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub job_title: Option<&'static str>,
    pub age: Option<i32>,
    pub company_id: Option<String>,
}

impl TryFrom<Employee> for DomainEmployee {
    type Error = TypeConstraintError;

    fn try_from(employee: Employee) -> Result<Self, Self::Error> {
        Ok(Self {
            id: employee.id.parse()?,
            name: EmployeeName::new(employee.name)?,
            email: EmployeeEmail::new(employee.email)?,
            job_title: employee.job_title.parse()?,
            age: Age::try_from(employee.age)?,
            company_id: employee.company_id.parse()?,
        })
    }
}

/// Joined row as loaded by employee listings: the employee plus its company name.
pub type EmployeeWithCompanyName = (Employee, String);

impl TryFrom<EmployeeWithCompanyName> for EmployeeDetails {
    type Error = TypeConstraintError;

    fn try_from((employee, company_name): EmployeeWithCompanyName) -> Result<Self, Self::Error> {
        let employee = DomainEmployee::try_from(employee)?;
        Ok(Self {
            company: CompanyRef {
                id: employee.company_id,
                name: CompanyName::new(company_name)?,
            },
            employee,
        })
    }
}

impl<'a> From<&'a DomainNewEmployee> for NewEmployee<'a> {
    fn from(employee: &'a DomainNewEmployee) -> Self {
        Self {
            id: employee.id.to_string(),
            name: employee.name.as_str(),
            email: employee.email.as_str(),
            job_title: employee.job_title.as_str(),
            age: employee.age.get(),
            company_id: employee.company_id.to_string(),
        }
    }
}

impl<'a> From<&'a DomainUpdateEmployee> for UpdateEmployee<'a> {
    fn from(updates: &'a DomainUpdateEmployee) -> Self {
        Self {
            name: updates.name.as_ref().map(EmployeeName::as_str),
            email: updates.email.as_ref().map(EmployeeEmail::as_str),
            job_title: updates.job_title.map(JobTitle::as_str),
            age: updates.age.map(Age::get),
            company_id: updates.company_id.map(|id| id.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::CompanyId;

    #[test]
    fn joined_row_into_details() {
        let company_id = CompanyId::generate();
        let row = Employee {
            id: "0b7f0d55-6d1c-4d0e-8f55-3f8c0a7d9a21".to_string(),
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            job_title: "designer".to_string(),
            age: 30,
            company_id: company_id.to_string(),
        };
        let details = EmployeeDetails::try_from((row, "Acme".to_string())).unwrap();
        assert_eq!(details.company.id, company_id);
        assert_eq!(details.company.name.as_str(), "Acme");
        assert_eq!(details.employee.job_title, JobTitle::Designer);
        assert_eq!(details.employee.age.get(), 30);
    }

    #[test]
    fn update_changeset_skips_missing_fields() {
        let updates = DomainUpdateEmployee {
            age: Some(Age::new(40).unwrap()),
            ..DomainUpdateEmployee::default()
        };
        let changeset = UpdateEmployee::from(&updates);
        assert_eq!(changeset.age, Some(40));
        assert!(changeset.email.is_none());
        assert!(changeset.company_id.is_none());
    }
}
