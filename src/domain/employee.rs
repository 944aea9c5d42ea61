use serde::Serialize;

use crate::domain::company::CompanyRef;
use crate::domain::types::{Age, CompanyId, EmployeeEmail, EmployeeId, EmployeeName, JobTitle};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: EmployeeName,
    pub email: EmployeeEmail,
    pub job_title: JobTitle,
    pub age: Age,
    pub company_id: CompanyId,
}

/// Employee joined with the owning company's name.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct EmployeeDetails {
    pub employee: Employee,
    pub company: CompanyRef,
}

/// Compact employee row nested under a company.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct EmployeeSummary {
    pub id: EmployeeId,
    pub name: EmployeeName,
    pub job_title: JobTitle,
}

#[derive(Clone, Debug)]
pub struct NewEmployee {
    pub id: EmployeeId,
    pub name: EmployeeName,
    pub email: EmployeeEmail,
    pub job_title: JobTitle,
    pub age: Age,
    pub company_id: CompanyId,
}

impl NewEmployee {
    /// Builds a new employee with a freshly generated identifier.
    #[must_use]
    pub fn new(
        name: EmployeeName,
        email: EmployeeEmail,
        job_title: JobTitle,
        age: Age,
        company_id: CompanyId,
    ) -> Self {
        Self {
            id: EmployeeId::generate(),
            name,
            email,
            job_title,
            age,
            company_id,
        }
    }
}

/// Validated changes for one employee. Omitted fields stay as stored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateEmployee {
    pub name: Option<EmployeeName>,
    pub email: Option<EmployeeEmail>,
    pub job_title: Option<JobTitle>,
    pub age: Option<Age>,
    pub company_id: Option<CompanyId>,
}

impl UpdateEmployee {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.job_title.is_none()
            && self.age.is_none()
            && self.company_id.is_none()
    }
}
