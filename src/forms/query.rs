//! Query strings of the listing and detail endpoints. Every value is kept as
//! raw text so malformed numbers can be reported per parameter.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyListParams {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    /// Exact number of employees.
    pub employees: Option<String>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub with_employees: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeListParams {
    pub name: Option<String>,
    pub email: Option<String>,
    pub job_title: Option<String>,
    pub age: Option<String>,
    pub company_name: Option<String>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyDetailParams {
    pub with_employees: Option<String>,
}

/// `with_employees=1` switches on the nested employee list.
pub fn wants_employees(flag: Option<&str>) -> bool {
    flag.map(str::trim) == Some("1")
}
