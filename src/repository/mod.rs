use std::collections::HashMap;

use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        company::{Company, CompanyOverview, NewCompany, UpdateCompany},
        employee::{EmployeeDetails, EmployeeSummary, NewEmployee, UpdateEmployee},
        types::{CompanyId, EmployeeEmail, EmployeeId},
    },
    repository::errors::RepositoryResult,
};

/// Applies `ORDER BY column ASC|DESC` to a boxed query.
macro_rules! sorted {
    ($query:expr, $column:expr, $direction:expr) => {
        match $direction {
            $crate::repository::SortDirection::Asc => $query.order_by($column.asc()),
            $crate::repository::SortDirection::Desc => $query.order_by($column.desc()),
        }
    };
}

pub mod company;
pub mod employee;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;

/// Diesel-backed store shared by every request handler.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

/// One page of a listing, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    pub fn offset(&self) -> i64 {
        ((self.page.max(1) - 1) * self.per_page) as i64
    }

    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Column a listing may be ordered by, addressed by its public name.
pub trait SortField: Copy + Sized + 'static {
    /// Public names in the order they are reported to clients.
    const ALLOWED: &'static [(&'static str, Self)];

    fn from_name(name: &str) -> Option<Self> {
        Self::ALLOWED
            .iter()
            .find(|(allowed, _)| *allowed == name)
            .map(|(_, field)| *field)
    }

    fn names() -> Vec<&'static str> {
        Self::ALLOWED.iter().map(|(name, _)| *name).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanySortField {
    Name,
    Address,
    Phone,
    Description,
    EmployeeCount,
}

impl SortField for CompanySortField {
    const ALLOWED: &'static [(&'static str, Self)] = &[
        ("name", Self::Name),
        ("address", Self::Address),
        ("phone", Self::Phone),
        ("description", Self::Description),
        ("employee_count", Self::EmployeeCount),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeSortField {
    Name,
    Email,
    JobTitle,
    Age,
    /// Sorts by the owning company id.
    Company,
}

impl SortField for EmployeeSortField {
    const ALLOWED: &'static [(&'static str, Self)] = &[
        ("name", Self::Name),
        ("email", Self::Email),
        ("job_title", Self::JobTitle),
        ("age", Self::Age),
        ("company", Self::Company),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordering<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: SortField> Ordering<F> {
    /// Parses `name` or `-name`. Returns `None` for names outside the allow-list.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (direction, name) = match raw.strip_prefix('-') {
            Some(name) => (SortDirection::Desc, name),
            None => (SortDirection::Asc, raw),
        };
        F::from_name(name).map(|field| Self { field, direction })
    }
}

/// Filters for the company listing. Text filters are case-insensitive
/// substring matches; `employee_count` is an exact match.
#[derive(Debug, Clone, Default)]
pub struct CompanyListQuery {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub employee_count: Option<i64>,
    pub search: Option<String>,
    pub ordering: Option<Ordering<CompanySortField>>,
    pub pagination: Option<Pagination>,
}

impl CompanyListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn employee_count(mut self, count: i64) -> Self {
        self.employee_count = Some(count);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn order_by(mut self, field: CompanySortField, direction: SortDirection) -> Self {
        self.ordering = Some(Ordering { field, direction });
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Filters for the employee listing. `company_name` matches against the
/// owning company; `age` is an exact match.
#[derive(Debug, Clone, Default)]
pub struct EmployeeListQuery {
    pub name: Option<String>,
    pub email: Option<String>,
    pub job_title: Option<String>,
    pub age: Option<i32>,
    pub company_name: Option<String>,
    pub search: Option<String>,
    pub ordering: Option<Ordering<EmployeeSortField>>,
    pub pagination: Option<Pagination>,
}

impl EmployeeListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn job_title(mut self, job_title: impl Into<String>) -> Self {
        self.job_title = Some(job_title.into());
        self
    }

    pub fn age(mut self, age: i32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn company_name(mut self, company_name: impl Into<String>) -> Self {
        self.company_name = Some(company_name.into());
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn order_by(mut self, field: EmployeeSortField, direction: SortDirection) -> Self {
        self.ordering = Some(Ordering { field, direction });
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Escape character paired with [`contains`] patterns.
pub(crate) const LIKE_ESCAPE: char = '\\';

/// `%value%` pattern for SQL `LIKE ... ESCAPE '\\'`. Wildcards in `value`
/// match literally.
pub(crate) fn contains(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

pub trait CompanyReader {
    fn get_company_by_id(&self, id: CompanyId) -> RepositoryResult<Option<CompanyOverview>>;
    fn company_exists(&self, id: CompanyId) -> RepositoryResult<bool>;
    fn list_companies(
        &self,
        query: CompanyListQuery,
    ) -> RepositoryResult<(usize, Vec<CompanyOverview>)>;
    /// Employees of each company in `ids`, grouped by company. Companies
    /// without employees are absent from the map.
    fn list_employee_summaries(
        &self,
        ids: &[CompanyId],
    ) -> RepositoryResult<HashMap<CompanyId, Vec<EmployeeSummary>>>;
}

pub trait CompanyWriter {
    /// Inserts the company and its initial employees atomically.
    fn create_company(
        &self,
        company: &NewCompany,
        employees: &[NewEmployee],
    ) -> RepositoryResult<Company>;
    fn update_company(&self, id: CompanyId, updates: &UpdateCompany) -> RepositoryResult<()>;
    /// Fails with `Conflict` while the company still owns employees.
    fn delete_company(&self, id: CompanyId) -> RepositoryResult<()>;
}

pub trait EmployeeReader {
    fn get_employee_by_id(&self, id: EmployeeId) -> RepositoryResult<Option<EmployeeDetails>>;
    fn find_email_owner(&self, email: &EmployeeEmail) -> RepositoryResult<Option<EmployeeId>>;
    fn list_employees(
        &self,
        query: EmployeeListQuery,
    ) -> RepositoryResult<(usize, Vec<EmployeeDetails>)>;
}

pub trait EmployeeWriter {
    fn create_employees(&self, employees: &[NewEmployee]) -> RepositoryResult<usize>;
    /// Applies every update in one transaction.
    fn update_employees(&self, updates: &[(EmployeeId, UpdateEmployee)]) -> RepositoryResult<usize>;
    /// Deletes the employees that exist and returns their ids.
    fn delete_employees(&self, ids: &[EmployeeId]) -> RepositoryResult<Vec<EmployeeId>>;
}
