//! Mock repository implementations for isolating services in tests.

use std::collections::HashMap;

use mockall::mock;

use crate::domain::company::{Company, CompanyOverview, NewCompany, UpdateCompany};
use crate::domain::employee::{EmployeeDetails, EmployeeSummary, NewEmployee, UpdateEmployee};
use crate::domain::types::{CompanyId, EmployeeEmail, EmployeeId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    CompanyListQuery, CompanyReader, CompanyWriter, EmployeeListQuery, EmployeeReader,
    EmployeeWriter,
};

mock! {
    pub Repository {}

    impl CompanyReader for Repository {
        fn get_company_by_id(&self, id: CompanyId) -> RepositoryResult<Option<CompanyOverview>>;
        fn company_exists(&self, id: CompanyId) -> RepositoryResult<bool>;
        fn list_companies(
            &self,
            query: CompanyListQuery,
        ) -> RepositoryResult<(usize, Vec<CompanyOverview>)>;
        fn list_employee_summaries(
            &self,
            ids: &[CompanyId],
        ) -> RepositoryResult<HashMap<CompanyId, Vec<EmployeeSummary>>>;
    }

    impl CompanyWriter for Repository {
        fn create_company(
            &self,
            company: &NewCompany,
            employees: &[NewEmployee],
        ) -> RepositoryResult<Company>;
        fn update_company(&self, id: CompanyId, updates: &UpdateCompany) -> RepositoryResult<()>;
        fn delete_company(&self, id: CompanyId) -> RepositoryResult<()>;
    }

    impl EmployeeReader for Repository {
        fn get_employee_by_id(&self, id: EmployeeId) -> RepositoryResult<Option<EmployeeDetails>>;
        fn find_email_owner(&self, email: &EmployeeEmail) -> RepositoryResult<Option<EmployeeId>>;
        fn list_employees(
            &self,
            query: EmployeeListQuery,
        ) -> RepositoryResult<(usize, Vec<EmployeeDetails>)>;
    }

    impl EmployeeWriter for Repository {
        fn create_employees(&self, employees: &[NewEmployee]) -> RepositoryResult<usize>;
        fn update_employees(
            &self,
            updates: &[(EmployeeId, UpdateEmployee)],
        ) -> RepositoryResult<usize>;
        fn delete_employees(&self, ids: &[EmployeeId]) -> RepositoryResult<Vec<EmployeeId>>;
    }
}
