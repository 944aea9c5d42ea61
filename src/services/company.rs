//! Company workflows.

use log::info;

use crate::domain::company::CompanyOverview;
use crate::domain::employee::EmployeeSummary;
use crate::domain::types::CompanyId;
use crate::dto::company::CompanyView;
use crate::forms::company::CompanyPayload;
use crate::forms::employee::EmployeePayload;
use crate::forms::{ValidationMode, decode};
use crate::forms::errors::FieldErrors;
use crate::forms::query::{CompanyListParams, wants_employees};
use crate::pagination::Paginated;
use crate::repository::errors::RepositoryError;
use crate::repository::{
    CompanyListQuery, CompanyReader, CompanySortField, CompanyWriter, EmployeeReader,
};
use crate::services::validation::EmployeeValidator;
use crate::services::{ServiceError, ServiceResult, query};

pub const COMPANY_NOT_FOUND: &str = "Company not found!";

fn not_found() -> ServiceError {
    ServiceError::NotFound(COMPANY_NOT_FOUND.to_string())
}

/// Path ids that are not UUIDs cannot name a company.
fn parse_id(raw: &str) -> ServiceResult<CompanyId> {
    raw.parse().map_err(|_| not_found())
}

/// Filtered, ordered page of companies.
pub fn list_companies<R>(repo: &R, params: &CompanyListParams) -> ServiceResult<Paginated<CompanyView>>
where
    R: CompanyReader + ?Sized,
{
    let mut errors = FieldErrors::new();
    let employee_count = query::integer::<i64>(&mut errors, "employees", params.employees.as_deref());
    errors.into_result()?;

    let ordering = query::ordering::<CompanySortField>(params.ordering.as_deref())?;
    let pagination = query::pagination(params.page.as_deref(), params.page_size.as_deref());
    let search = query::text(params.search.as_deref());

    let list_query = CompanyListQuery {
        name: query::text(params.name.as_deref()),
        address: query::text(params.address.as_deref()),
        phone: query::text(params.phone.as_deref()),
        description: query::text(params.description.as_deref()),
        employee_count,
        search: search.clone(),
        ordering,
        pagination: Some(pagination),
    };

    let (total, companies) = repo.list_companies(list_query)?;

    if let (Some(search), 0) = (search, total) {
        return Err(ServiceError::NotFound(format!(
            "No companies found matching the search criteria. ({search})"
        )));
    }
    query::ensure_page_exists(total, pagination)?;

    let views = attach_employees(repo, companies, wants_employees(params.with_employees.as_deref()))?;
    Ok(Paginated::new(views, total, pagination))
}

/// Builds views, adding nested employees with one grouped lookup.
fn attach_employees<R>(
    repo: &R,
    companies: Vec<CompanyOverview>,
    with_employees: bool,
) -> ServiceResult<Vec<CompanyView>>
where
    R: CompanyReader + ?Sized,
{
    if !with_employees {
        return Ok(companies.into_iter().map(CompanyView::new).collect());
    }

    let ids: Vec<CompanyId> = companies.iter().map(|c| c.company.id).collect();
    let mut grouped = repo.list_employee_summaries(&ids)?;

    Ok(companies
        .into_iter()
        .map(|overview| {
            let employees = grouped.remove(&overview.company.id).unwrap_or_default();
            CompanyView::new(overview).with_employees(employees)
        })
        .collect())
}

pub fn get_company<R>(repo: &R, id: &str, with_employees: bool) -> ServiceResult<CompanyView>
where
    R: CompanyReader + ?Sized,
{
    let id = parse_id(id)?;
    let overview = repo.get_company_by_id(id)?.ok_or_else(not_found)?;

    let mut views = attach_employees(repo, vec![overview], with_employees)?;
    views.pop().ok_or_else(not_found)
}

/// Creates a company and any nested employees in one transaction.
pub fn create_company<R>(repo: &R, payload: &CompanyPayload) -> ServiceResult<CompanyView>
where
    R: CompanyReader + CompanyWriter + EmployeeReader + ?Sized,
{
    let (company, mut errors) = match payload.to_new_company() {
        Ok(company) => (Some(company), FieldErrors::new()),
        Err(errors) => (None, errors),
    };
    // Nested items still get validated when the company itself is invalid.
    let parent = company
        .as_ref()
        .map_or_else(CompanyId::generate, |company| company.id);

    let mut validator = EmployeeValidator::new(repo);
    let mut employees = Vec::new();
    for (index, item) in payload.employees.iter().flatten().enumerate() {
        let outcome = match decode::<EmployeePayload>(item.clone()) {
            Ok(item) => validator.new_employee(&item, ValidationMode::CreateNested, Some(parent))?,
            Err(item_errors) => Err(item_errors),
        };
        match outcome {
            Ok(employee) => employees.push(employee),
            Err(item_errors) => errors.extend_prefixed(&format!("employees[{index}]"), item_errors),
        }
    }

    let company = match company {
        Some(company) if errors.is_empty() => company,
        _ => return Err(ServiceError::Validation(errors)),
    };

    let created = repo.create_company(&company, &employees)?;
    info!(
        "Created company {} with {} employees",
        created.id,
        employees.len()
    );

    let summaries = employees
        .iter()
        .map(|employee| EmployeeSummary {
            id: employee.id,
            name: employee.name.clone(),
            job_title: employee.job_title,
        })
        .collect();

    Ok(CompanyView::new(CompanyOverview {
        company: created,
        employee_count: employees.len(),
    })
    .with_employees(summaries))
}

/// Partial update; only the fields present in `payload` change.
pub fn update_company<R>(repo: &R, id: &str, payload: &CompanyPayload) -> ServiceResult<CompanyView>
where
    R: CompanyReader + CompanyWriter + ?Sized,
{
    let id = parse_id(id)?;
    if !repo.company_exists(id)? {
        return Err(not_found());
    }

    let updates = payload.to_update_company()?;
    repo.update_company(id, &updates).map_err(|err| match err {
        RepositoryError::NotFound => not_found(),
        other => other.into(),
    })?;

    let overview = repo.get_company_by_id(id)?.ok_or_else(not_found)?;
    Ok(CompanyView::new(overview))
}

/// Deletes a company that owns no employees.
pub fn delete_company<R>(repo: &R, id: &str) -> ServiceResult<()>
where
    R: CompanyWriter + ?Sized,
{
    let id = parse_id(id)?;
    repo.delete_company(id).map_err(|err| match err {
        RepositoryError::NotFound => not_found(),
        RepositoryError::Conflict(message) => ServiceError::Conflict(message),
        other => other.into(),
    })?;
    info!("Deleted company {id}");
    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use super::*;
    use crate::domain::company::Company;
    use crate::domain::types::{
        CompanyAddress, CompanyName, EmployeeId, EmployeeName, JobTitle, PhoneNumber,
    };
    use crate::forms::errors::ErrorKind;
    use crate::repository::company::COMPANY_HAS_EMPLOYEES;
    use crate::repository::mock::MockRepository;

    fn overview(id: CompanyId, count: usize) -> CompanyOverview {
        CompanyOverview {
            company: Company {
                id,
                name: CompanyName::new("Acme").unwrap(),
                address: CompanyAddress::new("1 Main St").unwrap(),
                phone: PhoneNumber::new("06301234567").unwrap(),
                description: None,
            },
            employee_count: count,
        }
    }

    #[test]
    fn search_without_matches_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_list_companies().returning(|_| Ok((0, vec![])));

        let params = CompanyListParams {
            search: Some("zzz".into()),
            ..Default::default()
        };
        match list_companies(&repo, &params) {
            Err(ServiceError::NotFound(message)) => assert!(message.contains("(zzz)")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn empty_filter_result_is_an_empty_page() {
        let mut repo = MockRepository::new();
        repo.expect_list_companies().returning(|_| Ok((0, vec![])));

        let params = CompanyListParams {
            name: Some("zzz".into()),
            ..Default::default()
        };
        let page = list_companies(&repo, &params).unwrap();
        assert_eq!(page.count, 0);
        assert!(page.results.is_empty());
    }

    #[test]
    fn non_integer_employee_filter_is_rejected() {
        let repo = MockRepository::new();
        let params = CompanyListParams {
            employees: Some("many".into()),
            ..Default::default()
        };
        match list_companies(&repo, &params) {
            Err(ServiceError::Validation(errors)) => {
                assert_eq!(errors.codes("employees"), vec![ErrorKind::InvalidFormat])
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn with_employees_uses_one_grouped_lookup() {
        let first = CompanyId::generate();
        let second = CompanyId::generate();
        let mut repo = MockRepository::new();
        repo.expect_list_companies()
            .returning(move |_| Ok((2, vec![overview(first, 1), overview(second, 0)])));
        repo.expect_list_employee_summaries()
            .times(1)
            .returning(move |ids| {
                assert_eq!(ids.len(), 2);
                let mut grouped = HashMap::new();
                grouped.insert(
                    first,
                    vec![EmployeeSummary {
                        id: EmployeeId::generate(),
                        name: EmployeeName::new("Jane").unwrap(),
                        job_title: JobTitle::Tester,
                    }],
                );
                Ok(grouped)
            });

        let params = CompanyListParams {
            with_employees: Some("1".into()),
            ..Default::default()
        };
        let page = list_companies(&repo, &params).unwrap();
        assert_eq!(page.results[0].employees.as_ref().map(Vec::len), Some(1));
        assert_eq!(page.results[1].employees.as_ref().map(Vec::len), Some(0));
    }

    #[test]
    fn delete_guard_surfaces_as_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_delete_company()
            .returning(|_| Err(RepositoryError::Conflict(COMPANY_HAS_EMPLOYEES.to_string())));

        let id = CompanyId::generate().to_string();
        match delete_company(&repo, &id) {
            Err(ServiceError::Conflict(message)) => assert_eq!(message, COMPANY_HAS_EMPLOYEES),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn malformed_id_is_not_found() {
        let repo = MockRepository::new();
        assert!(matches!(
            get_company(&repo, "not-a-uuid", false),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn invalid_nested_employee_blocks_company_create() {
        let mut repo = MockRepository::new();
        repo.expect_find_email_owner().returning(|_| Ok(None));
        repo.expect_create_company().never();

        let payload: CompanyPayload = serde_json::from_value(json!({
            "name": "Acme",
            "address": "1 Main St",
            "phone": "06301234567",
            "employees": [
                {"name": "Ok", "email": "ok@example.com", "job_title": "tester", "age": 20},
                {"name": "Kid", "email": "kid@example.com", "job_title": "tester", "age": 12},
            ],
        }))
        .unwrap();

        match create_company(&repo, &payload) {
            Err(ServiceError::Validation(errors)) => {
                assert_eq!(errors.codes("employees[1].age"), vec![ErrorKind::BelowMinimum]);
                assert!(!errors.has("employees[0].age"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn update_of_unknown_company_is_not_found_before_validation() {
        let mut repo = MockRepository::new();
        repo.expect_company_exists().returning(|_| Ok(false));

        let payload: CompanyPayload = serde_json::from_value(json!({"phone": "bad"})).unwrap();
        let id = CompanyId::generate().to_string();
        assert!(matches!(
            update_company(&repo, &id, &payload),
            Err(ServiceError::NotFound(_))
        ));
    }
}
