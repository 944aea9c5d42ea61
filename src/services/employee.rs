//! Single-employee workflows.

use log::info;

use crate::domain::types::EmployeeId;
use crate::dto::employee::EmployeeView;
use crate::forms::ValidationMode;
use crate::forms::employee::EmployeePayload;
use crate::forms::errors::FieldErrors;
use crate::forms::query::EmployeeListParams;
use crate::pagination::Paginated;
use crate::repository::errors::RepositoryError;
use crate::repository::{
    CompanyReader, EmployeeListQuery, EmployeeReader, EmployeeSortField, EmployeeWriter,
};
use crate::services::validation::EmployeeValidator;
use crate::services::{ServiceError, ServiceResult, query};

pub const EMPLOYEE_NOT_FOUND: &str = "Employee not found!";

fn not_found() -> ServiceError {
    ServiceError::NotFound(EMPLOYEE_NOT_FOUND.to_string())
}

fn parse_id(raw: &str) -> ServiceResult<EmployeeId> {
    raw.parse().map_err(|_| not_found())
}

fn map_missing(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::NotFound => not_found(),
        other => other.into(),
    }
}

/// Filtered, ordered page of employees.
pub fn list_employees<R>(
    repo: &R,
    params: &EmployeeListParams,
) -> ServiceResult<Paginated<EmployeeView>>
where
    R: EmployeeReader + ?Sized,
{
    let mut errors = FieldErrors::new();
    let age = query::integer::<i32>(&mut errors, "age", params.age.as_deref());
    errors.into_result()?;

    let ordering = query::ordering::<EmployeeSortField>(params.ordering.as_deref())?;
    let pagination = query::pagination(params.page.as_deref(), params.page_size.as_deref());
    let search = query::text(params.search.as_deref());

    let list_query = EmployeeListQuery {
        name: query::text(params.name.as_deref()),
        email: query::text(params.email.as_deref()),
        job_title: query::text(params.job_title.as_deref()),
        age,
        company_name: query::text(params.company_name.as_deref()),
        search: search.clone(),
        ordering,
        pagination: Some(pagination),
    };

    let (total, employees) = repo.list_employees(list_query)?;

    if let (Some(search), 0) = (search, total) {
        return Err(ServiceError::NotFound(format!(
            "No employees found matching the search criteria. ({search})"
        )));
    }
    query::ensure_page_exists(total, pagination)?;

    Ok(Paginated::new(employees, total, pagination).map(EmployeeView::from))
}

pub fn get_employee<R>(repo: &R, id: &str) -> ServiceResult<EmployeeView>
where
    R: EmployeeReader + ?Sized,
{
    let id = parse_id(id)?;
    repo.get_employee_by_id(id)?
        .map(EmployeeView::from)
        .ok_or_else(not_found)
}

/// Creates one employee. Company presence and existence are both required.
pub fn create_employee<R>(repo: &R, payload: &EmployeePayload) -> ServiceResult<EmployeeView>
where
    R: CompanyReader + EmployeeReader + EmployeeWriter + ?Sized,
{
    let employee = EmployeeValidator::new(repo).new_employee(payload, ValidationMode::Create, None)??;

    repo.create_employees(std::slice::from_ref(&employee))?;
    info!("Created employee {}", employee.id);

    get_employee(repo, &employee.id.to_string())
}

/// PUT when `partial` is false, PATCH otherwise.
pub fn update_employee<R>(
    repo: &R,
    id: &str,
    payload: &EmployeePayload,
    partial: bool,
) -> ServiceResult<EmployeeView>
where
    R: CompanyReader + EmployeeReader + EmployeeWriter + ?Sized,
{
    let id = parse_id(id)?;
    if repo.get_employee_by_id(id)?.is_none() {
        return Err(not_found());
    }

    let mode = if partial {
        ValidationMode::UpdatePartial
    } else {
        ValidationMode::UpdateFull
    };
    let updates = EmployeeValidator::new(repo).update_employee(id, payload, mode)??;

    repo.update_employees(&[(id, updates)]).map_err(map_missing)?;

    repo.get_employee_by_id(id)?
        .map(EmployeeView::from)
        .ok_or_else(not_found)
}

pub fn delete_employee<R>(repo: &R, id: &str) -> ServiceResult<()>
where
    R: EmployeeWriter + ?Sized,
{
    let id = parse_id(id)?;
    let deleted = repo.delete_employees(&[id])?;
    if deleted.is_empty() {
        return Err(not_found());
    }
    info!("Deleted employee {id}");
    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::types::CompanyId;
    use crate::forms::errors::ErrorKind;
    use crate::repository::mock::MockRepository;

    fn payload(value: serde_json::Value) -> EmployeePayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn create_with_unknown_company_fails_validation() {
        let mut repo = MockRepository::new();
        repo.expect_company_exists().returning(|_| Ok(false));
        repo.expect_find_email_owner().returning(|_| Ok(None));
        repo.expect_create_employees().never();

        let result = create_employee(
            &repo,
            &payload(json!({
                "name": "Jane",
                "email": "jane@example.com",
                "job_title": "tester",
                "age": 30,
                "company": CompanyId::generate().to_string(),
            })),
        );
        match result {
            Err(ServiceError::Validation(errors)) => {
                assert_eq!(errors.codes("company"), vec![ErrorKind::NotFound]);
                assert_eq!(
                    errors.get("company").unwrap()[0].message,
                    "The specified company does not exist."
                );
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn create_without_company_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_find_email_owner().returning(|_| Ok(None));

        let result = create_employee(
            &repo,
            &payload(json!({
                "name": "Jane",
                "email": "jane@example.com",
                "job_title": "tester",
                "age": 30,
            })),
        );
        match result {
            Err(ServiceError::Validation(errors)) => {
                assert_eq!(errors.codes("company"), vec![ErrorKind::FieldRequired])
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn update_of_unknown_employee_skips_validation() {
        let mut repo = MockRepository::new();
        repo.expect_get_employee_by_id().returning(|_| Ok(None));
        repo.expect_update_employees().never();

        let id = EmployeeId::generate().to_string();
        let result = update_employee(&repo, &id, &payload(json!({"age": 3})), true);
        assert!(matches!(result, Err(ServiceError::NotFound(message)) if message == EMPLOYEE_NOT_FOUND));
    }

    #[test]
    fn delete_of_missing_employee_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_delete_employees().returning(|_| Ok(vec![]));

        let id = EmployeeId::generate().to_string();
        assert!(matches!(delete_employee(&repo, &id), Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn search_without_matches_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_list_employees().returning(|_| Ok((0, vec![])));

        let params = EmployeeListParams {
            search: Some("nobody".into()),
            ..Default::default()
        };
        assert!(matches!(
            list_employees(&repo, &params),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn invalid_ordering_is_reported() {
        let repo = MockRepository::new();
        let params = EmployeeListParams {
            ordering: Some("salary".into()),
            ..Default::default()
        };
        assert!(matches!(
            list_employees(&repo, &params),
            Err(ServiceError::InvalidOrdering { field, .. }) if field == "salary"
        ));
    }
}
