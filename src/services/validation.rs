//! Cross-entity checks for employee payloads.

use std::collections::HashMap;

use crate::domain::employee::{NewEmployee, UpdateEmployee};
use crate::domain::types::{CompanyId, EmployeeEmail, EmployeeId};
use crate::forms::ValidationMode;
use crate::forms::employee::EmployeePayload;
use crate::forms::errors::{ErrorKind, FieldErrors};
use crate::repository::{CompanyReader, EmployeeReader};
use crate::services::ServiceResult;

pub const EMAIL_TAKEN: &str = "Employee with this email already exists.";

/// Validates employee payloads against the store and against each other.
///
/// One validator is used per request so a batch sees the emails claimed by
/// its earlier items and each company is looked up once.
pub struct EmployeeValidator<'a, R: ?Sized> {
    repo: &'a R,
    companies: HashMap<CompanyId, bool>,
    /// Email -> employee claiming it earlier in this request (`None` for creates).
    claimed: HashMap<String, Option<EmployeeId>>,
}

impl<'a, R> EmployeeValidator<'a, R>
where
    R: CompanyReader + EmployeeReader + ?Sized,
{
    pub fn new(repo: &'a R) -> Self {
        Self {
            repo,
            companies: HashMap::new(),
            claimed: HashMap::new(),
        }
    }

    fn check_company(
        &mut self,
        id: CompanyId,
        mode: ValidationMode,
        errors: &mut FieldErrors,
    ) -> ServiceResult<()> {
        let exists = match self.companies.get(&id) {
            Some(exists) => *exists,
            None => {
                let exists = self.repo.company_exists(id)?;
                self.companies.insert(id, exists);
                exists
            }
        };
        if !exists {
            let message = if mode.is_bulk() {
                format!("Company with UUID {id} does not exist.")
            } else {
                "The specified company does not exist.".to_string()
            };
            errors.add("company", ErrorKind::NotFound, message);
        }
        Ok(())
    }

    /// `current` is the employee being updated, `None` for creates.
    fn check_email(
        &mut self,
        email: &EmployeeEmail,
        current: Option<EmployeeId>,
        errors: &mut FieldErrors,
    ) -> ServiceResult<()> {
        let taken = match self.claimed.get(email.as_str()) {
            Some(claimant) => current.is_none() || *claimant != current,
            None => {
                let owner = self.repo.find_email_owner(email)?;
                owner.is_some() && owner != current
            }
        };
        if taken {
            errors.add("email", ErrorKind::Conflict, EMAIL_TAKEN);
        } else {
            self.claimed.insert(email.as_str().to_string(), current);
        }
        Ok(())
    }

    /// Validates a create payload. `parent` supplies the company in
    /// [`ValidationMode::CreateNested`]. The outer error aborts the request;
    /// the inner one carries field errors for this payload.
    pub fn new_employee(
        &mut self,
        payload: &EmployeePayload,
        mode: ValidationMode,
        parent: Option<CompanyId>,
    ) -> ServiceResult<Result<NewEmployee, FieldErrors>> {
        let (fields, mut errors) = payload.parse_fields(mode);

        let company = if mode.reads_company() {
            if let Some(company) = fields.company {
                self.check_company(company, mode, &mut errors)?;
            }
            fields.company
        } else {
            parent
        };
        if let Some(email) = &fields.email {
            self.check_email(email, None, &mut errors)?;
        }

        Ok(
            match (fields.name, fields.email, fields.job_title, fields.age, company) {
                (Some(name), Some(email), Some(job_title), Some(age), Some(company))
                    if errors.is_empty() =>
                {
                    Ok(NewEmployee::new(name, email, job_title, age, company))
                }
                _ => Err(errors),
            },
        )
    }

    /// Validates changes for the existing employee `id`.
    pub fn update_employee(
        &mut self,
        id: EmployeeId,
        payload: &EmployeePayload,
        mode: ValidationMode,
    ) -> ServiceResult<Result<UpdateEmployee, FieldErrors>> {
        let (fields, mut errors) = payload.parse_fields(mode);

        if let Some(company) = fields.company {
            self.check_company(company, mode, &mut errors)?;
        }
        if let Some(email) = &fields.email {
            self.check_email(email, Some(id), &mut errors)?;
        }

        if !errors.is_empty() {
            return Ok(Err(errors));
        }
        Ok(Ok(UpdateEmployee {
            name: fields.name,
            email: fields.email,
            job_title: fields.job_title,
            age: fields.age,
            company_id: fields.company,
        }))
    }
}
