//! Bulk employee operations.
//!
//! Creates and updates are all-or-nothing: every item is validated first
//! and nothing is written unless all of them pass.

use std::collections::HashSet;

use log::{info, warn};
use serde_json::Value;

use crate::domain::types::EmployeeId;
use crate::forms::ValidationMode;
use crate::forms::bulk::{BulkAction, BulkActionPayload, delete_ids, parse_items};
use crate::forms::errors::{ErrorKind, FieldErrors, ItemError};
use crate::repository::{CompanyReader, EmployeeReader, EmployeeWriter};
use crate::services::validation::EmployeeValidator;
use crate::services::{ServiceError, ServiceResult};

pub const INVALID_ACTION: &str =
    "Invalid action. Make sure either \"CREATE\" or \"DELETE\" is provided.";
pub const NOT_A_LIST: &str = "Employees data must be a list.";
pub const NO_IDS: &str = "At least one ID is required for deletion.";
pub const NOTHING_DELETED: &str = "Could not delete any entries. The submitted IDs are invalid.";

/// Successful outcome of a bulk request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkOutcome {
    Created(usize),
    Deleted(usize),
    Updated(usize),
}

impl BulkOutcome {
    pub fn message(&self) -> String {
        match self {
            BulkOutcome::Created(n) => format!("{n} employees added."),
            BulkOutcome::Deleted(n) => format!("{n} employees deleted."),
            BulkOutcome::Updated(n) => format!("{n} employees updated."),
        }
    }
}

/// Handles an action-tagged batch: `{"action": "CREATE"|"DELETE", "employees": [...]}`.
pub fn run_action<R>(repo: &R, body: Value) -> ServiceResult<BulkOutcome>
where
    R: CompanyReader + EmployeeReader + EmployeeWriter + ?Sized,
{
    let payload: BulkActionPayload = match body {
        Value::Object(_) => serde_json::from_value(body)
            .map_err(|_| ServiceError::MalformedBatch(INVALID_ACTION.to_string()))?,
        _ => return Err(ServiceError::MalformedBatch(INVALID_ACTION.to_string())),
    };

    let items = payload
        .items()
        .ok_or_else(|| ServiceError::MalformedBatch(NOT_A_LIST.to_string()))?;

    match payload.action() {
        Some(BulkAction::Create) => create_batch(repo, items),
        Some(BulkAction::Delete) => delete_batch(repo, items),
        None => Err(ServiceError::MalformedBatch(INVALID_ACTION.to_string())),
    }
}

fn create_batch<R>(repo: &R, items: &[Value]) -> ServiceResult<BulkOutcome>
where
    R: CompanyReader + EmployeeReader + EmployeeWriter + ?Sized,
{
    let mut validator = EmployeeValidator::new(repo);
    let mut employees = Vec::with_capacity(items.len());
    let mut failures = Vec::new();

    for (index, parsed) in parse_items(items).into_iter().enumerate() {
        let outcome = match parsed {
            Ok(payload) => validator.new_employee(&payload, ValidationMode::CreateBulk, None)?,
            Err(errors) => Err(errors),
        };
        match outcome {
            Ok(employee) => employees.push(employee),
            Err(errors) => failures.push(ItemError {
                index,
                id: None,
                errors,
            }),
        }
    }

    if !failures.is_empty() {
        warn!(
            "Rejected bulk create: {} of {} items invalid",
            failures.len(),
            items.len()
        );
        return Err(ServiceError::Batch(failures));
    }

    let created = repo.create_employees(&employees)?;
    info!("Created {created} employees in bulk");
    Ok(BulkOutcome::Created(created))
}

fn delete_batch<R>(repo: &R, items: &[Value]) -> ServiceResult<BulkOutcome>
where
    R: EmployeeWriter + ?Sized,
{
    let requested = delete_ids(items);
    if requested.is_empty() {
        return Err(ServiceError::MalformedBatch(NO_IDS.to_string()));
    }

    let ids: Vec<EmployeeId> = requested.iter().filter_map(|raw| raw.parse().ok()).collect();
    let deleted: HashSet<EmployeeId> = repo.delete_employees(&ids)?.into_iter().collect();

    if deleted.is_empty() {
        return Err(ServiceError::MalformedBatch(NOTHING_DELETED.to_string()));
    }

    let missing: Vec<String> = requested
        .into_iter()
        .filter(|raw| {
            raw.parse::<EmployeeId>()
                .map_or(true, |id| !deleted.contains(&id))
        })
        .collect();

    info!("Deleted {} employees in bulk", deleted.len());
    if !missing.is_empty() {
        warn!("Bulk delete named unknown ids: {}", missing.join(", "));
        return Err(ServiceError::PartialDelete {
            deleted: deleted.len(),
            missing,
        });
    }
    Ok(BulkOutcome::Deleted(deleted.len()))
}

fn item_error(index: usize, id: Option<String>, field: &str, kind: ErrorKind, message: String) -> ItemError {
    ItemError {
        index,
        id,
        errors: FieldErrors::single(field, kind, message),
    }
}

/// Handles an untagged list of updates. `partial` selects PATCH semantics.
pub fn update_batch<R>(repo: &R, body: Value, partial: bool) -> ServiceResult<BulkOutcome>
where
    R: CompanyReader + EmployeeReader + EmployeeWriter + ?Sized,
{
    let Value::Array(items) = body else {
        return Err(ServiceError::MalformedBatch(NOT_A_LIST.to_string()));
    };
    let mode = if partial {
        ValidationMode::UpdatePartial
    } else {
        ValidationMode::UpdateFull
    };

    let mut validator = EmployeeValidator::new(repo);
    let mut updates = Vec::with_capacity(items.len());
    let mut failures = Vec::new();

    for (index, parsed) in parse_items(&items).into_iter().enumerate() {
        let payload = match parsed {
            Ok(payload) => payload,
            Err(errors) => {
                failures.push(ItemError {
                    index,
                    id: None,
                    errors,
                });
                continue;
            }
        };

        let Some(raw_id) = payload.id.clone().filter(|id| !id.trim().is_empty()) else {
            failures.push(item_error(
                index,
                None,
                "id",
                ErrorKind::FieldRequired,
                "Each update must include an ID.".to_string(),
            ));
            continue;
        };

        let id = match raw_id.parse::<EmployeeId>() {
            Ok(id) if repo.get_employee_by_id(id)?.is_some() => id,
            _ => {
                failures.push(item_error(
                    index,
                    Some(raw_id.clone()),
                    "id",
                    ErrorKind::NotFound,
                    format!("Employee ID {raw_id} not found."),
                ));
                continue;
            }
        };

        match validator.update_employee(id, &payload, mode)? {
            Ok(update) => updates.push((id, update)),
            Err(errors) => failures.push(ItemError {
                index,
                id: Some(raw_id),
                errors,
            }),
        }
    }

    if !failures.is_empty() {
        warn!(
            "Rejected bulk update: {} of {} items invalid",
            failures.len(),
            items.len()
        );
        return Err(ServiceError::Batch(failures));
    }

    let updated = repo.update_employees(&updates)?;
    info!("Updated {updated} employees in bulk");
    Ok(BulkOutcome::Updated(updated))
}
