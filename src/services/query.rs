//! Turns raw query-string values into repository list queries.

use crate::forms::errors::{ErrorKind, FieldErrors};
use crate::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, total_pages};
use crate::repository::{Ordering, Pagination, SortField};
use crate::services::{ServiceError, ServiceResult};

/// Text filter value; blank means "not filtered".
pub fn text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Exact-match integer filter. Malformed values are recorded in `errors`.
pub fn integer<T: std::str::FromStr>(
    errors: &mut FieldErrors,
    field: &str,
    raw: Option<&str>,
) -> Option<T> {
    let value = text(raw)?;
    match value.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            errors.add(field, ErrorKind::InvalidFormat, "A valid integer is required.");
            None
        }
    }
}

/// Parses `ordering`, rejecting names outside `F`'s allow-list.
pub fn ordering<F: SortField>(raw: Option<&str>) -> ServiceResult<Option<Ordering<F>>> {
    let Some(raw) = text(raw) else {
        return Ok(None);
    };
    match Ordering::<F>::parse(&raw) {
        Some(ordering) => Ok(Some(ordering)),
        None => Err(ServiceError::InvalidOrdering {
            field: raw.trim_start_matches('-').to_string(),
            allowed: F::names(),
        }),
    }
}

/// Requested page. Malformed or non-positive values fall back to the
/// defaults; `page_size` is capped at [`MAX_PAGE_SIZE`].
pub fn pagination(page: Option<&str>, page_size: Option<&str>) -> Pagination {
    let positive = |raw: Option<&str>| {
        text(raw)
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|value| *value > 0)
    };

    Pagination {
        page: positive(page).unwrap_or(1),
        per_page: positive(page_size)
            .map(|size| size.min(MAX_PAGE_SIZE))
            .unwrap_or(DEFAULT_PAGE_SIZE),
    }
}

/// Pages past the last one are an error. The first page always exists.
pub fn ensure_page_exists(count: usize, pagination: Pagination) -> ServiceResult<()> {
    if pagination.page > 1 && pagination.page > total_pages(count, pagination.per_page) {
        return Err(ServiceError::NotFound("Invalid page.".to_string()));
    }
    Ok(())
}
