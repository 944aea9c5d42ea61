//! Repository implementation for employees.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel::sqlite::Sqlite;

use crate::{
    domain::{
        employee::{EmployeeDetails, NewEmployee, UpdateEmployee},
        types::{EmployeeEmail, EmployeeId},
    },
    models::employee::{
        EmployeeWithCompanyName, NewEmployee as DbNewEmployee, UpdateEmployee as DbUpdateEmployee,
    },
    repository::{
        DieselRepository, EmployeeListQuery, EmployeeReader, EmployeeSortField, EmployeeWriter,
        LIKE_ESCAPE, contains,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl EmployeeReader for DieselRepository {
    fn get_employee_by_id(&self, id: EmployeeId) -> RepositoryResult<Option<EmployeeDetails>> {
        use crate::schema::{companies, employees};

        let mut conn = self.conn()?;
        let row = employees::table
            .inner_join(companies::table)
            .filter(employees::id.eq(id.to_string()))
            .select((employees::all_columns, companies::name))
            .first::<EmployeeWithCompanyName>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(Some(EmployeeDetails::try_from(row)?)),
            None => Ok(None),
        }
    }

    fn find_email_owner(&self, email: &EmployeeEmail) -> RepositoryResult<Option<EmployeeId>> {
        use crate::schema::employees;

        let mut conn = self.conn()?;
        let owner = employees::table
            .filter(employees::email.eq(email.as_str()))
            .select(employees::id)
            .first::<String>(&mut conn)
            .optional()?;

        match owner {
            Some(id) => Ok(Some(id.parse()?)),
            None => Ok(None),
        }
    }

    fn list_employees(
        &self,
        query: EmployeeListQuery,
    ) -> RepositoryResult<(usize, Vec<EmployeeDetails>)> {
        use crate::schema::{companies, employees};

        let mut conn = self.conn()?;

        let filtered = || {
            let mut items = employees::table
                .inner_join(companies::table)
                .into_boxed::<Sqlite>();

            if let Some(name) = &query.name {
                items = items.filter(
                    employees::name
                        .like(contains(name))
                        .escape(LIKE_ESCAPE),
                );
            }
            if let Some(email) = &query.email {
                items = items.filter(
                    employees::email
                        .like(contains(email))
                        .escape(LIKE_ESCAPE),
                );
            }
            if let Some(job_title) = &query.job_title {
                items = items.filter(
                    employees::job_title
                        .like(contains(job_title))
                        .escape(LIKE_ESCAPE),
                );
            }
            if let Some(age) = query.age {
                items = items.filter(employees::age.eq(age));
            }
            if let Some(company_name) = &query.company_name {
                items = items.filter(
                    companies::name
                        .like(contains(company_name))
                        .escape(LIKE_ESCAPE),
                );
            }
            if let Some(search) = &query.search {
                let pattern = contains(search);
                items = items.filter(
                    employees::id
                        .like(pattern.clone())
                        .escape(LIKE_ESCAPE)
                        .or(employees::name.like(pattern.clone()).escape(LIKE_ESCAPE))
                        .or(employees::email.like(pattern.clone()).escape(LIKE_ESCAPE))
                        .or(employees::job_title.like(pattern.clone()).escape(LIKE_ESCAPE))
                        .or(sql::<Text>("CAST(employees.age AS TEXT)")
                            .like(pattern.clone())
                            .escape(LIKE_ESCAPE))
                        .or(companies::name.like(pattern).escape(LIKE_ESCAPE)),
                );
            }
            items
        };

        let total = filtered().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered().select((employees::all_columns, companies::name));

        if let Some(ordering) = query.ordering {
            items = match ordering.field {
                EmployeeSortField::Name => sorted!(items, employees::name, ordering.direction),
                EmployeeSortField::Email => sorted!(items, employees::email, ordering.direction),
                EmployeeSortField::JobTitle => {
                    sorted!(items, employees::job_title, ordering.direction)
                }
                EmployeeSortField::Age => sorted!(items, employees::age, ordering.direction),
                EmployeeSortField::Company => {
                    sorted!(items, employees::company_id, ordering.direction)
                }
            };
        }
        items = items.then_order_by(employees::id.asc());

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let employees = items
            .load::<EmployeeWithCompanyName>(&mut conn)?
            .into_iter()
            .map(|row| EmployeeDetails::try_from(row).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, employees))
    }
}

impl EmployeeWriter for DieselRepository {
    fn create_employees(&self, employees: &[NewEmployee]) -> RepositoryResult<usize> {
        use crate::schema::employees;

        if employees.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn()?;
        let insertables: Vec<DbNewEmployee> = employees.iter().map(Into::into).collect();

        conn.transaction::<usize, RepositoryError, _>(|conn| {
            let inserted = diesel::insert_into(employees::table)
                .values(&insertables)
                .execute(conn)?;
            Ok(inserted)
        })
    }

    fn update_employees(
        &self,
        updates: &[(EmployeeId, UpdateEmployee)],
    ) -> RepositoryResult<usize> {
        use crate::schema::employees;

        let mut conn = self.conn()?;

        conn.transaction::<usize, RepositoryError, _>(|conn| {
            for (id, update) in updates {
                let key = id.to_string();
                let affected = if update.is_empty() {
                    employees::table
                        .find(key.as_str())
                        .count()
                        .get_result::<i64>(conn)? as usize
                } else {
                    diesel::update(employees::table.find(key.as_str()))
                        .set(&DbUpdateEmployee::from(update))
                        .execute(conn)?
                };
                if affected == 0 {
                    return Err(RepositoryError::NotFound);
                }
            }
            Ok(updates.len())
        })
    }

    fn delete_employees(&self, ids: &[EmployeeId]) -> RepositoryResult<Vec<EmployeeId>> {
        use crate::schema::employees;

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn()?;
        let keys: Vec<String> = ids.iter().map(ToString::to_string).collect();

        let deleted = conn.transaction::<Vec<String>, RepositoryError, _>(|conn| {
            let existing = employees::table
                .filter(employees::id.eq_any(&keys))
                .select(employees::id)
                .load::<String>(conn)?;
            if !existing.is_empty() {
                diesel::delete(employees::table.filter(employees::id.eq_any(&existing)))
                    .execute(conn)?;
            }
            Ok(existing)
        })?;

        let mut result = Vec::with_capacity(deleted.len());
        for id in deleted {
            result.push(id.parse::<EmployeeId>()?);
        }
        Ok(result)
    }
}
