//! Repository implementation for companies.

use std::collections::HashMap;

use diesel::dsl::{exists, sql};
use diesel::expression::SqlLiteral;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel::sqlite::Sqlite;

use crate::{
    domain::{
        company::{Company, CompanyOverview, NewCompany, UpdateCompany},
        employee::{EmployeeSummary, NewEmployee},
        types::{CompanyId, EmployeeName},
    },
    models::{
        company::{
            Company as DbCompany, NewCompany as DbNewCompany, UpdateCompany as DbUpdateCompany,
        },
        employee::NewEmployee as DbNewEmployee,
    },
    repository::{
        CompanyListQuery, CompanyReader, CompanySortField, CompanyWriter, DieselRepository,
        LIKE_ESCAPE, contains,
        errors::{RepositoryError, RepositoryResult},
    },
};

/// Message returned when a delete is blocked by existing employees.
pub const COMPANY_HAS_EMPLOYEES: &str = "This company cannot be deleted because it has employees.";

const EMPLOYEE_COUNT_SQL: &str =
    "(SELECT COUNT(*) FROM employees WHERE employees.company_id = companies.id)";

/// Correlated subquery counting the employees of the current `companies` row.
fn employee_count() -> SqlLiteral<BigInt> {
    sql::<BigInt>(EMPLOYEE_COUNT_SQL)
}

fn into_overview((company, count): (DbCompany, i64)) -> RepositoryResult<CompanyOverview> {
    Ok(CompanyOverview {
        company: Company::try_from(company)?,
        employee_count: usize::try_from(count).unwrap_or_default(),
    })
}

impl CompanyReader for DieselRepository {
    fn get_company_by_id(&self, id: CompanyId) -> RepositoryResult<Option<CompanyOverview>> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        let row = companies::table
            .find(id.to_string())
            .select((companies::all_columns, employee_count()))
            .first::<(DbCompany, i64)>(&mut conn)
            .optional()?;

        row.map(into_overview).transpose()
    }

    fn company_exists(&self, id: CompanyId) -> RepositoryResult<bool> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        let found = diesel::select(exists(companies::table.find(id.to_string())))
            .get_result::<bool>(&mut conn)?;
        Ok(found)
    }

    fn list_companies(
        &self,
        query: CompanyListQuery,
    ) -> RepositoryResult<(usize, Vec<CompanyOverview>)> {
        use crate::schema::companies;

        let mut conn = self.conn()?;

        let filtered = || {
            let mut items = companies::table.into_boxed::<Sqlite>();

            if let Some(name) = &query.name {
                items = items.filter(
                    companies::name
                        .like(contains(name))
                        .escape(LIKE_ESCAPE),
                );
            }
            if let Some(address) = &query.address {
                items = items.filter(
                    companies::address
                        .like(contains(address))
                        .escape(LIKE_ESCAPE),
                );
            }
            if let Some(phone) = &query.phone {
                items = items.filter(
                    companies::phone
                        .like(contains(phone))
                        .escape(LIKE_ESCAPE),
                );
            }
            if let Some(description) = &query.description {
                items = items.filter(
                    companies::description
                        .like(contains(description))
                        .escape(LIKE_ESCAPE),
                );
            }
            if let Some(count) = query.employee_count {
                items = items.filter(employee_count().eq(count));
            }
            if let Some(search) = &query.search {
                let pattern = contains(search);
                items = items.filter(
                    companies::id
                        .like(pattern.clone())
                        .escape(LIKE_ESCAPE)
                        .or(companies::name.like(pattern.clone()).escape(LIKE_ESCAPE))
                        .or(companies::address.like(pattern.clone()).escape(LIKE_ESCAPE))
                        .or(companies::phone.like(pattern.clone()).escape(LIKE_ESCAPE))
                        .or(companies::description
                            .assume_not_null()
                            .like(pattern)
                            .escape(LIKE_ESCAPE)),
                );
            }
            items
        };

        let total = filtered().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered().select((companies::all_columns, employee_count()));

        items = match query.ordering {
            Some(ordering) => match ordering.field {
                CompanySortField::Name => sorted!(items, companies::name, ordering.direction),
                CompanySortField::Address => sorted!(items, companies::address, ordering.direction),
                CompanySortField::Phone => sorted!(items, companies::phone, ordering.direction),
                CompanySortField::Description => {
                    sorted!(items, companies::description, ordering.direction)
                }
                CompanySortField::EmployeeCount => {
                    sorted!(items, employee_count(), ordering.direction)
                }
            },
            None => items.order_by(companies::name.asc()),
        };
        items = items.then_order_by(companies::id.asc());

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let companies = items
            .load::<(DbCompany, i64)>(&mut conn)?
            .into_iter()
            .map(into_overview)
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, companies))
    }

    fn list_employee_summaries(
        &self,
        ids: &[CompanyId],
    ) -> RepositoryResult<HashMap<CompanyId, Vec<EmployeeSummary>>> {
        use crate::schema::employees;

        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut conn = self.conn()?;
        let keys: Vec<String> = ids.iter().map(ToString::to_string).collect();

        let rows = employees::table
            .filter(employees::company_id.eq_any(keys))
            .select((
                employees::company_id,
                employees::id,
                employees::name,
                employees::job_title,
            ))
            .order((employees::name.asc(), employees::id.asc()))
            .load::<(String, String, String, String)>(&mut conn)?;

        let mut grouped: HashMap<CompanyId, Vec<EmployeeSummary>> = HashMap::new();
        for (company_id, id, name, job_title) in rows {
            let company_id: CompanyId = company_id.parse()?;
            grouped.entry(company_id).or_default().push(EmployeeSummary {
                id: id.parse()?,
                name: EmployeeName::new(name)?,
                job_title: job_title.parse()?,
            });
        }

        Ok(grouped)
    }
}

impl CompanyWriter for DieselRepository {
    fn create_company(
        &self,
        company: &NewCompany,
        employees: &[NewEmployee],
    ) -> RepositoryResult<Company> {
        use crate::schema::{companies, employees};

        let mut conn = self.conn()?;

        let db_company = DbNewCompany::from(company);
        let db_employees: Vec<DbNewEmployee> = employees.iter().map(Into::into).collect();

        conn.transaction::<Company, RepositoryError, _>(|conn| {
            let created = diesel::insert_into(companies::table)
                .values(&db_company)
                .get_result::<DbCompany>(conn)?;

            if !db_employees.is_empty() {
                diesel::insert_into(employees::table)
                    .values(&db_employees)
                    .execute(conn)?;
            }

            Ok(Company::try_from(created)?)
        })
    }

    fn update_company(&self, id: CompanyId, updates: &UpdateCompany) -> RepositoryResult<()> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        let key = id.to_string();

        let affected = if updates.is_empty() {
            companies::table
                .find(key.as_str())
                .count()
                .get_result::<i64>(&mut conn)? as usize
        } else {
            let changeset = DbUpdateCompany::from(updates);
            diesel::update(companies::table.find(key.as_str()))
                .set(&changeset)
                .execute(&mut conn)?
        };

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn delete_company(&self, id: CompanyId) -> RepositoryResult<()> {
        use crate::schema::{companies, employees};

        let mut conn = self.conn()?;
        let key = id.to_string();

        conn.immediate_transaction::<(), RepositoryError, _>(|conn| {
            let owned = employees::table
                .filter(employees::company_id.eq(key.as_str()))
                .count()
                .get_result::<i64>(conn)?;
            if owned > 0 {
                return Err(RepositoryError::Conflict(COMPANY_HAS_EMPLOYEES.to_string()));
            }

            let deleted = diesel::delete(companies::table.find(key.as_str())).execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        })
    }
}
