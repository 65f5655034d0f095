//! Company CRUD operations.
//!
//! Companies are keyed by their natural `handle`; jobs reference it via a
//! foreign key with `ON DELETE CASCADE`, so deleting a company also deletes
//! its jobs.

use sqlx::PgPool;

use crate::models::CompanyRow;
use crate::sql::{filter_clause, set_clause, CompanyFilter, SqlValue};
use crate::DbError;

/// A partial update: only the supplied fields change.  The `handle` itself
/// is immutable.
#[derive(Debug, Clone, Default)]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl CompanyPatch {
    /// `(column, value)` pairs for the fields present, in declaration order.
    pub(crate) fn into_pairs(self) -> Vec<(&'static str, SqlValue)> {
        let mut pairs = Vec::new();
        if let Some(name) = self.name {
            pairs.push(("name", SqlValue::Text(name)));
        }
        if let Some(description) = self.description {
            pairs.push(("description", SqlValue::Text(description)));
        }
        if let Some(num_employees) = self.num_employees {
            pairs.push(("num_employees", SqlValue::Int(num_employees)));
        }
        if let Some(logo_url) = self.logo_url {
            pairs.push(("logo_url", SqlValue::Text(logo_url)));
        }
        pairs
    }
}

/// Insert a new company.
///
/// Fails with `DbError::BadRequest` when the handle is already taken.  The
/// pre-check and the insert are separate statements; a concurrent insert of
/// the same handle in between surfaces as the raw unique violation.
pub async fn create_company(
    pool: &PgPool,
    handle: &str,
    name: &str,
    description: &str,
    num_employees: Option<i32>,
    logo_url: Option<&str>,
) -> Result<CompanyRow, DbError> {
    let taken = sqlx::query_scalar::<_, String>("SELECT handle FROM companies WHERE handle = $1")
        .bind(handle)
        .fetch_optional(pool)
        .await?;

    if taken.is_some() {
        return Err(DbError::BadRequest(format!(
            "duplicate company handle: {handle}"
        )));
    }

    let row = sqlx::query_as::<_, CompanyRow>(
        r#"
        INSERT INTO companies (handle, name, description, num_employees, logo_url)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING handle, name, description, num_employees, logo_url
        "#,
    )
    .bind(handle)
    .bind(name)
    .bind(description)
    .bind(num_employees)
    .bind(logo_url)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Return companies ordered by name, narrowed by `filter`.
///
/// An empty filter lists every company.
pub async fn list_companies(
    pool: &PgPool,
    filter: &CompanyFilter,
) -> Result<Vec<CompanyRow>, DbError> {
    let fragment = filter_clause(filter)?;

    let mut sql =
        String::from("SELECT handle, name, description, num_employees, logo_url FROM companies");
    if !fragment.clause.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&fragment.clause);
    }
    sql.push_str(" ORDER BY name");

    let mut query = sqlx::query_as::<_, CompanyRow>(&sql);
    for value in fragment.values {
        query = value.bind_onto(query);
    }

    let rows = query.fetch_all(pool).await?;

    Ok(rows)
}

/// Fetch a single company by handle.
pub async fn get_company(pool: &PgPool, handle: &str) -> Result<CompanyRow, DbError> {
    let row = sqlx::query_as::<_, CompanyRow>(
        "SELECT handle, name, description, num_employees, logo_url FROM companies WHERE handle = $1",
    )
    .bind(handle)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DbError::NotFound(format!("no company with handle: {handle}")))?;

    Ok(row)
}

/// Apply a partial update and return the full updated row.
///
/// Fails with `DbError::BadRequest` on an empty patch and
/// `DbError::NotFound` when no row matches `handle`.
pub async fn update_company(
    pool: &PgPool,
    handle: &str,
    patch: CompanyPatch,
) -> Result<CompanyRow, DbError> {
    let fragment = set_clause(patch.into_pairs())?;

    let sql = format!(
        "UPDATE companies SET {} WHERE handle = ${} \
         RETURNING handle, name, description, num_employees, logo_url",
        fragment.clause,
        fragment.next_placeholder(),
    );

    let mut query = sqlx::query_as::<_, CompanyRow>(&sql);
    for value in fragment.values {
        query = value.bind_onto(query);
    }

    let row = query
        .bind(handle)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DbError::NotFound(format!("no company with handle: {handle}")))?;

    Ok(row)
}

/// Permanently delete a company (and, via cascade, its jobs).
///
/// Returns `DbError::NotFound` if no row was deleted.
pub async fn delete_company(pool: &PgPool, handle: &str) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM companies WHERE handle = $1")
        .bind(handle)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound(format!(
            "no company with handle: {handle}"
        )));
    }

    Ok(())
}
