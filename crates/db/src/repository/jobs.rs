//! Job CRUD operations.
//!
//! Every job belongs to exactly one company; creation verifies the owning
//! handle before inserting.  The check and the insert are two independent
//! statements, not a transaction — a handle deleted in between surfaces as
//! the raw foreign-key violation from Postgres.

use sqlx::types::BigDecimal;
use sqlx::PgPool;

use crate::models::JobRow;
use crate::sql::{set_clause, SqlValue};
use crate::DbError;

/// A partial update: only the supplied fields change.
///
/// `id` and `company_handle` are immutable once a job exists, so neither
/// can appear here.
#[derive(Debug, Clone, Default)]
pub struct JobPatch {
    pub title: Option<String>,
    pub salary: Option<i32>,
    pub equity: Option<BigDecimal>,
}

impl JobPatch {
    /// `(column, value)` pairs for the fields present, in declaration order.
    pub(crate) fn into_pairs(self) -> Vec<(&'static str, SqlValue)> {
        let mut pairs = Vec::new();
        if let Some(title) = self.title {
            pairs.push(("title", SqlValue::Text(title)));
        }
        if let Some(salary) = self.salary {
            pairs.push(("salary", SqlValue::Int(salary)));
        }
        if let Some(equity) = self.equity {
            pairs.push(("equity", SqlValue::Numeric(equity)));
        }
        pairs
    }
}

/// Insert a new job owned by an existing company.
///
/// Fails with `DbError::BadRequest` when no company with `company_handle`
/// exists.
pub async fn create_job(
    pool: &PgPool,
    title: &str,
    salary: Option<i32>,
    equity: Option<BigDecimal>,
    company_handle: &str,
) -> Result<JobRow, DbError> {
    let known = sqlx::query_scalar::<_, String>("SELECT handle FROM companies WHERE handle = $1")
        .bind(company_handle)
        .fetch_optional(pool)
        .await?;

    if known.is_none() {
        return Err(DbError::BadRequest(format!(
            "no company with handle: {company_handle}"
        )));
    }

    let row = sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs (title, salary, equity, company_handle)
        VALUES ($1, $2, $3, $4)
        RETURNING id, title, salary, equity, company_handle
        "#,
    )
    .bind(title)
    .bind(salary)
    .bind(equity)
    .bind(company_handle)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Return all jobs ordered by title.  No filtering is applied.
pub async fn list_jobs(pool: &PgPool) -> Result<Vec<JobRow>, DbError> {
    let rows = sqlx::query_as::<_, JobRow>(
        "SELECT id, title, salary, equity, company_handle FROM jobs ORDER BY title",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Fetch a single job by its primary key.
pub async fn get_job(pool: &PgPool, id: i32) -> Result<JobRow, DbError> {
    let row = sqlx::query_as::<_, JobRow>(
        "SELECT id, title, salary, equity, company_handle FROM jobs WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DbError::NotFound(format!("no job with id: {id}")))?;

    Ok(row)
}

/// Apply a partial update and return the full updated row.
///
/// Fields absent from `patch` are left unchanged.  Fails with
/// `DbError::BadRequest` on an empty patch and `DbError::NotFound` when no
/// row matches `id`.
pub async fn update_job(pool: &PgPool, id: i32, patch: JobPatch) -> Result<JobRow, DbError> {
    let fragment = set_clause(patch.into_pairs())?;

    let sql = format!(
        "UPDATE jobs SET {} WHERE id = ${} RETURNING id, title, salary, equity, company_handle",
        fragment.clause,
        fragment.next_placeholder(),
    );

    let mut query = sqlx::query_as::<_, JobRow>(&sql);
    for value in fragment.values {
        query = value.bind_onto(query);
    }

    let row = query
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DbError::NotFound(format!("no job with id: {id}")))?;

    Ok(row)
}

/// Permanently delete a job by its primary key.
///
/// Returns `DbError::NotFound` if no row was deleted.
pub async fn delete_job(pool: &PgPool, id: i32) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound(format!("no job with id: {id}")));
    }

    Ok(())
}
