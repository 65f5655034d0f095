//! Dynamic SQL fragment builders.
//!
//! Partial updates and optional list filters need `SET`/`WHERE` clauses
//! whose shape depends on which fields the caller supplied.  The builders
//! here are pure functions from optional fields to a [`SqlFragment`] — a
//! clause string with `$1`-style placeholders plus the bind values in
//! placeholder order — so column mapping and placeholder numbering stay
//! testable without a database.

use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::types::BigDecimal;
use sqlx::Postgres;

use crate::DbError;

/// An owned value destined for a numbered placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i32),
    Text(String),
    Numeric(BigDecimal),
}

impl SqlValue {
    /// Bind this value onto a runtime-checked `query_as`.
    pub(crate) fn bind_onto<'q, O>(
        self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        match self {
            SqlValue::Int(v) => query.bind(v),
            SqlValue::Text(v) => query.bind(v),
            SqlValue::Numeric(v) => query.bind(v),
        }
    }
}

/// A clause fragment plus its bind values, in placeholder order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SqlFragment {
    pub clause: String,
    pub values: Vec<SqlValue>,
}

impl SqlFragment {
    /// Number of the placeholder a caller appends right after this fragment,
    /// e.g. the `WHERE id = $n` key of a partial `UPDATE`.
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }
}

/// Build the `SET` clause of a partial `UPDATE` from `(column, value)`
/// pairs.
///
/// Placeholders are numbered from `$1` in pair order.  An empty pair list is
/// rejected: an `UPDATE` that changes nothing is a caller bug.
pub fn set_clause(pairs: Vec<(&str, SqlValue)>) -> Result<SqlFragment, DbError> {
    if pairs.is_empty() {
        return Err(DbError::BadRequest("no fields to update".into()));
    }

    let mut clause = String::new();
    let mut values = Vec::with_capacity(pairs.len());
    for (column, value) in pairs {
        if !clause.is_empty() {
            clause.push_str(", ");
        }
        values.push(value);
        clause.push_str(&format!("{} = ${}", column, values.len()));
    }

    Ok(SqlFragment { clause, values })
}

/// Optional narrowing criteria for company listings.
#[derive(Debug, Clone, Default)]
pub struct CompanyFilter {
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
    /// Case-insensitive substring match on the company name.
    pub name: Option<String>,
}

/// Build the `WHERE` clause for a [`CompanyFilter`].
///
/// Conditions are appended in a fixed order (min employees, max employees,
/// name) and joined with `AND`; placeholders are numbered from `$1` across
/// the fields actually present.  With no fields set the fragment is empty
/// and the caller must append no `WHERE` at all.
pub fn filter_clause(filter: &CompanyFilter) -> Result<SqlFragment, DbError> {
    if let (Some(min), Some(max)) = (filter.min_employees, filter.max_employees) {
        if min > max {
            return Err(DbError::BadRequest(format!(
                "min_employees {} cannot exceed max_employees {}",
                min, max
            )));
        }
    }

    let mut conditions = Vec::new();
    let mut values = Vec::new();

    if let Some(min) = filter.min_employees {
        values.push(SqlValue::Int(min));
        conditions.push(format!("num_employees >= ${}", values.len()));
    }
    if let Some(max) = filter.max_employees {
        values.push(SqlValue::Int(max));
        conditions.push(format!("num_employees <= ${}", values.len()));
    }
    if let Some(name) = &filter.name {
        values.push(SqlValue::Text(format!("%{}%", name)));
        conditions.push(format!("name ILIKE ${}", values.len()));
    }

    Ok(SqlFragment {
        clause: conditions.join(" AND "),
        values,
    })
}
