//! Typed error type for the db crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// The targeted row does not exist.  The message names the key that
    /// missed.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request cannot be satisfied as asked: unknown or duplicate
    /// company handle, empty update patch, inverted filter bounds.
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}
