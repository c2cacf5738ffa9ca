//! Shared Postgres plumbing: pool construction and sqlx error mapping.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::error::StoreError;

/// Build a connection pool for the given database URL.
pub async fn connect(database_url: &str) -> Result<PgPool, StoreError> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .map_err(|e| map_sqlx_error("connect", e))
}

/// Map sqlx errors to the store taxonomy.
///
/// Postgres error codes that mean "try again later" become [`StoreError::Busy`]:
/// `55P03` (lock_not_available, e.g. a `FOR UPDATE NOWAIT`/lock timeout) and
/// `57014` (query_canceled, e.g. statement_timeout fired while waiting on a
/// row lock). Everything else is a storage failure tagged with the operation
/// that hit it.
pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {operation}: {}", db_err.message());
            match db_err.code().as_deref() {
                Some("55P03") | Some("57014") => StoreError::Busy(msg),
                _ => StoreError::Storage(msg),
            }
        }
        sqlx::Error::PoolTimedOut => {
            StoreError::Busy(format!("connection pool timed out in {operation}"))
        }
        sqlx::Error::PoolClosed => {
            StoreError::Storage(format!("connection pool closed in {operation}"))
        }
        other => StoreError::Storage(format!("sqlx error in {operation}: {other}")),
    }
}

/// Check if an error is a unique constraint violation (code `23505`).
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        if let Some(code) = db_err.code() {
            return code.as_ref() == "23505";
        }
    }
    false
}
