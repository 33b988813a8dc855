//! PostgreSQL record store

use std::future::Future;
use std::time::Duration;

use sqlx::PgPool;

use super::{EntityKind, StoreError, StoreErrorKind, StoreOperation, StoreResult};

mod customer;
mod feedback;

/// Store backed by a shared connection pool
///
/// Every call runs a single statement bounded by `statement_timeout`.
/// Dropping a call's future drops the statement with it.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
    statement_timeout: Duration,
}

impl PgStore {
    pub fn new(pool: PgPool, statement_timeout: Duration) -> Self {
        Self {
            pool,
            statement_timeout,
        }
    }

    /// Await a database call under the statement timeout, classifying failures
    async fn run<T, F>(
        &self,
        entity: EntityKind,
        operation: StoreOperation,
        entity_id: Option<&str>,
        call: F,
    ) -> StoreResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.statement_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(classify(err, entity, operation, entity_id)),
            Err(_) => {
                tracing::error!(
                    entity = %entity,
                    operation = %operation,
                    entity_id,
                    timeout = ?self.statement_timeout,
                    "Store call timed out"
                );
                Err(with_id(StoreError::internal(entity, operation), entity_id))
            }
        }
    }
}

/// Translate a driver error into the store taxonomy
///
/// Classification uses error variants and SQLSTATE-backed predicates only.
/// Anything unexpected is logged here, once, before it becomes opaque.
pub(crate) fn classify(
    err: sqlx::Error,
    entity: EntityKind,
    operation: StoreOperation,
    entity_id: Option<&str>,
) -> StoreError {
    let kind = match &err {
        sqlx::Error::RowNotFound => StoreErrorKind::NotFound,
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreErrorKind::AlreadyExists
        }
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            StoreErrorKind::Invalid
        }
        _ => StoreErrorKind::Internal,
    };

    if kind == StoreErrorKind::Internal {
        tracing::error!(
            entity = %entity,
            operation = %operation,
            entity_id,
            error = %err,
            "Store call failed"
        );
    }

    with_id(StoreError::new(entity, operation, kind), entity_id)
}

fn with_id(error: StoreError, entity_id: Option<&str>) -> StoreError {
    match entity_id {
        Some(id) => error.with_entity_id(id),
        None => error,
    }
}

fn to_total(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}
