//! PostgreSQL-backed ledger repository.
//!
//! One struct implements [`LedgerRepository`] for every ledger record; each
//! submodule owns the row mapping and queries of one table.
//!
//! [`LedgerRepository`]: dealerdesk_application::LedgerRepository

use std::fmt::Display;

use sqlx::PgPool;
use sqlx::postgres::PgQueryResult;
use uuid::Uuid;

use dealerdesk_core::{AppError, AppResult, TenantId};

use crate::postgres_errors::constraint_or_internal;

mod bank_account;
mod contract;
mod financing;
mod maintenance;
mod payment;
mod receipt;
mod sale;


/// PostgreSQL implementation of the ledger repository ports.
#[derive(Clone)]
pub struct PostgresLedgerRepository {
    pool: PgPool,
}

impl PostgresLedgerRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn delete_row(
        &self,
        table: &'static str,
        label: &str,
        tenant_id: TenantId,
        id: Uuid,
    ) -> AppResult<bool> {
        let result = sqlx::query(&format!("DELETE FROM {table} WHERE tenant_id = $1 AND id = $2"))
            .bind(tenant_id.as_uuid())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|error| constraint_or_internal(error, &format!("delete {label}")))?;

        Ok(result.rows_affected() > 0)
    }
}

fn ensure_updated(result: &PgQueryResult, label: &str, id: impl Display) -> AppResult<()> {
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("{label} '{id}' not found")));
    }

    Ok(())
}

fn list_error(label: &str, error: sqlx::Error) -> AppError {
    AppError::Internal(format!("failed to list {label} records: {error}"))
}

fn find_error(label: &str, error: sqlx::Error) -> AppError {
    AppError::Internal(format!("failed to find {label}: {error}"))
}
