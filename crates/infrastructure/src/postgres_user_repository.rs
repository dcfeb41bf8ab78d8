//! PostgreSQL-backed user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use dealerdesk_application::{UserRecord, UserRepository};
use dealerdesk_core::{AppError, AppResult, TenantId, UserId};
use dealerdesk_domain::{EmailAddress, TaxId, UserGroup};

use crate::postgres_errors::constraint_or_internal;

mod account;
mod lookup;

#[cfg(test)]
mod tests;

const USER_COLUMNS: &str = "id, tenant_id, name, tax_id, email, password_hash, phone, job_title, \
                            user_group, active, created_at, updated_at";

/// PostgreSQL implementation of the user repository port.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: uuid::Uuid,
    tenant_id: uuid::Uuid,
    name: String,
    tax_id: String,
    email: String,
    password_hash: String,
    phone: Option<String>,
    job_title: Option<String>,
    user_group: String,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::from_uuid(row.id),
            tenant_id: TenantId::from_uuid(row.tenant_id),
            name: row.name,
            tax_id: TaxId::new(row.tax_id)?,
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            phone: row.phone,
            job_title: row.job_title,
            group: UserGroup::new(row.user_group)?,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_records(rows: Vec<UserRow>) -> AppResult<Vec<UserRecord>> {
    rows.into_iter().map(UserRecord::try_from).collect()
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        self.find_by_id_impl(user_id).await
    }

    async fn list_by_email(&self, email: &EmailAddress) -> AppResult<Vec<UserRecord>> {
        self.list_by_email_impl(email).await
    }

    async fn list_for_tenant(
        &self,
        tenant_id: TenantId,
        name_filter: Option<&str>,
    ) -> AppResult<Vec<UserRecord>> {
        self.list_for_tenant_impl(tenant_id, name_filter).await
    }

    async fn find_in_tenant(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
    ) -> AppResult<Option<UserRecord>> {
        self.find_in_tenant_impl(tenant_id, user_id).await
    }

    async fn find_by_tax_id(
        &self,
        tenant_id: TenantId,
        tax_id: &TaxId,
    ) -> AppResult<Option<UserRecord>> {
        self.find_by_column_impl(tenant_id, "tax_id", tax_id.as_str())
            .await
    }

    async fn find_by_email(
        &self,
        tenant_id: TenantId,
        email: &EmailAddress,
    ) -> AppResult<Option<UserRecord>> {
        self.find_by_column_impl(tenant_id, "email", email.as_str())
            .await
    }

    async fn create(&self, user: UserRecord) -> AppResult<()> {
        self.create_impl(user).await
    }

    async fn update(&self, user: UserRecord) -> AppResult<()> {
        self.update_impl(user).await
    }

    async fn delete(&self, tenant_id: TenantId, user_id: UserId) -> AppResult<bool> {
        self.delete_impl(tenant_id, user_id).await
    }
}
