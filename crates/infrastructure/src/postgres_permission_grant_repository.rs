//! PostgreSQL-backed permission grants.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use dealerdesk_application::PermissionGrantRepository;
use dealerdesk_core::{AppError, AppResult, UserId};
use dealerdesk_domain::{PermissionGrant, ResourceType};

/// PostgreSQL implementation of the permission grant repository port.
#[derive(Clone)]
pub struct PostgresPermissionGrantRepository {
    pool: PgPool,
}

impl PostgresPermissionGrantRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct GrantRow {
    user_id: uuid::Uuid,
    resource_type: String,
    can_read: bool,
    can_create: bool,
    can_update: bool,
    can_delete: bool,
    updated_at: DateTime<Utc>,
}

impl TryFrom<GrantRow> for PermissionGrant {
    type Error = AppError;

    fn try_from(row: GrantRow) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: UserId::from_uuid(row.user_id),
            resource_type: ResourceType::from_str(row.resource_type.as_str())?,
            can_read: row.can_read,
            can_create: row.can_create,
            can_update: row.can_update,
            can_delete: row.can_delete,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl PermissionGrantRepository for PostgresPermissionGrantRepository {
    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<PermissionGrant>> {
        let rows = sqlx::query_as::<_, GrantRow>(
            r#"
            SELECT user_id, resource_type, can_read, can_create, can_update, can_delete, updated_at
            FROM permission_grants
            WHERE user_id = $1
            ORDER BY updated_at DESC, resource_type
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list permission grants: {error}")))?;

        rows.into_iter().map(PermissionGrant::try_from).collect()
    }

    async fn save(&self, grant: PermissionGrant) -> AppResult<PermissionGrant> {
        let row = sqlx::query_as::<_, GrantRow>(
            r#"
            INSERT INTO permission_grants (
                user_id, resource_type, can_read, can_create, can_update, can_delete, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id, resource_type) DO UPDATE
            SET can_read = EXCLUDED.can_read,
                can_create = EXCLUDED.can_create,
                can_update = EXCLUDED.can_update,
                can_delete = EXCLUDED.can_delete,
                updated_at = EXCLUDED.updated_at
            RETURNING user_id, resource_type, can_read, can_create, can_update, can_delete, updated_at
            "#,
        )
        .bind(grant.user_id.as_uuid())
        .bind(grant.resource_type.as_str())
        .bind(grant.can_read)
        .bind(grant.can_create)
        .bind(grant.can_update)
        .bind(grant.can_delete)
        .bind(grant.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to save permission grant: {error}")))?;

        PermissionGrant::try_from(row)
    }

    async fn delete(&self, user_id: UserId, resource_type: ResourceType) -> AppResult<bool> {
        let result = sqlx::query(
            "DELETE FROM permission_grants WHERE user_id = $1 AND resource_type = $2",
        )
        .bind(user_id.as_uuid())
        .bind(resource_type.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to delete permission grant: {error}"))
        })?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use dealerdesk_application::PermissionGrantRepository;
    use dealerdesk_domain::{PermissionGrant, ResourceType, TenantKind};

    use crate::postgres_test_support::{seed_tenant, seed_user, test_pool};

    use super::PostgresPermissionGrantRepository;

    #[tokio::test]
    async fn saving_twice_replaces_the_grant_and_lists_newest_first() {
        let Some(pool) = test_pool().await else {
            return;
        };

        let repository = PostgresPermissionGrantRepository::new(pool.clone());
        let tenant = seed_tenant(&pool, TenantKind::Company).await;
        let email = format!("grants-{}@dealer.com", uuid::Uuid::new_v4().simple());
        let user = seed_user(&pool, tenant.id, &email).await;

        let mut older = PermissionGrant::full(user.id, ResourceType::Vehicles);
        older.updated_at = Utc::now() - Duration::minutes(10);
        repository
            .save(older)
            .await
            .unwrap_or_else(|error| panic!("save failed: {error}"));

        let mut read_only = PermissionGrant::full(user.id, ResourceType::Clients);
        read_only.can_delete = false;
        repository
            .save(read_only.clone())
            .await
            .unwrap_or_else(|error| panic!("save failed: {error}"));
        read_only.can_update = false;
        repository
            .save(read_only)
            .await
            .unwrap_or_else(|error| panic!("save failed: {error}"));

        let grants = repository
            .list_for_user(user.id)
            .await
            .unwrap_or_else(|error| panic!("list failed: {error}"));

        assert_eq!(grants.len(), 2);
        assert_eq!(grants[0].resource_type, ResourceType::Clients);
        assert!(!grants[0].can_update);

        let removed = repository
            .delete(user.id, ResourceType::Vehicles)
            .await
            .unwrap_or_else(|error| panic!("delete failed: {error}"));
        assert!(removed);
    }
}
