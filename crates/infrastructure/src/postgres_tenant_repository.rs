use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use dealerdesk_application::{TenantRecord, TenantRepository};
use dealerdesk_core::{AppError, AppResult, TenantId};
use dealerdesk_domain::{TaxId, TenantKind};

use crate::postgres_errors::constraint_or_internal;

/// PostgreSQL-backed company and store repository.
#[derive(Clone)]
pub struct PostgresTenantRepository {
    pool: PgPool,
}

impl PostgresTenantRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TenantRow {
    id: uuid::Uuid,
    kind: String,
    name: String,
    trade_name: String,
    address: String,
    phone: Option<String>,
    email: Option<String>,
    tax_id: String,
    image_path: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TenantRow> for TenantRecord {
    type Error = AppError;

    fn try_from(row: TenantRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TenantId::from_uuid(row.id),
            kind: TenantKind::parse(row.kind.as_str())?,
            name: row.name,
            trade_name: row.trade_name,
            address: row.address,
            phone: row.phone,
            email: row.email,
            tax_id: TaxId::new(row.tax_id)?,
            image_path: row.image_path,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl TenantRepository for PostgresTenantRepository {
    async fn any_exists(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM tenants)")
            .fetch_one(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to count tenants: {error}")))
    }

    async fn find(&self, kind: TenantKind, tenant_id: TenantId) -> AppResult<Option<TenantRecord>> {
        let row = sqlx::query_as::<_, TenantRow>(
            r#"
            SELECT id, kind, name, trade_name, address, phone, email, tax_id, image_path,
                   created_at, updated_at
            FROM tenants
            WHERE id = $1 AND kind = $2
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find tenant: {error}")))?;

        row.map(TenantRecord::try_from).transpose()
    }

    async fn find_by_tax_id(&self, tax_id: &TaxId) -> AppResult<Option<TenantRecord>> {
        let row = sqlx::query_as::<_, TenantRow>(
            r#"
            SELECT id, kind, name, trade_name, address, phone, email, tax_id, image_path,
                   created_at, updated_at
            FROM tenants
            WHERE tax_id = $1
            "#,
        )
        .bind(tax_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find tenant by tax id: {error}")))?;

        row.map(TenantRecord::try_from).transpose()
    }

    async fn create(&self, tenant: TenantRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tenants (
                id, kind, name, trade_name, address, phone, email, tax_id, image_path,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(tenant.id.as_uuid())
        .bind(tenant.kind.as_str())
        .bind(tenant.name.as_str())
        .bind(tenant.trade_name.as_str())
        .bind(tenant.address.as_str())
        .bind(tenant.phone.as_deref())
        .bind(tenant.email.as_deref())
        .bind(tenant.tax_id.as_str())
        .bind(tenant.image_path.as_deref())
        .bind(tenant.created_at)
        .bind(tenant.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| constraint_or_internal(error, "create tenant"))?;

        Ok(())
    }

    async fn update(&self, tenant: TenantRecord) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE tenants
            SET name = $3, trade_name = $4, address = $5, phone = $6, email = $7,
                tax_id = $8, image_path = $9, updated_at = $10
            WHERE id = $1 AND kind = $2
            "#,
        )
        .bind(tenant.id.as_uuid())
        .bind(tenant.kind.as_str())
        .bind(tenant.name.as_str())
        .bind(tenant.trade_name.as_str())
        .bind(tenant.address.as_str())
        .bind(tenant.phone.as_deref())
        .bind(tenant.email.as_deref())
        .bind(tenant.tax_id.as_str())
        .bind(tenant.image_path.as_deref())
        .bind(tenant.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| constraint_or_internal(error, "update tenant"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("tenant '{}' not found", tenant.id)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use dealerdesk_application::TenantRepository;
    use dealerdesk_core::AppError;
    use dealerdesk_domain::TenantKind;

    use crate::postgres_test_support::{seed_tenant, test_pool};

    use super::PostgresTenantRepository;

    #[tokio::test]
    async fn find_filters_by_tenant_kind() {
        let Some(pool) = test_pool().await else {
            return;
        };

        let repository = PostgresTenantRepository::new(pool.clone());
        let store = seed_tenant(&pool, TenantKind::Store).await;

        let as_store = repository
            .find(TenantKind::Store, store.id)
            .await
            .unwrap_or_else(|error| panic!("lookup failed: {error}"));
        let as_company = repository
            .find(TenantKind::Company, store.id)
            .await
            .unwrap_or_else(|error| panic!("lookup failed: {error}"));

        assert_eq!(as_store.map(|tenant| tenant.trade_name), Some("Auto Center".to_owned()));
        assert!(as_company.is_none());
        assert!(
            repository
                .any_exists()
                .await
                .unwrap_or_else(|error| panic!("exists failed: {error}"))
        );
    }

    #[tokio::test]
    async fn cnpj_is_globally_unique() {
        let Some(pool) = test_pool().await else {
            return;
        };

        let repository = PostgresTenantRepository::new(pool.clone());
        let existing = seed_tenant(&pool, TenantKind::Company).await;
        let mut duplicate = seed_tenant(&pool, TenantKind::Company).await;
        duplicate.tax_id = existing.tax_id;

        let result = repository.update(duplicate).await;

        assert!(matches!(
            result,
            Err(AppError::Validation(message)) if message == "tax id is already in use by another tenant"
        ));
    }
}
