use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use dealerdesk_application::{LedgerRecord, LedgerRepository, SaleFilter, SaleRecord};
use dealerdesk_core::{AppResult, ClientId, SaleId, TenantId, UserId, VehicleId};

use super::{PostgresLedgerRepository, ensure_updated, find_error, list_error};
use crate::postgres_errors::constraint_or_internal;

const SALE_COLUMNS: &str = "id, tenant_id, client_id, seller_id, vehicle_id, sold_on, sale_price, \
                            minimum_margin, discount, payment_method, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    id: uuid::Uuid,
    tenant_id: uuid::Uuid,
    client_id: uuid::Uuid,
    seller_id: uuid::Uuid,
    vehicle_id: uuid::Uuid,
    sold_on: NaiveDate,
    sale_price: f64,
    minimum_margin: Option<f64>,
    discount: Option<f64>,
    payment_method: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SaleRow> for SaleRecord {
    fn from(row: SaleRow) -> Self {
        Self {
            id: SaleId::from_uuid(row.id),
            tenant_id: TenantId::from_uuid(row.tenant_id),
            client_id: ClientId::from_uuid(row.client_id),
            seller_id: UserId::from_uuid(row.seller_id),
            vehicle_id: VehicleId::from_uuid(row.vehicle_id),
            sold_on: row.sold_on,
            sale_price: row.sale_price,
            minimum_margin: row.minimum_margin,
            discount: row.discount,
            payment_method: row.payment_method,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl LedgerRepository<SaleRecord> for PostgresLedgerRepository {
    async fn list(&self, tenant_id: TenantId, filter: &SaleFilter) -> AppResult<Vec<SaleRecord>> {
        let rows = sqlx::query_as::<_, SaleRow>(&format!(
            r#"
            SELECT {SALE_COLUMNS}
            FROM sales
            WHERE tenant_id = $1
              AND ($2::UUID IS NULL OR client_id = $2)
              AND ($3::UUID IS NULL OR vehicle_id = $3)
              AND ($4::DATE IS NULL OR sold_on >= $4)
              AND ($5::DATE IS NULL OR sold_on <= $5)
            ORDER BY created_at, id
            "#
        ))
        .bind(tenant_id.as_uuid())
        .bind(filter.client_id.map(|id| id.as_uuid()))
        .bind(filter.vehicle_id.map(|id| id.as_uuid()))
        .bind(filter.sold_from)
        .bind(filter.sold_to)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| list_error(SaleRecord::LABEL, error))?;

        Ok(rows.into_iter().map(SaleRecord::from).collect())
    }

    async fn find(&self, tenant_id: TenantId, id: SaleId) -> AppResult<Option<SaleRecord>> {
        let row = sqlx::query_as::<_, SaleRow>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales WHERE tenant_id = $1 AND id = $2"
        ))
        .bind(tenant_id.as_uuid())
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| find_error(SaleRecord::LABEL, error))?;

        Ok(row.map(SaleRecord::from))
    }

    async fn create(&self, sale: SaleRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sales (
                id, tenant_id, client_id, seller_id, vehicle_id, sold_on, sale_price,
                minimum_margin, discount, payment_method, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(sale.id.as_uuid())
        .bind(sale.tenant_id.as_uuid())
        .bind(sale.client_id.as_uuid())
        .bind(sale.seller_id.as_uuid())
        .bind(sale.vehicle_id.as_uuid())
        .bind(sale.sold_on)
        .bind(sale.sale_price)
        .bind(sale.minimum_margin)
        .bind(sale.discount)
        .bind(sale.payment_method.as_deref())
        .bind(sale.created_at)
        .bind(sale.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| constraint_or_internal(error, "create sale"))?;

        Ok(())
    }

    async fn update(&self, sale: SaleRecord) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE sales
            SET client_id = $3, seller_id = $4, vehicle_id = $5, sold_on = $6,
                sale_price = $7, minimum_margin = $8, discount = $9, payment_method = $10,
                updated_at = $11
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(sale.tenant_id.as_uuid())
        .bind(sale.id.as_uuid())
        .bind(sale.client_id.as_uuid())
        .bind(sale.seller_id.as_uuid())
        .bind(sale.vehicle_id.as_uuid())
        .bind(sale.sold_on)
        .bind(sale.sale_price)
        .bind(sale.minimum_margin)
        .bind(sale.discount)
        .bind(sale.payment_method.as_deref())
        .bind(sale.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| constraint_or_internal(error, "update sale"))?;

        ensure_updated(&result, SaleRecord::LABEL, sale.id)
    }

    async fn delete(&self, tenant_id: TenantId, id: SaleId) -> AppResult<bool> {
        self.delete_row("sales", SaleRecord::LABEL, tenant_id, id.as_uuid())
            .await
    }
}
