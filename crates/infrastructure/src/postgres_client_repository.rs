use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use dealerdesk_application::{ClientRecord, ClientRepository};
use dealerdesk_core::{AppError, AppResult, ClientId, TenantId};
use dealerdesk_domain::{EmailAddress, PostalAddress, TaxId};

use crate::postgres_errors::constraint_or_internal;

const CLIENT_COLUMNS: &str = "id, tenant_id, name, tax_id, email, phone, secondary_phone, \
                              identity_document, client_type, client_group, birth_date, gender, \
                              marital_status, postal_code, street, street_number, district, city, \
                              state, created_at, updated_at";

/// PostgreSQL-backed client repository.
#[derive(Clone)]
pub struct PostgresClientRepository {
    pool: PgPool,
}

impl PostgresClientRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_by_column(
        &self,
        tenant_id: TenantId,
        column: &'static str,
        value: &str,
    ) -> AppResult<Option<ClientRecord>> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE tenant_id = $1 AND {column} = $2"
        ))
        .bind(tenant_id.as_uuid())
        .bind(value)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find client by {column}: {error}")))?;

        row.map(ClientRecord::try_from).transpose()
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    id: uuid::Uuid,
    tenant_id: uuid::Uuid,
    name: String,
    tax_id: String,
    email: String,
    phone: Option<String>,
    secondary_phone: Option<String>,
    identity_document: Option<String>,
    client_type: Option<String>,
    client_group: Option<String>,
    birth_date: Option<NaiveDate>,
    gender: Option<String>,
    marital_status: Option<String>,
    postal_code: Option<String>,
    street: Option<String>,
    street_number: Option<String>,
    district: Option<String>,
    city: Option<String>,
    state: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ClientRow> for ClientRecord {
    type Error = AppError;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClientId::from_uuid(row.id),
            tenant_id: TenantId::from_uuid(row.tenant_id),
            name: row.name,
            tax_id: TaxId::new(row.tax_id)?,
            email: EmailAddress::new(row.email)?,
            phone: row.phone,
            secondary_phone: row.secondary_phone,
            identity_document: row.identity_document,
            client_type: row.client_type,
            group: row.client_group,
            birth_date: row.birth_date,
            gender: row.gender,
            marital_status: row.marital_status,
            address: PostalAddress {
                postal_code: row.postal_code,
                street: row.street,
                number: row.street_number,
                district: row.district,
                city: row.city,
                state: row.state,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl ClientRepository for PostgresClientRepository {
    async fn list(
        &self,
        tenant_id: TenantId,
        name_filter: Option<&str>,
    ) -> AppResult<Vec<ClientRecord>> {
        let rows = sqlx::query_as::<_, ClientRow>(&format!(
            r#"
            SELECT {CLIENT_COLUMNS}
            FROM clients
            WHERE tenant_id = $1
              AND ($2::TEXT IS NULL OR name ILIKE '%' || $2 || '%')
            ORDER BY name, id
            "#
        ))
        .bind(tenant_id.as_uuid())
        .bind(name_filter)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list clients: {error}")))?;

        rows.into_iter().map(ClientRecord::try_from).collect()
    }

    async fn find(&self, tenant_id: TenantId, client_id: ClientId) -> AppResult<Option<ClientRecord>> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE tenant_id = $1 AND id = $2"
        ))
        .bind(tenant_id.as_uuid())
        .bind(client_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find client: {error}")))?;

        row.map(ClientRecord::try_from).transpose()
    }

    async fn find_by_tax_id(
        &self,
        tenant_id: TenantId,
        tax_id: &TaxId,
    ) -> AppResult<Option<ClientRecord>> {
        self.find_by_column(tenant_id, "tax_id", tax_id.as_str()).await
    }

    async fn find_by_email(
        &self,
        tenant_id: TenantId,
        email: &EmailAddress,
    ) -> AppResult<Option<ClientRecord>> {
        self.find_by_column(tenant_id, "email", email.as_str()).await
    }

    async fn create(&self, client: ClientRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO clients (
                id, tenant_id, name, tax_id, email, phone, secondary_phone, identity_document,
                client_type, client_group, birth_date, gender, marital_status, postal_code,
                street, street_number, district, city, state, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                    $17, $18, $19, $20, $21)
            "#,
        )
        .bind(client.id.as_uuid())
        .bind(client.tenant_id.as_uuid())
        .bind(client.name.as_str())
        .bind(client.tax_id.as_str())
        .bind(client.email.as_str())
        .bind(client.phone.as_deref())
        .bind(client.secondary_phone.as_deref())
        .bind(client.identity_document.as_deref())
        .bind(client.client_type.as_deref())
        .bind(client.group.as_deref())
        .bind(client.birth_date)
        .bind(client.gender.as_deref())
        .bind(client.marital_status.as_deref())
        .bind(client.address.postal_code.as_deref())
        .bind(client.address.street.as_deref())
        .bind(client.address.number.as_deref())
        .bind(client.address.district.as_deref())
        .bind(client.address.city.as_deref())
        .bind(client.address.state.as_deref())
        .bind(client.created_at)
        .bind(client.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| constraint_or_internal(error, "create client"))?;

        Ok(())
    }

    async fn update(&self, client: ClientRecord) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE clients
            SET name = $3, tax_id = $4, email = $5, phone = $6, secondary_phone = $7,
                identity_document = $8, client_type = $9, client_group = $10, birth_date = $11,
                gender = $12, marital_status = $13, postal_code = $14, street = $15,
                street_number = $16, district = $17, city = $18, state = $19, updated_at = $20
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(client.tenant_id.as_uuid())
        .bind(client.id.as_uuid())
        .bind(client.name.as_str())
        .bind(client.tax_id.as_str())
        .bind(client.email.as_str())
        .bind(client.phone.as_deref())
        .bind(client.secondary_phone.as_deref())
        .bind(client.identity_document.as_deref())
        .bind(client.client_type.as_deref())
        .bind(client.group.as_deref())
        .bind(client.birth_date)
        .bind(client.gender.as_deref())
        .bind(client.marital_status.as_deref())
        .bind(client.address.postal_code.as_deref())
        .bind(client.address.street.as_deref())
        .bind(client.address.number.as_deref())
        .bind(client.address.district.as_deref())
        .bind(client.address.city.as_deref())
        .bind(client.address.state.as_deref())
        .bind(client.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| constraint_or_internal(error, "update client"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("client '{}' not found", client.id)));
        }

        Ok(())
    }

    async fn delete(&self, tenant_id: TenantId, client_id: ClientId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM clients WHERE tenant_id = $1 AND id = $2")
            .bind(tenant_id.as_uuid())
            .bind(client_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| constraint_or_internal(error, "delete client"))?;

        Ok(result.rows_affected() > 0)
    }
}
