use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use dealerdesk_core::{AppError, AppResult, ClientId, NonEmptyString, TenantId};
use dealerdesk_domain::{EmailAddress, PostalAddress, TaxId};

use crate::user_service::clean;
use crate::{AccessContext, ClientRecord, ClientRepository};

#[cfg(test)]
mod tests;

/// Input payload for creating or replacing a client.
#[derive(Debug, Clone, Default)]
pub struct SaveClientInput {
    /// Full name.
    pub name: String,
    /// CPF or CNPJ.
    pub tax_id: String,
    /// Contact email.
    pub email: String,
    /// Primary phone.
    pub phone: Option<String>,
    /// Secondary phone.
    pub secondary_phone: Option<String>,
    /// Identity document (RG).
    pub identity_document: Option<String>,
    /// Client classification.
    pub client_type: Option<String>,
    /// Client group.
    pub group: Option<String>,
    /// Birth date.
    pub birth_date: Option<NaiveDate>,
    /// Gender.
    pub gender: Option<String>,
    /// Marital status.
    pub marital_status: Option<String>,
    /// Postal address.
    pub address: PostalAddress,
}

/// Application service for tenant clients.
#[derive(Clone)]
pub struct ClientService {
    repository: Arc<dyn ClientRepository>,
}

impl ClientService {
    /// Creates a new client service.
    #[must_use]
    pub fn new(repository: Arc<dyn ClientRepository>) -> Self {
        Self { repository }
    }

    /// Lists clients of the scoped tenant, optionally filtered by name.
    pub async fn list(
        &self,
        context: &AccessContext,
        name_filter: Option<&str>,
    ) -> AppResult<Vec<ClientRecord>> {
        let name_filter = name_filter.map(str::trim).filter(|value| !value.is_empty());
        self.repository.list(context.tenant_id(), name_filter).await
    }

    /// Returns one client of the scoped tenant.
    pub async fn get(
        &self,
        context: &AccessContext,
        client_id: ClientId,
    ) -> AppResult<ClientRecord> {
        self.repository
            .find(context.tenant_id(), client_id)
            .await?
            .ok_or_else(not_found)
    }

    /// Returns the client of the scoped tenant holding a tax id.
    pub async fn find_by_tax_id(
        &self,
        context: &AccessContext,
        tax_id: &str,
    ) -> AppResult<ClientRecord> {
        let tax_id = TaxId::new(tax_id)?;
        self.repository
            .find_by_tax_id(context.tenant_id(), &tax_id)
            .await?
            .ok_or_else(not_found)
    }

    /// Creates a client in the scoped tenant.
    pub async fn create(
        &self,
        context: &AccessContext,
        input: SaveClientInput,
    ) -> AppResult<ClientRecord> {
        let now = Utc::now();
        let client = build(ClientId::new(), context.tenant_id(), input, now)?;
        self.ensure_unique(&client).await?;
        self.repository.create(client.clone()).await?;

        Ok(client)
    }

    /// Replaces a client of the scoped tenant.
    pub async fn update(
        &self,
        context: &AccessContext,
        client_id: ClientId,
        input: SaveClientInput,
    ) -> AppResult<ClientRecord> {
        let existing = self.get(context, client_id).await?;
        let client = ClientRecord {
            created_at: existing.created_at,
            ..build(existing.id, existing.tenant_id, input, Utc::now())?
        };
        self.ensure_unique(&client).await?;
        self.repository.update(client.clone()).await?;

        Ok(client)
    }

    /// Deletes a client of the scoped tenant.
    pub async fn delete(&self, context: &AccessContext, client_id: ClientId) -> AppResult<()> {
        if !self.repository.delete(context.tenant_id(), client_id).await? {
            return Err(not_found());
        }

        Ok(())
    }

    async fn ensure_unique(&self, client: &ClientRecord) -> AppResult<()> {
        if self
            .repository
            .find_by_tax_id(client.tenant_id, &client.tax_id)
            .await?
            .is_some_and(|other| other.id != client.id)
        {
            return Err(AppError::Validation(
                "tax id is already in use in this tenant".to_owned(),
            ));
        }

        if self
            .repository
            .find_by_email(client.tenant_id, &client.email)
            .await?
            .is_some_and(|other| other.id != client.id)
        {
            return Err(AppError::Validation(
                "email is already in use in this tenant".to_owned(),
            ));
        }

        Ok(())
    }
}

fn build(
    id: ClientId,
    tenant_id: TenantId,
    input: SaveClientInput,
    now: chrono::DateTime<Utc>,
) -> AppResult<ClientRecord> {
    let name = NonEmptyString::new(input.name)
        .map_err(|_| AppError::Validation("name must not be empty".to_owned()))?;

    Ok(ClientRecord {
        id,
        tenant_id,
        name: name.into(),
        tax_id: TaxId::new(&input.tax_id)?,
        email: EmailAddress::new(input.email)?,
        phone: clean(input.phone),
        secondary_phone: clean(input.secondary_phone),
        identity_document: clean(input.identity_document),
        client_type: clean(input.client_type),
        group: clean(input.group),
        birth_date: input.birth_date,
        gender: clean(input.gender),
        marital_status: clean(input.marital_status),
        address: input.address.normalized(),
        created_at: now,
        updated_at: now,
    })
}

fn not_found() -> AppError {
    AppError::NotFound("client not found in this tenant".to_owned())
}
