use std::sync::Arc;

use chrono::{DateTime, Utc};

use dealerdesk_core::{AppError, AppResult, NonEmptyString, TenantId};
use dealerdesk_domain::{EmailAddress, TaxId, TenantKind};

use crate::user_service::clean;
use crate::{AccessContext, TenantRecord, TenantRepository};

#[cfg(test)]
mod tests;

/// Input payload for a company or store profile.
#[derive(Debug, Clone, Default)]
pub struct SaveTenantInput {
    /// Legal name.
    pub name: String,
    /// Trade name.
    pub trade_name: String,
    /// Street address.
    pub address: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// CNPJ.
    pub tax_id: String,
    /// Logo path.
    pub image_path: Option<String>,
}

impl SaveTenantInput {
    pub(crate) fn into_record(
        self,
        id: TenantId,
        kind: TenantKind,
        now: DateTime<Utc>,
    ) -> AppResult<TenantRecord> {
        let tax_id = TaxId::new(&self.tax_id)?;
        if !tax_id.is_cnpj() {
            return Err(AppError::Validation(format!(
                "{} tax id must be a 14 digit CNPJ",
                kind.as_str()
            )));
        }

        let email = clean(self.email)
            .map(|email| EmailAddress::new(email).map(String::from))
            .transpose()?;

        Ok(TenantRecord {
            id,
            kind,
            name: required("name", self.name)?,
            trade_name: required("trade name", self.trade_name)?,
            address: required("address", self.address)?,
            phone: clean(self.phone),
            email,
            tax_id,
            image_path: clean(self.image_path),
            created_at: now,
            updated_at: now,
        })
    }
}

fn required(field: &str, value: String) -> AppResult<String> {
    NonEmptyString::new(value)
        .map(String::from)
        .map_err(|_| AppError::Validation(format!("{field} must not be empty")))
}

/// Application service for the scoped tenant's profile.
#[derive(Clone)]
pub struct TenantService {
    repository: Arc<dyn TenantRepository>,
    tenant_kind: TenantKind,
}

impl TenantService {
    /// Creates a new tenant service.
    #[must_use]
    pub fn new(repository: Arc<dyn TenantRepository>, tenant_kind: TenantKind) -> Self {
        Self {
            repository,
            tenant_kind,
        }
    }

    /// Returns the scoped tenant.
    pub async fn get(&self, context: &AccessContext) -> AppResult<TenantRecord> {
        self.repository
            .find(self.tenant_kind, context.tenant_id())
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "{} '{}' does not exist",
                    self.tenant_kind.as_str(),
                    context.tenant_id()
                ))
            })
    }

    /// Replaces the scoped tenant's profile. CNPJ stays globally unique.
    pub async fn update(
        &self,
        context: &AccessContext,
        input: SaveTenantInput,
    ) -> AppResult<TenantRecord> {
        let existing = self.get(context).await?;
        let tenant = TenantRecord {
            created_at: existing.created_at,
            ..input.into_record(existing.id, existing.kind, Utc::now())?
        };

        if self
            .repository
            .find_by_tax_id(&tenant.tax_id)
            .await?
            .is_some_and(|other| other.id != tenant.id)
        {
            return Err(AppError::Validation(
                "tax id is already in use by another tenant".to_owned(),
            ));
        }

        self.repository.update(tenant.clone()).await?;
        Ok(tenant)
    }
}
