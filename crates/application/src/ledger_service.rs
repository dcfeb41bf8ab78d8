//! Building blocks shared by the ledger services.

use std::sync::Arc;

use dealerdesk_core::{AppError, AppResult, ClientId, TenantId, UserId, VehicleId};

use crate::{
    ClientRecord, ClientRepository, LedgerRecord, LedgerRepository, UserRecord, UserRepository,
    VehicleRecord, VehicleRepository,
};

/// Tenant-scoped CRUD over one ledger repository.
pub(crate) struct LedgerStore<R: LedgerRecord> {
    repository: Arc<dyn LedgerRepository<R>>,
}

impl<R: LedgerRecord> Clone for LedgerStore<R> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
        }
    }
}

impl<R: LedgerRecord> LedgerStore<R> {
    pub(crate) fn new(repository: Arc<dyn LedgerRepository<R>>) -> Self {
        Self { repository }
    }

    pub(crate) async fn list(&self, tenant_id: TenantId, filter: &R::Filter) -> AppResult<Vec<R>> {
        self.repository.list(tenant_id, filter).await
    }

    /// Fetches a record addressed by the request path.
    pub(crate) async fn get(&self, tenant_id: TenantId, id: R::Id) -> AppResult<R> {
        self.repository
            .find(tenant_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} not found in this tenant", R::LABEL)))
    }

    /// Fetches a record referenced from another record's payload.
    pub(crate) async fn require(&self, tenant_id: TenantId, id: R::Id) -> AppResult<R> {
        self.repository
            .find(tenant_id, id)
            .await?
            .ok_or_else(|| not_in_tenant(R::LABEL))
    }

    pub(crate) async fn insert(&self, record: R) -> AppResult<R> {
        self.ensure_unique(&record).await?;
        self.repository.create(record.clone()).await?;
        Ok(record)
    }

    pub(crate) async fn replace(&self, record: R) -> AppResult<R> {
        self.ensure_unique(&record).await?;
        self.repository.update(record.clone()).await?;
        Ok(record)
    }

    pub(crate) async fn remove(&self, tenant_id: TenantId, id: R::Id) -> AppResult<()> {
        if !self.repository.delete(tenant_id, id).await? {
            return Err(AppError::NotFound(format!(
                "{} not found in this tenant",
                R::LABEL
            )));
        }

        Ok(())
    }

    async fn ensure_unique(&self, record: &R) -> AppResult<()> {
        let existing = self
            .repository
            .list(record.tenant_id(), &R::Filter::default())
            .await?;

        match existing
            .iter()
            .filter(|other| other.id() != record.id())
            .find_map(|other| record.conflict_with(other))
        {
            Some(message) => Err(AppError::Validation(message)),
            None => Ok(()),
        }
    }
}

/// Resolves client, vehicle and user references inside the scoped tenant.
#[derive(Clone)]
pub struct TenantReferences {
    clients: Arc<dyn ClientRepository>,
    vehicles: Arc<dyn VehicleRepository>,
    users: Arc<dyn UserRepository>,
}

impl TenantReferences {
    /// Creates a reference resolver.
    #[must_use]
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        vehicles: Arc<dyn VehicleRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            clients,
            vehicles,
            users,
        }
    }

    pub(crate) async fn client(
        &self,
        tenant_id: TenantId,
        client_id: ClientId,
    ) -> AppResult<ClientRecord> {
        self.clients
            .find(tenant_id, client_id)
            .await?
            .ok_or_else(|| not_in_tenant("client"))
    }

    pub(crate) async fn vehicle(
        &self,
        tenant_id: TenantId,
        vehicle_id: VehicleId,
    ) -> AppResult<VehicleRecord> {
        self.vehicles
            .find(tenant_id, vehicle_id)
            .await?
            .ok_or_else(|| not_in_tenant("vehicle"))
    }

    pub(crate) async fn user(&self, tenant_id: TenantId, user_id: UserId) -> AppResult<UserRecord> {
        self.users
            .find_in_tenant(tenant_id, user_id)
            .await?
            .ok_or_else(|| not_in_tenant("user"))
    }
}

fn not_in_tenant(label: &str) -> AppError {
    AppError::Validation(format!("{label} does not belong to this tenant"))
}

/// Rejects amounts that are not strictly positive.
pub(crate) fn positive_amount(field: &str, value: f64) -> AppResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::Validation(format!(
            "{field} must be a positive number"
        )));
    }

    Ok(value)
}

/// Rejects negative or non-finite optional amounts.
pub(crate) fn optional_amount(field: &str, value: Option<f64>) -> AppResult<Option<f64>> {
    if value.is_some_and(|amount| !amount.is_finite() || amount < 0.0) {
        return Err(AppError::Validation(format!(
            "{field} must be a non-negative number"
        )));
    }

    Ok(value)
}

/// Rounds to whole cents.
pub(crate) fn to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::{optional_amount, positive_amount, to_cents};

    #[test]
    fn amounts_reject_non_finite_and_negative_values() {
        assert!(positive_amount("amount", 0.0).is_err());
        assert!(positive_amount("amount", f64::NAN).is_err());
        assert!(optional_amount("discount", Some(-1.0)).is_err());
        assert!(optional_amount("discount", Some(f64::INFINITY)).is_err());
        assert_eq!(optional_amount("discount", None).ok(), Some(None));
        assert_eq!(positive_amount("amount", 10.5).ok(), Some(10.5));
    }

    #[test]
    fn rounds_to_cents() {
        assert!((to_cents(1_234.566) - 1_234.57).abs() < f64::EPSILON);
        assert!((to_cents(99.994) - 99.99).abs() < f64::EPSILON);
    }
}
