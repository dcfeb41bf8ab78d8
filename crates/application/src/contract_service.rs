use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use dealerdesk_core::{AppError, AppResult, ContractId, UserId, VehicleId};

use crate::ledger_service::{LedgerStore, TenantReferences, optional_amount};
use crate::{AccessContext, ContractFilter, ContractRecord, LedgerRepository};


/// Input payload for creating or replacing a rental contract.
#[derive(Debug, Clone, Default)]
pub struct SaveContractInput {
    /// Rented vehicle of the scoped tenant.
    pub vehicle_id: VehicleId,
    /// Responsible user; defaults to the caller.
    pub responsible_user_id: Option<UserId>,
    /// First rental day.
    pub starts_on: Option<NaiveDate>,
    /// Last rental day.
    pub ends_on: Option<NaiveDate>,
    /// Weekly rate.
    pub weekly_rate: Option<f64>,
    /// Daily rate.
    pub daily_rate: Option<f64>,
}

/// Application service for vehicle rental contracts.
#[derive(Clone)]
pub struct ContractService {
    store: LedgerStore<ContractRecord>,
    references: TenantReferences,
}

impl ContractService {
    /// Creates a new contract service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn LedgerRepository<ContractRecord>>,
        references: TenantReferences,
    ) -> Self {
        Self {
            store: LedgerStore::new(repository),
            references,
        }
    }

    /// Lists contracts of the scoped tenant.
    pub async fn list(
        &self,
        context: &AccessContext,
        filter: ContractFilter,
    ) -> AppResult<Vec<ContractRecord>> {
        self.store.list(context.tenant_id(), &filter).await
    }

    /// Returns one contract of the scoped tenant.
    pub async fn get(
        &self,
        context: &AccessContext,
        contract_id: ContractId,
    ) -> AppResult<ContractRecord> {
        self.store.get(context.tenant_id(), contract_id).await
    }

    /// Opens a rental contract in the scoped tenant.
    pub async fn create(
        &self,
        context: &AccessContext,
        input: SaveContractInput,
    ) -> AppResult<ContractRecord> {
        let contract = build(ContractId::new(), context, input, Utc::now())?;
        self.ensure_available(&contract).await?;
        self.store.insert(contract).await
    }

    /// Replaces a contract of the scoped tenant.
    pub async fn update(
        &self,
        context: &AccessContext,
        contract_id: ContractId,
        input: SaveContractInput,
    ) -> AppResult<ContractRecord> {
        let existing = self.get(context, contract_id).await?;
        let contract = ContractRecord {
            created_at: existing.created_at,
            ..build(existing.id, context, input, Utc::now())?
        };
        self.ensure_available(&contract).await?;
        self.store.replace(contract).await
    }

    /// Deletes a contract of the scoped tenant.
    pub async fn delete(&self, context: &AccessContext, contract_id: ContractId) -> AppResult<()> {
        self.store.remove(context.tenant_id(), contract_id).await
    }

    async fn ensure_available(&self, contract: &ContractRecord) -> AppResult<()> {
        let tenant_id = contract.tenant_id;
        self.references.vehicle(tenant_id, contract.vehicle_id).await?;
        self.references
            .user(tenant_id, contract.responsible_user_id)
            .await?;

        let same_vehicle = ContractFilter {
            vehicle_id: Some(contract.vehicle_id),
            ..ContractFilter::default()
        };
        if self
            .store
            .list(tenant_id, &same_vehicle)
            .await?
            .iter()
            .any(|other| other.id != contract.id && overlaps(other, contract))
        {
            return Err(AppError::Validation(
                "vehicle is already rented in this period".to_owned(),
            ));
        }

        Ok(())
    }
}

fn overlaps(left: &ContractRecord, right: &ContractRecord) -> bool {
    let starts_before_right_ends = right.ends_on.is_none_or(|end| left.starts_on <= end);
    let ends_after_right_starts = left.ends_on.is_none_or(|end| right.starts_on <= end);
    starts_before_right_ends && ends_after_right_starts
}

fn build(
    id: ContractId,
    context: &AccessContext,
    input: SaveContractInput,
    now: DateTime<Utc>,
) -> AppResult<ContractRecord> {
    let starts_on = input
        .starts_on
        .ok_or_else(|| AppError::Validation("start date is required".to_owned()))?;
    if input.ends_on.is_some_and(|end| end < starts_on) {
        return Err(AppError::Validation(
            "end date must not precede the start date".to_owned(),
        ));
    }

    Ok(ContractRecord {
        id,
        tenant_id: context.tenant_id(),
        vehicle_id: input.vehicle_id,
        responsible_user_id: input
            .responsible_user_id
            .unwrap_or_else(|| context.user_id()),
        starts_on,
        ends_on: input.ends_on,
        weekly_rate: optional_amount("weekly rate", input.weekly_rate)?,
        daily_rate: optional_amount("daily rate", input.daily_rate)?,
        created_at: now,
        updated_at: now,
    })
}
