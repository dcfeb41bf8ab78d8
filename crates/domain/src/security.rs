use std::str::FromStr;

use chrono::{DateTime, Utc};
use dealerdesk_core::{AppError, UserId};
use serde::{Deserialize, Serialize};

/// Business resource types guarded by per-user permission grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// Dealership clients.
    Clients,
    /// Vehicles held in inventories.
    Vehicles,
    /// Inventories (stock locations).
    Inventories,
    /// Tenant user accounts.
    Users,
    /// Permission grants of tenant users.
    Permissions,
    /// Tenant (company or store) profile.
    Tenants,
    /// Bank accounts of the tenant.
    BankAccounts,
    /// Vehicle sales.
    Sales,
    /// Financing plans attached to sales.
    Financings,
    /// Vehicle rental contracts.
    Contracts,
    /// Vehicle maintenance entries.
    Maintenances,
    /// Outgoing payments.
    Payments,
    /// Incoming receipts from sales or contracts.
    Receipts,
}

impl ResourceType {
    /// Returns a stable storage value for this resource type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Vehicles => "vehicles",
            Self::Inventories => "inventories",
            Self::Users => "users",
            Self::Permissions => "permissions",
            Self::Tenants => "tenants",
            Self::BankAccounts => "bank_accounts",
            Self::Sales => "sales",
            Self::Financings => "financings",
            Self::Contracts => "contracts",
            Self::Maintenances => "maintenances",
            Self::Payments => "payments",
            Self::Receipts => "receipts",
        }
    }

    /// Returns all known resource types.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[ResourceType] = &[
            ResourceType::Clients,
            ResourceType::Vehicles,
            ResourceType::Inventories,
            ResourceType::Users,
            ResourceType::Permissions,
            ResourceType::Tenants,
            ResourceType::BankAccounts,
            ResourceType::Sales,
            ResourceType::Financings,
            ResourceType::Contracts,
            ResourceType::Maintenances,
            ResourceType::Payments,
            ResourceType::Receipts,
        ];

        ALL
    }
}

impl FromStr for ResourceType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "clients" => Ok(Self::Clients),
            "vehicles" => Ok(Self::Vehicles),
            "inventories" => Ok(Self::Inventories),
            "users" => Ok(Self::Users),
            "permissions" => Ok(Self::Permissions),
            "tenants" => Ok(Self::Tenants),
            "bank_accounts" => Ok(Self::BankAccounts),
            "sales" => Ok(Self::Sales),
            "financings" => Ok(Self::Financings),
            "contracts" => Ok(Self::Contracts),
            "maintenances" => Ok(Self::Maintenances),
            "payments" => Ok(Self::Payments),
            "receipts" => Ok(Self::Receipts),
            _ => Err(AppError::Validation(format!(
                "unknown resource type '{value}'"
            ))),
        }
    }
}

/// Actions a grant can allow on a resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionAction {
    /// List and fetch records.
    Read,
    /// Create records.
    Create,
    /// Modify records.
    Update,
    /// Remove records.
    Delete,
}

impl PermissionAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Returns all known actions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Read, Self::Create, Self::Update, Self::Delete]
    }
}

impl FromStr for PermissionAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "read" => Ok(Self::Read),
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            _ => Err(AppError::Validation(format!(
                "unknown permission action '{value}'"
            ))),
        }
    }
}

/// Persisted per-user permission row for one resource type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGrant {
    /// User the grant belongs to.
    pub user_id: UserId,
    /// Resource type the grant covers.
    pub resource_type: ResourceType,
    /// Allows [`PermissionAction::Read`].
    pub can_read: bool,
    /// Allows [`PermissionAction::Create`].
    pub can_create: bool,
    /// Allows [`PermissionAction::Update`].
    pub can_update: bool,
    /// Allows [`PermissionAction::Delete`].
    pub can_delete: bool,
    /// Last modification time; the most recent grant wins on duplicates.
    pub updated_at: DateTime<Utc>,
}

impl PermissionGrant {
    /// Creates a grant allowing every action on the resource type.
    #[must_use]
    pub fn full(user_id: UserId, resource_type: ResourceType) -> Self {
        Self {
            user_id,
            resource_type,
            can_read: true,
            can_create: true,
            can_update: true,
            can_delete: true,
            updated_at: Utc::now(),
        }
    }

    /// Returns whether the grant flag named after the action is set.
    #[must_use]
    pub fn allows(&self, action: PermissionAction) -> bool {
        match action {
            PermissionAction::Read => self.can_read,
            PermissionAction::Create => self.can_create,
            PermissionAction::Update => self.can_update,
            PermissionAction::Delete => self.can_delete,
        }
    }

    /// Returns `"<resource>:<action>"` claims for every allowed action.
    #[must_use]
    pub fn claims(&self) -> Vec<String> {
        PermissionAction::all()
            .iter()
            .filter(|action| self.allows(**action))
            .map(|action| format!("{}:{}", self.resource_type.as_str(), action.as_str()))
            .collect()
    }
}
