use std::str::FromStr;

use dealerdesk_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Isolation dimension of a deployment: records belong to companies or to stores.
///
/// A deployment runs with exactly one kind. The kind supplies every name that
/// differs between the two variants so handlers stay generic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantKind {
    /// Company-scoped deployment.
    Company,
    /// Store-scoped deployment.
    Store,
}

impl TenantKind {
    /// Returns the storage string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Store => "store",
        }
    }

    /// Returns the credential claim carrying the tenant id.
    #[must_use]
    pub fn claim_name(&self) -> &'static str {
        match self {
            Self::Company => "idEmpresaToken",
            Self::Store => "idLojaToken",
        }
    }

    /// Returns the route segment naming the tenant collection.
    #[must_use]
    pub fn route_segment(&self) -> &'static str {
        match self {
            Self::Company => "companies",
            Self::Store => "stores",
        }
    }

    /// Returns the path parameter carrying an explicit tenant id.
    #[must_use]
    pub fn path_param(&self) -> &'static str {
        match self {
            Self::Company => "company_id",
            Self::Store => "store_id",
        }
    }

    /// Returns the route prefix for tenant-addressed routes, e.g. `/companies/{company_id}`.
    #[must_use]
    pub fn scoped_route_prefix(&self) -> String {
        format!("/{}/{{{}}}", self.route_segment(), self.path_param())
    }

    /// Parses a storage string into a tenant kind.
    pub fn parse(value: &str) -> AppResult<Self> {
        Self::from_str(value)
    }
}

impl FromStr for TenantKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "company" => Ok(Self::Company),
            "store" => Ok(Self::Store),
            other => Err(AppError::Validation(format!(
                "tenant kind must be either 'company' or 'store', got '{other}'"
            ))),
        }
    }
}

/// What the tenant scope check does when a request path names no user or tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantScopePolicy {
    /// The principal's own tenant is implied; the request proceeds.
    #[default]
    AllowUnscoped,
    /// Non-administrators must address the tenant explicitly in the path.
    DenyUnscoped,
}

impl TenantScopePolicy {
    /// Returns the storage string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllowUnscoped => "allow",
            Self::DenyUnscoped => "deny",
        }
    }

    /// Parses a configuration value into a policy.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(Self::AllowUnscoped),
            "deny" => Ok(Self::DenyUnscoped),
            other => Err(AppError::Validation(format!(
                "tenant scope policy must be either 'allow' or 'deny', got '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TenantKind, TenantScopePolicy};

    #[test]
    fn store_kind_supplies_store_names() {
        let kind = TenantKind::Store;
        assert_eq!(kind.claim_name(), "idLojaToken");
        assert_eq!(kind.scoped_route_prefix(), "/stores/{store_id}");
    }

    #[test]
    fn company_kind_supplies_company_names() {
        let kind = TenantKind::Company;
        assert_eq!(kind.claim_name(), "idEmpresaToken");
        assert_eq!(kind.path_param(), "company_id");
    }

    #[test]
    fn tenant_kind_parse_is_case_insensitive() {
        assert_eq!(TenantKind::parse(" Store ").ok(), Some(TenantKind::Store));
        assert!(TenantKind::parse("branch").is_err());
    }

    #[test]
    fn scope_policy_defaults_to_allow() {
        assert_eq!(TenantScopePolicy::default(), TenantScopePolicy::AllowUnscoped);
        assert_eq!(
            TenantScopePolicy::parse("deny").ok(),
            Some(TenantScopePolicy::DenyUnscoped)
        );
    }
}
