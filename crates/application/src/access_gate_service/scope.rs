use std::str::FromStr;

use dealerdesk_core::{AppError, TenantId, UserId};
use dealerdesk_domain::TenantScopePolicy;

use crate::UserRecord;

use super::{AccessGateService, GateError};

impl AccessGateService {
    /// Resolves the tenant a request may act on.
    ///
    /// Non-administrators may only address their own tenant. Administrators
    /// may address any tenant, and the scope follows the addressed tenant.
    pub(super) async fn resolve_scope(
        &self,
        caller: &UserRecord,
        target_user_id: Option<&str>,
        target_tenant_id: Option<&str>,
    ) -> Result<TenantId, GateError> {
        let is_administrator = caller.is_administrator();
        let mut scope = caller.tenant_id;

        if let Some(raw) = target_user_id {
            let target_user_id = UserId::from_str(raw)?;
            if target_user_id != caller.id {
                let target_tenant = self
                    .user_repository
                    .find_by_id(target_user_id)
                    .await?
                    .map(|target| target.tenant_id);

                match target_tenant {
                    Some(tenant_id) if tenant_id == caller.tenant_id => {}
                    Some(tenant_id) if is_administrator => scope = tenant_id,
                    // An administrator reaching a missing user gets the handler's 404.
                    None if is_administrator => {}
                    _ => return Err(GateError::CrossTenantDenied),
                }
            }
        }

        if let Some(raw) = target_tenant_id {
            let tenant_id = TenantId::from_str(raw)?;
            if tenant_id != caller.tenant_id {
                if !is_administrator {
                    return Err(GateError::CrossTenantDenied);
                }

                let exists = self
                    .tenant_repository
                    .find(self.tenant_kind, tenant_id)
                    .await?
                    .is_some();
                if !exists {
                    return Err(GateError::Application(AppError::NotFound(format!(
                        "{} '{tenant_id}' does not exist",
                        self.tenant_kind.as_str()
                    ))));
                }
            }

            scope = tenant_id;
        }

        if target_user_id.is_none()
            && target_tenant_id.is_none()
            && self.scope_policy == TenantScopePolicy::DenyUnscoped
            && !is_administrator
        {
            return Err(GateError::CrossTenantDenied);
        }

        Ok(scope)
    }
}
