use async_trait::async_trait;

use dealerdesk_application::{
    PermissionGrantRepository, TenantRecord, TenantRepository, UserRecord, UserRepository,
};
use dealerdesk_core::{AppError, AppResult, TenantId, UserId};
use dealerdesk_domain::{EmailAddress, PermissionGrant, ResourceType, TaxId, TenantKind};

use super::{
    InMemoryBackOfficeRepository, already_in_use, contains_ignoring_case, ensure_absent,
    still_referenced,
};

impl InMemoryBackOfficeRepository {
    async fn ensure_user_unique(&self, user: &UserRecord) -> AppResult<()> {
        let users = self.users.read().await;
        let others = users
            .values()
            .filter(|other| other.tenant_id == user.tenant_id && other.id != user.id);

        for other in others {
            if other.tax_id == user.tax_id {
                return Err(already_in_use("tax id"));
            }
            if other.email == user.email {
                return Err(already_in_use("email"));
            }
        }

        Ok(())
    }

    async fn ensure_tenant_unique(&self, tenant: &TenantRecord) -> AppResult<()> {
        if self
            .tenants
            .read()
            .await
            .values()
            .any(|other| other.id != tenant.id && other.tax_id == tenant.tax_id)
        {
            return Err(AppError::Validation(
                "tax id is already in use by another tenant".to_owned(),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryBackOfficeRepository {
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        Ok(self.users.read().await.get(&user_id).cloned())
    }

    async fn list_by_email(&self, email: &EmailAddress) -> AppResult<Vec<UserRecord>> {
        let mut users: Vec<UserRecord> = self
            .users
            .read()
            .await
            .values()
            .filter(|user| &user.email == email)
            .cloned()
            .collect();
        users.sort_by(|left, right| {
            left.created_at
                .cmp(&right.created_at)
                .then_with(|| left.id.cmp(&right.id))
        });

        Ok(users)
    }

    async fn list_for_tenant(
        &self,
        tenant_id: TenantId,
        name_filter: Option<&str>,
    ) -> AppResult<Vec<UserRecord>> {
        let mut users: Vec<UserRecord> = self
            .users
            .read()
            .await
            .values()
            .filter(|user| user.tenant_id == tenant_id)
            .filter(|user| name_filter.is_none_or(|filter| contains_ignoring_case(&user.name, filter)))
            .cloned()
            .collect();
        users.sort_by(|left, right| left.name.cmp(&right.name).then_with(|| left.id.cmp(&right.id)));

        Ok(users)
    }

    async fn find_in_tenant(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
    ) -> AppResult<Option<UserRecord>> {
        Ok(self
            .users
            .read()
            .await
            .get(&user_id)
            .filter(|user| user.tenant_id == tenant_id)
            .cloned())
    }

    async fn find_by_tax_id(
        &self,
        tenant_id: TenantId,
        tax_id: &TaxId,
    ) -> AppResult<Option<UserRecord>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.tenant_id == tenant_id && &user.tax_id == tax_id)
            .cloned())
    }

    async fn find_by_email(
        &self,
        tenant_id: TenantId,
        email: &EmailAddress,
    ) -> AppResult<Option<UserRecord>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.tenant_id == tenant_id && &user.email == email)
            .cloned())
    }

    async fn create(&self, user: UserRecord) -> AppResult<()> {
        if !self.tenants.read().await.contains_key(&user.tenant_id) {
            return Err(AppError::Validation(format!(
                "tenant '{}' does not exist",
                user.tenant_id
            )));
        }
        self.ensure_user_unique(&user).await?;

        let mut users = self.users.write().await;
        ensure_absent(users.contains_key(&user.id), "user", user.id)?;
        users.insert(user.id, user);
        Ok(())
    }

    async fn update(&self, user: UserRecord) -> AppResult<()> {
        self.ensure_user_unique(&user).await?;

        let mut users = self.users.write().await;
        match users.get_mut(&user.id) {
            Some(stored) if stored.tenant_id == user.tenant_id => {
                *stored = user;
                Ok(())
            }
            _ => Err(AppError::NotFound(format!("user '{}' not found", user.id))),
        }
    }

    async fn delete(&self, tenant_id: TenantId, user_id: UserId) -> AppResult<bool> {
        if self
            .users
            .read()
            .await
            .get(&user_id)
            .is_none_or(|user| user.tenant_id != tenant_id)
        {
            return Ok(false);
        }
        if self.is_referenced(user_id.into()).await {
            return Err(still_referenced("user"));
        }

        if self.users.write().await.remove(&user_id).is_none() {
            return Ok(false);
        }
        self.grants
            .write()
            .await
            .retain(|(grant_user_id, _), _| *grant_user_id != user_id);
        Ok(true)
    }
}

#[async_trait]
impl PermissionGrantRepository for InMemoryBackOfficeRepository {
    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<PermissionGrant>> {
        let mut grants: Vec<PermissionGrant> = self
            .grants
            .read()
            .await
            .values()
            .filter(|grant| grant.user_id == user_id)
            .cloned()
            .collect();
        grants.sort_by(|left, right| {
            right
                .updated_at
                .cmp(&left.updated_at)
                .then_with(|| left.resource_type.as_str().cmp(right.resource_type.as_str()))
        });

        Ok(grants)
    }

    async fn save(&self, grant: PermissionGrant) -> AppResult<PermissionGrant> {
        if !self.users.read().await.contains_key(&grant.user_id) {
            return Err(AppError::Validation(format!(
                "user '{}' does not exist",
                grant.user_id
            )));
        }

        self.grants
            .write()
            .await
            .insert((grant.user_id, grant.resource_type), grant.clone());
        Ok(grant)
    }

    async fn delete(&self, user_id: UserId, resource_type: ResourceType) -> AppResult<bool> {
        Ok(self
            .grants
            .write()
            .await
            .remove(&(user_id, resource_type))
            .is_some())
    }
}

#[async_trait]
impl TenantRepository for InMemoryBackOfficeRepository {
    async fn any_exists(&self) -> AppResult<bool> {
        Ok(!self.tenants.read().await.is_empty())
    }

    async fn find(&self, kind: TenantKind, tenant_id: TenantId) -> AppResult<Option<TenantRecord>> {
        Ok(self
            .tenants
            .read()
            .await
            .get(&tenant_id)
            .filter(|tenant| tenant.kind == kind)
            .cloned())
    }

    async fn find_by_tax_id(&self, tax_id: &TaxId) -> AppResult<Option<TenantRecord>> {
        Ok(self
            .tenants
            .read()
            .await
            .values()
            .find(|tenant| &tenant.tax_id == tax_id)
            .cloned())
    }

    async fn create(&self, tenant: TenantRecord) -> AppResult<()> {
        self.ensure_tenant_unique(&tenant).await?;

        let mut tenants = self.tenants.write().await;
        ensure_absent(tenants.contains_key(&tenant.id), "tenant", tenant.id)?;
        tenants.insert(tenant.id, tenant);
        Ok(())
    }

    async fn update(&self, tenant: TenantRecord) -> AppResult<()> {
        self.ensure_tenant_unique(&tenant).await?;

        let mut tenants = self.tenants.write().await;
        match tenants.get_mut(&tenant.id) {
            Some(stored) if stored.kind == tenant.kind => {
                *stored = tenant;
                Ok(())
            }
            _ => Err(AppError::NotFound(format!("tenant '{}' not found", tenant.id))),
        }
    }
}
