use std::sync::Arc;

use chrono::Utc;

use dealerdesk_core::{AppError, AppResult, UserId};
use dealerdesk_domain::{PermissionGrant, ResourceType};

use crate::{AccessContext, PermissionGrantRepository, UserRepository};


/// Input payload for saving one grant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveGrantInput {
    /// Allows reads.
    pub can_read: bool,
    /// Allows creates.
    pub can_create: bool,
    /// Allows updates.
    pub can_update: bool,
    /// Allows deletes.
    pub can_delete: bool,
}

/// Application service administering per-user permission grants.
#[derive(Clone)]
pub struct PermissionGrantService {
    user_repository: Arc<dyn UserRepository>,
    grant_repository: Arc<dyn PermissionGrantRepository>,
}

impl PermissionGrantService {
    /// Creates a new permission grant service.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        grant_repository: Arc<dyn PermissionGrantRepository>,
    ) -> Self {
        Self {
            user_repository,
            grant_repository,
        }
    }

    /// Lists a tenant user's grants ordered by resource type.
    pub async fn list(
        &self,
        context: &AccessContext,
        user_id: UserId,
    ) -> AppResult<Vec<PermissionGrant>> {
        self.require_user(context, user_id).await?;

        let mut grants = self.grant_repository.list_for_user(user_id).await?;
        grants.sort_by_key(|grant| grant.resource_type);
        grants.dedup_by_key(|grant| grant.resource_type);
        Ok(grants)
    }

    /// Inserts or replaces a tenant user's grant for one resource type.
    pub async fn save(
        &self,
        context: &AccessContext,
        user_id: UserId,
        resource_type: ResourceType,
        input: SaveGrantInput,
    ) -> AppResult<PermissionGrant> {
        self.require_user(context, user_id).await?;

        self.grant_repository
            .save(PermissionGrant {
                user_id,
                resource_type,
                can_read: input.can_read,
                can_create: input.can_create,
                can_update: input.can_update,
                can_delete: input.can_delete,
                updated_at: Utc::now(),
            })
            .await
    }

    /// Removes a tenant user's grant for one resource type.
    pub async fn delete(
        &self,
        context: &AccessContext,
        user_id: UserId,
        resource_type: ResourceType,
    ) -> AppResult<()> {
        self.require_user(context, user_id).await?;

        if !self.grant_repository.delete(user_id, resource_type).await? {
            return Err(AppError::NotFound(format!(
                "user has no grant on '{}'",
                resource_type.as_str()
            )));
        }

        Ok(())
    }

    async fn require_user(&self, context: &AccessContext, user_id: UserId) -> AppResult<()> {
        self.user_repository
            .find_in_tenant(context.tenant_id(), user_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("user not found in this tenant".to_owned()))
    }
}
