//! Tenant-scoped user account management.

use std::sync::Arc;

use chrono::Utc;

use dealerdesk_core::{AppError, AppResult, NonEmptyString, TenantId, UserId};
use dealerdesk_domain::{EmailAddress, TaxId, UserGroup, validate_password};

use crate::{AccessContext, PasswordHasher, UserRecord, UserRepository};


/// Input payload for creating or replacing a user.
#[derive(Debug, Clone, Default)]
pub struct SaveUserInput {
    /// Full name.
    pub name: String,
    /// CPF or CNPJ.
    pub tax_id: String,
    /// Login email.
    pub email: String,
    /// Plaintext password; required on create, optional on update.
    pub password: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Job title.
    pub job_title: Option<String>,
    /// Group label; defaults to staff.
    pub group: Option<String>,
    /// Active flag; defaults to active.
    pub active: Option<bool>,
}

struct UserFields {
    name: String,
    tax_id: TaxId,
    email: EmailAddress,
    group: UserGroup,
}

impl SaveUserInput {
    fn fields(&self) -> AppResult<UserFields> {
        let name = NonEmptyString::new(self.name.as_str())
            .map_err(|_| AppError::Validation("name must not be empty".to_owned()))?;
        let group = match self.group.as_deref() {
            Some(group) => UserGroup::new(group)?,
            None => UserGroup::staff(),
        };

        Ok(UserFields {
            name: name.into(),
            tax_id: TaxId::new(&self.tax_id)?,
            email: EmailAddress::new(self.email.as_str())?,
            group,
        })
    }

    /// Builds a new record in `tenant_id`, hashing the required password.
    pub(crate) fn into_new_record(
        self,
        tenant_id: TenantId,
        group_override: Option<UserGroup>,
        password_hasher: &dyn PasswordHasher,
    ) -> AppResult<UserRecord> {
        let fields = self.fields()?;
        let password = self
            .password
            .as_deref()
            .ok_or_else(|| AppError::Validation("password is required".to_owned()))?;
        validate_password(password)?;

        let now = Utc::now();
        Ok(UserRecord {
            id: UserId::new(),
            tenant_id,
            name: fields.name,
            tax_id: fields.tax_id,
            email: fields.email,
            password_hash: password_hasher.hash_password(password)?,
            phone: clean(self.phone),
            job_title: clean(self.job_title),
            group: group_override.unwrap_or(fields.group),
            active: self.active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        })
    }
}

pub(crate) fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Application service for tenant users.
#[derive(Clone)]
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    /// Creates a new user service.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
        }
    }

    /// Lists users of the scoped tenant.
    pub async fn list(
        &self,
        context: &AccessContext,
        name_filter: Option<&str>,
    ) -> AppResult<Vec<UserRecord>> {
        let name_filter = name_filter.map(str::trim).filter(|value| !value.is_empty());
        self.user_repository
            .list_for_tenant(context.tenant_id(), name_filter)
            .await
    }

    /// Returns one user of the scoped tenant.
    pub async fn get(&self, context: &AccessContext, user_id: UserId) -> AppResult<UserRecord> {
        self.user_repository
            .find_in_tenant(context.tenant_id(), user_id)
            .await?
            .ok_or_else(not_found)
    }

    /// Returns the tenant user holding a tax id.
    pub async fn find_by_tax_id(
        &self,
        context: &AccessContext,
        tax_id: &str,
    ) -> AppResult<UserRecord> {
        let tax_id = TaxId::new(tax_id)?;
        self.user_repository
            .find_by_tax_id(context.tenant_id(), &tax_id)
            .await?
            .ok_or_else(not_found)
    }

    /// Returns the tenant user holding an email.
    pub async fn find_by_email(
        &self,
        context: &AccessContext,
        email: &str,
    ) -> AppResult<UserRecord> {
        let email = EmailAddress::new(email)?;
        self.user_repository
            .find_by_email(context.tenant_id(), &email)
            .await?
            .ok_or_else(not_found)
    }

    /// Creates a user in the scoped tenant.
    pub async fn create(
        &self,
        context: &AccessContext,
        input: SaveUserInput,
    ) -> AppResult<UserRecord> {
        let tenant_id = context.tenant_id();
        let user = input.into_new_record(tenant_id, None, self.password_hasher.as_ref())?;
        require_group_assignable(context, &user.group)?;

        self.ensure_unique(tenant_id, None, &user.tax_id, &user.email)
            .await?;
        self.user_repository.create(user.clone()).await?;

        Ok(user)
    }

    /// Replaces a user of the scoped tenant. The password changes only when provided.
    pub async fn update(
        &self,
        context: &AccessContext,
        user_id: UserId,
        input: SaveUserInput,
    ) -> AppResult<UserRecord> {
        let existing = self.get(context, user_id).await?;
        require_account_manageable(context, &existing)?;
        let fields = input.fields()?;
        if fields.group != existing.group {
            require_group_assignable(context, &fields.group)?;
        }

        self.ensure_unique(
            existing.tenant_id,
            Some(existing.id),
            &fields.tax_id,
            &fields.email,
        )
        .await?;

        let password_hash = match input.password.as_deref() {
            Some(password) => {
                validate_password(password)?;
                self.password_hasher.hash_password(password)?
            }
            None => existing.password_hash.clone(),
        };

        let user = UserRecord {
            name: fields.name,
            tax_id: fields.tax_id,
            email: fields.email,
            password_hash,
            phone: clean(input.phone),
            job_title: clean(input.job_title),
            group: fields.group,
            active: input.active.unwrap_or(existing.active),
            updated_at: Utc::now(),
            ..existing
        };
        self.user_repository.update(user.clone()).await?;

        Ok(user)
    }

    /// Deletes a user of the scoped tenant together with its grants.
    pub async fn delete(&self, context: &AccessContext, user_id: UserId) -> AppResult<()> {
        if user_id == context.user_id() {
            return Err(AppError::Validation(
                "users cannot delete their own account".to_owned(),
            ));
        }

        let existing = self.get(context, user_id).await?;
        require_account_manageable(context, &existing)?;

        if !self
            .user_repository
            .delete(context.tenant_id(), user_id)
            .await?
        {
            return Err(not_found());
        }

        Ok(())
    }

    async fn ensure_unique(
        &self,
        tenant_id: TenantId,
        current: Option<UserId>,
        tax_id: &TaxId,
        email: &EmailAddress,
    ) -> AppResult<()> {
        let is_other = |user: &UserRecord| Some(user.id) != current;

        if self
            .user_repository
            .find_by_tax_id(tenant_id, tax_id)
            .await?
            .is_some_and(|user| is_other(&user))
        {
            return Err(AppError::Validation(
                "tax id is already in use in this tenant".to_owned(),
            ));
        }

        if self
            .user_repository
            .find_by_email(tenant_id, email)
            .await?
            .is_some_and(|user| is_other(&user))
        {
            return Err(AppError::Validation(
                "email is already in use in this tenant".to_owned(),
            ));
        }

        Ok(())
    }
}

fn require_group_assignable(context: &AccessContext, group: &UserGroup) -> AppResult<()> {
    if group.is_administrator() && !context.is_administrator() {
        return Err(AppError::Forbidden(
            "only administrators can assign the administrator group".to_owned(),
        ));
    }

    Ok(())
}

/// Administrator accounts are only modified or removed by administrators.
fn require_account_manageable(context: &AccessContext, target: &UserRecord) -> AppResult<()> {
    if target.is_administrator() && !context.is_administrator() {
        return Err(AppError::Forbidden(
            "only administrators can modify administrator accounts".to_owned(),
        ));
    }

    Ok(())
}

fn not_found() -> AppError {
    AppError::NotFound("user not found in this tenant".to_owned())
}
