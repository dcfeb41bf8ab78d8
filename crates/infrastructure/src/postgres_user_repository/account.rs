use super::*;

impl PostgresUserRepository {
    pub(super) async fn create_impl(&self, user: UserRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, tenant_id, name, tax_id, email, password_hash, phone, job_title,
                user_group, active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.tenant_id.as_uuid())
        .bind(user.name.as_str())
        .bind(user.tax_id.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.phone.as_deref())
        .bind(user.job_title.as_deref())
        .bind(user.group.as_str())
        .bind(user.active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| constraint_or_internal(error, "create user"))?;

        Ok(())
    }

    pub(super) async fn update_impl(&self, user: UserRecord) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $3, tax_id = $4, email = $5, password_hash = $6, phone = $7,
                job_title = $8, user_group = $9, active = $10, updated_at = $11
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(user.tenant_id.as_uuid())
        .bind(user.id.as_uuid())
        .bind(user.name.as_str())
        .bind(user.tax_id.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.phone.as_deref())
        .bind(user.job_title.as_deref())
        .bind(user.group.as_str())
        .bind(user.active)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| constraint_or_internal(error, "update user"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("user '{}' not found", user.id)));
        }

        Ok(())
    }

    pub(super) async fn delete_impl(&self, tenant_id: TenantId, user_id: UserId) -> AppResult<bool> {
        // permission_grants rows go with the user through ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM users WHERE tenant_id = $1 AND id = $2")
            .bind(tenant_id.as_uuid())
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| constraint_or_internal(error, "delete user"))?;

        Ok(result.rows_affected() > 0)
    }
}
