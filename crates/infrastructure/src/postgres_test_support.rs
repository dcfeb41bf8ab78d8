use chrono::Utc;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use dealerdesk_application::{TenantRecord, TenantRepository, UserRecord, UserRepository};
use dealerdesk_core::{TenantId, UserId};
use dealerdesk_domain::{EmailAddress, TaxId, TenantKind, UserGroup};

use crate::{PostgresTenantRepository, PostgresUserRepository};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Returns a migrated pool, or `None` when `DATABASE_URL` is not set.
pub(crate) async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres tests: {error}");
    }

    Some(pool)
}

/// Builds a unique 14-digit CNPJ so parallel tests never collide on the global index.
pub(crate) fn unique_cnpj() -> TaxId {
    let digits = uuid::Uuid::new_v4().as_u128() % 100_000_000_000_000;
    TaxId::new(format!("{digits:014}"))
        .unwrap_or_else(|error| panic!("generated cnpj rejected: {error}"))
}

pub(crate) async fn seed_tenant(pool: &PgPool, kind: TenantKind) -> TenantRecord {
    let now = Utc::now();
    let tenant = TenantRecord {
        id: TenantId::new(),
        kind,
        name: "Auto Center Ltda".to_owned(),
        trade_name: "Auto Center".to_owned(),
        address: "Av. Brasil, 100".to_owned(),
        phone: None,
        email: None,
        tax_id: unique_cnpj(),
        image_path: None,
        created_at: now,
        updated_at: now,
    };

    PostgresTenantRepository::new(pool.clone())
        .create(tenant.clone())
        .await
        .unwrap_or_else(|error| panic!("failed to seed tenant: {error}"));

    tenant
}

pub(crate) async fn seed_user(pool: &PgPool, tenant_id: TenantId, email: &str) -> UserRecord {
    let now = Utc::now();
    let digits = uuid::Uuid::new_v4().as_u128() % 100_000_000_000;
    let user = UserRecord {
        id: UserId::new(),
        tenant_id,
        name: "Marina Souza".to_owned(),
        tax_id: TaxId::new(format!("{digits:011}"))
            .unwrap_or_else(|error| panic!("generated cpf rejected: {error}")),
        email: EmailAddress::new(email)
            .unwrap_or_else(|error| panic!("test email rejected: {error}")),
        password_hash: "$argon2id$placeholder".to_owned(),
        phone: None,
        job_title: None,
        group: UserGroup::staff(),
        active: true,
        created_at: now,
        updated_at: now,
    };

    PostgresUserRepository::new(pool.clone())
        .create(user.clone())
        .await
        .unwrap_or_else(|error| panic!("failed to seed user: {error}"));

    user
}
