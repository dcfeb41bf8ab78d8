use dealerdesk_application::{PermissionGrantRepository, UserRepository};
use dealerdesk_core::AppError;
use dealerdesk_domain::{EmailAddress, PermissionGrant, ResourceType, TenantKind};

use crate::PostgresPermissionGrantRepository;
use crate::postgres_test_support::{seed_tenant, seed_user, test_pool};

use super::PostgresUserRepository;

fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@dealer.com", uuid::Uuid::new_v4().simple())
}

#[tokio::test]
async fn same_email_is_allowed_in_two_tenants_but_not_twice_in_one() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresUserRepository::new(pool.clone());
    let first = seed_tenant(&pool, TenantKind::Company).await;
    let second = seed_tenant(&pool, TenantKind::Company).await;
    let email = unique_email("shared");

    let original = seed_user(&pool, first.id, &email).await;
    seed_user(&pool, second.id, &email).await;

    let lookup = EmailAddress::new(email.as_str())
        .unwrap_or_else(|error| panic!("email rejected: {error}"));
    let accounts = repository
        .list_by_email(&lookup)
        .await
        .unwrap_or_else(|error| panic!("list by email failed: {error}"));
    assert_eq!(accounts.len(), 2);

    let mut duplicate = original.clone();
    duplicate.id = dealerdesk_core::UserId::new();
    let result = repository.create(duplicate).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn tenant_lookups_never_cross_tenants() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresUserRepository::new(pool.clone());
    let first = seed_tenant(&pool, TenantKind::Store).await;
    let second = seed_tenant(&pool, TenantKind::Store).await;
    let user = seed_user(&pool, first.id, &unique_email("scoped")).await;

    let found = repository
        .find_in_tenant(second.id, user.id)
        .await
        .unwrap_or_else(|error| panic!("lookup failed: {error}"));
    assert!(found.is_none());

    let by_tax_id = repository
        .find_by_tax_id(first.id, &user.tax_id)
        .await
        .unwrap_or_else(|error| panic!("lookup failed: {error}"));
    assert_eq!(by_tax_id.map(|record| record.id), Some(user.id));
}

#[tokio::test]
async fn deleting_a_user_removes_its_grants() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresUserRepository::new(pool.clone());
    let grants = PostgresPermissionGrantRepository::new(pool.clone());
    let tenant = seed_tenant(&pool, TenantKind::Company).await;
    let user = seed_user(&pool, tenant.id, &unique_email("leaving")).await;

    grants
        .save(PermissionGrant::full(user.id, ResourceType::Clients))
        .await
        .unwrap_or_else(|error| panic!("grant save failed: {error}"));

    let deleted = repository
        .delete(tenant.id, user.id)
        .await
        .unwrap_or_else(|error| panic!("delete failed: {error}"));
    assert!(deleted);

    let remaining = grants
        .list_for_user(user.id)
        .await
        .unwrap_or_else(|error| panic!("grant list failed: {error}"));
    assert!(remaining.is_empty());
}
