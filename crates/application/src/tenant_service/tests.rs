use dealerdesk_core::{AppError, TenantId};
use dealerdesk_domain::TenantKind;

use crate::test_support::{FakeStore, context, tenant_record};

use super::{SaveTenantInput, TenantService};

fn profile(tax_id: &str) -> SaveTenantInput {
    SaveTenantInput {
        name: "Loja Batel LTDA".to_owned(),
        trade_name: "Loja Batel".to_owned(),
        address: "Av. Batel, 1200".to_owned(),
        phone: Some(" ".to_owned()),
        email: Some("Contato@LojaBatel.com.br".to_owned()),
        tax_id: tax_id.to_owned(),
        image_path: None,
    }
}

#[tokio::test]
async fn update_replaces_profile_and_keeps_creation_time() {
    let store = FakeStore::shared();
    let tenant_id = store.add_tenant(TenantKind::Store).await;
    let created_at = store.tenants.lock().await[0].created_at;
    let user = store.add_user(tenant_id, "Gerente").await;
    let service = TenantService::new(store.clone(), TenantKind::Store);

    let updated = service
        .update(&context(&user), profile("98.765.432/0001-10"))
        .await
        .unwrap_or_else(|error| panic!("update failed: {error}"));

    assert_eq!(updated.trade_name, "Loja Batel");
    assert_eq!(updated.tax_id.as_str(), "98765432000110");
    assert_eq!(updated.email.as_deref(), Some("contato@lojabatel.com.br"));
    assert_eq!(updated.phone, None);
    assert_eq!(updated.created_at, created_at);
}

#[tokio::test]
async fn update_rejects_cnpj_of_another_tenant() {
    let store = FakeStore::shared();
    let tenant_id = store.add_tenant(TenantKind::Company).await;
    store
        .tenants
        .lock()
        .await
        .push(tenant_record(TenantKind::Company, TenantId::new(), "98765432000110"));
    let user = store.add_user(tenant_id, "Gerente").await;
    let service = TenantService::new(store.clone(), TenantKind::Company);

    let result = service
        .update(&context(&user), profile("98765432000110"))
        .await;

    assert!(matches!(result, Err(AppError::Validation(message)) if message.contains("already in use")));
}

#[tokio::test]
async fn cpf_is_not_a_tenant_tax_id() {
    let store = FakeStore::shared();
    let tenant_id = store.add_tenant(TenantKind::Company).await;
    let user = store.add_user(tenant_id, "Gerente").await;
    let service = TenantService::new(store.clone(), TenantKind::Company);

    let result = service
        .update(&context(&user), profile("123.456.789-09"))
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn tenant_of_other_kind_is_not_found() {
    let store = FakeStore::shared();
    let tenant_id = store.add_tenant(TenantKind::Company).await;
    let user = store.add_user(tenant_id, "Gerente").await;
    let service = TenantService::new(store.clone(), TenantKind::Store);

    assert!(matches!(
        service.get(&context(&user)).await,
        Err(AppError::NotFound(_))
    ));
}
