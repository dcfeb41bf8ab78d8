use dealerdesk_core::AppError;
use dealerdesk_domain::TenantKind;

use crate::test_support::{FakeStore, context};

use super::{ClientService, SaveClientInput};

fn client(name: &str, tax_id: &str, email: &str) -> SaveClientInput {
    SaveClientInput {
        name: name.to_owned(),
        tax_id: tax_id.to_owned(),
        email: email.to_owned(),
        phone: Some("(41) 99999-0000".to_owned()),
        ..SaveClientInput::default()
    }
}

#[tokio::test]
async fn same_tax_id_is_rejected_per_tenant_but_allowed_across_tenants() {
    let store = FakeStore::shared();
    let first_tenant = store.add_tenant(TenantKind::Store).await;
    let second_tenant = store.add_tenant(TenantKind::Store).await;
    let first = context(&store.add_user(first_tenant, "Vendas").await);
    let second = context(&store.add_user(second_tenant, "Vendas").await);
    let service = ClientService::new(store.clone());

    service
        .create(&first, client("Joana", "123.456.789-09", "joana@mail.com"))
        .await
        .unwrap_or_else(|error| panic!("create failed: {error}"));

    let duplicate = service
        .create(&first, client("Joana B", "12345678909", "joana.b@mail.com"))
        .await;
    assert!(matches!(duplicate, Err(AppError::Validation(message)) if message == "tax id is already in use in this tenant"));

    let elsewhere = service
        .create(&second, client("Joana", "12345678909", "joana@mail.com"))
        .await;
    assert!(elsewhere.is_ok());
}

#[tokio::test]
async fn list_returns_only_scoped_tenant_clients_by_name() {
    let store = FakeStore::shared();
    let first_tenant = store.add_tenant(TenantKind::Company).await;
    let second_tenant = store.add_tenant(TenantKind::Company).await;
    let first = context(&store.add_user(first_tenant, "Vendas").await);
    let second = context(&store.add_user(second_tenant, "Vendas").await);
    let service = ClientService::new(store.clone());

    for (scope, name, tax_id) in [
        (&first, "Zeca", "11111111111"),
        (&first, "Ana", "22222222222"),
        (&second, "Bruno", "33333333333"),
    ] {
        service
            .create(scope, client(name, tax_id, &format!("{tax_id}@mail.com")))
            .await
            .unwrap_or_else(|error| panic!("create failed: {error}"));
    }

    let names: Vec<String> = service
        .list(&first, None)
        .await
        .unwrap_or_else(|error| panic!("list failed: {error}"))
        .into_iter()
        .map(|client| client.name)
        .collect();
    assert_eq!(names, vec!["Ana".to_owned(), "Zeca".to_owned()]);

    let filtered = service
        .list(&first, Some(" Ze "))
        .await
        .unwrap_or_else(|error| panic!("list failed: {error}"));
    assert_eq!(filtered.len(), 1);
}

#[tokio::test]
async fn client_of_other_tenant_is_not_found() {
    let store = FakeStore::shared();
    let first_tenant = store.add_tenant(TenantKind::Company).await;
    let second_tenant = store.add_tenant(TenantKind::Company).await;
    let first = context(&store.add_user(first_tenant, "Vendas").await);
    let second = context(&store.add_user(second_tenant, "Vendas").await);
    let service = ClientService::new(store.clone());

    let created = service
        .create(&second, client("Bruno", "33333333333", "bruno@mail.com"))
        .await
        .unwrap_or_else(|error| panic!("create failed: {error}"));

    assert!(matches!(
        service.get(&first, created.id).await,
        Err(AppError::NotFound(message)) if message == "client not found in this tenant"
    ));
    assert!(matches!(
        service.delete(&first, created.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn update_may_keep_own_tax_id() {
    let store = FakeStore::shared();
    let tenant_id = store.add_tenant(TenantKind::Company).await;
    let scope = context(&store.add_user(tenant_id, "Vendas").await);
    let service = ClientService::new(store.clone());

    let created = service
        .create(&scope, client("Carla", "44444444444", "carla@mail.com"))
        .await
        .unwrap_or_else(|error| panic!("create failed: {error}"));

    let updated = service
        .update(
            &scope,
            created.id,
            client("Carla Dias", "444.444.444-44", "carla@mail.com"),
        )
        .await
        .unwrap_or_else(|error| panic!("update failed: {error}"));

    assert_eq!(updated.name, "Carla Dias");
    assert_eq!(updated.created_at, created.created_at);

    let by_tax_id = service
        .find_by_tax_id(&scope, "44444444444")
        .await
        .unwrap_or_else(|error| panic!("lookup failed: {error}"));
    assert_eq!(by_tax_id, updated);
}
