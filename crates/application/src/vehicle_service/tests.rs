use dealerdesk_core::{AppError, InventoryId};
use dealerdesk_domain::TenantKind;

use crate::test_support::{FakeStore, context};
use crate::{AccessContext, InventoryService, SaveInventoryInput};

use super::{SaveVehicleInput, VehicleService};

async fn inventory(store: &std::sync::Arc<FakeStore>, scope: &AccessContext) -> InventoryId {
    InventoryService::new(store.clone(), store.clone())
        .create(
            scope,
            SaveInventoryInput {
                name: "Pátio Central".to_owned(),
                ..SaveInventoryInput::default()
            },
        )
        .await
        .map(|inventory| inventory.id)
        .unwrap_or_else(|error| panic!("inventory create failed: {error}"))
}

fn vehicle(inventory_id: InventoryId, plate: &str, chassis: &str) -> SaveVehicleInput {
    SaveVehicleInput {
        inventory_id,
        plate: plate.to_owned(),
        chassis: chassis.to_owned(),
        brand: "Fiat".to_owned(),
        model: "Argo".to_owned(),
        mileage: Some(12_000),
        ..SaveVehicleInput::default()
    }
}

#[tokio::test]
async fn inventory_of_other_tenant_is_rejected() {
    let store = FakeStore::shared();
    let first_tenant = store.add_tenant(TenantKind::Company).await;
    let second_tenant = store.add_tenant(TenantKind::Company).await;
    let first = context(&store.add_user(first_tenant, "Estoque").await);
    let second = context(&store.add_user(second_tenant, "Estoque").await);
    let foreign_inventory = inventory(&store, &second).await;

    let result = VehicleService::new(store.clone(), store.clone())
        .create(&first, vehicle(foreign_inventory, "ABC1234", "9BD000000000001"))
        .await;

    assert!(matches!(result, Err(AppError::Validation(message)) if message == "inventory does not belong to this tenant"));
}

#[tokio::test]
async fn plate_and_chassis_are_unique_per_tenant() {
    let store = FakeStore::shared();
    let tenant_id = store.add_tenant(TenantKind::Company).await;
    let scope = context(&store.add_user(tenant_id, "Estoque").await);
    let inventory_id = inventory(&store, &scope).await;
    let service = VehicleService::new(store.clone(), store.clone());

    service
        .create(&scope, vehicle(inventory_id, "abc-1234", "9bd000000000001"))
        .await
        .unwrap_or_else(|error| panic!("create failed: {error}"));

    assert!(matches!(
        service
            .create(&scope, vehicle(inventory_id, "ABC1234", "9BD000000000002"))
            .await,
        Err(AppError::Validation(message)) if message.starts_with("plate")
    ));
    assert!(matches!(
        service
            .create(&scope, vehicle(inventory_id, "XYZ9876", "9BD000000000001"))
            .await,
        Err(AppError::Validation(message)) if message.starts_with("chassis")
    ));
}

#[tokio::test]
async fn search_matches_plate_brand_or_model() {
    let store = FakeStore::shared();
    let tenant_id = store.add_tenant(TenantKind::Company).await;
    let scope = context(&store.add_user(tenant_id, "Estoque").await);
    let inventory_id = inventory(&store, &scope).await;
    let service = VehicleService::new(store.clone(), store.clone());

    let mut hatch = vehicle(inventory_id, "ABC1234", "9BD000000000001");
    hatch.brand = "Chevrolet".to_owned();
    hatch.model = "Onix".to_owned();
    service
        .create(&scope, hatch)
        .await
        .unwrap_or_else(|error| panic!("create failed: {error}"));
    service
        .create(&scope, vehicle(inventory_id, "QWE5R67", "9BD000000000002"))
        .await
        .unwrap_or_else(|error| panic!("create failed: {error}"));

    let by_model = service
        .list(&scope, Some("onix"))
        .await
        .unwrap_or_else(|error| panic!("list failed: {error}"));
    assert_eq!(by_model.len(), 1);

    let by_plate = service
        .find_by_plate(&scope, "qwe-5r67")
        .await
        .unwrap_or_else(|error| panic!("lookup failed: {error}"));
    assert_eq!(by_plate.model, "Argo");
}

#[tokio::test]
async fn negative_mileage_is_rejected() {
    let store = FakeStore::shared();
    let tenant_id = store.add_tenant(TenantKind::Company).await;
    let scope = context(&store.add_user(tenant_id, "Estoque").await);
    let inventory_id = inventory(&store, &scope).await;

    let mut input = vehicle(inventory_id, "ABC1234", "9BD000000000001");
    input.mileage = Some(-1);

    assert!(matches!(
        VehicleService::new(store.clone(), store.clone())
            .create(&scope, input)
            .await,
        Err(AppError::Validation(_))
    ));
}
