use dealerdesk_core::{AppError, SaleId};
use dealerdesk_domain::TenantKind;

use crate::ledger_service::TenantReferences;
use crate::test_support::{FakeStore, context};
use crate::{AccessContext, FinancingFilter, SaleService, SaveSaleInput};

use super::{FinancingService, SaveFinancingInput, installment_for};

async fn sale(store: &std::sync::Arc<FakeStore>, scope: &AccessContext) -> SaleId {
    let tenant_id = scope.tenant_id();
    SaleService::new(
        store.clone(),
        TenantReferences::new(store.clone(), store.clone(), store.clone()),
    )
    .create(
        scope,
        SaveSaleInput {
            client_id: store.add_client(tenant_id).await,
            vehicle_id: store.add_vehicle(tenant_id).await,
            sale_price: 60_000.0,
            ..SaveSaleInput::default()
        },
    )
    .await
    .map(|sale| sale.id)
    .unwrap_or_else(|error| panic!("sale failed: {error}"))
}

fn financing(sale_id: SaleId) -> SaveFinancingInput {
    SaveFinancingInput {
        sale_id,
        total_amount: 60_000.0,
        down_payment: Some(12_000.0),
        installments: 48,
        interest_rate: Some(1.5),
        institution: Some("Banco Carro Fácil".to_owned()),
        ..SaveFinancingInput::default()
    }
}

#[test]
fn installment_follows_the_price_table() {
    assert!((installment_for(48_000.0, 1.5, 48) - 1_410.0).abs() < 0.01);
    assert!((installment_for(12_000.0, 0.0, 12) - 1_000.0).abs() < f64::EPSILON);
    assert!((installment_for(1_000.0, 2.0, 1) - 1_020.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn financing_inherits_the_sale_client_and_computes_installments() {
    let store = FakeStore::shared();
    let tenant_id = store.add_tenant(TenantKind::Company).await;
    let scope = context(&store.add_user(tenant_id, "Financeiro").await);
    let sale_id = sale(&store, &scope).await;
    let service = FinancingService::new(store.clone(), store.clone());

    let created = service
        .create(&scope, financing(sale_id))
        .await
        .unwrap_or_else(|error| panic!("financing failed: {error}"));

    let sale_client = store.sales.lock().await[0].client_id;
    assert_eq!(created.client_id, sale_client);
    assert_eq!(created.installment_amount, installment_for(48_000.0, 1.5, 48));

    let listed = service
        .list(
            &scope,
            FinancingFilter {
                client_id: Some(sale_client),
                ..FinancingFilter::default()
            },
        )
        .await
        .unwrap_or_else(|error| panic!("list failed: {error}"));
    assert_eq!(listed, vec![created]);
}

#[tokio::test]
async fn client_other_than_the_sale_client_is_rejected() {
    let store = FakeStore::shared();
    let tenant_id = store.add_tenant(TenantKind::Company).await;
    let scope = context(&store.add_user(tenant_id, "Financeiro").await);
    let sale_id = sale(&store, &scope).await;
    let other_client = store.add_client(tenant_id).await;

    let result = FinancingService::new(store.clone(), store.clone())
        .create(
            &scope,
            SaveFinancingInput {
                client_id: Some(other_client),
                ..financing(sale_id)
            },
        )
        .await;

    assert!(
        matches!(result, Err(AppError::Validation(message)) if message == "client does not match the financed sale")
    );
}

#[tokio::test]
async fn sale_of_another_tenant_cannot_be_financed() {
    let store = FakeStore::shared();
    let first_tenant = store.add_tenant(TenantKind::Store).await;
    let second_tenant = store.add_tenant(TenantKind::Store).await;
    let first = context(&store.add_user(first_tenant, "Financeiro").await);
    let second = context(&store.add_user(second_tenant, "Financeiro").await);
    let foreign_sale = sale(&store, &second).await;

    let result = FinancingService::new(store.clone(), store.clone())
        .create(&first, financing(foreign_sale))
        .await;

    assert!(
        matches!(result, Err(AppError::Validation(message)) if message == "sale does not belong to this tenant")
    );
}

#[tokio::test]
async fn terms_are_validated() {
    let store = FakeStore::shared();
    let tenant_id = store.add_tenant(TenantKind::Company).await;
    let scope = context(&store.add_user(tenant_id, "Financeiro").await);
    let sale_id = sale(&store, &scope).await;
    let service = FinancingService::new(store.clone(), store.clone());

    for input in [
        SaveFinancingInput {
            down_payment: Some(60_000.0),
            ..financing(sale_id)
        },
        SaveFinancingInput {
            installments: 0,
            ..financing(sale_id)
        },
        SaveFinancingInput {
            installments: 481,
            ..financing(sale_id)
        },
        SaveFinancingInput {
            interest_rate: Some(-1.0),
            ..financing(sale_id)
        },
        SaveFinancingInput {
            installment_amount: Some(0.0),
            ..financing(sale_id)
        },
    ] {
        assert!(matches!(
            service.create(&scope, input).await,
            Err(AppError::Validation(_))
        ));
    }
}

#[tokio::test]
async fn explicit_installment_amount_is_kept() {
    let store = FakeStore::shared();
    let tenant_id = store.add_tenant(TenantKind::Company).await;
    let scope = context(&store.add_user(tenant_id, "Financeiro").await);
    let sale_id = sale(&store, &scope).await;

    let created = FinancingService::new(store.clone(), store.clone())
        .create(
            &scope,
            SaveFinancingInput {
                installment_amount: Some(1_399.9),
                ..financing(sale_id)
            },
        )
        .await
        .unwrap_or_else(|error| panic!("financing failed: {error}"));

    assert!((created.installment_amount - 1_399.9).abs() < f64::EPSILON);
}
