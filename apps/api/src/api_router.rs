use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use dealerdesk_core::AppError;
use dealerdesk_domain::ResourceType;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;

#[cfg(test)]
mod tests;

use cors::build_cors_layer;

/// Builds the HTTP router. Business routes are served both unscoped under
/// `/api` and under the tenant-scoped prefix of the configured tenant kind.
pub fn build_router(
    app_state: AppState,
    cors_allowed_origin: Option<&str>,
) -> Result<Router, AppError> {
    let tenant_prefix = format!("/api{}", app_state.tenant_kind.scoped_route_prefix());

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/auth/login", post(handlers::auth::login_handler))
        .route("/auth/bootstrap", post(handlers::auth::bootstrap_handler));

    let identity_routes = Router::new()
        .route("/auth/me", get(handlers::auth::me_handler))
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_authenticated,
        ));

    let tenant_routes = gated(
        &app_state,
        ResourceType::Tenants,
        Router::new()
            .route(
                "/api/tenant",
                get(handlers::tenants::tenant_handler).put(handlers::tenants::update_tenant_handler),
            )
            .route(
                &tenant_prefix,
                get(handlers::tenants::tenant_handler).put(handlers::tenants::update_tenant_handler),
            ),
    );

    let business_routes = business_routes(&app_state);

    Ok(Router::new()
        .merge(public_routes)
        .merge(identity_routes)
        .merge(tenant_routes)
        .nest("/api", business_routes.clone())
        .nest(&tenant_prefix, business_routes)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(cors_allowed_origin)?)
        .with_state(app_state))
}

fn business_routes(app_state: &AppState) -> Router<AppState> {
    let user_routes = gated(
        app_state,
        ResourceType::Users,
        Router::new()
            .route(
                "/users",
                get(handlers::users::list_users_handler).post(handlers::users::create_user_handler),
            )
            .route(
                "/users/tax-id/{tax_id}",
                get(handlers::users::user_by_tax_id_handler),
            )
            .route(
                "/users/email/{email}",
                get(handlers::users::user_by_email_handler),
            )
            .route(
                "/users/{user_id}",
                get(handlers::users::user_handler)
                    .put(handlers::users::update_user_handler)
                    .delete(handlers::users::delete_user_handler),
            ),
    );

    let permission_routes = gated(
        app_state,
        ResourceType::Permissions,
        Router::new()
            .route(
                "/users/{user_id}/permissions",
                get(handlers::permissions::list_permissions_handler),
            )
            .route(
                "/users/{user_id}/permissions/{resource_type}",
                axum::routing::put(handlers::permissions::save_permission_handler)
                    .delete(handlers::permissions::delete_permission_handler),
            ),
    );

    let client_routes = gated(
        app_state,
        ResourceType::Clients,
        Router::new()
            .route(
                "/clients",
                get(handlers::clients::list_clients_handler)
                    .post(handlers::clients::create_client_handler),
            )
            .route(
                "/clients/tax-id/{tax_id}",
                get(handlers::clients::client_by_tax_id_handler),
            )
            .route(
                "/clients/{client_id}",
                get(handlers::clients::client_handler)
                    .put(handlers::clients::update_client_handler)
                    .delete(handlers::clients::delete_client_handler),
            ),
    );

    let inventory_routes = gated(
        app_state,
        ResourceType::Inventories,
        Router::new()
            .route(
                "/inventories",
                get(handlers::inventories::list_inventories_handler)
                    .post(handlers::inventories::create_inventory_handler),
            )
            .route(
                "/inventories/{inventory_id}",
                get(handlers::inventories::inventory_handler)
                    .put(handlers::inventories::update_inventory_handler)
                    .delete(handlers::inventories::delete_inventory_handler),
            ),
    );

    let vehicle_routes = gated(
        app_state,
        ResourceType::Vehicles,
        Router::new()
            .route(
                "/vehicles",
                get(handlers::vehicles::list_vehicles_handler)
                    .post(handlers::vehicles::create_vehicle_handler),
            )
            .route(
                "/vehicles/plate/{plate}",
                get(handlers::vehicles::vehicle_by_plate_handler),
            )
            .route(
                "/vehicles/{vehicle_id}",
                get(handlers::vehicles::vehicle_handler)
                    .put(handlers::vehicles::update_vehicle_handler)
                    .delete(handlers::vehicles::delete_vehicle_handler),
            ),
    );

    let bank_account_routes = gated(
        app_state,
        ResourceType::BankAccounts,
        Router::new()
            .route(
                "/bank-accounts",
                get(handlers::bank_accounts::list_bank_accounts_handler)
                    .post(handlers::bank_accounts::create_bank_account_handler),
            )
            .route(
                "/bank-accounts/{bank_account_id}",
                get(handlers::bank_accounts::bank_account_handler)
                    .put(handlers::bank_accounts::update_bank_account_handler)
                    .delete(handlers::bank_accounts::delete_bank_account_handler),
            ),
    );

    let sale_routes = gated(
        app_state,
        ResourceType::Sales,
        Router::new()
            .route(
                "/sales",
                get(handlers::sales::list_sales_handler)
                    .post(handlers::sales::create_sale_handler),
            )
            .route(
                "/sales/{sale_id}",
                get(handlers::sales::sale_handler)
                    .put(handlers::sales::update_sale_handler)
                    .delete(handlers::sales::delete_sale_handler),
            ),
    );

    let financing_routes = gated(
        app_state,
        ResourceType::Financings,
        Router::new()
            .route(
                "/financings",
                get(handlers::financings::list_financings_handler)
                    .post(handlers::financings::create_financing_handler),
            )
            .route(
                "/financings/{financing_id}",
                get(handlers::financings::financing_handler)
                    .put(handlers::financings::update_financing_handler)
                    .delete(handlers::financings::delete_financing_handler),
            ),
    );

    let contract_routes = gated(
        app_state,
        ResourceType::Contracts,
        Router::new()
            .route(
                "/contracts",
                get(handlers::contracts::list_contracts_handler)
                    .post(handlers::contracts::create_contract_handler),
            )
            .route(
                "/contracts/{contract_id}",
                get(handlers::contracts::contract_handler)
                    .put(handlers::contracts::update_contract_handler)
                    .delete(handlers::contracts::delete_contract_handler),
            ),
    );

    let maintenance_routes = gated(
        app_state,
        ResourceType::Maintenances,
        Router::new()
            .route(
                "/maintenances",
                get(handlers::maintenances::list_maintenances_handler)
                    .post(handlers::maintenances::create_maintenance_handler),
            )
            .route(
                "/maintenances/{maintenance_id}",
                get(handlers::maintenances::maintenance_handler)
                    .put(handlers::maintenances::update_maintenance_handler)
                    .delete(handlers::maintenances::delete_maintenance_handler),
            ),
    );

    let payment_routes = gated(
        app_state,
        ResourceType::Payments,
        Router::new()
            .route(
                "/payments",
                get(handlers::payments::list_payments_handler)
                    .post(handlers::payments::create_payment_handler),
            )
            .route(
                "/payments/{payment_id}",
                get(handlers::payments::payment_handler)
                    .put(handlers::payments::update_payment_handler)
                    .delete(handlers::payments::delete_payment_handler),
            ),
    );

    let receipt_routes = gated(
        app_state,
        ResourceType::Receipts,
        Router::new()
            .route(
                "/receipts",
                get(handlers::receipts::list_receipts_handler)
                    .post(handlers::receipts::create_receipt_handler),
            )
            .route(
                "/receipts/{receipt_id}",
                get(handlers::receipts::receipt_handler)
                    .put(handlers::receipts::update_receipt_handler)
                    .delete(handlers::receipts::delete_receipt_handler),
            ),
    );

    Router::new()
        .merge(user_routes)
        .merge(permission_routes)
        .merge(client_routes)
        .merge(inventory_routes)
        .merge(vehicle_routes)
        .merge(bank_account_routes)
        .merge(sale_routes)
        .merge(financing_routes)
        .merge(contract_routes)
        .merge(maintenance_routes)
        .merge(payment_routes)
        .merge(receipt_routes)
}

/// Guards every route of the group with the request gate for `resource`.
fn gated(
    app_state: &AppState,
    resource: ResourceType,
    routes: Router<AppState>,
) -> Router<AppState> {
    routes
        .route_layer(from_fn_with_state(app_state.clone(), middleware::require_gate))
        .layer(axum::Extension(resource))
}
