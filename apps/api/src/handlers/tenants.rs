use axum::Json;
use axum::extract::{Extension, State};
use dealerdesk_application::AccessContext;

use crate::dto::{SaveTenantRequest, TenantResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn tenant_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
) -> ApiResult<Json<TenantResponse>> {
    let tenant = state.tenant_service.get(&context).await?;

    Ok(Json(TenantResponse::from(tenant)))
}

pub async fn update_tenant_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Json(payload): Json<SaveTenantRequest>,
) -> ApiResult<Json<TenantResponse>> {
    let tenant = state
        .tenant_service
        .update(&context, payload.into())
        .await?;

    Ok(Json(TenantResponse::from(tenant)))
}
