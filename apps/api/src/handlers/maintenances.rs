use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use dealerdesk_application::{AccessContext, MaintenanceFilter, SaveMaintenanceInput};
use dealerdesk_core::MaintenanceId;
use serde::Deserialize;

use crate::dto::{MaintenanceListQuery, MaintenanceResponse, SaveMaintenanceRequest};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MaintenancePath {
    maintenance_id: String,
}

pub async fn list_maintenances_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Query(query): Query<MaintenanceListQuery>,
) -> ApiResult<Json<Vec<MaintenanceResponse>>> {
    let maintenances = state
        .maintenance_service
        .list(&context, MaintenanceFilter::try_from(query)?)
        .await?
        .into_iter()
        .map(MaintenanceResponse::from)
        .collect();

    Ok(Json(maintenances))
}

pub async fn maintenance_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<MaintenancePath>,
) -> ApiResult<Json<MaintenanceResponse>> {
    let maintenance = state
        .maintenance_service
        .get(&context, path.maintenance_id.parse::<MaintenanceId>()?)
        .await?;

    Ok(Json(MaintenanceResponse::from(maintenance)))
}

pub async fn create_maintenance_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Json(payload): Json<SaveMaintenanceRequest>,
) -> ApiResult<(StatusCode, Json<MaintenanceResponse>)> {
    let maintenance = state
        .maintenance_service
        .create(&context, SaveMaintenanceInput::try_from(payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(MaintenanceResponse::from(maintenance))))
}

pub async fn update_maintenance_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<MaintenancePath>,
    Json(payload): Json<SaveMaintenanceRequest>,
) -> ApiResult<Json<MaintenanceResponse>> {
    let maintenance = state
        .maintenance_service
        .update(
            &context,
            path.maintenance_id.parse::<MaintenanceId>()?,
            SaveMaintenanceInput::try_from(payload)?,
        )
        .await?;

    Ok(Json(MaintenanceResponse::from(maintenance)))
}

pub async fn delete_maintenance_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<MaintenancePath>,
) -> ApiResult<StatusCode> {
    state
        .maintenance_service
        .delete(&context, path.maintenance_id.parse::<MaintenanceId>()?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
