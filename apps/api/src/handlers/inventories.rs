use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use dealerdesk_application::{AccessContext, SaveInventoryInput};
use dealerdesk_core::InventoryId;
use serde::Deserialize;

use crate::dto::{InventoryResponse, SaveInventoryRequest};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InventoryPath {
    inventory_id: String,
}

pub async fn list_inventories_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
) -> ApiResult<Json<Vec<InventoryResponse>>> {
    let inventories = state
        .inventory_service
        .list(&context)
        .await?
        .into_iter()
        .map(InventoryResponse::from)
        .collect();

    Ok(Json(inventories))
}

pub async fn inventory_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<InventoryPath>,
) -> ApiResult<Json<InventoryResponse>> {
    let inventory = state
        .inventory_service
        .get(&context, path.inventory_id.parse::<InventoryId>()?)
        .await?;

    Ok(Json(InventoryResponse::from(inventory)))
}

pub async fn create_inventory_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Json(payload): Json<SaveInventoryRequest>,
) -> ApiResult<(StatusCode, Json<InventoryResponse>)> {
    let inventory = state
        .inventory_service
        .create(&context, SaveInventoryInput::try_from(payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(InventoryResponse::from(inventory))))
}

pub async fn update_inventory_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<InventoryPath>,
    Json(payload): Json<SaveInventoryRequest>,
) -> ApiResult<Json<InventoryResponse>> {
    let inventory = state
        .inventory_service
        .update(
            &context,
            path.inventory_id.parse::<InventoryId>()?,
            SaveInventoryInput::try_from(payload)?,
        )
        .await?;

    Ok(Json(InventoryResponse::from(inventory)))
}

pub async fn delete_inventory_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<InventoryPath>,
) -> ApiResult<StatusCode> {
    state
        .inventory_service
        .delete(&context, path.inventory_id.parse::<InventoryId>()?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
