use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use dealerdesk_application::AccessContext;
use dealerdesk_core::UserId;
use dealerdesk_domain::ResourceType;
use serde::Deserialize;

use crate::dto::{PermissionGrantResponse, SavePermissionGrantRequest};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GrantsPath {
    user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct GrantPath {
    user_id: String,
    resource_type: String,
}

pub async fn list_permissions_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<GrantsPath>,
) -> ApiResult<Json<Vec<PermissionGrantResponse>>> {
    let grants = state
        .permission_grant_service
        .list(&context, path.user_id.parse::<UserId>()?)
        .await?
        .into_iter()
        .map(PermissionGrantResponse::from)
        .collect();

    Ok(Json(grants))
}

pub async fn save_permission_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<GrantPath>,
    Json(payload): Json<SavePermissionGrantRequest>,
) -> ApiResult<Json<PermissionGrantResponse>> {
    let grant = state
        .permission_grant_service
        .save(
            &context,
            path.user_id.parse::<UserId>()?,
            path.resource_type.parse::<ResourceType>()?,
            payload.into(),
        )
        .await?;

    Ok(Json(PermissionGrantResponse::from(grant)))
}

pub async fn delete_permission_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<GrantPath>,
) -> ApiResult<StatusCode> {
    state
        .permission_grant_service
        .delete(
            &context,
            path.user_id.parse::<UserId>()?,
            path.resource_type.parse::<ResourceType>()?,
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
