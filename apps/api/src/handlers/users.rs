use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use dealerdesk_application::AccessContext;
use dealerdesk_core::UserId;
use serde::Deserialize;

use crate::dto::{SaveUserRequest, UserListQuery, UserResponse};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserPath {
    user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct TaxIdPath {
    tax_id: String,
}

#[derive(Debug, Deserialize)]
pub struct EmailPath {
    email: String,
}

pub async fn list_users_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Query(query): Query<UserListQuery>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state
        .user_service
        .list(&context, query.name.as_deref())
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(Json(users))
}

pub async fn user_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<UserPath>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .user_service
        .get(&context, path.user_id.parse::<UserId>()?)
        .await?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn user_by_tax_id_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<TaxIdPath>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .user_service
        .find_by_tax_id(&context, &path.tax_id)
        .await?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn user_by_email_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<EmailPath>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .user_service
        .find_by_email(&context, &path.email)
        .await?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn create_user_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Json(payload): Json<SaveUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .user_service
        .create(&context, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

pub async fn update_user_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<UserPath>,
    Json(payload): Json<SaveUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .user_service
        .update(&context, path.user_id.parse::<UserId>()?, payload.into())
        .await?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn delete_user_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<UserPath>,
) -> ApiResult<StatusCode> {
    state
        .user_service
        .delete(&context, path.user_id.parse::<UserId>()?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
