use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use dealerdesk_application::LoginInput;
use dealerdesk_core::{AppError, Principal};

use crate::dto::{
    BootstrapRequest, BootstrapResponse, LoginRequest, LoginResponse, ProfileResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let session = state
        .auth_service
        .login(LoginInput::try_from(payload)?)
        .await?;

    tracing::info!(user_id = %session.user.id, tenant_id = %session.user.tenant_id, "user logged in");
    Ok(Json(LoginResponse::from(session)))
}

pub async fn bootstrap_handler(
    State(state): State<AppState>,
    Json(payload): Json<BootstrapRequest>,
) -> ApiResult<(StatusCode, Json<BootstrapResponse>)> {
    let Some(expected) = state.bootstrap_token.as_deref() else {
        return Err(AppError::Forbidden("bootstrap is disabled".to_owned()).into());
    };

    if payload.token != expected {
        return Err(AppError::Unauthorized("invalid bootstrap token".to_owned()).into());
    }

    let (tenant, administrator) = state.auth_service.bootstrap(payload.into()).await?;
    tracing::info!(
        tenant_id = %tenant.id,
        user_id = %administrator.id,
        "bootstrap created the first tenant"
    );

    Ok((
        StatusCode::CREATED,
        Json(BootstrapResponse::from((tenant, administrator))),
    ))
}

pub async fn me_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Json<ProfileResponse>> {
    let profile = state.auth_service.profile(principal.user_id()).await?;

    Ok(Json(ProfileResponse::from(profile)))
}
