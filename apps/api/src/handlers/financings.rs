use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use dealerdesk_application::{AccessContext, FinancingFilter, SaveFinancingInput};
use dealerdesk_core::FinancingId;
use serde::Deserialize;

use crate::dto::{FinancingListQuery, FinancingResponse, SaveFinancingRequest};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FinancingPath {
    financing_id: String,
}

pub async fn list_financings_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Query(query): Query<FinancingListQuery>,
) -> ApiResult<Json<Vec<FinancingResponse>>> {
    let financings = state
        .financing_service
        .list(&context, FinancingFilter::try_from(query)?)
        .await?
        .into_iter()
        .map(FinancingResponse::from)
        .collect();

    Ok(Json(financings))
}

pub async fn financing_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<FinancingPath>,
) -> ApiResult<Json<FinancingResponse>> {
    let financing = state
        .financing_service
        .get(&context, path.financing_id.parse::<FinancingId>()?)
        .await?;

    Ok(Json(FinancingResponse::from(financing)))
}

pub async fn create_financing_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Json(payload): Json<SaveFinancingRequest>,
) -> ApiResult<(StatusCode, Json<FinancingResponse>)> {
    let financing = state
        .financing_service
        .create(&context, SaveFinancingInput::try_from(payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(FinancingResponse::from(financing))))
}

pub async fn update_financing_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<FinancingPath>,
    Json(payload): Json<SaveFinancingRequest>,
) -> ApiResult<Json<FinancingResponse>> {
    let financing = state
        .financing_service
        .update(
            &context,
            path.financing_id.parse::<FinancingId>()?,
            SaveFinancingInput::try_from(payload)?,
        )
        .await?;

    Ok(Json(FinancingResponse::from(financing)))
}

pub async fn delete_financing_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<FinancingPath>,
) -> ApiResult<StatusCode> {
    state
        .financing_service
        .delete(&context, path.financing_id.parse::<FinancingId>()?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
