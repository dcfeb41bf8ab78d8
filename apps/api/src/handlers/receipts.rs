use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use dealerdesk_application::{AccessContext, ReceiptFilter, SaveReceiptInput};
use dealerdesk_core::ReceiptId;
use serde::Deserialize;

use crate::dto::{ReceiptListQuery, ReceiptResponse, SaveReceiptRequest};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReceiptPath {
    receipt_id: String,
}

pub async fn list_receipts_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Query(query): Query<ReceiptListQuery>,
) -> ApiResult<Json<Vec<ReceiptResponse>>> {
    let receipts = state
        .receipt_service
        .list(&context, ReceiptFilter::try_from(query)?)
        .await?
        .into_iter()
        .map(ReceiptResponse::from)
        .collect();

    Ok(Json(receipts))
}

pub async fn receipt_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<ReceiptPath>,
) -> ApiResult<Json<ReceiptResponse>> {
    let receipt = state
        .receipt_service
        .get(&context, path.receipt_id.parse::<ReceiptId>()?)
        .await?;

    Ok(Json(ReceiptResponse::from(receipt)))
}

pub async fn create_receipt_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Json(payload): Json<SaveReceiptRequest>,
) -> ApiResult<(StatusCode, Json<ReceiptResponse>)> {
    let receipt = state
        .receipt_service
        .create(&context, SaveReceiptInput::try_from(payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(ReceiptResponse::from(receipt))))
}

pub async fn update_receipt_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<ReceiptPath>,
    Json(payload): Json<SaveReceiptRequest>,
) -> ApiResult<Json<ReceiptResponse>> {
    let receipt = state
        .receipt_service
        .update(
            &context,
            path.receipt_id.parse::<ReceiptId>()?,
            SaveReceiptInput::try_from(payload)?,
        )
        .await?;

    Ok(Json(ReceiptResponse::from(receipt)))
}

pub async fn delete_receipt_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<ReceiptPath>,
) -> ApiResult<StatusCode> {
    state
        .receipt_service
        .delete(&context, path.receipt_id.parse::<ReceiptId>()?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
