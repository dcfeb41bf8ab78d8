use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use dealerdesk_application::{AccessContext, PaymentFilter, SavePaymentInput};
use dealerdesk_core::PaymentId;
use serde::Deserialize;

use crate::dto::{PaymentListQuery, PaymentResponse, SavePaymentRequest};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PaymentPath {
    payment_id: String,
}

pub async fn list_payments_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Query(query): Query<PaymentListQuery>,
) -> ApiResult<Json<Vec<PaymentResponse>>> {
    let payments = state
        .payment_service
        .list(&context, PaymentFilter::try_from(query)?)
        .await?
        .into_iter()
        .map(PaymentResponse::from)
        .collect();

    Ok(Json(payments))
}

pub async fn payment_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<PaymentPath>,
) -> ApiResult<Json<PaymentResponse>> {
    let payment = state
        .payment_service
        .get(&context, path.payment_id.parse::<PaymentId>()?)
        .await?;

    Ok(Json(PaymentResponse::from(payment)))
}

pub async fn create_payment_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Json(payload): Json<SavePaymentRequest>,
) -> ApiResult<(StatusCode, Json<PaymentResponse>)> {
    let payment = state
        .payment_service
        .create(&context, SavePaymentInput::try_from(payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(PaymentResponse::from(payment))))
}

pub async fn update_payment_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<PaymentPath>,
    Json(payload): Json<SavePaymentRequest>,
) -> ApiResult<Json<PaymentResponse>> {
    let payment = state
        .payment_service
        .update(
            &context,
            path.payment_id.parse::<PaymentId>()?,
            SavePaymentInput::try_from(payload)?,
        )
        .await?;

    Ok(Json(PaymentResponse::from(payment)))
}

pub async fn delete_payment_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<PaymentPath>,
) -> ApiResult<StatusCode> {
    state
        .payment_service
        .delete(&context, path.payment_id.parse::<PaymentId>()?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
