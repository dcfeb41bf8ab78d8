use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use dealerdesk_application::{AccessContext, SaleFilter, SaveSaleInput};
use dealerdesk_core::SaleId;
use serde::Deserialize;

use crate::dto::{SaleListQuery, SaleResponse, SaveSaleRequest};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SalePath {
    sale_id: String,
}

pub async fn list_sales_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Query(query): Query<SaleListQuery>,
) -> ApiResult<Json<Vec<SaleResponse>>> {
    let sales = state
        .sale_service
        .list(&context, SaleFilter::try_from(query)?)
        .await?
        .into_iter()
        .map(SaleResponse::from)
        .collect();

    Ok(Json(sales))
}

pub async fn sale_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<SalePath>,
) -> ApiResult<Json<SaleResponse>> {
    let sale = state
        .sale_service
        .get(&context, path.sale_id.parse::<SaleId>()?)
        .await?;

    Ok(Json(SaleResponse::from(sale)))
}

pub async fn create_sale_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Json(payload): Json<SaveSaleRequest>,
) -> ApiResult<(StatusCode, Json<SaleResponse>)> {
    let sale = state
        .sale_service
        .create(&context, SaveSaleInput::try_from(payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(SaleResponse::from(sale))))
}

pub async fn update_sale_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<SalePath>,
    Json(payload): Json<SaveSaleRequest>,
) -> ApiResult<Json<SaleResponse>> {
    let sale = state
        .sale_service
        .update(
            &context,
            path.sale_id.parse::<SaleId>()?,
            SaveSaleInput::try_from(payload)?,
        )
        .await?;

    Ok(Json(SaleResponse::from(sale)))
}

pub async fn delete_sale_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<SalePath>,
) -> ApiResult<StatusCode> {
    state
        .sale_service
        .delete(&context, path.sale_id.parse::<SaleId>()?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
