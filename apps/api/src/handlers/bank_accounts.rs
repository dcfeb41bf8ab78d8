use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use dealerdesk_application::{AccessContext, BankAccountFilter, SaveBankAccountInput};
use dealerdesk_core::BankAccountId;
use serde::Deserialize;

use crate::dto::{BankAccountListQuery, BankAccountResponse, SaveBankAccountRequest};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BankAccountPath {
    bank_account_id: String,
}

pub async fn list_bank_accounts_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Query(query): Query<BankAccountListQuery>,
) -> ApiResult<Json<Vec<BankAccountResponse>>> {
    let accounts = state
        .bank_account_service
        .list(&context, BankAccountFilter::from(query))
        .await?
        .into_iter()
        .map(BankAccountResponse::from)
        .collect();

    Ok(Json(accounts))
}

pub async fn bank_account_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<BankAccountPath>,
) -> ApiResult<Json<BankAccountResponse>> {
    let account = state
        .bank_account_service
        .get(&context, path.bank_account_id.parse::<BankAccountId>()?)
        .await?;

    Ok(Json(BankAccountResponse::from(account)))
}

pub async fn create_bank_account_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Json(payload): Json<SaveBankAccountRequest>,
) -> ApiResult<(StatusCode, Json<BankAccountResponse>)> {
    let account = state
        .bank_account_service
        .create(&context, SaveBankAccountInput::try_from(payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(BankAccountResponse::from(account))))
}

pub async fn update_bank_account_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<BankAccountPath>,
    Json(payload): Json<SaveBankAccountRequest>,
) -> ApiResult<Json<BankAccountResponse>> {
    let account = state
        .bank_account_service
        .update(
            &context,
            path.bank_account_id.parse::<BankAccountId>()?,
            SaveBankAccountInput::try_from(payload)?,
        )
        .await?;

    Ok(Json(BankAccountResponse::from(account)))
}

pub async fn delete_bank_account_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<BankAccountPath>,
) -> ApiResult<StatusCode> {
    state
        .bank_account_service
        .delete(&context, path.bank_account_id.parse::<BankAccountId>()?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
