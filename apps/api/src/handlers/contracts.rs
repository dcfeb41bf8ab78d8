use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use dealerdesk_application::{AccessContext, ContractFilter, SaveContractInput};
use dealerdesk_core::ContractId;
use serde::Deserialize;

use crate::dto::{ContractListQuery, ContractResponse, SaveContractRequest};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ContractPath {
    contract_id: String,
}

pub async fn list_contracts_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Query(query): Query<ContractListQuery>,
) -> ApiResult<Json<Vec<ContractResponse>>> {
    let contracts = state
        .contract_service
        .list(&context, ContractFilter::try_from(query)?)
        .await?
        .into_iter()
        .map(ContractResponse::from)
        .collect();

    Ok(Json(contracts))
}

pub async fn contract_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<ContractPath>,
) -> ApiResult<Json<ContractResponse>> {
    let contract = state
        .contract_service
        .get(&context, path.contract_id.parse::<ContractId>()?)
        .await?;

    Ok(Json(ContractResponse::from(contract)))
}

pub async fn create_contract_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Json(payload): Json<SaveContractRequest>,
) -> ApiResult<(StatusCode, Json<ContractResponse>)> {
    let contract = state
        .contract_service
        .create(&context, SaveContractInput::try_from(payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(ContractResponse::from(contract))))
}

pub async fn update_contract_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<ContractPath>,
    Json(payload): Json<SaveContractRequest>,
) -> ApiResult<Json<ContractResponse>> {
    let contract = state
        .contract_service
        .update(
            &context,
            path.contract_id.parse::<ContractId>()?,
            SaveContractInput::try_from(payload)?,
        )
        .await?;

    Ok(Json(ContractResponse::from(contract)))
}

pub async fn delete_contract_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<ContractPath>,
) -> ApiResult<StatusCode> {
    state
        .contract_service
        .delete(&context, path.contract_id.parse::<ContractId>()?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
