use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use dealerdesk_application::{AccessContext, SaveClientInput};
use dealerdesk_core::ClientId;
use serde::Deserialize;

use crate::dto::{ClientListQuery, ClientResponse, SaveClientRequest};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ClientPath {
    client_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ClientTaxIdPath {
    tax_id: String,
}

pub async fn list_clients_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Query(query): Query<ClientListQuery>,
) -> ApiResult<Json<Vec<ClientResponse>>> {
    let clients = state
        .client_service
        .list(&context, query.name.as_deref())
        .await?
        .into_iter()
        .map(ClientResponse::from)
        .collect();

    Ok(Json(clients))
}

pub async fn client_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<ClientPath>,
) -> ApiResult<Json<ClientResponse>> {
    let client = state
        .client_service
        .get(&context, path.client_id.parse::<ClientId>()?)
        .await?;

    Ok(Json(ClientResponse::from(client)))
}

pub async fn client_by_tax_id_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<ClientTaxIdPath>,
) -> ApiResult<Json<ClientResponse>> {
    let client = state
        .client_service
        .find_by_tax_id(&context, &path.tax_id)
        .await?;

    Ok(Json(ClientResponse::from(client)))
}

pub async fn create_client_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Json(payload): Json<SaveClientRequest>,
) -> ApiResult<(StatusCode, Json<ClientResponse>)> {
    let client = state
        .client_service
        .create(&context, SaveClientInput::try_from(payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(ClientResponse::from(client))))
}

pub async fn update_client_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<ClientPath>,
    Json(payload): Json<SaveClientRequest>,
) -> ApiResult<Json<ClientResponse>> {
    let client = state
        .client_service
        .update(
            &context,
            path.client_id.parse::<ClientId>()?,
            SaveClientInput::try_from(payload)?,
        )
        .await?;

    Ok(Json(ClientResponse::from(client)))
}

pub async fn delete_client_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<ClientPath>,
) -> ApiResult<StatusCode> {
    state
        .client_service
        .delete(&context, path.client_id.parse::<ClientId>()?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
