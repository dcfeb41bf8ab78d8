use dealerdesk_application::{ReceiptFilter, ReceiptRecord, SaveReceiptInput};
use dealerdesk_core::AppError;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{format_date, parse_date, parse_id};

/// Incoming payload for receipt creation and replacement.
///
/// At least one of `sale_id` and `contract_id` is required.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/save-receipt-request.ts"
)]
pub struct SaveReceiptRequest {
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub received_on: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub credited_account_id: Option<String>,
    #[serde(default)]
    pub sale_id: Option<String>,
    #[serde(default)]
    pub contract_id: Option<String>,
    /// Defaults to the client of the sale.
    #[serde(default)]
    pub client_id: Option<String>,
}

impl TryFrom<SaveReceiptRequest> for SaveReceiptInput {
    type Error = AppError;

    fn try_from(value: SaveReceiptRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            received_on: parse_date("receipt date", value.received_on)?,
            amount: value.amount,
            method: value.method,
            credited_account_id: parse_id(value.credited_account_id)?,
            sale_id: parse_id(value.sale_id)?,
            contract_id: parse_id(value.contract_id)?,
            client_id: parse_id(value.client_id)?,
        })
    }
}

/// Optional filters for the receipt list.
#[derive(Debug, Default, Deserialize)]
pub struct ReceiptListQuery {
    pub sale_id: Option<String>,
    pub contract_id: Option<String>,
    pub client_id: Option<String>,
}

impl TryFrom<ReceiptListQuery> for ReceiptFilter {
    type Error = AppError;

    fn try_from(value: ReceiptListQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            sale_id: parse_id(value.sale_id)?,
            contract_id: parse_id(value.contract_id)?,
            client_id: parse_id(value.client_id)?,
        })
    }
}

/// API representation of a receipt.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/receipt-response.ts"
)]
pub struct ReceiptResponse {
    pub id: String,
    pub received_on: Option<String>,
    pub amount: f64,
    pub method: Option<String>,
    pub credited_account_id: Option<String>,
    pub sale_id: Option<String>,
    pub contract_id: Option<String>,
    pub client_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ReceiptRecord> for ReceiptResponse {
    fn from(value: ReceiptRecord) -> Self {
        Self {
            id: value.id.to_string(),
            received_on: format_date(value.received_on),
            amount: value.amount,
            method: value.method,
            credited_account_id: value.credited_account_id.map(|id| id.to_string()),
            sale_id: value.sale_id.map(|id| id.to_string()),
            contract_id: value.contract_id.map(|id| id.to_string()),
            client_id: value.client_id.map(|id| id.to_string()),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}
