use dealerdesk_application::{FinancingFilter, FinancingRecord, SaveFinancingInput};
use dealerdesk_core::{AppError, SaleId};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{format_date, parse_date, parse_id};

/// Incoming payload for financing creation and replacement.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/save-financing-request.ts"
)]
pub struct SaveFinancingRequest {
    pub sale_id: String,
    /// Defaults to the client of the sale.
    #[serde(default)]
    pub client_id: Option<String>,
    pub total_amount: f64,
    #[serde(default)]
    pub down_payment: Option<f64>,
    pub installments: i32,
    /// Computed from the interest rate when absent.
    #[serde(default)]
    pub installment_amount: Option<f64>,
    /// Monthly rate in percent.
    #[serde(default)]
    pub interest_rate: Option<f64>,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub starts_on: Option<String>,
    #[serde(default)]
    pub institution: Option<String>,
}

impl TryFrom<SaveFinancingRequest> for SaveFinancingInput {
    type Error = AppError;

    fn try_from(value: SaveFinancingRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            sale_id: value.sale_id.parse::<SaleId>()?,
            client_id: parse_id(value.client_id)?,
            total_amount: value.total_amount,
            down_payment: value.down_payment,
            installments: value.installments,
            installment_amount: value.installment_amount,
            interest_rate: value.interest_rate,
            starts_on: parse_date("start date", value.starts_on)?,
            institution: value.institution,
        })
    }
}

/// Optional filters for the financing list.
#[derive(Debug, Default, Deserialize)]
pub struct FinancingListQuery {
    pub client_id: Option<String>,
    pub sale_id: Option<String>,
}

impl TryFrom<FinancingListQuery> for FinancingFilter {
    type Error = AppError;

    fn try_from(value: FinancingListQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            client_id: parse_id(value.client_id)?,
            sale_id: parse_id(value.sale_id)?,
        })
    }
}

/// API representation of a financing.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/financing-response.ts"
)]
pub struct FinancingResponse {
    pub id: String,
    pub sale_id: String,
    pub client_id: String,
    pub total_amount: f64,
    pub down_payment: Option<f64>,
    pub installments: i32,
    pub installment_amount: f64,
    pub interest_rate: Option<f64>,
    pub starts_on: Option<String>,
    pub institution: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<FinancingRecord> for FinancingResponse {
    fn from(value: FinancingRecord) -> Self {
        Self {
            id: value.id.to_string(),
            sale_id: value.sale_id.to_string(),
            client_id: value.client_id.to_string(),
            total_amount: value.total_amount,
            down_payment: value.down_payment,
            installments: value.installments,
            installment_amount: value.installment_amount,
            interest_rate: value.interest_rate,
            starts_on: format_date(value.starts_on),
            institution: value.institution,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}
