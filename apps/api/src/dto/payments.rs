use dealerdesk_application::{PaymentFilter, PaymentRecord, SavePaymentInput};
use dealerdesk_core::AppError;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{format_date, parse_date, parse_id};

/// Incoming payload for payment creation and replacement.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/save-payment-request.ts"
)]
pub struct SavePaymentRequest {
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub paid_on: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub debited_account_id: Option<String>,
}

impl TryFrom<SavePaymentRequest> for SavePaymentInput {
    type Error = AppError;

    fn try_from(value: SavePaymentRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            paid_on: parse_date("payment date", value.paid_on)?,
            amount: value.amount,
            method: value.method,
            debited_account_id: parse_id(value.debited_account_id)?,
        })
    }
}

/// Optional filters for the payment list.
#[derive(Debug, Default, Deserialize)]
pub struct PaymentListQuery {
    pub debited_account_id: Option<String>,
}

impl TryFrom<PaymentListQuery> for PaymentFilter {
    type Error = AppError;

    fn try_from(value: PaymentListQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            debited_account_id: parse_id(value.debited_account_id)?,
        })
    }
}

/// API representation of a payment.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/payment-response.ts"
)]
pub struct PaymentResponse {
    pub id: String,
    pub paid_on: Option<String>,
    pub amount: f64,
    pub method: Option<String>,
    pub debited_account_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PaymentRecord> for PaymentResponse {
    fn from(value: PaymentRecord) -> Self {
        Self {
            id: value.id.to_string(),
            paid_on: format_date(value.paid_on),
            amount: value.amount,
            method: value.method,
            debited_account_id: value.debited_account_id.map(|id| id.to_string()),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}
