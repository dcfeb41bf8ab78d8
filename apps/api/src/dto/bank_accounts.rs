use dealerdesk_application::{BankAccountFilter, BankAccountRecord, SaveBankAccountInput};
use dealerdesk_core::AppError;
use dealerdesk_domain::TaxId;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{format_date, parse_date};

/// Incoming payload for bank account creation and replacement.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/save-bank-account-request.ts"
)]
pub struct SaveBankAccountRequest {
    pub bank_code: String,
    pub account_number: String,
    #[serde(default)]
    pub account_digit: Option<String>,
    #[serde(default)]
    pub branch_number: Option<String>,
    #[serde(default)]
    pub branch_digit: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub holder_name: Option<String>,
    #[serde(default)]
    pub holder_tax_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub opened_on: Option<String>,
}

impl TryFrom<SaveBankAccountRequest> for SaveBankAccountInput {
    type Error = AppError;

    fn try_from(value: SaveBankAccountRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            opened_on: parse_date("opening date", value.opened_on)?,
            bank_code: value.bank_code,
            account_number: value.account_number,
            account_digit: value.account_digit,
            branch_number: value.branch_number,
            branch_digit: value.branch_digit,
            bank_name: value.bank_name,
            account_type: value.account_type,
            holder_name: value.holder_name,
            holder_tax_id: value.holder_tax_id,
            status: value.status,
        })
    }
}

/// Optional filters for the bank account list.
#[derive(Debug, Default, Deserialize)]
pub struct BankAccountListQuery {
    /// Case-insensitive fragment of the bank name.
    pub bank_name: Option<String>,
}

impl From<BankAccountListQuery> for BankAccountFilter {
    fn from(value: BankAccountListQuery) -> Self {
        Self {
            bank_name: value.bank_name.filter(|name| !name.trim().is_empty()),
        }
    }
}

/// API representation of a bank account.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/bank-account-response.ts"
)]
pub struct BankAccountResponse {
    pub id: String,
    pub bank_code: String,
    pub account_number: String,
    pub account_digit: Option<String>,
    pub branch_number: Option<String>,
    pub branch_digit: Option<String>,
    pub bank_name: Option<String>,
    pub account_type: Option<String>,
    pub holder_name: Option<String>,
    pub holder_tax_id: Option<String>,
    pub status: Option<String>,
    pub opened_on: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<BankAccountRecord> for BankAccountResponse {
    fn from(value: BankAccountRecord) -> Self {
        Self {
            id: value.id.to_string(),
            bank_code: value.bank_code,
            account_number: value.account_number,
            account_digit: value.account_digit,
            branch_number: value.branch_number,
            branch_digit: value.branch_digit,
            bank_name: value.bank_name,
            account_type: value.account_type,
            holder_name: value.holder_name,
            holder_tax_id: value.holder_tax_id.as_ref().map(TaxId::as_str).map(str::to_owned),
            status: value.status,
            opened_on: format_date(value.opened_on),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}
