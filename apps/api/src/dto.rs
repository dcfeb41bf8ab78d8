use std::str::FromStr;

use chrono::NaiveDate;
use dealerdesk_core::{AppError, AppResult};
use serde::Serialize;
use ts_rs::TS;

mod auth;
mod bank_accounts;
mod clients;
mod contracts;
mod financings;
mod inventories;
mod maintenances;
mod payments;
mod permissions;
mod receipts;
mod sales;
mod tenants;
mod users;
mod vehicles;

pub use auth::{
    BootstrapRequest, BootstrapResponse, LoginRequest, LoginResponse, ProfileResponse,
};
pub use bank_accounts::{BankAccountListQuery, BankAccountResponse, SaveBankAccountRequest};
pub use clients::{ClientListQuery, ClientResponse, SaveClientRequest};
pub use contracts::{ContractListQuery, ContractResponse, SaveContractRequest};
pub use financings::{FinancingListQuery, FinancingResponse, SaveFinancingRequest};
pub use inventories::{InventoryResponse, SaveInventoryRequest};
pub use maintenances::{MaintenanceListQuery, MaintenanceResponse, SaveMaintenanceRequest};
pub use payments::{PaymentListQuery, PaymentResponse, SavePaymentRequest};
pub use receipts::{ReceiptListQuery, ReceiptResponse, SaveReceiptRequest};
pub use sales::{SaleListQuery, SaleResponse, SaveSaleRequest};
pub use permissions::{PermissionGrantResponse, SavePermissionGrantRequest};
pub use tenants::{SaveTenantRequest, TenantResponse};
pub use users::{SaveUserRequest, UserListQuery, UserResponse};
pub use vehicles::{SaveVehicleRequest, VehicleListQuery, VehicleResponse};

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses an optional `YYYY-MM-DD` value; blank counts as absent.
fn parse_date(field: &str, value: Option<String>) -> AppResult<Option<NaiveDate>> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .map(|value| {
            NaiveDate::parse_from_str(&value, DATE_FORMAT).map_err(|_| {
                AppError::Validation(format!("{field} must be a date formatted as YYYY-MM-DD"))
            })
        })
        .transpose()
}

/// Parses an optional identifier; blank counts as absent.
fn parse_id<T>(value: Option<String>) -> AppResult<Option<T>>
where
    T: FromStr<Err = AppError>,
{
    value
        .filter(|value| !value.trim().is_empty())
        .map(|value| value.parse::<T>())
        .transpose()
}

fn format_date(value: Option<NaiveDate>) -> Option<String> {
    value.map(|date| date.format(DATE_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use dealerdesk_core::{AppError, SaleId};

    use super::{format_date, parse_date, parse_id};

    #[test]
    fn dates_use_iso_calendar_format() {
        let parsed = parse_date("birth date", Some("1990-04-12".to_owned()))
            .unwrap_or_else(|error| panic!("parse failed: {error}"));

        assert_eq!(parsed, NaiveDate::from_ymd_opt(1990, 4, 12));
        assert_eq!(format_date(parsed).as_deref(), Some("1990-04-12"));
    }

    #[test]
    fn blank_date_is_absent_and_garbage_is_rejected() {
        assert!(matches!(parse_date("birth date", Some("  ".to_owned())), Ok(None)));
        assert!(matches!(
            parse_date("birth date", Some("12/04/1990".to_owned())),
            Err(AppError::Validation(message)) if message.starts_with("birth date")
        ));
    }

    #[test]
    fn optional_ids_skip_blanks_and_reject_garbage() {
        assert!(matches!(parse_id::<SaleId>(None), Ok(None)));
        assert!(matches!(parse_id::<SaleId>(Some(" ".to_owned())), Ok(None)));
        assert!(matches!(
            parse_id::<SaleId>(Some("not-a-uuid".to_owned())),
            Err(AppError::Validation(message)) if message.starts_with("invalid sale id")
        ));

        let id = SaleId::new();
        assert!(matches!(parse_id::<SaleId>(Some(id.to_string())), Ok(Some(parsed)) if parsed == id));
    }
}
