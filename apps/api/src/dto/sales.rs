use dealerdesk_application::{SaleFilter, SaleRecord, SaveSaleInput};
use dealerdesk_core::{AppError, ClientId, VehicleId};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{DATE_FORMAT, parse_date, parse_id};

/// Incoming payload for sale creation and replacement.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/save-sale-request.ts"
)]
pub struct SaveSaleRequest {
    pub client_id: String,
    /// Defaults to the caller.
    #[serde(default)]
    pub seller_id: Option<String>,
    pub vehicle_id: String,
    /// `YYYY-MM-DD`; defaults to today.
    #[serde(default)]
    pub sold_on: Option<String>,
    pub sale_price: f64,
    #[serde(default)]
    pub minimum_margin: Option<f64>,
    #[serde(default)]
    pub discount: Option<f64>,
    #[serde(default)]
    pub payment_method: Option<String>,
}

impl TryFrom<SaveSaleRequest> for SaveSaleInput {
    type Error = AppError;

    fn try_from(value: SaveSaleRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            client_id: value.client_id.parse::<ClientId>()?,
            seller_id: parse_id(value.seller_id)?,
            vehicle_id: value.vehicle_id.parse::<VehicleId>()?,
            sold_on: parse_date("sale date", value.sold_on)?,
            sale_price: value.sale_price,
            minimum_margin: value.minimum_margin,
            discount: value.discount,
            payment_method: value.payment_method,
        })
    }
}

/// Optional filters for the sale list.
#[derive(Debug, Default, Deserialize)]
pub struct SaleListQuery {
    pub client_id: Option<String>,
    pub vehicle_id: Option<String>,
    /// Inclusive lower bound, `YYYY-MM-DD`.
    pub sold_from: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`.
    pub sold_to: Option<String>,
}

impl TryFrom<SaleListQuery> for SaleFilter {
    type Error = AppError;

    fn try_from(value: SaleListQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            client_id: parse_id(value.client_id)?,
            vehicle_id: parse_id(value.vehicle_id)?,
            sold_from: parse_date("sold_from", value.sold_from)?,
            sold_to: parse_date("sold_to", value.sold_to)?,
        })
    }
}

/// API representation of a sale.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/sale-response.ts"
)]
pub struct SaleResponse {
    pub id: String,
    pub client_id: String,
    pub seller_id: String,
    pub vehicle_id: String,
    pub sold_on: String,
    pub sale_price: f64,
    pub minimum_margin: Option<f64>,
    pub discount: Option<f64>,
    /// Price after discount.
    pub net_price: f64,
    pub payment_method: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<SaleRecord> for SaleResponse {
    fn from(value: SaleRecord) -> Self {
        Self {
            net_price: value.net_price(),
            id: value.id.to_string(),
            client_id: value.client_id.to_string(),
            seller_id: value.seller_id.to_string(),
            vehicle_id: value.vehicle_id.to_string(),
            sold_on: value.sold_on.format(DATE_FORMAT).to_string(),
            sale_price: value.sale_price,
            minimum_margin: value.minimum_margin,
            discount: value.discount,
            payment_method: value.payment_method,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}
