use dealerdesk_application::{ClientRecord, SaveClientInput};
use dealerdesk_core::AppError;
use dealerdesk_domain::PostalAddress;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{format_date, parse_date};

/// Postal address of a client.
#[derive(Debug, Default, Serialize, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/postal-address-payload.ts"
)]
pub struct PostalAddressPayload {
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

impl From<PostalAddressPayload> for PostalAddress {
    fn from(value: PostalAddressPayload) -> Self {
        Self {
            postal_code: value.postal_code,
            street: value.street,
            number: value.number,
            district: value.district,
            city: value.city,
            state: value.state,
        }
    }
}

impl From<PostalAddress> for PostalAddressPayload {
    fn from(value: PostalAddress) -> Self {
        Self {
            postal_code: value.postal_code,
            street: value.street,
            number: value.number,
            district: value.district,
            city: value.city,
            state: value.state,
        }
    }
}

/// Incoming payload for client creation and replacement.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/save-client-request.ts"
)]
pub struct SaveClientRequest {
    pub name: String,
    pub tax_id: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub secondary_phone: Option<String>,
    #[serde(default)]
    pub identity_document: Option<String>,
    #[serde(default)]
    pub client_type: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub marital_status: Option<String>,
    #[serde(default)]
    pub address: PostalAddressPayload,
}

impl TryFrom<SaveClientRequest> for SaveClientInput {
    type Error = AppError;

    fn try_from(value: SaveClientRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            birth_date: parse_date("birth date", value.birth_date)?,
            name: value.name,
            tax_id: value.tax_id,
            email: value.email,
            phone: value.phone,
            secondary_phone: value.secondary_phone,
            identity_document: value.identity_document,
            client_type: value.client_type,
            group: value.group,
            gender: value.gender,
            marital_status: value.marital_status,
            address: value.address.into(),
        })
    }
}

/// Optional filters for the client list.
#[derive(Debug, Default, Deserialize)]
pub struct ClientListQuery {
    pub name: Option<String>,
}

/// API representation of a client.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/client-response.ts"
)]
pub struct ClientResponse {
    pub id: String,
    pub name: String,
    pub tax_id: String,
    pub email: String,
    pub phone: Option<String>,
    pub secondary_phone: Option<String>,
    pub identity_document: Option<String>,
    pub client_type: Option<String>,
    pub group: Option<String>,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub marital_status: Option<String>,
    pub address: PostalAddressPayload,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ClientRecord> for ClientResponse {
    fn from(value: ClientRecord) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            tax_id: value.tax_id.into(),
            email: value.email.into(),
            phone: value.phone,
            secondary_phone: value.secondary_phone,
            identity_document: value.identity_document,
            client_type: value.client_type,
            group: value.group,
            birth_date: format_date(value.birth_date),
            gender: value.gender,
            marital_status: value.marital_status,
            address: value.address.into(),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}
