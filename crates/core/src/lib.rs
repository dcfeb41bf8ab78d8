//! Shared primitives for all Rust crates in DealerDesk.

#![forbid(unsafe_code)]

/// Authentication primitives shared across services.
pub mod auth;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use auth::Principal;

/// Result type used across DealerDesk crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string. Surrounding whitespace is trimmed.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID value.
            #[must_use]
            pub fn from_uuid(value: Uuid) -> Self {
                Self(value)
            }

            /// Returns the underlying UUID value.
            #[must_use]
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl Display for $name {
            fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
                write!(formatter, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(value.trim())
                    .map(Self)
                    .map_err(|error| {
                        AppError::Validation(format!("invalid {} '{value}': {error}", $label))
                    })
            }
        }
    };
}

uuid_identifier!(
    /// Tenant identifier used as the partition key for every persisted record.
    TenantId,
    "tenant id"
);

uuid_identifier!(
    /// Unique identifier for a user account.
    UserId,
    "user id"
);

uuid_identifier!(
    /// Unique identifier for a dealership client.
    ClientId,
    "client id"
);

uuid_identifier!(
    /// Unique identifier for an inventory (stock location).
    InventoryId,
    "inventory id"
);

uuid_identifier!(
    /// Unique identifier for a vehicle.
    VehicleId,
    "vehicle id"
);

uuid_identifier!(
    /// Unique identifier for a tenant bank account.
    BankAccountId,
    "bank account id"
);

uuid_identifier!(
    /// Unique identifier for a vehicle sale.
    SaleId,
    "sale id"
);

uuid_identifier!(
    /// Unique identifier for a sale financing plan.
    FinancingId,
    "financing id"
);

uuid_identifier!(
    /// Unique identifier for a vehicle rental contract.
    ContractId,
    "contract id"
);

uuid_identifier!(
    /// Unique identifier for a vehicle maintenance entry.
    MaintenanceId,
    "maintenance id"
);

uuid_identifier!(
    /// Unique identifier for an outgoing payment.
    PaymentId,
    "payment id"
);

uuid_identifier!(
    /// Unique identifier for an incoming receipt.
    ReceiptId,
    "receipt id"
);

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Caller did not present a usable credential.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Caller presented a credential that failed verification.
    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    /// Caller is authenticated but blocked by authorization policy.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}
