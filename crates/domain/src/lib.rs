//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod address;
mod security;
mod tax_id;
mod tenant;
mod user;
mod vehicle;

pub use address::PostalAddress;
pub use security::{PermissionAction, PermissionGrant, ResourceType};
pub use tax_id::TaxId;
pub use tenant::{TenantKind, TenantScopePolicy};
pub use user::{
    EmailAddress, PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH, UserGroup, validate_password,
};
pub use vehicle::LicensePlate;
