//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod in_memory_back_office_repository;
mod jwt_credential_codec;
mod postgres_client_repository;
mod postgres_errors;
mod postgres_inventory_repository;
mod postgres_ledger_repository;
mod postgres_permission_grant_repository;
mod postgres_tenant_repository;
mod postgres_user_repository;
mod postgres_vehicle_repository;

#[cfg(test)]
mod postgres_test_support;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use in_memory_back_office_repository::InMemoryBackOfficeRepository;
pub use jwt_credential_codec::{JwtCredentialCodec, MIN_SECRET_LENGTH};
pub use postgres_client_repository::PostgresClientRepository;
pub use postgres_inventory_repository::PostgresInventoryRepository;
pub use postgres_ledger_repository::PostgresLedgerRepository;
pub use postgres_permission_grant_repository::PostgresPermissionGrantRepository;
pub use postgres_tenant_repository::PostgresTenantRepository;
pub use postgres_user_repository::PostgresUserRepository;
pub use postgres_vehicle_repository::PostgresVehicleRepository;
