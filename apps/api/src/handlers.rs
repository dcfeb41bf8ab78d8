pub mod auth;
pub mod bank_accounts;
pub mod clients;
pub mod contracts;
pub mod financings;
pub mod health;
pub mod inventories;
pub mod maintenances;
pub mod payments;
pub mod permissions;
pub mod receipts;
pub mod sales;
pub mod tenants;
pub mod users;
pub mod vehicles;
