use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use dealerdesk_core::AppError;
use dealerdesk_domain::{TenantKind, TenantScopePolicy};
use dealerdesk_infrastructure::MIN_SECRET_LENGTH;
use tracing_subscriber::EnvFilter;

const DEFAULT_TOKEN_TTL_MINUTES: i64 = 480;
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_DATABASE_ACQUIRE_TIMEOUT_SECS: u32 = 5;

/// Connection pool sizing for the Postgres backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatabasePoolSettings {
    pub max_connections: u32,
    pub acquire_timeout_secs: u32,
}

impl Default for DatabasePoolSettings {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
            acquire_timeout_secs: DEFAULT_DATABASE_ACQUIRE_TIMEOUT_SECS,
        }
    }
}

impl DatabasePoolSettings {
    fn from_values(
        max_connections: Option<String>,
        acquire_timeout_secs: Option<String>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            max_connections: positive_setting(
                "DATABASE_MAX_CONNECTIONS",
                max_connections,
                DEFAULT_DATABASE_MAX_CONNECTIONS,
            )?,
            acquire_timeout_secs: positive_setting(
                "DATABASE_ACQUIRE_TIMEOUT_SECS",
                acquire_timeout_secs,
                DEFAULT_DATABASE_ACQUIRE_TIMEOUT_SECS,
            )?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub database_pool: DatabasePoolSettings,
    pub api_host: String,
    pub api_port: u16,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub tenant_kind: TenantKind,
    pub scope_policy: TenantScopePolicy,
    pub cors_allowed_origin: Option<String>,
    pub bootstrap_token: Option<String>,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let database_url = required_env("DATABASE_URL")?;
        let database_pool = DatabasePoolSettings::from_values(
            optional_env("DATABASE_MAX_CONNECTIONS"),
            optional_env("DATABASE_ACQUIRE_TIMEOUT_SECS"),
        )?;
        let jwt_secret = required_env("JWT_SECRET")?;
        if jwt_secret.len() < MIN_SECRET_LENGTH {
            return Err(AppError::Validation(format!(
                "JWT_SECRET must be at least {MIN_SECRET_LENGTH} characters"
            )));
        }

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let token_ttl_minutes = match optional_env("TOKEN_TTL_MINUTES") {
            Some(value) => value
                .parse::<i64>()
                .ok()
                .filter(|minutes| *minutes > 0)
                .ok_or_else(|| {
                    AppError::Validation(format!(
                        "TOKEN_TTL_MINUTES must be a positive number of minutes, got '{value}'"
                    ))
                })?,
            None => DEFAULT_TOKEN_TTL_MINUTES,
        };

        let tenant_kind = optional_env("TENANT_KIND")
            .map(|value| TenantKind::parse(value.as_str()))
            .transpose()?
            .unwrap_or(TenantKind::Company);
        let scope_policy = optional_env("TENANT_SCOPE_DEFAULT")
            .map(|value| TenantScopePolicy::parse(value.as_str()))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            migrate_only,
            database_url,
            database_pool,
            api_host,
            api_port,
            jwt_secret,
            token_ttl_minutes,
            tenant_kind,
            scope_policy,
            cors_allowed_origin: optional_env("CORS_ALLOWED_ORIGIN"),
            bootstrap_token: optional_env("AUTH_BOOTSTRAP_TOKEN"),
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn positive_setting(name: &str, value: Option<String>, default: u32) -> Result<u32, AppError> {
    match value {
        Some(value) => value
            .parse::<u32>()
            .ok()
            .filter(|parsed| *parsed > 0)
            .ok_or_else(|| {
                AppError::Validation(format!("{name} must be a positive integer, got '{value}'"))
            }),
        None => Ok(default),
    }
}

/// Unset and blank variables both count as absent.
fn optional_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
