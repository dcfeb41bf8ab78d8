//! User domain types and validation rules.

use dealerdesk_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Performs basic structural validation: non-empty, contains exactly one `@`,
    /// local part and domain are non-empty, domain contains at least one `.`.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim().to_lowercase();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }

        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        };

        if domain.contains('@') {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        }

        if local.is_empty() {
            return Err(AppError::Validation(
                "email local part must not be empty".to_owned(),
            ));
        }

        if domain.is_empty() || !domain.contains('.') {
            return Err(AppError::Validation(
                "email domain must contain at least one '.'".to_owned(),
            ));
        }

        if trimmed.len() > 100 {
            return Err(AppError::Validation(
                "email address must not exceed 100 characters".to_owned(),
            ));
        }

        Ok(Self(trimmed))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Group label of a user account. One group value marks administrators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserGroup(String);

impl UserGroup {
    /// Canonical administrator group name.
    pub const ADMINISTRATOR: &'static str = "Administrator";

    /// Group assigned when none is provided.
    pub const DEFAULT: &'static str = "Staff";

    /// Creates a validated group label.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = NonEmptyString::new(value)?;
        if value.as_str().chars().count() > 50 {
            return Err(AppError::Validation(
                "user group must not exceed 50 characters".to_owned(),
            ));
        }

        Ok(Self(value.into()))
    }

    /// Returns the administrator group.
    #[must_use]
    pub fn administrator() -> Self {
        Self(Self::ADMINISTRATOR.to_owned())
    }

    /// Returns the default group.
    #[must_use]
    pub fn staff() -> Self {
        Self(Self::DEFAULT.to_owned())
    }

    /// Returns whether the group bypasses tenant matching.
    ///
    /// Accepts the legacy Portuguese label `Administrador` as well.
    #[must_use]
    pub fn is_administrator(&self) -> bool {
        let value = self.0.as_str();
        value.eq_ignore_ascii_case(Self::ADMINISTRATOR)
            || value.eq_ignore_ascii_case("Administrador")
    }

    /// Returns the group label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Minimum password length.
pub const PASSWORD_MIN_LENGTH: usize = 10;

/// Maximum password length to allow passphrases (protects against Argon2id DoS).
pub const PASSWORD_MAX_LENGTH: usize = 128;

/// Validates a plaintext password length and rejects well-known breached values.
pub fn validate_password(password: &str) -> AppResult<()> {
    let char_count = password.chars().count();

    if char_count < PASSWORD_MIN_LENGTH {
        return Err(AppError::Validation(format!(
            "password must be at least {PASSWORD_MIN_LENGTH} characters"
        )));
    }

    if char_count > PASSWORD_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "password must not exceed {PASSWORD_MAX_LENGTH} characters"
        )));
    }

    let lowered = password.to_lowercase();
    if COMMON_PASSWORDS.iter().any(|entry| *entry == lowered) {
        return Err(AppError::Validation(
            "this password is too common and has appeared in data breaches".to_owned(),
        ));
    }

    Ok(())
}

static COMMON_PASSWORDS: &[&str] = &[
    "1234567890",
    "qwertyuiop",
    "password123",
    "password1234",
    "iloveyou123",
    "0987654321",
    "1q2w3e4r5t",
    "senha12345",
    "mudar12345",
    "concessionaria",
];
