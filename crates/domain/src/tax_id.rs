use dealerdesk_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

const CPF_DIGITS: usize = 11;
const CNPJ_DIGITS: usize = 14;

/// Brazilian taxpayer number: a CPF (individuals) or a CNPJ (companies).
///
/// Stored as digits only, so `123.456.789-09` and `12345678909` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxId(String);

impl TaxId {
    /// Normalizes and validates a CPF or CNPJ.
    pub fn new(value: impl AsRef<str>) -> AppResult<Self> {
        let raw = value.as_ref();
        let mut digits = String::with_capacity(raw.len());

        for character in raw.chars() {
            match character {
                '0'..='9' => digits.push(character),
                '.' | '-' | '/' | ' ' => {}
                _ => {
                    return Err(AppError::Validation(format!(
                        "tax id '{raw}' must contain only digits and punctuation"
                    )));
                }
            }
        }

        if digits.len() != CPF_DIGITS && digits.len() != CNPJ_DIGITS {
            return Err(AppError::Validation(format!(
                "tax id '{raw}' must have {CPF_DIGITS} (CPF) or {CNPJ_DIGITS} (CNPJ) digits"
            )));
        }

        Ok(Self(digits))
    }

    /// Returns the digits-only value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns whether this is a company number.
    #[must_use]
    pub fn is_cnpj(&self) -> bool {
        self.0.len() == CNPJ_DIGITS
    }
}

impl From<TaxId> for String {
    fn from(value: TaxId) -> Self {
        value.0
    }
}
