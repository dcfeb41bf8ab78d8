use dealerdesk_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Vehicle license plate in the legacy (`ABC1234`) or Mercosur (`ABC1D23`) layout.
///
/// Stored uppercase without separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LicensePlate(String);

impl LicensePlate {
    /// Normalizes and validates a plate.
    pub fn new(value: impl AsRef<str>) -> AppResult<Self> {
        let raw = value.as_ref();
        let normalized: String = raw
            .chars()
            .filter(|character| *character != '-' && !character.is_whitespace())
            .map(|character| character.to_ascii_uppercase())
            .collect();

        let bytes = normalized.as_bytes();
        let valid = bytes.len() == 7
            && bytes[..3].iter().all(u8::is_ascii_uppercase)
            && bytes[3].is_ascii_digit()
            && (bytes[4].is_ascii_digit() || bytes[4].is_ascii_uppercase())
            && bytes[5..].iter().all(u8::is_ascii_digit);

        if !valid {
            return Err(AppError::Validation(format!(
                "license plate '{raw}' must look like ABC1234 or ABC1D23"
            )));
        }

        Ok(Self(normalized))
    }

    /// Returns the normalized plate.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<LicensePlate> for String {
    fn from(value: LicensePlate) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::LicensePlate;

    #[test]
    fn legacy_plate_with_dash_is_normalized() {
        let plate = LicensePlate::new("abc-1234");
        assert_eq!(plate.ok().map(String::from).as_deref(), Some("ABC1234"));
    }

    #[test]
    fn mercosur_plate_is_accepted() {
        assert!(LicensePlate::new("BRA2E19").is_ok());
    }

    #[test]
    fn digit_in_prefix_is_rejected() {
        assert!(LicensePlate::new("AB11234").is_err());
    }

    #[test]
    fn short_plate_is_rejected() {
        assert!(LicensePlate::new("ABC123").is_err());
    }

    proptest! {
        #[test]
        fn lowercase_input_matches_uppercase(plate in "[a-z]{3}[0-9][a-z0-9][0-9]{2}") {
            prop_assert_eq!(
                LicensePlate::new(&plate).ok(),
                LicensePlate::new(plate.to_uppercase()).ok()
            );
            prop_assert!(LicensePlate::new(&plate).is_ok());
        }
    }
}
