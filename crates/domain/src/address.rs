use serde::{Deserialize, Serialize};

/// Optional postal address attached to clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    /// CEP.
    pub postal_code: Option<String>,
    /// Street name.
    pub street: Option<String>,
    /// House or building number.
    pub number: Option<String>,
    /// Neighbourhood.
    pub district: Option<String>,
    /// City name.
    pub city: Option<String>,
    /// Two-letter state code.
    pub state: Option<String>,
}

impl PostalAddress {
    /// Trims every part and drops blank values.
    #[must_use]
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        }

        Self {
            postal_code: clean(self.postal_code),
            street: clean(self.street),
            number: clean(self.number),
            district: clean(self.district),
            city: clean(self.city),
            state: clean(self.state).map(|state| state.to_uppercase()),
        }
    }
}
