//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, validate_phone, validate_required};

/// A phone number as the user typed it.
///
/// The original text (spaces and hyphens included) is kept for display.
/// Parsing requires at least [`MIN_PHONE_DIGITS`](crate::validation::MIN_PHONE_DIGITS)
/// digits and allows a `+` only as the first non-separator character.
///
/// ```
/// use user_registry_core::Phone;
///
/// let phone = Phone::parse("+1 555-123-4567").unwrap();
/// assert_eq!(phone.as_str(), "+1 555-123-4567");
///
/// assert!(Phone::parse("555-1234").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Required`] for an empty input, otherwise
    /// the error from [`validate_phone`].
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        validate_required(s)?;
        validate_phone(s)?;
        Ok(Self(s.to_owned()))
    }

    /// Returns the phone number as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Phone {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_required(&value)?;
        validate_phone(&value)?;
        Ok(Self(value))
    }
}

impl From<Phone> for String {
    fn from(phone: Phone) -> Self {
        phone.0
    }
}
