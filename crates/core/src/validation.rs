//! Field validators for user forms.
//!
//! Each validator inspects a single text value and returns `Ok(())` or the
//! [`ValidationError`] describing why the value is rejected. The shape
//! validators ([`validate_email`], [`validate_phone`]) accept the empty
//! string: emptiness is reported separately by [`validate_required`], so a
//! blank field carries exactly one error.
//!
//! ## Examples
//!
//! ```
//! use user_registry_core::{ValidationError, validate_email, validate_phone};
//!
//! assert!(validate_email("a@b.c").is_ok());
//! assert_eq!(validate_email("a.b@c"), Err(ValidationError::InvalidEmail));
//!
//! assert!(validate_phone("+1 234-567-890").is_ok());
//! assert!(matches!(
//!     validate_phone("123456789"),
//!     Err(ValidationError::MinDigits { .. })
//! ));
//! ```

use core::fmt;

use serde::{Deserialize, Serialize};

/// Minimum number of digits a phone number must contain.
pub const MIN_PHONE_DIGITS: usize = 10;

/// Reasons a field value is rejected.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationError {
    /// The value is empty.
    #[error("value is required")]
    Required,
    /// The value does not look like an email address.
    #[error("email must contain an @ followed later by a dot")]
    InvalidEmail,
    /// The phone number has too few digits.
    #[error("phone must have at least {min} digits")]
    MinDigits {
        /// Minimum digit count.
        min: usize,
    },
    /// A plus sign appears somewhere other than the start of the number.
    #[error("plus symbol (+) must be at the start")]
    InvalidFormat,
}

impl ValidationError {
    /// Stable identifier for this failure.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::InvalidEmail => "invalidEmail",
            Self::MinDigits { .. } => "minDigits",
            Self::InvalidFormat => "invalidFormat",
        }
    }
}

/// Fail with [`ValidationError::Required`] if the value is empty.
///
/// Whitespace-only values are not empty.
///
/// # Errors
///
/// Returns [`ValidationError::Required`] for `""`.
pub const fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        Err(ValidationError::Required)
    } else {
        Ok(())
    }
}

/// Check that a value has the rough shape of an email address.
///
/// Valid when the value contains an `@` and a `.`, and the first `@` comes
/// before the last `.`. This is a shape heuristic, not RFC 5322 validation.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidEmail`] if the shape check fails.
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }

    match (value.find('@'), value.rfind('.')) {
        (Some(at), Some(dot)) if at < dot => Ok(()),
        _ => Err(ValidationError::InvalidEmail),
    }
}

/// Check that a value looks like a phone number.
///
/// Whitespace and hyphens are ignored. The remaining text must contain at
/// least [`MIN_PHONE_DIGITS`] digits, and a `+` may only appear as its first
/// character. The digit count is checked first.
///
/// # Errors
///
/// Returns [`ValidationError::MinDigits`] or [`ValidationError::InvalidFormat`].
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }

    let cleaned = strip_phone_separators(value);
    let digits = cleaned.chars().filter(char::is_ascii_digit).count();

    if digits < MIN_PHONE_DIGITS {
        return Err(ValidationError::MinDigits {
            min: MIN_PHONE_DIGITS,
        });
    }

    if cleaned.char_indices().any(|(i, c)| c == '+' && i > 0) {
        return Err(ValidationError::InvalidFormat);
    }

    Ok(())
}

/// Remove whitespace and hyphens from a phone number.
fn strip_phone_separators(value: &str) -> String {
    value
        .chars()
        .filter(|&c| !is_phone_separator(c))
        .collect()
}

/// Whitespace in the browser regex sense (`\s`) plus the hyphen.
///
/// Unicode `White_Space` minus NEL (U+0085), plus the byte order mark
/// (U+FEFF).
fn is_phone_separator(c: char) -> bool {
    match c {
        '-' | '\u{feff}' => true,
        '\u{85}' => false,
        _ => c.is_whitespace(),
    }
}

/// A user form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Phone,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Phone];

    /// Lowercase field key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    /// Human-readable field label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
        }
    }

    /// Run every validator attached to this field.
    ///
    /// All fields are required; email and phone also have a shape check.
    ///
    /// # Errors
    ///
    /// Returns the first failing validator's error.
    pub fn validate(self, value: &str) -> Result<(), ValidationError> {
        validate_required(value)?;
        match self {
            Self::Name => Ok(()),
            Self::Email => validate_email(value),
            Self::Phone => validate_phone(value),
        }
    }

    /// Inline message shown under this field for the given error.
    #[must_use]
    pub fn message(self, error: ValidationError) -> String {
        match error {
            ValidationError::Required => format!("{} is required", self.label()),
            ValidationError::InvalidEmail => "Email is not valid".to_owned(),
            ValidationError::MinDigits { min } => {
                format!("{} must have at least {min} digits", self.label())
            }
            ValidationError::InvalidFormat => "Plus symbol (+) must be at the start".to_owned(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            _ => Err(format!("unknown field: {s}")),
        }
    }
}

/// Validation failures collected across several fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(Field, ValidationError)>);

impl FieldErrors {
    /// Create an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Record a failure for a field.
    pub fn push(&mut self, field: Field, error: ValidationError) {
        self.0.push((field, error));
    }

    /// Returns `true` if no failures were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The failure recorded for a field, if any.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<ValidationError> {
        self.0
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, error)| *error)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, error)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {}", field.message(*error))?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}
