//! User records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Email, Phone, UserId};
use crate::validation::{Field, FieldErrors};

/// The editable part of a user record.
///
/// Email and phone are validated newtypes, so holding a `UserFields` means
/// every field already passed its validators (the name is checked by
/// [`UserFields::parse`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFields {
    pub name: String,
    pub email: Email,
    pub phone: Phone,
}

impl UserFields {
    /// Validate raw form values and build `UserFields`.
    ///
    /// Every field is checked; the error lists all failures, not just the first.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] if any field fails validation.
    pub fn parse(name: &str, email: &str, phone: &str) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        if let Err(e) = Field::Name.validate(name) {
            errors.push(Field::Name, e);
        }
        let email = Email::parse(email)
            .map_err(|e| errors.push(Field::Email, e))
            .ok();
        let phone = Phone::parse(phone)
            .map_err(|e| errors.push(Field::Phone, e))
            .ok();

        match (email, phone) {
            (Some(email), Some(phone)) if errors.is_empty() => Ok(Self {
                name: name.to_owned(),
                email,
                phone,
            }),
            _ => Err(errors),
        }
    }
}

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID, assigned by the store.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: Email,
    /// Contact phone number.
    pub phone: Phone,
    /// When the user was created. Never changes after creation.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a user from its fields.
    #[must_use]
    pub fn new(id: UserId, fields: UserFields, created_at: DateTime<Utc>) -> Self {
        let UserFields { name, email, phone } = fields;
        Self {
            id,
            name,
            email,
            phone,
            created_at,
        }
    }

    /// Copy of the editable fields.
    #[must_use]
    pub fn fields(&self) -> UserFields {
        UserFields {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }

    /// This user with its editable fields replaced.
    ///
    /// `id` and `created_at` are kept.
    #[must_use]
    pub fn with_fields(&self, fields: UserFields) -> Self {
        Self::new(self.id, fields, self.created_at)
    }
}
