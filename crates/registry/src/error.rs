//! Error types for store and form operations.

use thiserror::Error;
use user_registry_core::{FieldErrors, UserId};

/// Errors returned by [`UserStore`](crate::UserStore) mutators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No user with this ID exists (only under [`MissingIdPolicy::Reject`](crate::MissingIdPolicy::Reject)).
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// The ID counter cannot advance any further.
    #[error("User IDs exhausted")]
    IdsExhausted,
}

/// Errors returned by [`UserForm::submit`](crate::UserForm::submit).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// One or more fields are invalid; nothing was submitted.
    #[error("Invalid form: {0}")]
    Invalid(FieldErrors),

    /// The store rejected the change.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
