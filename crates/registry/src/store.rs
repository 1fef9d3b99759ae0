//! In-memory user store.
//!
//! The store owns the user list and the editing selection. Consumers read
//! through [`Stream`]s that replay the latest value on subscribe and push a
//! full snapshot after every mutation; writes go through the mutator methods.
//!
//! One store is created per session and shared with the controllers by
//! `Rc<UserStore>`. All methods take `&self`.

use std::cell::Cell;

use chrono::Utc;
use tracing::instrument;
use user_registry_core::{User, UserFields, UserId};

use crate::config::{MissingIdPolicy, RegistryConfig};
use crate::error::{Result, StoreError};
use crate::observable::{Observable, Stream};

/// Process-local holder of the user collection and editing selection.
#[derive(Debug)]
pub struct UserStore {
    users: Observable<Vec<User>>,
    editing: Observable<Option<User>>,
    next_id: Cell<Option<u64>>,
    missing_id: MissingIdPolicy,
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new(&RegistryConfig::default())
    }
}

impl UserStore {
    /// Create an empty store.
    #[must_use]
    pub fn new(config: &RegistryConfig) -> Self {
        Self {
            users: Observable::new(Vec::new()),
            editing: Observable::new(None),
            next_id: Cell::new(Some(config.first_id)),
            missing_id: config.missing_id,
        }
    }

    /// Stream of user snapshots, in insertion order.
    #[must_use]
    pub fn observe_users(&self) -> Stream<Vec<User>> {
        self.users.stream()
    }

    /// Stream of the user currently loaded into the form, if any.
    #[must_use]
    pub fn observe_editing_selection(&self) -> Stream<Option<User>> {
        self.editing.stream()
    }

    /// Current user snapshot.
    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.users.get()
    }

    /// Look up a user by ID.
    #[must_use]
    pub fn find(&self, id: UserId) -> Option<User> {
        self.users
            .with(|users| users.iter().find(|user| user.id == id).cloned())
    }

    /// Number of stored users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.with(Vec::len)
    }

    /// Returns `true` if no users are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current editing selection.
    #[must_use]
    pub fn editing_selection(&self) -> Option<User> {
        self.editing.get()
    }

    /// Replace the editing selection.
    pub fn set_editing_selection(&self, user: Option<User>) {
        tracing::debug!(
            user_id = user.as_ref().map(|u| u.id.as_u64()),
            "Editing selection changed"
        );
        self.editing.set(user);
    }

    /// Append a new user and return it.
    ///
    /// The ID comes from a counter that only moves forward, so IDs are
    /// never reused after a delete. `created_at` is set to now.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IdsExhausted`] once the ID space is used up.
    pub fn add_user(&self, fields: UserFields) -> Result<User> {
        let id = self.next_id.get().ok_or(StoreError::IdsExhausted)?;
        self.next_id.set(id.checked_add(1));

        let user = User::new(UserId::new(id), fields, Utc::now());
        let count = self.users.update(|users| {
            users.push(user.clone());
            users.len()
        });

        tracing::debug!(user_id = id, count, "User added");
        Ok(user)
    }

    /// Replace a stored user, keeping its position and `created_at`.
    ///
    /// On success the editing selection is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UserNotFound`] if no user has this ID and the
    /// policy is [`MissingIdPolicy::Reject`]. Under
    /// [`MissingIdPolicy::Ignore`] a missing ID is a silent no-op.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub fn update_user(&self, user: User) -> Result<()> {
        let position = self
            .users
            .with(|users| users.iter().position(|u| u.id == user.id));
        let Some(index) = position else {
            return self.missing(user.id, "update");
        };

        self.users.update(|users| {
            if let Some(slot) = users.get_mut(index) {
                *slot = User {
                    created_at: slot.created_at,
                    ..user
                };
            }
        });
        tracing::debug!("User updated");

        self.editing.set(None);
        Ok(())
    }

    /// Remove the user with this ID.
    ///
    /// A snapshot is emitted even when nothing matched, unless the policy is
    /// [`MissingIdPolicy::Reject`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UserNotFound`] if no user has this ID and the
    /// policy is [`MissingIdPolicy::Reject`].
    #[instrument(skip(self), fields(user_id = %id))]
    pub fn delete_user(&self, id: UserId) -> Result<()> {
        let exists = self.users.with(|users| users.iter().any(|u| u.id == id));
        if !exists && self.missing_id == MissingIdPolicy::Reject {
            return self.missing(id, "delete");
        }

        let count = self.users.update(|users| {
            users.retain(|u| u.id != id);
            users.len()
        });

        if exists {
            tracing::debug!(count, "User deleted");
        } else {
            tracing::debug!(count, "Delete matched no user");
        }
        Ok(())
    }

    fn missing(&self, id: UserId, operation: &'static str) -> Result<()> {
        match self.missing_id {
            MissingIdPolicy::Ignore => {
                tracing::debug!(user_id = %id, operation, "Ignoring unknown user ID");
                Ok(())
            }
            MissingIdPolicy::Reject => {
                tracing::warn!(user_id = %id, operation, "Rejecting unknown user ID");
                Err(StoreError::UserNotFound(id))
            }
        }
    }
}
