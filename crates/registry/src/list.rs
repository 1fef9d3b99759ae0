//! User list controller.
//!
//! Mirrors the store's user snapshots and forwards edit/delete actions.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use user_registry_core::{User, UserId};

use crate::error::Result;
use crate::observable::Subscription;
use crate::store::UserStore;

/// Display format for the creation timestamp.
pub const CREATED_AT_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Message shown when the list has no users.
pub const EMPTY_MESSAGE: &str = "No users registered yet.";

/// One display row of the user list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRow {
    pub id: UserId,
    pub created_at: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            created_at: user.created_at.format(CREATED_AT_FORMAT).to_string(),
            name: user.name.clone(),
            email: user.email.to_string(),
            phone: user.phone.to_string(),
        }
    }
}

/// List controller bound to a shared [`UserStore`].
///
/// Dropping the list releases its subscription to the user stream.
#[derive(Debug)]
pub struct UserList {
    store: Rc<UserStore>,
    snapshot: Rc<RefCell<Vec<User>>>,
    _users: Subscription,
}

impl UserList {
    /// Attach a list to the store, starting from its current snapshot.
    #[must_use]
    pub fn attach(store: Rc<UserStore>) -> Self {
        let snapshot = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&snapshot);

        let users = store
            .observe_users()
            .subscribe(move |users: &Vec<User>| sink.borrow_mut().clone_from(users));

        Self {
            store,
            snapshot,
            _users: users,
        }
    }

    /// Users from the latest snapshot.
    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.snapshot.borrow().clone()
    }

    /// Display rows from the latest snapshot.
    #[must_use]
    pub fn rows(&self) -> Vec<UserRow> {
        self.snapshot.borrow().iter().map(UserRow::from).collect()
    }

    /// Number of users in the latest snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }

    /// Returns `true` if the latest snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot.borrow().is_empty()
    }

    /// Load a listed user into the form.
    ///
    /// Returns `false` if the ID is not in the current snapshot.
    pub fn edit(&self, id: UserId) -> bool {
        let user = self
            .snapshot
            .borrow()
            .iter()
            .find(|user| user.id == id)
            .cloned();

        match user {
            Some(user) => {
                self.store.set_editing_selection(Some(user));
                true
            }
            None => {
                tracing::debug!(user_id = %id, "Edit requested for unlisted user");
                false
            }
        }
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Propagates [`UserStore::delete_user`] errors.
    pub fn delete(&self, id: UserId) -> Result<()> {
        self.store.delete_user(id)
    }
}
