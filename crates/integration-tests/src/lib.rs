//! Integration tests for the user registry.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p user-registry-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `user_workflow` - Form and list controllers driving one shared store
//! - `store_streams` - Snapshot and selection streams seen by subscribers
//!
//! Shared fixtures live here so each test file starts from the same setup.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::rc::Rc;

use user_registry::{RegistryConfig, UserForm, UserList, UserStore};
use user_registry_core::{Field, UserFields};

/// One store with a form and a list attached, as the UI wires them.
pub struct TestContext {
    pub store: Rc<UserStore>,
    pub form: UserForm,
    pub list: UserList,
}

impl TestContext {
    /// Context with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&RegistryConfig::default())
    }

    /// Context with the given configuration.
    #[must_use]
    pub fn with_config(config: &RegistryConfig) -> Self {
        let store = Rc::new(UserStore::new(config));
        Self {
            form: UserForm::attach(Rc::clone(&store)),
            list: UserList::attach(Rc::clone(&store)),
            store,
        }
    }

    /// Type values into all three form fields.
    pub fn fill(&self, name: &str, email: &str, phone: &str) {
        self.form.set_field(Field::Name, name);
        self.form.set_field(Field::Email, email);
        self.form.set_field(Field::Phone, phone);
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Valid fields for a user called `name`.
///
/// # Panics
///
/// Panics if `name` makes the derived email invalid.
#[must_use]
#[allow(clippy::expect_used)]
pub fn fields(name: &str) -> UserFields {
    UserFields::parse(
        name,
        &format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        "+1 202-555-0147",
    )
    .expect("fixture fields are valid")
}
