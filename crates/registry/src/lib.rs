//! User Registry - in-memory user management.
//!
//! This crate holds the stateful half of the registry:
//!
//! - [`store`] - The [`UserStore`]: user list, editing selection, ID counter
//! - [`observable`] - Push-based [`Observable`] values with RAII [`Subscription`]s
//! - [`form`] - The [`UserForm`] controller (field values, touched flags, submit/cancel)
//! - [`list`] - The [`UserList`] controller (display rows, edit/delete)
//! - [`config`] - [`RegistryConfig`] loaded from the environment
//!
//! # Architecture
//!
//! Everything is single-threaded. One [`UserStore`] is wrapped in an `Rc` and
//! handed to each controller at construction; the controllers subscribe to the
//! store's streams and release their subscriptions when dropped.
//!
//! ```
//! use std::rc::Rc;
//!
//! use user_registry::{UserForm, UserList, UserStore};
//! use user_registry_core::Field;
//!
//! let store = Rc::new(UserStore::default());
//! let form = UserForm::attach(Rc::clone(&store));
//! let list = UserList::attach(Rc::clone(&store));
//!
//! form.set_field(Field::Name, "Ada");
//! form.set_field(Field::Email, "ada@example.com");
//! form.set_field(Field::Phone, "+44 20 7946 0958");
//! form.submit().unwrap();
//!
//! assert_eq!(list.len(), 1);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod form;
pub mod list;
pub mod observable;
pub mod store;

pub use config::{ConfigError, MissingIdPolicy, RegistryConfig};
pub use error::{StoreError, SubmitError};
pub use form::{FormValues, Submitted, UserForm};
pub use list::{UserList, UserRow};
pub use observable::{Observable, Stream, Subscription};
pub use store::UserStore;
