//! User form controller.
//!
//! Holds the three field values, per-field touched flags and the edit mode.
//! While attached it follows the store's editing selection: selecting a user
//! loads its values into the form, clearing the selection resets the form.
//! Submitting a valid form either adds a user or updates the one being
//! edited.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use user_registry_core::{Field, FieldErrors, User, UserFields, ValidationError};

use crate::error::SubmitError;
use crate::observable::Subscription;
use crate::store::UserStore;

/// Raw text currently entered in the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl FormValues {
    /// Value of a single field.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
        }
    }

    /// Replace the value of a single field.
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
        }
    }

    /// Validate every field.
    ///
    /// # Errors
    ///
    /// Returns the failures of all invalid fields.
    pub fn parse(&self) -> Result<UserFields, FieldErrors> {
        UserFields::parse(&self.name, &self.email, &self.phone)
    }
}

impl From<&User> for FormValues {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.as_str().to_owned(),
            phone: user.phone.as_str().to_owned(),
        }
    }
}

/// What a successful submit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    /// A new user was appended.
    Added(User),
    /// The user being edited was sent to the store.
    Updated(User),
}

#[derive(Debug, Default)]
struct FormState {
    values: FormValues,
    touched: HashSet<Field>,
    editing: Option<User>,
}

impl FormState {
    fn load(&mut self, selection: Option<&User>) {
        match selection {
            Some(user) => {
                self.values = FormValues::from(user);
                self.editing = Some(user.clone());
            }
            None => {
                self.reset_fields();
                self.editing = None;
            }
        }
    }

    fn reset_fields(&mut self) {
        self.values = FormValues::default();
        self.touched.clear();
    }
}

/// Form controller bound to a shared [`UserStore`].
///
/// Dropping the form releases its subscription to the editing selection.
#[derive(Debug)]
pub struct UserForm {
    store: Rc<UserStore>,
    state: Rc<RefCell<FormState>>,
    _selection: Subscription,
}

impl UserForm {
    /// Attach a form to the store.
    ///
    /// The current editing selection, if any, is loaded right away.
    #[must_use]
    pub fn attach(store: Rc<UserStore>) -> Self {
        let state = Rc::new(RefCell::new(FormState::default()));
        let weak = Rc::downgrade(&state);

        let selection = store
            .observe_editing_selection()
            .subscribe(move |selection: &Option<User>| {
                if let Some(state) = weak.upgrade() {
                    state.borrow_mut().load(selection.as_ref());
                }
            });

        Self {
            store,
            state,
            _selection: selection,
        }
    }

    /// Copy of the current field values.
    #[must_use]
    pub fn values(&self) -> FormValues {
        self.state.borrow().values.clone()
    }

    /// Current value of one field.
    #[must_use]
    pub fn value(&self, field: Field) -> String {
        self.state.borrow().values.get(field).to_owned()
    }

    /// Set a field's value.
    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        self.state.borrow_mut().values.set(field, value.into());
    }

    /// Mark a field as touched so its errors become visible.
    pub fn touch(&self, field: Field) {
        self.state.borrow_mut().touched.insert(field);
    }

    /// Mark every field as touched.
    pub fn touch_all(&self) {
        self.state.borrow_mut().touched.extend(Field::ALL);
    }

    /// Returns `true` if the field has been touched since the last reset.
    #[must_use]
    pub fn is_touched(&self, field: Field) -> bool {
        self.state.borrow().touched.contains(&field)
    }

    /// The validation failure for a field, touched or not.
    #[must_use]
    pub fn error(&self, field: Field) -> Option<ValidationError> {
        field
            .validate(self.state.borrow().values.get(field))
            .err()
    }

    /// Inline message for a field, shown only once it has been touched.
    #[must_use]
    pub fn visible_error(&self, field: Field) -> Option<String> {
        if !self.is_touched(field) {
            return None;
        }
        self.error(field).map(|error| field.message(error))
    }

    /// Validation failures across all fields.
    #[must_use]
    pub fn errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for field in Field::ALL {
            if let Some(error) = self.error(field) {
                errors.push(field, error);
            }
        }
        errors
    }

    /// Returns `true` if every field passes validation (submit is enabled).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// Returns `true` while a user is loaded for editing.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.state.borrow().editing.is_some()
    }

    /// The user loaded for editing, if any.
    #[must_use]
    pub fn editing_user(&self) -> Option<User> {
        self.state.borrow().editing.clone()
    }

    /// Submit the form.
    ///
    /// In edit mode the edited user, with the form values applied, goes to
    /// [`UserStore::update_user`]; otherwise the values go to
    /// [`UserStore::add_user`]. Field values and touched flags are reset
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Invalid`] without touching the store if any
    /// field is invalid, or [`SubmitError::Store`] if the store rejects the
    /// change (the form keeps its values in that case).
    pub fn submit(&self) -> Result<Submitted, SubmitError> {
        // Release the state borrow before calling the store: its
        // notifications write back into this form.
        let (fields, editing) = {
            let state = self.state.borrow();
            let fields = state.values.parse().map_err(|errors| {
                tracing::debug!(%errors, "Submit blocked by invalid fields");
                SubmitError::Invalid(errors)
            })?;
            (fields, state.editing.clone())
        };

        let submitted = match editing {
            Some(user) => {
                let updated = user.with_fields(fields);
                self.store.update_user(updated.clone())?;
                Submitted::Updated(updated)
            }
            None => Submitted::Added(self.store.add_user(fields)?),
        };

        self.state.borrow_mut().reset_fields();
        Ok(submitted)
    }

    /// Leave edit mode without saving.
    pub fn cancel(&self) {
        self.store.set_editing_selection(None);
    }
}
