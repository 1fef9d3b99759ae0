//! User Registry Core - Shared types library.
//!
//! This crate provides the types used across the user registry components:
//! - `user-registry` - In-memory store, observable streams, form and list controllers
//! - `user-registry-cli` - Command-line front-end driving the controllers
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no shared
//! state, no logging. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and phone numbers
//! - [`validation`] - Field validators returning structured verdicts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod validation;

pub use types::*;
pub use validation::{
    Field, FieldErrors, MIN_PHONE_DIGITS, ValidationError, validate_email, validate_phone,
    validate_required,
};
