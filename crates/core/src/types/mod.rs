//! Core types for the user registry.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod phone;
pub mod user;

pub use email::Email;
pub use id::*;
pub use phone::Phone;
pub use user::{User, UserFields};
