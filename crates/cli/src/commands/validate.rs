//! Field validation command.
//!
//! # Usage
//!
//! ```bash
//! ur-cli validate --name Ada --email ada@example.com --phone "+1 555 123 4567"
//! ```
//!
//! Prints one line per field and fails if any field is invalid.

use std::io::Write;

use user_registry_core::Field;

use super::CommandError;

/// Validate the three form fields and report each verdict.
///
/// # Errors
///
/// Returns [`CommandError::InvalidFields`] if any field fails validation.
pub fn fields(
    name: &str,
    email: &str,
    phone: &str,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let mut invalid = 0;

    for (field, value) in [(Field::Name, name), (Field::Email, email), (Field::Phone, phone)] {
        match field.validate(value) {
            Ok(()) => writeln!(out, "{field}: ok")?,
            Err(error) => {
                invalid += 1;
                writeln!(out, "{field}: {} ({})", field.message(error), error.code())?;
            }
        }
    }

    if invalid > 0 {
        return Err(CommandError::InvalidFields(invalid));
    }

    tracing::info!("All fields valid");
    Ok(())
}
