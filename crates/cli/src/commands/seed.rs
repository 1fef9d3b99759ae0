//! Seed a registry session with users from a YAML file.
//!
//! The file is a list of records:
//!
//! ```yaml
//! - name: Ada Lovelace
//!   email: ada@example.com
//!   phone: "+44 20 7946 0958"
//! - name: Grace Hopper
//!   email: grace@example.com
//!   phone: "202-555-0147 1"
//! ```
//!
//! Each record goes through the form, so invalid records are skipped with a
//! warning instead of reaching the store.

use std::io::Write;
use std::path::Path;

use tracing::{info, warn};
use user_registry::{FormValues, RegistryConfig, SubmitError};

use super::script::Session;
use super::{CommandError, load_config, read_yaml};

/// Outcome of a seeding run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedResult {
    /// Records added to the store.
    pub inserted: usize,
    /// Records skipped because they failed validation or were rejected.
    pub skipped: usize,
}

/// Add every valid record to a fresh session and print the resulting list.
///
/// # Errors
///
/// Returns an error if writing output fails.
pub fn records(
    records: &[FormValues],
    config: &RegistryConfig,
    out: &mut impl Write,
) -> Result<SeedResult, CommandError> {
    let session = Session::new(config);
    let mut result = SeedResult::default();

    for (index, record) in records.iter().enumerate() {
        match session.add(record) {
            Ok(_) => result.inserted += 1,
            Err(SubmitError::Invalid(errors)) => {
                warn!(index, name = %record.name, %errors, "Skipping invalid record");
                result.skipped += 1;
            }
            Err(e) => {
                warn!(index, name = %record.name, error = %e, "Skipping rejected record");
                result.skipped += 1;
            }
        }
    }

    session.print(out)?;
    Ok(result)
}

/// Seed users from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or configuration
/// is invalid.
pub fn users(path: &Path, out: &mut impl Write) -> Result<(), CommandError> {
    let config = load_config(false)?;

    info!(path = %path.display(), "Loading users from file");
    let input: Vec<FormValues> = read_yaml(path)?;
    info!(records = input.len(), "Parsed records");

    let result = records(&input, &config, out)?;

    info!("Seeding complete!");
    info!("  Users inserted: {}", result.inserted);
    info!("  Records skipped: {}", result.skipped);

    Ok(())
}
