//! Scripted form/list sessions.
//!
//! A script is a YAML list of steps replayed against a fresh store, the way a
//! user would drive the form and the list:
//!
//! ```yaml
//! - add: { name: Ada, email: ada@example.com, phone: "+44 20 7946 0958" }
//! - fill: { name: Grace, email: grace@example }
//! - touch: [email]
//! - submit
//! - edit: 1
//! - fill: { name: Ada Lovelace }
//! - submit
//! - delete: 1
//! - list
//! ```
//!
//! Blocked submits, unknown IDs and store errors are reported and counted;
//! the command fails at the end if any step failed.

use std::io::Write;
use std::path::Path;
use std::rc::Rc;

use serde::Deserialize;
use user_registry::{
    FormValues, RegistryConfig, SubmitError, Submitted, UserForm, UserList, UserStore,
};
use user_registry_core::{Field, UserId};

use super::{CommandError, load_config, read_yaml};
use crate::render;

/// Values to type into the form; missing fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FillValues {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Type values into the form.
    Fill(FillValues),
    /// Mark fields as touched.
    Touch(Vec<Field>),
    /// Press the submit button.
    Submit,
    /// Fill every field, touch them and submit.
    Add(FormValues),
    /// Press edit on a listed user.
    Edit(UserId),
    /// Press cancel on the form.
    Cancel,
    /// Press delete on a listed user.
    Delete(UserId),
    /// Print the list.
    List,
}

/// A store with one form and one list attached.
pub struct Session {
    pub form: UserForm,
    pub list: UserList,
}

impl Session {
    /// Start a session on an empty store.
    #[must_use]
    pub fn new(config: &RegistryConfig) -> Self {
        let store = Rc::new(UserStore::new(config));
        Self {
            form: UserForm::attach(Rc::clone(&store)),
            list: UserList::attach(store),
        }
    }

    /// Fill, touch and submit a complete set of values.
    ///
    /// # Errors
    ///
    /// Propagates [`UserForm::submit`] errors.
    pub fn add(&self, values: &FormValues) -> Result<Submitted, SubmitError> {
        for field in Field::ALL {
            self.form.set_field(field, values.get(field));
        }
        self.form.touch_all();
        self.form.submit()
    }

    /// Write the user table, plus the edit state when a user is loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn print(&self, out: &mut impl Write) -> std::io::Result<()> {
        write!(out, "{}", render::table(&self.list.rows()))?;
        if let Some(user) = self.form.editing_user() {
            writeln!(out, "editing: user {}", user.id)?;
        }
        Ok(())
    }

    /// Apply one step. Returns `false` if the step failed.
    ///
    /// # Errors
    ///
    /// Returns an error if writing output fails.
    pub fn apply(&self, step: &Step, out: &mut impl Write) -> std::io::Result<bool> {
        match step {
            Step::Fill(values) => {
                for (field, value) in [
                    (Field::Name, &values.name),
                    (Field::Email, &values.email),
                    (Field::Phone, &values.phone),
                ] {
                    if let Some(value) = value {
                        self.form.set_field(field, value.as_str());
                    }
                }
                Ok(true)
            }
            Step::Touch(fields) => {
                for field in fields {
                    self.form.touch(*field);
                }
                Ok(true)
            }
            Step::Submit => {
                let result = self.form.submit();
                self.report_submit(result, out)
            }
            Step::Add(values) => {
                let result = self.add(values);
                self.report_submit(result, out)
            }
            Step::Edit(id) => {
                if self.list.edit(*id) {
                    writeln!(out, "editing user {id}")?;
                    Ok(true)
                } else {
                    writeln!(out, "edit failed: user {id} is not listed")?;
                    Ok(false)
                }
            }
            Step::Cancel => {
                self.form.cancel();
                writeln!(out, "edit cancelled")?;
                Ok(true)
            }
            Step::Delete(id) => match self.list.delete(*id) {
                Ok(()) => {
                    writeln!(out, "deleted user {id}")?;
                    Ok(true)
                }
                Err(e) => {
                    writeln!(out, "delete failed: {e}")?;
                    Ok(false)
                }
            },
            Step::List => {
                self.print(out)?;
                Ok(true)
            }
        }
    }

    fn report_submit(
        &self,
        result: Result<Submitted, SubmitError>,
        out: &mut impl Write,
    ) -> std::io::Result<bool> {
        match result {
            Ok(Submitted::Added(user)) => {
                writeln!(out, "added user {}", user.id)?;
                Ok(true)
            }
            Ok(Submitted::Updated(user)) => {
                writeln!(out, "updated user {}", user.id)?;
                Ok(true)
            }
            Err(SubmitError::Invalid(errors)) => {
                writeln!(out, "submit blocked: {} invalid field(s)", errors.len())?;
                for field in Field::ALL {
                    if let Some(message) = self.form.visible_error(field) {
                        writeln!(out, "  {field}: {message}")?;
                    }
                }
                Ok(false)
            }
            Err(SubmitError::Store(e)) => {
                writeln!(out, "submit failed: {e}")?;
                Ok(false)
            }
        }
    }
}

/// Replay steps on a fresh store and print the final list.
///
/// Returns the number of failed steps.
///
/// # Errors
///
/// Returns an error if writing output fails.
pub fn run(
    steps: &[Step],
    config: &RegistryConfig,
    out: &mut impl Write,
) -> Result<usize, CommandError> {
    let session = Session::new(config);
    let mut failed = 0;

    for (index, step) in steps.iter().enumerate() {
        tracing::debug!(index, ?step, "Applying step");
        if !session.apply(step, out)? {
            tracing::warn!(index, ?step, "Step failed");
            failed += 1;
        }
    }

    writeln!(out)?;
    session.print(out)?;
    Ok(failed)
}

/// Load a script file and replay it.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, configuration is
/// invalid, or any step failed.
pub fn run_file(path: &Path, strict: bool, out: &mut impl Write) -> Result<(), CommandError> {
    let config = load_config(strict)?;
    let steps: Vec<Step> = read_yaml(path)?;

    tracing::info!(
        path = %path.display(),
        steps = steps.len(),
        missing_id = %config.missing_id,
        "Running script"
    );

    let failed = run(&steps, &config, out)?;
    if failed > 0 {
        return Err(CommandError::StepsFailed(failed));
    }

    tracing::info!("Script complete");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use user_registry::MissingIdPolicy;

    use super::super::from_yaml_str;
    use super::*;

    fn parse(yaml: &str) -> Vec<Step> {
        from_yaml_str(yaml).unwrap()
    }

    fn replay(yaml: &str, config: &RegistryConfig) -> (String, usize) {
        let mut out = Vec::new();
        let failed = run(&parse(yaml), config, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), failed)
    }

    #[test]
    fn test_parse_steps() {
        let steps = parse(
            r"
- fill: { name: Ada }
- touch: [name, email]
- submit
- edit: 3
- cancel
- delete: 2
- list
",
        );

        assert_eq!(
            steps,
            vec![
                Step::Fill(FillValues {
                    name: Some("Ada".to_owned()),
                    ..FillValues::default()
                }),
                Step::Touch(vec![Field::Name, Field::Email]),
                Step::Submit,
                Step::Edit(UserId::new(3)),
                Step::Cancel,
                Step::Delete(UserId::new(2)),
                Step::List,
            ]
        );
    }

    #[test]
    fn test_parse_block_style_steps() {
        let steps = parse(
            r#"
- add:
    name: Ada
    email: ada@example.com
    phone: "+44 20 7946 0958"
- edit: 1
- submit
"#,
        );

        assert_eq!(steps.len(), 3);
        assert!(matches!(&steps[0], Step::Add(values) if values.name == "Ada"));
        assert_eq!(steps[1], Step::Edit(UserId::new(1)));
        assert_eq!(steps[2], Step::Submit);
    }

    #[test]
    fn test_unknown_step_is_rejected() {
        assert!(from_yaml_str::<Vec<Step>>("- rename: 1\n").is_err());
    }

    #[test]
    fn test_run_file_reads_documented_format() {
        let path =
            std::env::temp_dir().join(format!("ur-cli-script-{}.yaml", std::process::id()));
        std::fs::write(
            &path,
            "- add: { name: Ada, email: ada@example.com, phone: \"1234567890\" }\n- edit: 1\n- cancel\n- list\n",
        )
        .unwrap();

        let mut out = Vec::new();
        let result = run_file(&path, false, &mut out);
        std::fs::remove_file(&path).unwrap();

        result.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("added user 1\nediting user 1\nedit cancelled\n"));
    }

    #[test]
    fn test_add_edit_delete_session() {
        let (text, failed) = replay(
            r#"
- add: { name: Ada, email: ada@example.com, phone: "1234567890" }
- add: { name: Grace, email: grace@example.com, phone: "0987654321" }
- edit: 1
- fill: { name: Ada Lovelace }
- submit
- delete: 2
"#,
            &RegistryConfig::default(),
        );

        assert_eq!(failed, 0);
        assert!(text.contains("added user 1\nadded user 2\nediting user 1\nupdated user 1\ndeleted user 2\n"));
        assert!(text.contains("Ada Lovelace"));
        assert!(!text.contains("Grace"));
        assert!(!text.contains("editing: user"));
    }

    #[test]
    fn test_blocked_submit_shows_touched_errors() {
        let (text, failed) = replay(
            r#"
- fill: { name: Ada, email: ada@example, phone: "123" }
- touch: [email]
- submit
"#,
            &RegistryConfig::default(),
        );

        assert_eq!(failed, 1);
        assert!(text.contains("submit blocked: 2 invalid field(s)\n  email: Email is not valid\n"));
        assert!(!text.contains("phone: Phone must"));
        assert!(text.contains("No users registered yet."));
    }

    #[test]
    fn test_strict_delete_of_unknown_id_fails() {
        let strict = RegistryConfig::default().with_missing_id(MissingIdPolicy::Reject);
        let (text, failed) = replay("- delete: 9\n", &strict);

        assert_eq!(failed, 1);
        assert!(text.contains("delete failed: User not found: 9"));
    }

    #[test]
    fn test_lenient_delete_of_unknown_id_succeeds() {
        let (_text, failed) = replay("- delete: 9\n", &RegistryConfig::default());
        assert_eq!(failed, 0);
    }

    #[test]
    fn test_edit_unlisted_user_fails() {
        let (text, failed) = replay("- edit: 4\n", &RegistryConfig::default());
        assert_eq!(failed, 1);
        assert!(text.contains("edit failed: user 4 is not listed"));
    }

    #[test]
    fn test_list_shows_edit_state() {
        let (text, _) = replay(
            r#"
- add: { name: Ada, email: ada@example.com, phone: "1234567890" }
- edit: 1
- list
"#,
            &RegistryConfig::default(),
        );
        assert!(text.contains("editing: user 1"));
    }
}
