//! Integration tests for the add/edit/delete workflow.
//!
//! These tests drive the form and list controllers against one shared store,
//! the same way the UI wires them together.

use user_registry::{MissingIdPolicy, RegistryConfig, SubmitError, Submitted};
use user_registry_core::{Field, UserId, ValidationError};
use user_registry_integration_tests::{TestContext, fields};

// =============================================================================
// Add
// =============================================================================

#[test]
fn test_submit_adds_user_to_list() {
    let ctx = TestContext::new();
    ctx.fill("Ada", "a@b.co", "1234567890");

    let submitted = ctx.form.submit().expect("valid form");

    assert!(matches!(submitted, Submitted::Added(ref u) if u.id == UserId::new(1)));
    let rows = ctx.list.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows.first().map(|r| r.name.as_str()), Some("Ada"));
}

#[test]
fn test_second_add_gets_next_id() {
    let ctx = TestContext::new();
    let first = ctx.store.add_user(fields("Ada")).expect("add");
    let second = ctx.store.add_user(fields("Grace")).expect("add");

    assert_eq!(first.id, UserId::new(1));
    assert_eq!(second.id, UserId::new(2));
}

#[test]
fn test_ids_are_unique_after_delete_and_add() {
    let ctx = TestContext::new();
    let ada = ctx.store.add_user(fields("Ada")).expect("add");
    ctx.list.delete(ada.id).expect("delete");

    let grace = ctx.store.add_user(fields("Grace")).expect("add");

    assert_ne!(grace.id, ada.id);
    assert_eq!(grace.id, UserId::new(2));
}

// =============================================================================
// Validation gating
// =============================================================================

#[test]
fn test_invalid_form_blocks_submit() {
    let ctx = TestContext::new();
    ctx.fill("Ada", "a.b@c", "12-345+67890");

    assert!(!ctx.form.is_valid());
    let err = ctx.form.submit().expect_err("invalid form");

    let errors = match err {
        SubmitError::Invalid(errors) => errors,
        other => panic!("expected Invalid, got {other:?}"),
    };
    assert_eq!(errors.get(Field::Email), Some(ValidationError::InvalidEmail));
    assert_eq!(errors.get(Field::Phone), Some(ValidationError::InvalidFormat));
    assert!(ctx.list.is_empty());
}

#[test]
fn test_messages_follow_touched_flags() {
    let ctx = TestContext::new();
    ctx.fill("", "", "123456789");

    assert_eq!(ctx.form.visible_error(Field::Phone), None);

    ctx.form.touch(Field::Phone);
    ctx.form.touch(Field::Name);

    assert_eq!(
        ctx.form.visible_error(Field::Phone).as_deref(),
        Some("Phone must have at least 10 digits")
    );
    assert_eq!(
        ctx.form.visible_error(Field::Name).as_deref(),
        Some("Name is required")
    );
    assert_eq!(ctx.form.visible_error(Field::Email), None);
}

// =============================================================================
// Edit / cancel
// =============================================================================

#[test]
fn test_edit_flow_updates_in_place() {
    let ctx = TestContext::new();
    let ada = ctx.store.add_user(fields("Ada")).expect("add");
    ctx.store.add_user(fields("Grace")).expect("add");
    ctx.store.add_user(fields("Linus")).expect("add");

    assert!(ctx.list.edit(ada.id));
    assert!(ctx.form.is_editing());
    assert_eq!(ctx.form.value(Field::Name), "Ada");

    ctx.form.set_field(Field::Name, "Ada Lovelace");
    ctx.form.submit().expect("valid form");

    let users = ctx.list.users();
    let names: Vec<_> = users.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["Ada Lovelace", "Grace", "Linus"]);
    assert_eq!(users.first().map(|u| u.created_at), Some(ada.created_at));
    assert!(!ctx.form.is_editing());
    assert_eq!(ctx.store.editing_selection(), None);
}

#[test]
fn test_cancel_discards_changes() {
    let ctx = TestContext::new();
    let ada = ctx.store.add_user(fields("Ada")).expect("add");
    ctx.list.edit(ada.id);
    ctx.form.set_field(Field::Name, "Changed");

    ctx.form.cancel();

    assert!(!ctx.form.is_editing());
    assert_eq!(ctx.form.value(Field::Name), "");
    assert_eq!(ctx.store.find(ada.id).map(|u| u.name), Some("Ada".to_owned()));
}

#[test]
fn test_switching_selection_reloads_form() {
    let ctx = TestContext::new();
    let ada = ctx.store.add_user(fields("Ada")).expect("add");
    let grace = ctx.store.add_user(fields("Grace")).expect("add");

    ctx.list.edit(ada.id);
    ctx.list.edit(grace.id);

    assert_eq!(ctx.form.editing_user().map(|u| u.id), Some(grace.id));
    assert_eq!(ctx.form.value(Field::Email), "grace@example.com");
}

// =============================================================================
// Missing IDs
// =============================================================================

#[test]
fn test_delete_unknown_id_keeps_snapshot() {
    let ctx = TestContext::new();
    ctx.store.add_user(fields("Ada")).expect("add");
    let before = ctx.list.users();

    ctx.list.delete(UserId::new(99)).expect("lenient delete");

    assert_eq!(ctx.list.users(), before);
}

#[test]
fn test_strict_policy_surfaces_missing_ids() {
    let config = RegistryConfig::default().with_missing_id(MissingIdPolicy::Reject);
    let ctx = TestContext::with_config(&config);

    let err = ctx.list.delete(UserId::new(99)).expect_err("strict delete");

    assert_eq!(err.to_string(), "User not found: 99");
}
