//! Integration tests for the store's observable streams.
//!
//! Subscribers see the current value immediately, then one full snapshot per
//! mutation, until their subscription is dropped.

use std::cell::RefCell;
use std::rc::Rc;

use user_registry::UserStore;
use user_registry_core::UserId;
use user_registry_integration_tests::fields;

fn record_ids(store: &UserStore) -> (Rc<RefCell<Vec<Vec<u64>>>>, user_registry::Subscription) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let subscription = store.observe_users().subscribe(move |users| {
        sink.borrow_mut()
            .push(users.iter().map(|u| u.id.as_u64()).collect());
    });
    (seen, subscription)
}

// =============================================================================
// User snapshots
// =============================================================================

#[test]
fn test_new_subscriber_gets_current_snapshot() {
    let store = UserStore::default();
    store.add_user(fields("Ada")).expect("add");
    store.add_user(fields("Grace")).expect("add");

    let (seen, _sub) = record_ids(&store);

    assert_eq!(*seen.borrow(), vec![vec![1, 2]]);
}

#[test]
fn test_one_snapshot_per_mutation() {
    let store = UserStore::default();
    let (seen, _sub) = record_ids(&store);

    let ada = store.add_user(fields("Ada")).expect("add");
    store.add_user(fields("Grace")).expect("add");
    store.update_user(ada.with_fields(fields("Lovelace"))).expect("update");
    store.delete_user(UserId::new(7)).expect("lenient delete");
    store.delete_user(ada.id).expect("delete");

    assert_eq!(
        *seen.borrow(),
        vec![
            vec![],
            vec![1],
            vec![1, 2],
            vec![1, 2],
            vec![1, 2],
            vec![2],
        ]
    );
}

#[test]
fn test_independent_subscribers() {
    let store = UserStore::default();
    let (first, first_sub) = record_ids(&store);
    store.add_user(fields("Ada")).expect("add");

    let (second, _second_sub) = record_ids(&store);
    drop(first_sub);
    store.add_user(fields("Grace")).expect("add");

    assert_eq!(*first.borrow(), vec![vec![], vec![1]]);
    assert_eq!(*second.borrow(), vec![vec![1], vec![1, 2]]);
}

// =============================================================================
// Editing selection
// =============================================================================

#[test]
fn test_selection_stream_after_update() {
    let store = UserStore::default();
    let ada = store.add_user(fields("Ada")).expect("add");

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let _sub = store
        .observe_editing_selection()
        .subscribe(move |user| sink.borrow_mut().push(user.as_ref().map(|u| u.id)));

    store.set_editing_selection(Some(ada.clone()));
    store.update_user(ada.with_fields(fields("Lovelace"))).expect("update");

    assert_eq!(*seen.borrow(), vec![None, Some(ada.id), None]);
}

#[test]
fn test_snapshot_serializes_to_json() {
    let store = UserStore::default();
    store.add_user(fields("Ada Lovelace")).expect("add");

    let json = serde_json::to_value(store.users()).expect("serialize");

    assert_eq!(json[0]["id"], 1);
    assert_eq!(json[0]["email"], "ada.lovelace@example.com");
    assert_eq!(json[0]["phone"], "+1 202-555-0147");
}
