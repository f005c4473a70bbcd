//! Record Store Invariant Tests
//!
//! Behaviour of the SQLite contact store:
//! - Ids are assigned once, increase monotonically and are never reused
//! - Fetch of a missing or deleted id is NotFound
//! - Email is unique across rows, on create and on update
//! - Update touches name/email only
//! - Delete is not idempotent
//! - Listing is ordered by id and bounded by offset/limit

use contacts_api::store::{
    Contact, ContactFilter, ContactStore, NewContact, SqliteContactStore, StoreError,
};

// =============================================================================
// Helper Functions
// =============================================================================

async fn empty_store() -> SqliteContactStore {
    SqliteContactStore::in_memory()
        .await
        .expect("failed to open in-memory store")
}

async fn store_with(n: usize) -> (SqliteContactStore, Vec<Contact>) {
    let store = empty_store().await;
    let mut created = Vec::with_capacity(n);
    for i in 0..n {
        let contact = store
            .create(NewContact::new(
                format!("User {}", i),
                format!("user{}@example.com", i),
            ))
            .await
            .expect("create failed");
        created.push(contact);
    }
    (store, created)
}

// =============================================================================
// Create / Fetch
// =============================================================================

/// Sequential creates on an empty table yield 1, 2, 3, ...
#[tokio::test]
async fn test_ids_are_monotonic_from_one() {
    let (_store, created) = store_with(5).await;
    let ids: Vec<i64> = created.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

/// Create then fetch returns the same name and email.
#[tokio::test]
async fn test_create_fetch_round_trip() {
    let store = empty_store().await;
    let created = store
        .create(NewContact::new("test user", "test@gmail.com"))
        .await
        .unwrap();

    let fetched = store.fetch_by_id(created.id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.name, "test user");
    assert_eq!(fetched.email, "test@gmail.com");
}

/// An id that was never created is NotFound.
#[tokio::test]
async fn test_fetch_unknown_id_is_not_found() {
    let store = empty_store().await;
    let err = store.fetch_by_id(45).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { id: 45 }));
}

/// A second contact with the same email is rejected and nothing is stored.
#[tokio::test]
async fn test_create_duplicate_email() {
    let store = empty_store().await;
    store
        .create(NewContact::new("First", "same@example.com"))
        .await
        .unwrap();

    let err = store
        .create(NewContact::new("Second", "same@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::DuplicateEmail { ref email } if email == "same@example.com"));
    assert_eq!(store.count().await.unwrap(), 1);
}

/// Ids are not reused after a delete.
#[tokio::test]
async fn test_ids_not_reused_after_delete() {
    let (store, created) = store_with(2).await;
    store.delete(created[1].id).await.unwrap();

    let next = store
        .create(NewContact::new("Later", "later@example.com"))
        .await
        .unwrap();
    assert_eq!(next.id, 3);
}

// =============================================================================
// Update
// =============================================================================

/// Update changes name and email and keeps the id.
#[tokio::test]
async fn test_update_keeps_id() {
    let (store, created) = store_with(1).await;
    let original = &created[0];

    let updated = store
        .update(
            original.id,
            NewContact::new("test user - updated name", "test1@gmail.com"),
        )
        .await
        .unwrap();

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.name, "test user - updated name");
    assert_eq!(updated.email, "test1@gmail.com");
    assert_eq!(store.fetch_by_id(original.id).await.unwrap(), updated);
}

/// Keeping your own email on update is not a conflict.
#[tokio::test]
async fn test_update_same_email_is_allowed() {
    let (store, created) = store_with(1).await;
    let updated = store
        .update(
            created[0].id,
            NewContact::new("Renamed", created[0].email.clone()),
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Renamed");
}

/// Taking another row's email fails and leaves both rows unchanged.
#[tokio::test]
async fn test_update_to_taken_email_changes_nothing() {
    let (store, created) = store_with(2).await;

    let err = store
        .update(
            created[0].id,
            NewContact::new("Thief", created[1].email.clone()),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateEmail { .. }));

    assert_eq!(store.fetch_by_id(created[0].id).await.unwrap(), created[0]);
    assert_eq!(store.fetch_by_id(created[1].id).await.unwrap(), created[1]);
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let store = empty_store().await;
    let err = store
        .update(9, NewContact::new("Nobody", "nobody@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { id: 9 }));
    assert_eq!(store.count().await.unwrap(), 0);
}

// =============================================================================
// Delete
// =============================================================================

/// Delete then fetch is NotFound.
#[tokio::test]
async fn test_delete_then_fetch() {
    let (store, created) = store_with(1).await;
    store.delete(created[0].id).await.unwrap();

    let err = store.fetch_by_id(created[0].id).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

/// Deleting a missing id, or deleting twice, is NotFound.
#[tokio::test]
async fn test_delete_is_not_idempotent() {
    let (store, created) = store_with(1).await;

    assert!(matches!(
        store.delete(99).await,
        Err(StoreError::NotFound { id: 99 })
    ));

    store.delete(created[0].id).await.unwrap();
    assert!(matches!(
        store.delete(created[0].id).await,
        Err(StoreError::NotFound { .. })
    ));
}

// =============================================================================
// List / Filter
// =============================================================================

#[tokio::test]
async fn test_list_is_ordered_and_paged() {
    let (store, created) = store_with(7).await;

    let all = store.list(0, 100).await.unwrap();
    assert_eq!(all, created);

    let page = store.list(2, 3).await.unwrap();
    let ids: Vec<i64> = page.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![3, 4, 5]);

    assert!(store.list(7, 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_rejects_bad_bounds() {
    let store = empty_store().await;
    assert!(matches!(
        store.list(-1, 10).await,
        Err(StoreError::InvalidArgument(_))
    ));
    assert!(matches!(
        store.list(0, 0).await,
        Err(StoreError::InvalidArgument(_))
    ));
}

#[tokio::test]
async fn test_filter_by_name_and_email() {
    let store = empty_store().await;
    let a = store
        .create(NewContact::new("Ada", "ada@example.com"))
        .await
        .unwrap();
    let b = store
        .create(NewContact::new("Ada", "ada.l@example.com"))
        .await
        .unwrap();
    let c = store
        .create(NewContact::new("Grace", "grace@example.com"))
        .await
        .unwrap();

    let by_name = store.fetch_by_filter(ContactFilter::by_name("Ada")).await.unwrap();
    assert_eq!(by_name, vec![a.clone(), b]);

    let by_email = store
        .fetch_by_filter(ContactFilter::by_email("grace@example.com"))
        .await
        .unwrap();
    assert_eq!(by_email, vec![c]);

    let none = store
        .fetch_by_filter(ContactFilter::by_name("Nobody"))
        .await
        .unwrap();
    assert!(none.is_empty());

    // Name wins when both are given, even if the email points elsewhere.
    let both = store
        .fetch_by_filter(ContactFilter {
            name: Some("Grace".to_string()),
            email: Some(a.email.clone()),
        })
        .await
        .unwrap();
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].name, "Grace");
}

#[tokio::test]
async fn test_empty_filter_is_invalid() {
    let store = empty_store().await;
    let err = store
        .fetch_by_filter(ContactFilter::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidArgument(_)));
}

// =============================================================================
// Concurrency
// =============================================================================

/// Concurrent creates through one shared store all succeed with distinct ids.
#[tokio::test]
async fn test_concurrent_creates() {
    let store = std::sync::Arc::new(empty_store().await);

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .create(NewContact::new(
                        format!("Task {}", i),
                        format!("task{}@example.com", i),
                    ))
                    .await
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap().id);
    }
    ids.sort_unstable();
    ids.dedup();

    assert_eq!(ids.len(), 20);
    assert_eq!(store.count().await.unwrap(), 20);
}
