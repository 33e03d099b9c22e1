mod common;

use std::sync::Arc;

use storage::dto::entry::{CreateEntryRequest, EntryFilter, UpdateEntryRequest};
use storage::error::StorageError;
use storage::models::EntryStatus;
use storage::services::entry_lifecycle;
use storage::{MemoryStore, RecordStore};
use uuid::Uuid;

struct Setup {
    store: MemoryStore,
    request: CreateEntryRequest,
}

async fn setup() -> Setup {
    let store = MemoryStore::new();
    let swimmer = common::swimmer(&store, "Ada Lovelace", Some("S8")).await;
    let event = common::event(&store, "100m Freestyle").await;
    let meet = common::meet(&store, "Spring Open", common::date(2026, 3, 14)).await;

    Setup {
        store,
        request: CreateEntryRequest {
            swimmer_id: swimmer.id,
            event_id: event.id,
            meet_id: meet.id,
            entry_time: Some(63.4),
        },
    }
}

#[tokio::test]
async fn test_new_entry_is_pending_and_dated_today() {
    let s = setup().await;

    let entry = entry_lifecycle::create_entry(&s.store, &s.request)
        .await
        .unwrap();

    assert_eq!(entry.status, EntryStatus::Pending);
    assert_eq!(entry.entry_date, chrono::Utc::now().date_naive());
    assert_eq!(entry.entry_time, Some(63.4));
    assert_eq!(entry.heat, None);
}

#[tokio::test]
async fn test_second_entry_for_same_triple_conflicts() {
    let s = setup().await;
    entry_lifecycle::create_entry(&s.store, &s.request)
        .await
        .unwrap();

    let err = entry_lifecycle::create_entry(&s.store, &s.request)
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::Conflict(_)));
    let entries = s.store.list_entries(&EntryFilter::default()).await.unwrap();
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn test_entry_for_missing_meet_is_not_found() {
    let s = setup().await;
    let request = CreateEntryRequest {
        meet_id: Uuid::new_v4(),
        ..s.request.clone()
    };

    let err = entry_lifecycle::create_entry(&s.store, &request)
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::NotFound { entity: "meet", .. }));
}

#[tokio::test]
async fn test_non_positive_seed_time_is_rejected() {
    let s = setup().await;
    let request = CreateEntryRequest {
        entry_time: Some(0.0),
        ..s.request.clone()
    };

    let err = entry_lifecycle::create_entry(&s.store, &request)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StorageError::InvalidValue {
            field: "entry_time",
            ..
        }
    ));
}

#[tokio::test]
async fn test_status_follows_transition_table() {
    let s = setup().await;
    let entry = entry_lifecycle::create_entry(&s.store, &s.request)
        .await
        .unwrap();

    let approved = entry_lifecycle::set_status(&s.store, entry.id, EntryStatus::Approved)
        .await
        .unwrap();
    assert_eq!(approved.status, EntryStatus::Approved);

    let reverted = entry_lifecycle::set_status(&s.store, entry.id, EntryStatus::Pending)
        .await
        .unwrap();
    assert_eq!(reverted.status, EntryStatus::Pending);

    let rejected = entry_lifecycle::set_status(&s.store, entry.id, EntryStatus::Rejected)
        .await
        .unwrap();
    assert_eq!(rejected.status, EntryStatus::Rejected);
}

#[tokio::test]
async fn test_invalid_transition_leaves_entry_untouched() {
    let s = setup().await;
    let entry = entry_lifecycle::create_entry(&s.store, &s.request)
        .await
        .unwrap();
    entry_lifecycle::set_status(&s.store, entry.id, EntryStatus::Rejected)
        .await
        .unwrap();

    let err = entry_lifecycle::set_status(&s.store, entry.id, EntryStatus::Approved)
        .await
        .unwrap_err();

    match err {
        StorageError::InvalidTransition { entry_id, from, to } => {
            assert_eq!(entry_id, entry.id);
            assert_eq!(from, EntryStatus::Rejected);
            assert_eq!(to, EntryStatus::Approved);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let stored = entry_lifecycle::get_entry(&s.store, entry.id).await.unwrap();
    assert_eq!(stored.status, EntryStatus::Rejected);
}

#[tokio::test]
async fn test_status_of_missing_entry_is_not_found() {
    let s = setup().await;

    let err = entry_lifecycle::set_status(&s.store, Uuid::new_v4(), EntryStatus::Approved)
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::NotFound { entity: "entry", .. }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_approvals_succeed_once() {
    let s = setup().await;
    let entry = entry_lifecycle::create_entry(&s.store, &s.request)
        .await
        .unwrap();
    let entry_id = entry.id;
    let store = Arc::new(s.store);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                entry_lifecycle::set_status(store.as_ref(), entry_id, EntryStatus::Approved).await
            })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(StorageError::InvalidTransition { .. } | StorageError::Conflict(_)) => {}
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(successes, 1);
    let stored = entry_lifecycle::get_entry(store.as_ref(), entry_id)
        .await
        .unwrap();
    assert_eq!(stored.status, EntryStatus::Approved);
}

#[tokio::test]
async fn test_status_write_lost_once_is_retried() {
    let s = setup().await;
    let entry = entry_lifecycle::create_entry(&s.store, &s.request)
        .await
        .unwrap();
    let store = common::ScriptedStore::new(s.store).losing_status_writes(1);

    let approved = entry_lifecycle::set_status(&store, entry.id, EntryStatus::Approved)
        .await
        .unwrap();

    assert_eq!(approved.status, EntryStatus::Approved);
    let stored = entry_lifecycle::get_entry(&store, entry.id).await.unwrap();
    assert_eq!(stored.status, EntryStatus::Approved);
}

#[tokio::test]
async fn test_status_write_lost_twice_is_a_conflict() {
    let s = setup().await;
    let entry = entry_lifecycle::create_entry(&s.store, &s.request)
        .await
        .unwrap();
    let store = common::ScriptedStore::new(s.store).losing_status_writes(2);

    let err = entry_lifecycle::set_status(&store, entry.id, EntryStatus::Approved)
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::Conflict(_)), "{err:?}");
    let stored = entry_lifecycle::get_entry(&store, entry.id).await.unwrap();
    assert_eq!(stored.status, EntryStatus::Pending);
}

#[tokio::test]
async fn test_update_assigns_heat_and_lane() {
    let s = setup().await;
    let entry = entry_lifecycle::create_entry(&s.store, &s.request)
        .await
        .unwrap();

    let updated = entry_lifecycle::update_entry(
        &s.store,
        entry.id,
        &UpdateEntryRequest {
            status: Some(EntryStatus::Approved),
            heat: Some(2),
            lane: Some(4),
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.status, EntryStatus::Approved);
    assert_eq!(updated.heat, Some(2));
    assert_eq!(updated.lane, Some(4));

    let lane_only = entry_lifecycle::update_entry(
        &s.store,
        entry.id,
        &UpdateEntryRequest {
            lane: Some(5),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(lane_only.heat, Some(2));
    assert_eq!(lane_only.lane, Some(5));
}

#[tokio::test]
async fn test_empty_update_is_invalid() {
    let s = setup().await;
    let entry = entry_lifecycle::create_entry(&s.store, &s.request)
        .await
        .unwrap();

    let err = entry_lifecycle::update_entry(&s.store, entry.id, &UpdateEntryRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::InvalidValue { field: "body", .. }));
}

#[tokio::test]
async fn test_delete_from_any_status_then_not_found() {
    let s = setup().await;
    let entry = entry_lifecycle::create_entry(&s.store, &s.request)
        .await
        .unwrap();
    entry_lifecycle::set_status(&s.store, entry.id, EntryStatus::Rejected)
        .await
        .unwrap();

    entry_lifecycle::delete_entry(&s.store, entry.id)
        .await
        .unwrap();

    let err = entry_lifecycle::delete_entry(&s.store, entry.id)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));

    // A withdrawn swimmer may enter again.
    entry_lifecycle::create_entry(&s.store, &s.request)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_detailed_listing_filters_and_names() {
    let s = setup().await;
    let entry = entry_lifecycle::create_entry(&s.store, &s.request)
        .await
        .unwrap();
    let other_event = common::event(&s.store, "50m Butterfly").await;
    entry_lifecycle::create_entry(
        &s.store,
        &CreateEntryRequest {
            event_id: other_event.id,
            ..s.request.clone()
        },
    )
    .await
    .unwrap();
    entry_lifecycle::set_status(&s.store, entry.id, EntryStatus::Approved)
        .await
        .unwrap();

    let all = entry_lifecycle::list_entries_detailed(&s.store, &EntryFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].entry.id, entry.id);

    let approved = entry_lifecycle::list_entries_detailed(
        &s.store,
        &EntryFilter {
            status: Some(EntryStatus::Approved),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].swimmer_name, "Ada Lovelace");
    assert_eq!(approved[0].event_name, "100m Freestyle");
    assert_eq!(approved[0].meet_name, "Spring Open");
    assert!(approved[0].athlete_id.starts_with("ATH-"));
}
