mod common;

use storage::dto::import::{ImportRow, RowFailureKind};
use storage::dto::result::{ResultFilter, SubmitResultRequest};
use storage::error::StorageError;
use storage::services::results_csv::ResultBatch;
use storage::services::{performance, result_ingestion};
use storage::{MemoryStore, RecordStore};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

async fn seeded() -> MemoryStore {
    let store = MemoryStore::new();
    common::swimmer(&store, "Ada", Some("S8")).await;
    common::swimmer(&store, "Grace", None).await;
    common::event(&store, "100m Freestyle").await;
    common::meet(&store, "Spring Open", common::date(2026, 3, 14)).await;
    store
}

fn row(row: usize, swimmer: &str, meet: &str, timing: f64) -> ImportRow {
    ImportRow {
        row,
        swimmer_name: swimmer.to_string(),
        event_name: "100m Freestyle".to_string(),
        meet_name: meet.to_string(),
        timing,
    }
}

async fn all_results(store: &MemoryStore) -> usize {
    store
        .list_results(&ResultFilter::default())
        .await
        .unwrap()
        .len()
}

#[tokio::test]
async fn test_unknown_meet_fails_only_its_row() {
    let store = seeded().await;
    let batch = ResultBatch::from(vec![
        row(1, "Ada", "Spring Open", 61.0),
        row(2, "Grace", "Spring Open", 62.0),
        row(3, "Ada", "Winter Cup", 60.0),
        row(4, "Grace", "Spring Open", 61.5),
        row(5, "Ada", "Spring Open", 60.2),
    ]);

    let report = result_ingestion::import_batch(&store, batch, &CancellationToken::new()).await;

    assert_eq!(report.imported, 4);
    assert_eq!(report.failed, 1);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].row, 3);
    assert_eq!(report.errors[0].kind, RowFailureKind::NotFound);
    assert!(report.errors[0].reason.contains("Winter Cup"));
    assert!(!report.cancelled);
    assert_eq!(report.message, "4 results added successfully, 1 rows failed");
    assert_eq!(all_results(&store).await, 4);
}

#[tokio::test]
async fn test_shared_swimmer_name_is_ambiguous() {
    let store = seeded().await;
    common::swimmer(&store, "Ada", Some("S9")).await;

    let batch = ResultBatch::from(vec![
        row(1, "Ada", "Spring Open", 61.0),
        row(2, "Grace", "Spring Open", 62.0),
    ]);
    let report = result_ingestion::import_batch(&store, batch, &CancellationToken::new()).await;

    assert_eq!(report.imported, 1);
    assert_eq!(report.errors[0].row, 1);
    assert_eq!(report.errors[0].kind, RowFailureKind::AmbiguousReference);
    assert!(report.errors[0].reason.contains("2 swimmer records"));
}

#[tokio::test]
async fn test_names_match_case_sensitively() {
    let store = seeded().await;

    let batch = ResultBatch::from(vec![row(1, "ada", "Spring Open", 61.0)]);
    let report = result_ingestion::import_batch(&store, batch, &CancellationToken::new()).await;

    assert_eq!(report.imported, 0);
    assert_eq!(report.errors[0].kind, RowFailureKind::NotFound);
}

#[tokio::test]
async fn test_cancelled_import_keeps_nothing_after_the_signal() {
    let store = seeded().await;
    let cancel = CancellationToken::new();
    cancel.cancel();

    let batch = ResultBatch::from(vec![
        row(1, "Ada", "Spring Open", 61.0),
        row(2, "Grace", "Spring Open", 62.0),
    ]);
    let report = result_ingestion::import_batch(&store, batch, &cancel).await;

    assert!(report.cancelled);
    assert_eq!(report.imported, 0);
    assert_eq!(report.failed, 0);
    assert!(report.message.starts_with("Import cancelled"));
    assert_eq!(all_results(&store).await, 0);
}

#[tokio::test]
async fn test_rows_before_cancellation_stay_committed() {
    let cancel = CancellationToken::new();
    let store = common::ScriptedStore::new(seeded().await).cancelling_after_inserts(2, cancel.clone());

    let batch = ResultBatch::from(vec![
        row(1, "Ada", "Spring Open", 61.0),
        row(2, "Grace", "Spring Open", 62.0),
        row(3, "Ada", "Spring Open", 60.5),
        row(4, "Grace", "Spring Open", 61.8),
        row(5, "Ada", "Spring Open", 60.1),
    ]);
    let report = result_ingestion::import_batch(&store, batch, &cancel).await;

    assert!(report.cancelled);
    assert_eq!(report.imported, 2);
    assert_eq!(report.failed, 0);
    assert_eq!(all_results(&store.inner).await, 2);
}

#[tokio::test]
async fn test_results_are_placed_within_their_meet() {
    let store = seeded().await;
    let winter = common::meet(&store, "Winter Cup", common::date(2026, 7, 4)).await;
    common::swimmer(&store, "Hedy", Some("S8")).await;
    let batch = ResultBatch::from(vec![
        row(1, "Ada", "Spring Open", 61.0),
        row(2, "Hedy", "Spring Open", 60.4),
        row(3, "Ada", "Spring Open", 60.9),
        row(4, "Ada", "Winter Cup", 62.3),
        row(5, "Grace", "Spring Open", 59.0),
    ]);
    let report = result_ingestion::import_batch(&store, batch, &CancellationToken::new()).await;
    assert_eq!(report.imported, 5);

    let listed = result_ingestion::list_results(&store, &ResultFilter::default())
        .await
        .unwrap();
    let ranks: Vec<(f64, Option<u32>)> = listed.iter().map(|r| (r.result.timing, r.rank)).collect();
    assert_eq!(
        ranks,
        vec![
            (61.0, None),
            (60.4, Some(1)),
            (60.9, Some(2)),
            (62.3, Some(1)),
            (59.0, Some(1)),
        ]
    );

    let ada = store.find_swimmers_by_name("Ada").await.unwrap()[0].id;
    let event = listed[0].result.event_id;
    let history = performance::performance_history(&store, ada, event)
        .await
        .unwrap();
    let placed: Vec<(Uuid, Option<u32>)> = history.iter().map(|h| (h.meet_id, h.rank)).collect();
    assert_eq!(placed.len(), 3);
    assert_eq!(placed[2], (winter.id, Some(1)));
    assert_eq!(
        history[..2].iter().filter_map(|h| h.rank).collect::<Vec<_>>(),
        vec![2]
    );
}

#[tokio::test]
async fn test_csv_sheet_reports_bad_rows_by_number() {
    let store = seeded().await;
    let sheet = "swimmer_name,event_name,meet_name,timing\n\
                 Ada,100m Freestyle,Spring Open,1:01.00\n\
                 Grace,100m Freestyle,Spring Open,-4\n\
                 Grace,200m Freestyle,Spring Open,140.0\n\
                 Grace,100m Freestyle,Spring Open,63.9\n";

    let report = result_ingestion::import_csv(&store, sheet.as_bytes(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.imported, 2);
    assert_eq!(report.failed, 2);
    let rows: Vec<(usize, RowFailureKind)> =
        report.errors.iter().map(|e| (e.row, e.kind)).collect();
    assert_eq!(
        rows,
        vec![
            (2, RowFailureKind::InvalidValue),
            (3, RowFailureKind::NotFound)
        ]
    );
}

#[tokio::test]
async fn test_csv_without_timing_column_fails_whole_import() {
    let store = seeded().await;
    let sheet = "swimmer_name,event_name,meet_name\nAda,100m Freestyle,Spring Open\n";

    let err = result_ingestion::import_csv(&store, sheet.as_bytes(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::MalformedImport(_)));
    assert_eq!(all_results(&store).await, 0);
}

#[tokio::test]
async fn test_submit_flags_personal_bests() {
    let store = seeded().await;
    let ada = store.find_swimmers_by_name("Ada").await.unwrap().remove(0);
    let event = store
        .find_events_by_name("100m Freestyle")
        .await
        .unwrap()
        .remove(0);
    let meet = store.find_meets_by_name("Spring Open").await.unwrap().remove(0);

    let request = |timing| SubmitResultRequest {
        swimmer_id: ada.id,
        event_id: event.id,
        meet_id: meet.id,
        timing,
    };

    let first = result_ingestion::submit_result(&store, &request(62.0))
        .await
        .unwrap();
    assert!(first.is_personal_best);

    let slower = result_ingestion::submit_result(&store, &request(63.0))
        .await
        .unwrap();
    assert!(!slower.is_personal_best);

    let faster = result_ingestion::submit_result(&store, &request(60.9))
        .await
        .unwrap();
    assert!(faster.is_personal_best);

    let bests = performance::personal_bests(&store, ada.id).await.unwrap();
    assert_eq!(bests.len(), 1);
    assert_eq!(bests[0].best_time, 60.9);
    assert_eq!(bests[0].meet_name, "Spring Open");
    assert_eq!(bests[0].season_year, Some(2026));

    let history = performance::performance_history(&store, ada.id, event.id)
        .await
        .unwrap();
    let timings: Vec<f64> = history.iter().map(|h| h.timing).collect();
    assert_eq!(timings, vec![62.0, 63.0, 60.9]);
}

#[tokio::test]
async fn test_submit_rejects_bad_input() {
    let store = seeded().await;
    let ada = store.find_swimmers_by_name("Ada").await.unwrap().remove(0);
    let event = store
        .find_events_by_name("100m Freestyle")
        .await
        .unwrap()
        .remove(0);

    let err = result_ingestion::submit_result(
        &store,
        &SubmitResultRequest {
            swimmer_id: ada.id,
            event_id: event.id,
            meet_id: Uuid::new_v4(),
            timing: 61.0,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, StorageError::NotFound { entity: "meet", .. }));

    let err = result_ingestion::submit_result(
        &store,
        &SubmitResultRequest {
            swimmer_id: ada.id,
            event_id: event.id,
            meet_id: Uuid::new_v4(),
            timing: 0.0,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, StorageError::InvalidValue { field: "timing", .. }));
    assert_eq!(all_results(&store).await, 0);
}
