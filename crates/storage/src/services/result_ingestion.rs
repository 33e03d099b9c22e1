//! Recording race results, one at a time or from a result sheet.

use std::collections::HashMap;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::ranking::meet_placings;
use super::results_csv::{BatchRow, ResultBatch, parse_results_csv};
use super::{load_references, validate_timing};
use crate::dto::import::{ImportReport, ImportRow, ImportRowError};
use crate::dto::result::{ResultFilter, ResultView, SubmitResultRequest, SubmittedResult};
use crate::error::{Result, StorageError};
use crate::models::RaceResult;
use crate::repository::RecordStore;

/// Record a single swim. Repeat swims are kept as separate results.
pub async fn submit_result(
    store: &dyn RecordStore,
    request: &SubmitResultRequest,
) -> Result<SubmittedResult> {
    validate_timing("timing", request.timing)?;
    let refs = load_references(
        store,
        request.swimmer_id,
        request.event_id,
        request.meet_id,
    )
    .await?;

    let result = store
        .insert_result(RaceResult {
            id: Uuid::new_v4(),
            swimmer_id: request.swimmer_id,
            event_id: request.event_id,
            meet_id: request.meet_id,
            timing: request.timing,
            recorded_at: chrono::Utc::now().naive_utc(),
        })
        .await?;

    let is_personal_best = is_personal_best(store, &result).await?;

    info!(
        result_id = %result.id,
        athlete_id = %refs.swimmer.athlete_id,
        event = %refs.event.name,
        timing = result.timing,
        is_personal_best,
        "Result recorded"
    );

    Ok(SubmittedResult {
        result,
        is_personal_best,
    })
}

async fn is_personal_best(store: &dyn RecordStore, result: &RaceResult) -> Result<bool> {
    let filter = ResultFilter {
        event_id: Some(result.event_id),
        swimmer_id: Some(result.swimmer_id),
        meet_id: None,
    };

    let history = store.list_results(&filter).await?;
    Ok(history.iter().all(|other| result.timing <= other.timing))
}

/// Stored results in recording order, each with its placing at the meet.
pub async fn list_results(store: &dyn RecordStore, filter: &ResultFilter) -> Result<Vec<ResultView>> {
    let results = store.list_results(filter).await?;
    let placings = meet_placings(store, &results).await?;

    Ok(results
        .into_iter()
        .map(|result| ResultView {
            rank: placings.get(&result.id).copied(),
            result,
        })
        .collect())
}

/// Parse a result sheet and import every row.
///
/// Only a structurally broken sheet fails the call; bad rows end up in the
/// report.
pub async fn import_csv(
    store: &dyn RecordStore,
    data: &[u8],
    cancel: &CancellationToken,
) -> Result<ImportReport> {
    let batch = parse_results_csv(data)?;
    Ok(import_batch(store, batch, cancel).await)
}

/// Import rows one by one. A failing row is reported and skipped.
///
/// Cancellation is checked before each row. Rows imported before that point
/// stay committed and the report is flagged as cancelled.
pub async fn import_batch(
    store: &dyn RecordStore,
    batch: ResultBatch,
    cancel: &CancellationToken,
) -> ImportReport {
    let total = batch.len();
    let mut resolver = NameResolver::new(store);
    let mut report = ImportReport::default();

    for batch_row in batch.rows {
        if cancel.is_cancelled() {
            warn!(
                processed = report.imported + report.failed,
                total, "Result import cancelled"
            );
            report.cancelled = true;
            break;
        }

        match batch_row {
            BatchRow::Valid(row) => match import_row(store, &mut resolver, &row).await {
                Ok(result) => {
                    debug!(row = row.row, result_id = %result.id, "Row imported");
                    report.record_success();
                }
                Err(e) => {
                    debug!(row = row.row, error = %e, "Row rejected");
                    report.record_failure(ImportRowError::from_storage(row.row, &e));
                }
            },
            BatchRow::Invalid(error) => {
                debug!(row = error.row, reason = %error.reason, "Row rejected");
                report.record_failure(error);
            }
        }
    }

    info!(
        imported = report.imported,
        failed = report.failed,
        cancelled = report.cancelled,
        "Result import finished"
    );

    report.finish()
}

async fn import_row(
    store: &dyn RecordStore,
    resolver: &mut NameResolver<'_>,
    row: &ImportRow,
) -> Result<RaceResult> {
    validate_timing("timing", row.timing)?;

    let swimmer_id = resolver.resolve(Reference::Swimmer, &row.swimmer_name).await?;
    let event_id = resolver.resolve(Reference::Event, &row.event_name).await?;
    let meet_id = resolver.resolve(Reference::Meet, &row.meet_name).await?;

    store
        .insert_result(RaceResult {
            id: Uuid::new_v4(),
            swimmer_id,
            event_id,
            meet_id,
            timing: row.timing,
            recorded_at: chrono::Utc::now().naive_utc(),
        })
        .await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Reference {
    Swimmer,
    Event,
    Meet,
}

impl Reference {
    fn entity(self) -> &'static str {
        match self {
            Self::Swimmer => "swimmer",
            Self::Event => "event",
            Self::Meet => "meet",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Resolution {
    Found(Uuid),
    Missing,
    Ambiguous(usize),
}

/// Exact, case-sensitive name lookups, memoised for the length of one batch.
struct NameResolver<'a> {
    store: &'a dyn RecordStore,
    cache: HashMap<(Reference, String), Resolution>,
}

impl<'a> NameResolver<'a> {
    fn new(store: &'a dyn RecordStore) -> Self {
        Self {
            store,
            cache: HashMap::new(),
        }
    }

    async fn resolve(&mut self, kind: Reference, name: &str) -> Result<Uuid> {
        let key = (kind, name.to_string());
        let resolution = match self.cache.get(&key) {
            Some(resolution) => *resolution,
            None => {
                let resolution = self.lookup(kind, name).await?;
                self.cache.insert(key, resolution);
                resolution
            }
        };

        match resolution {
            Resolution::Found(id) => Ok(id),
            Resolution::Missing => Err(StorageError::not_found(
                kind.entity(),
                format!("named '{}'", name),
            )),
            Resolution::Ambiguous(count) => Err(StorageError::AmbiguousReference {
                entity: kind.entity(),
                name: name.to_string(),
                count,
            }),
        }
    }

    async fn lookup(&self, kind: Reference, name: &str) -> Result<Resolution> {
        let ids: Vec<Uuid> = match kind {
            Reference::Swimmer => self
                .store
                .find_swimmers_by_name(name)
                .await?
                .into_iter()
                .map(|s| s.id)
                .collect(),
            Reference::Event => self
                .store
                .find_events_by_name(name)
                .await?
                .into_iter()
                .map(|e| e.id)
                .collect(),
            Reference::Meet => self
                .store
                .find_meets_by_name(name)
                .await?
                .into_iter()
                .map(|m| m.id)
                .collect(),
        };

        Ok(match ids.as_slice() {
            [] => Resolution::Missing,
            [id] => Resolution::Found(*id),
            many => Resolution::Ambiguous(many.len()),
        })
    }
}
