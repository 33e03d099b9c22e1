use axum::extract::Multipart;
use storage::{
    RecordStore,
    dto::import::ImportReport,
    dto::result::{ResultFilter, ResultView, SubmitResultRequest, SubmittedResult},
    services::result_ingestion,
};
use tokio_util::sync::CancellationToken;

use crate::error::WebError;

/// Multipart field carrying the result sheet
pub const UPLOAD_FIELD: &str = "file";

pub async fn list_results(
    store: &dyn RecordStore,
    filter: &ResultFilter,
) -> storage::error::Result<Vec<ResultView>> {
    result_ingestion::list_results(store, filter).await
}

/// Record a single result
pub async fn submit_result(
    store: &dyn RecordStore,
    request: &SubmitResultRequest,
) -> storage::error::Result<SubmittedResult> {
    result_ingestion::submit_result(store, request).await
}

/// Read the uploaded sheet and import it.
///
/// The import stops early when `cancel` fires; rows already stored stay.
pub async fn import_upload(
    store: &dyn RecordStore,
    mut multipart: Multipart,
    cancel: &CancellationToken,
) -> Result<ImportReport, WebError> {
    let mut sheet = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| WebError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| WebError::BadRequest(format!("Failed to read uploaded file: {}", e)))?;

        tracing::info!(
            file = file_name.as_deref().unwrap_or("<unnamed>"),
            bytes = data.len(),
            "Result sheet uploaded"
        );
        sheet = Some(data);
        break;
    }

    let sheet = sheet.ok_or_else(|| {
        WebError::BadRequest(format!("Missing '{}' field in multipart body", UPLOAD_FIELD))
    })?;

    let report = result_ingestion::import_csv(store, &sheet, cancel).await?;
    Ok(report)
}
