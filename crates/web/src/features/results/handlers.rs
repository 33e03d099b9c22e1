use axum::{
    Json,
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::import::ImportReport,
    dto::result::{ResultFilter, ResultView, SubmitResultRequest, SubmittedResult},
};

use crate::AppState;
use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/results",
    params(ResultFilter),
    responses(
        (status = 200, description = "Results in recording order", body = Vec<ResultView>)
    ),
    tag = "results"
)]
pub async fn list_results(
    State(state): State<AppState>,
    Query(filter): Query<ResultFilter>,
) -> Result<Json<Vec<ResultView>>, WebError> {
    let results = services::list_results(state.store(), &filter).await?;

    Ok(Json(results))
}

#[utoipa::path(
    post,
    path = "/api/results",
    request_body = SubmitResultRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Result recorded", body = SubmittedResult),
        (status = 400, description = "Timing is not a positive number of seconds"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Swimmer, event or meet not found")
    ),
    tag = "results"
)]
pub async fn submit_result(
    State(state): State<AppState>,
    Json(req): Json<SubmitResultRequest>,
) -> Result<Response, WebError> {
    let result = services::submit_result(state.store(), &req).await?;

    Ok((StatusCode::CREATED, Json(result)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/upload-results",
    request_body(
        content_type = "multipart/form-data",
        description = "CSV sheet in field `file` with header swimmer_name,event_name,meet_name,timing"
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Import finished; failed rows are listed in the report", body = ImportReport),
        (status = 400, description = "Missing file field, unreadable sheet or missing columns"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "results"
)]
pub async fn upload_results(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ImportReport>, WebError> {
    let cancel = state.shutdown.child_token();
    let report = services::import_upload(state.store(), multipart, &cancel).await?;

    Ok(Json(report))
}
