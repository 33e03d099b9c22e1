use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::entry::{CreateEntryRequest, EntryDetail, EntryFilter, UpdateEntryRequest},
    models::Entry,
};
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/entries",
    params(EntryFilter),
    responses(
        (status = 200, description = "Entries with swimmer, event and meet names", body = Vec<EntryDetail>)
    ),
    tag = "entries"
)]
pub async fn list_entries(
    State(state): State<AppState>,
    Query(filter): Query<EntryFilter>,
) -> Result<Json<Vec<EntryDetail>>, WebError> {
    let entries = services::list_entries(state.store(), &filter).await?;

    Ok(Json(entries))
}

#[utoipa::path(
    get,
    path = "/api/entries/{id}",
    params(
        ("id" = Uuid, Path, description = "Entry id")
    ),
    responses(
        (status = 200, description = "Entry found", body = Entry),
        (status = 404, description = "Entry not found")
    ),
    tag = "entries"
)]
pub async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Entry>, WebError> {
    let entry = services::get_entry(state.store(), id).await?;

    Ok(Json(entry))
}

#[utoipa::path(
    post,
    path = "/api/entries",
    request_body = CreateEntryRequest,
    responses(
        (status = 201, description = "Entry registered as pending", body = Entry),
        (status = 400, description = "Invalid seed time"),
        (status = 404, description = "Swimmer, event or meet not found"),
        (status = 409, description = "Swimmer already entered for this event at this meet")
    ),
    tag = "entries"
)]
pub async fn create_entry(
    State(state): State<AppState>,
    Json(req): Json<CreateEntryRequest>,
) -> Result<Response, WebError> {
    let entry = services::create_entry(state.store(), &req).await?;

    Ok((StatusCode::CREATED, Json(entry)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/entries/{id}",
    params(
        ("id" = Uuid, Path, description = "Entry id")
    ),
    request_body = UpdateEntryRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Entry updated", body = Entry),
        (status = 400, description = "Validation error or transition not allowed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Entry not found"),
        (status = 409, description = "Entry changed concurrently")
    ),
    tag = "entries"
)]
pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateEntryRequest>,
) -> Result<Json<Entry>, WebError> {
    req.validate()?;

    let entry = services::update_entry(state.store(), id, &req).await?;

    Ok(Json(entry))
}

#[utoipa::path(
    delete,
    path = "/api/entries/{id}",
    params(
        ("id" = Uuid, Path, description = "Entry id")
    ),
    responses(
        (status = 204, description = "Entry withdrawn"),
        (status = 404, description = "Entry not found")
    ),
    tag = "entries"
)]
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, WebError> {
    services::delete_entry(state.store(), id).await?;

    Ok(StatusCode::NO_CONTENT)
}
