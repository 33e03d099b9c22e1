use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::reference::CreateSwimmerRequest,
    dto::result::{PerformanceRecord, PersonalBest},
    models::Swimmer,
};
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/swimmers",
    responses(
        (status = 200, description = "All swimmers by name", body = Vec<Swimmer>)
    ),
    tag = "swimmers"
)]
pub async fn list_swimmers(State(state): State<AppState>) -> Result<Json<Vec<Swimmer>>, WebError> {
    let swimmers = services::list_swimmers(state.store()).await?;

    Ok(Json(swimmers))
}

#[utoipa::path(
    get,
    path = "/api/swimmers/{id}",
    params(
        ("id" = Uuid, Path, description = "Swimmer id")
    ),
    responses(
        (status = 200, description = "Swimmer found", body = Swimmer),
        (status = 404, description = "Swimmer not found")
    ),
    tag = "swimmers"
)]
pub async fn get_swimmer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Swimmer>, WebError> {
    let swimmer = services::get_swimmer(state.store(), id).await?;

    Ok(Json(swimmer))
}

#[utoipa::path(
    post,
    path = "/api/swimmers",
    request_body = CreateSwimmerRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Swimmer registered", body = Swimmer),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Athlete id already taken")
    ),
    tag = "swimmers"
)]
pub async fn create_swimmer(
    State(state): State<AppState>,
    Json(req): Json<CreateSwimmerRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let swimmer = services::create_swimmer(state.store(), &req).await?;

    Ok((StatusCode::CREATED, Json(swimmer)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/swimmers/{id}/personal-bests",
    params(
        ("id" = Uuid, Path, description = "Swimmer id")
    ),
    responses(
        (status = 200, description = "Fastest swim per event", body = Vec<PersonalBest>),
        (status = 404, description = "Swimmer not found")
    ),
    tag = "swimmers"
)]
pub async fn get_personal_bests(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PersonalBest>>, WebError> {
    let bests = services::get_personal_bests(state.store(), id).await?;

    Ok(Json(bests))
}

#[utoipa::path(
    get,
    path = "/api/swimmers/{id}/events/{event_id}/history",
    params(
        ("id" = Uuid, Path, description = "Swimmer id"),
        ("event_id" = Uuid, Path, description = "Event id")
    ),
    responses(
        (status = 200, description = "Every swim in the event, oldest meet first", body = Vec<PerformanceRecord>),
        (status = 404, description = "Swimmer or event not found")
    ),
    tag = "swimmers"
)]
pub async fn get_performance_history(
    State(state): State<AppState>,
    Path((id, event_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<PerformanceRecord>>, WebError> {
    let history = services::get_performance_history(state.store(), id, event_id).await?;

    Ok(Json(history))
}
