use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::dto::ranking::RankingEntry;
use uuid::Uuid;

use crate::AppState;
use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/rankings/{event_id}",
    params(
        ("event_id" = Uuid, Path, description = "Event id")
    ),
    responses(
        (status = 200, description = "Leaderboards keyed by classification; unclassified swimmers rank under \"Open\"", body = HashMap<String, Vec<RankingEntry>>),
        (status = 404, description = "Event not found")
    ),
    tag = "rankings"
)]
pub async fn get_event_rankings(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let rankings = services::get_event_rankings(state.store(), event_id).await?;

    Ok(Json(rankings).into_response())
}
