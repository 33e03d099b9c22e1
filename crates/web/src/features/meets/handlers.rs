use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{dto::reference::CreateMeetRequest, models::Meet};
use validator::Validate;

use crate::AppState;
use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/meets",
    responses(
        (status = 200, description = "Meets, most recent first", body = Vec<Meet>)
    ),
    tag = "meets"
)]
pub async fn list_meets(State(state): State<AppState>) -> Result<Json<Vec<Meet>>, WebError> {
    let meets = services::list_meets(state.store()).await?;

    Ok(Json(meets))
}

#[utoipa::path(
    post,
    path = "/api/meets",
    request_body = CreateMeetRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Meet created", body = Meet),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "meets"
)]
pub async fn create_meet(
    State(state): State<AppState>,
    Json(req): Json<CreateMeetRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let meet = services::create_meet(state.store(), &req).await?;

    Ok((StatusCode::CREATED, Json(meet)).into_response())
}
