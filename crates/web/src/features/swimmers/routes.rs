use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{
    create_swimmer, get_performance_history, get_personal_bests, get_swimmer, list_swimmers,
};
use crate::AppState;
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_swimmer))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_swimmers))
        .route("/:id", get(get_swimmer))
        .route("/:id/personal-bests", get(get_personal_bests))
        .route("/:id/events/:event_id/history", get(get_performance_history))
        .merge(protected)
}
