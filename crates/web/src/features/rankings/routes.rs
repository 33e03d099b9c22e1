use axum::{Router, routing::get};

use super::handlers::get_event_rankings;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/:event_id", get(get_event_rankings))
}
