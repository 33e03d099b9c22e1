use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{create_meet, list_meets};
use crate::AppState;
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_meet))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new().route("/", get(list_meets)).merge(protected)
}
