use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{list_results, submit_result, upload_results};
use crate::AppState;
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/results", post(submit_result))
        .route("/upload-results", post(upload_results))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/results", get(list_results))
        .merge(protected)
}
