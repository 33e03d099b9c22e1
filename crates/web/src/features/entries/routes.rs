use axum::{
    Router, middleware,
    routing::{get, put},
};

use super::handlers::{create_entry, delete_entry, get_entry, list_entries, update_entry};
use crate::AppState;
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/:id", put(update_entry))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_entries).post(create_entry))
        .route("/:id", get(get_entry).delete(delete_entry))
        .merge(protected)
}
