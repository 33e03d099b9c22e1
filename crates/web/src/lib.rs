pub mod config;
pub mod error;
pub mod features;
pub mod middleware;
mod openapi;

use std::sync::Arc;
use std::time::Duration;

use axum::{Json, Router, extract::DefaultBodyLimit, extract::State, routing::get};
use serde_json::{Value, json};
use storage::RecordStore;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use error::WebError;
use features::{entries, events, meets, rankings, results, swimmers};
use middleware::auth::ApiKeys;

pub use openapi::ApiDoc;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    /// Cancelled on shutdown; long-running imports watch a child token.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }
}

pub fn build_router(state: AppState, api_keys: ApiKeys, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    let api = Router::new()
        .route("/health", get(health))
        .nest("/entries", entries::routes::routes(api_keys.clone()))
        .nest("/rankings", rankings::routes::routes())
        .nest("/swimmers", swimmers::routes::routes(api_keys.clone()))
        .nest("/meets", meets::routes::routes(api_keys.clone()))
        .nest("/events", events::routes::routes(api_keys.clone()))
        .merge(results::routes::routes(api_keys));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service and store are reachable"),
        (status = 500, description = "Store unavailable")
    ),
    tag = "health"
)]
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, WebError> {
    state.store().health_check().await?;
    Ok(Json(json!({ "status": "ok" })))
}
