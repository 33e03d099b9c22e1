use utoipa::OpenApi;

use crate::features::{entries, events, meets, rankings, results, swimmers};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::health,
        entries::handlers::list_entries,
        entries::handlers::get_entry,
        entries::handlers::create_entry,
        entries::handlers::update_entry,
        entries::handlers::delete_entry,
        results::handlers::list_results,
        results::handlers::submit_result,
        results::handlers::upload_results,
        rankings::handlers::get_event_rankings,
        swimmers::handlers::list_swimmers,
        swimmers::handlers::get_swimmer,
        swimmers::handlers::create_swimmer,
        swimmers::handlers::get_personal_bests,
        swimmers::handlers::get_performance_history,
        meets::handlers::list_meets,
        meets::handlers::create_meet,
        events::handlers::list_events,
        events::handlers::create_event,
    ),
    components(
        schemas(
            storage::dto::entry::CreateEntryRequest,
            storage::dto::entry::UpdateEntryRequest,
            storage::dto::entry::EntryDetail,
            storage::dto::result::SubmitResultRequest,
            storage::dto::result::SubmittedResult,
            storage::dto::result::ResultView,
            storage::dto::result::PersonalBest,
            storage::dto::result::PerformanceRecord,
            storage::dto::import::ImportReport,
            storage::dto::import::ImportRowError,
            storage::dto::import::RowFailureKind,
            storage::dto::ranking::RankingEntry,
            storage::dto::ranking::Medal,
            storage::dto::reference::CreateSwimmerRequest,
            storage::dto::reference::CreateMeetRequest,
            storage::dto::reference::CreateEventRequest,
            storage::models::Entry,
            storage::models::EntryStatus,
            storage::models::Event,
            storage::models::Stroke,
            storage::models::Meet,
            storage::models::RaceResult,
            storage::models::Swimmer,
        )
    ),
    tags(
        (name = "entries", description = "Meet entry registration and approval"),
        (name = "results", description = "Race results, single and bulk CSV"),
        (name = "rankings", description = "Per-classification event rankings"),
        (name = "swimmers", description = "Swimmer records and performance"),
        (name = "meets", description = "Meet records"),
        (name = "events", description = "Event records"),
        (name = "health", description = "Liveness"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}
