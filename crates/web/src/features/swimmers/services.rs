use storage::{
    RecordStore,
    dto::reference::CreateSwimmerRequest,
    dto::result::{PerformanceRecord, PersonalBest},
    error::{Result, StorageError},
    models::Swimmer,
    services::performance,
};
use uuid::Uuid;

/// List all swimmers
pub async fn list_swimmers(store: &dyn RecordStore) -> Result<Vec<Swimmer>> {
    store.list_swimmers().await
}

pub async fn get_swimmer(store: &dyn RecordStore, id: Uuid) -> Result<Swimmer> {
    store
        .find_swimmer(id)
        .await?
        .ok_or_else(|| StorageError::not_found("swimmer", id))
}

/// Register a swimmer, generating an athlete id when none is given
pub async fn create_swimmer(store: &dyn RecordStore, request: &CreateSwimmerRequest) -> Result<Swimmer> {
    let swimmer = store.create_swimmer(request).await?;
    tracing::info!(
        swimmer_id = %swimmer.id,
        athlete_id = %swimmer.athlete_id,
        "Swimmer registered"
    );
    Ok(swimmer)
}

pub async fn get_personal_bests(store: &dyn RecordStore, id: Uuid) -> Result<Vec<PersonalBest>> {
    performance::personal_bests(store, id).await
}

pub async fn get_performance_history(
    store: &dyn RecordStore,
    id: Uuid,
    event_id: Uuid,
) -> Result<Vec<PerformanceRecord>> {
    performance::performance_history(store, id, event_id).await
}
