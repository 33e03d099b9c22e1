use storage::{RecordStore, dto::reference::CreateEventRequest, error::Result, models::Event};

/// List events by stroke, then distance
pub async fn list_events(store: &dyn RecordStore) -> Result<Vec<Event>> {
    store.list_events().await
}

pub async fn create_event(store: &dyn RecordStore, request: &CreateEventRequest) -> Result<Event> {
    let event = store.create_event(request).await?;
    tracing::info!(
        event_id = %event.id,
        name = %event.name,
        stroke = %event.stroke,
        distance = event.distance,
        "Event created"
    );
    Ok(event)
}
