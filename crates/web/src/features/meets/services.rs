use storage::{RecordStore, dto::reference::CreateMeetRequest, error::Result, models::Meet};

/// List meets, most recent first
pub async fn list_meets(store: &dyn RecordStore) -> Result<Vec<Meet>> {
    store.list_meets().await
}

pub async fn create_meet(store: &dyn RecordStore, request: &CreateMeetRequest) -> Result<Meet> {
    let meet = store.create_meet(request).await?;
    tracing::info!(meet_id = %meet.id, name = %meet.name, date = %meet.date, "Meet created");
    Ok(meet)
}
