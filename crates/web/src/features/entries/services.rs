use storage::{
    RecordStore,
    dto::entry::{CreateEntryRequest, EntryDetail, EntryFilter, UpdateEntryRequest},
    error::Result,
    models::Entry,
    services::entry_lifecycle,
};
use uuid::Uuid;

/// List entries with swimmer, event and meet names
pub async fn list_entries(store: &dyn RecordStore, filter: &EntryFilter) -> Result<Vec<EntryDetail>> {
    entry_lifecycle::list_entries_detailed(store, filter).await
}

pub async fn get_entry(store: &dyn RecordStore, id: Uuid) -> Result<Entry> {
    entry_lifecycle::get_entry(store, id).await
}

/// Register a swimmer for an event
pub async fn create_entry(store: &dyn RecordStore, request: &CreateEntryRequest) -> Result<Entry> {
    entry_lifecycle::create_entry(store, request).await
}

/// Change status and/or assign heat and lane
pub async fn update_entry(
    store: &dyn RecordStore,
    id: Uuid,
    request: &UpdateEntryRequest,
) -> Result<Entry> {
    entry_lifecycle::update_entry(store, id, request).await
}

/// Withdraw an entry
pub async fn delete_entry(store: &dyn RecordStore, id: Uuid) -> Result<()> {
    entry_lifecycle::delete_entry(store, id).await
}
