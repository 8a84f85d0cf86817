use crate::errors::StoreError;
use crate::models::{InventoryFields, InventoryRecord, JobRecord, NewJob};
use crate::store::{Query, RemoteStore, Row, Table};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::warn;

pub async fn fetch_inventory(store: &dyn RemoteStore, limit: usize) -> Result<Vec<InventoryRecord>, StoreError> {
    let rows = store
        .select(Table::Inventory, &Query::new().order_by("created_at", false).limit(limit))
        .await?;
    Ok(decode_rows(Table::Inventory, rows))
}

pub async fn add_inventory(store: &dyn RemoteStore, fields: &InventoryFields) -> Result<(), StoreError> {
    store.insert(Table::Inventory, serde_json::to_value(fields)?).await
}

/// Replaces every editable column of the row.
pub async fn replace_inventory(store: &dyn RemoteStore, id: i64, fields: &InventoryFields) -> Result<(), StoreError> {
    store.update(Table::Inventory, serde_json::to_value(fields)?, id).await
}

pub async fn delete_inventory(store: &dyn RemoteStore, id: i64) -> Result<(), StoreError> {
    store.delete(Table::Inventory, id).await
}

/// Jobs, newest first.
pub async fn fetch_jobs(store: &dyn RemoteStore, limit: usize) -> Result<Vec<JobRecord>, StoreError> {
    let rows = store
        .select(Table::Jobs, &Query::new().order_by("created_at", false).limit(limit))
        .await?;
    Ok(decode_rows(Table::Jobs, rows))
}

pub async fn fetch_job(store: &dyn RemoteStore, id: i64) -> Result<Option<JobRecord>, StoreError> {
    let rows = store.select(Table::Jobs, &Query::new().eq("id", id).limit(1)).await?;
    Ok(decode_rows(Table::Jobs, rows).into_iter().next())
}

pub async fn add_job(store: &dyn RemoteStore, job: &NewJob) -> Result<(), StoreError> {
    store.insert(Table::Jobs, serde_json::to_value(job)?).await
}

pub async fn set_job_finished(store: &dyn RemoteStore, id: i64, finished: bool) -> Result<(), StoreError> {
    store.update(Table::Jobs, json!({ "finished": finished }), id).await
}

/// Flips the finished flag of a job. Returns the new state, or `None` when the
/// job no longer exists.
pub async fn toggle_job(store: &dyn RemoteStore, id: i64) -> Result<Option<bool>, StoreError> {
    let Some(job) = fetch_job(store, id).await? else {
        return Ok(None);
    };
    let finished = !job.finished;
    set_job_finished(store, id, finished).await?;
    Ok(Some(finished))
}

pub async fn delete_job(store: &dyn RemoteStore, id: i64) -> Result<(), StoreError> {
    store.delete(Table::Jobs, id).await
}

// Malformed rows are dropped so one bad row does not blank the whole view.
fn decode_rows<T: DeserializeOwned>(table: Table, rows: Vec<Row>) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value(row) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(%table, "skipping malformed row: {err}");
                None
            }
        })
        .collect()
}
