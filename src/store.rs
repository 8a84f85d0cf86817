use crate::errors::StoreError;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

/// A row as exchanged with the store, before it is read into a typed record.
pub type Row = Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Table {
    Inventory,
    Jobs,
}

impl Table {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inventory => "Inventory",
            Self::Jobs => "Jobs",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

/// Equality filters, one ordering column and a row limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push(Filter {
            column: column.into(),
            value: value.to_string(),
        });
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order = Some(Order {
            column: column.into(),
            ascending,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// The hosted table API. Implementations own all persistence; callers only
/// ever hold freshly selected copies.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn select(&self, table: Table, query: &Query) -> Result<Vec<Row>, StoreError>;
    async fn insert(&self, table: Table, record: Row) -> Result<(), StoreError>;
    async fn update(&self, table: Table, fields: Row, id: i64) -> Result<(), StoreError>;
    async fn delete(&self, table: Table, id: i64) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
struct MemoryTables {
    rows: BTreeMap<Table, Vec<Row>>,
    next_id: i64,
}

/// In-process store with the same select/insert/update/delete semantics as
/// the hosted API. Ids and `created_at` are assigned on insert.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<MemoryTables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn select(&self, table: Table, query: &Query) -> Result<Vec<Row>, StoreError> {
        let tables = self.tables.lock().await;
        let mut rows: Vec<Row> = tables
            .rows
            .get(&table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| {
                        query
                            .filters
                            .iter()
                            .all(|filter| cell_text(row.get(&filter.column)).as_deref() == Some(filter.value.as_str()))
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ordering = compare_cells(a.get(&order.column), b.get(&order.column));
                if order.ascending { ordering } else { ordering.reverse() }
            });
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }

        Ok(rows)
    }

    async fn insert(&self, table: Table, record: Row) -> Result<(), StoreError> {
        let mut fields = into_object(record)?;
        let mut tables = self.tables.lock().await;
        tables.next_id += 1;
        let id = tables.next_id;
        fields.insert("id".to_string(), Value::from(id));
        fields
            .entry("created_at")
            .or_insert_with(|| Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)));
        tables.rows.entry(table).or_default().push(Value::Object(fields));
        Ok(())
    }

    async fn update(&self, table: Table, fields: Row, id: i64) -> Result<(), StoreError> {
        let fields = into_object(fields)?;
        let mut tables = self.tables.lock().await;
        let rows = tables.rows.entry(table).or_default();
        for row in rows.iter_mut().filter(|row| row_id(row) == Some(id)) {
            if let Value::Object(existing) = row {
                for (column, value) in &fields {
                    if column != "id" {
                        existing.insert(column.clone(), value.clone());
                    }
                }
            }
        }
        Ok(())
    }

    async fn delete(&self, table: Table, id: i64) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        if let Some(rows) = tables.rows.get_mut(&table) {
            rows.retain(|row| row_id(row) != Some(id));
        }
        Ok(())
    }
}

fn into_object(record: Row) -> Result<Map<String, Value>, StoreError> {
    match record {
        Value::Object(fields) => Ok(fields),
        other => Err(StoreError::Rejected {
            status: 400,
            message: format!("expected an object, got {other}"),
        }),
    }
}

fn row_id(row: &Row) -> Option<i64> {
    row.get("id").and_then(Value::as_i64)
}

// Nulls never equal anything, matching `col=eq.x` on the hosted side.
fn cell_text(cell: Option<&Value>) -> Option<String> {
    match cell? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

// Nulls sort after every value.
fn compare_cells(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|value| !value.is_null());
    let b = b.filter(|value| !value.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(a), Some(b)) => a.to_string().cmp(&b.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        for (part, length, finished) in [("Hinge", 3, false), ("Latch", 1, true), ("Hinge", 2, true)] {
            store
                .insert(
                    Table::Jobs,
                    json!({ "part_used": part, "job_length": length, "finished": finished }),
                )
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn insert_assigns_ids_and_timestamps() {
        let store = seeded().await;
        let rows = store.select(Table::Jobs, &Query::new()).await.unwrap();
        let ids: Vec<i64> = rows.iter().filter_map(row_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(rows.iter().all(|row| row["created_at"].is_string()));
        assert!(store.select(Table::Inventory, &Query::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn select_applies_filters_order_and_limit() {
        let store = seeded().await;

        let hinges = store
            .select(Table::Jobs, &Query::new().eq("part_used", "Hinge"))
            .await
            .unwrap();
        assert_eq!(hinges.len(), 2);

        let finished = store
            .select(Table::Jobs, &Query::new().eq("finished", true))
            .await
            .unwrap();
        assert_eq!(finished.len(), 2);

        let shortest = store
            .select(Table::Jobs, &Query::new().order_by("job_length", true).limit(1))
            .await
            .unwrap();
        assert_eq!(shortest.len(), 1);
        assert_eq!(shortest[0]["part_used"], "Latch");

        let newest_first = store
            .select(Table::Jobs, &Query::new().order_by("id", false))
            .await
            .unwrap();
        assert_eq!(row_id(&newest_first[0]), Some(3));
    }

    #[tokio::test]
    async fn update_merges_fields_by_id() {
        let store = seeded().await;
        store
            .update(Table::Jobs, json!({ "finished": true, "id": 99 }), 1)
            .await
            .unwrap();
        let rows = store.select(Table::Jobs, &Query::new().eq("id", 1)).await.unwrap();
        assert_eq!(rows[0]["finished"], true);
        assert_eq!(rows[0]["part_used"], "Hinge");
    }

    #[tokio::test]
    async fn delete_removes_only_matching_row() {
        let store = seeded().await;
        store.delete(Table::Jobs, 2).await.unwrap();
        store.delete(Table::Jobs, 42).await.unwrap();
        let rows = store.select(Table::Jobs, &Query::new()).await.unwrap();
        let ids: Vec<i64> = rows.iter().filter_map(row_id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn non_object_records_are_rejected() {
        let store = MemoryStore::new();
        let err = store.insert(Table::Jobs, json!([1, 2])).await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected { status: 400, .. }));
    }

    #[test]
    fn nulls_sort_last() {
        let a = json!(null);
        let b = json!("x");
        assert_eq!(compare_cells(Some(&a), Some(&b)), Ordering::Greater);
        assert_eq!(compare_cells(None, Some(&b)), Ordering::Greater);
    }
}
