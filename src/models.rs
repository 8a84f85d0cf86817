use crate::summary::{PlotPoint, TrendSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryRecord {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub part_name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: i64,
    #[serde(default)]
    pub part_cost: Option<f64>,
    #[serde(default, rename = "part_shipping_cost")]
    pub shipping_cost: Option<f64>,
    #[serde(default, rename = "created_at")]
    pub added_at: Option<DateTime<Utc>>,
}

impl InventoryRecord {
    /// Cost of a single unit including shipping.
    pub fn unit_cost(&self) -> f64 {
        self.part_cost.unwrap_or(0.0) + self.shipping_cost.unwrap_or(0.0)
    }
}

/// Editable inventory columns. Used both for inserts and for the full-record
/// replace performed by an edit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryFields {
    pub model: String,
    pub part_name: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub location: Option<String>,
    pub quantity: i64,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub part_cost: Option<f64>,
    #[serde(
        default,
        rename = "part_shipping_cost",
        alias = "shipping_cost",
        deserialize_with = "blank_as_none"
    )]
    pub shipping_cost: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobRecord {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub part_used: String,
    #[serde(default, rename = "job_length", deserialize_with = "null_as_default")]
    pub job_length_days: i64,
    #[serde(default)]
    pub sale_price: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub finished: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Form/API input for a new job. Jobs are always created unfinished.
#[derive(Debug, Clone, Deserialize)]
pub struct JobForm {
    pub part_used: String,
    #[serde(alias = "job_length")]
    pub job_length_days: i64,
    pub sale_price: f64,
}

#[derive(Debug, Serialize)]
pub struct NewJob {
    pub part_used: String,
    pub job_length: i64,
    pub sale_price: f64,
    pub finished: bool,
}

impl From<JobForm> for NewJob {
    fn from(form: JobForm) -> Self {
        Self {
            part_used: form.part_used.trim().to_string(),
            job_length: form.job_length_days,
            sale_price: form.sale_price,
            finished: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryQuery {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub part_name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub q: String,
    /// Row currently shown as an edit form.
    #[serde(default)]
    pub edit: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobsQuery {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub trend: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendKind {
    #[default]
    Revenue,
    Profit,
    Jobs,
}

impl TrendKind {
    pub const ALL: [TrendKind; 3] = [TrendKind::Revenue, TrendKind::Profit, TrendKind::Jobs];

    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "profit" => Self::Profit,
            "jobs" => Self::Jobs,
            _ => Self::Revenue,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Profit => "profit",
            Self::Jobs => "jobs",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::Profit => "Profit",
            Self::Jobs => "Jobs created",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardMetrics {
    pub total_jobs: usize,
    pub finished_jobs: usize,
    pub in_progress_jobs: usize,
    pub revenue: f64,
    pub profit: f64,
    pub inventory_units: i64,
    pub inventory_value: f64,
}

#[derive(Debug, Serialize)]
pub struct TrendResponse {
    pub kind: &'static str,
    pub labels: Vec<String>,
    pub samples: Vec<f64>,
    pub total: f64,
    pub points: Vec<PlotPoint>,
}

impl TrendResponse {
    pub fn new(kind: TrendKind, labels: Vec<String>, samples: Vec<f64>, summary: TrendSummary) -> Self {
        Self {
            kind: kind.as_str(),
            labels,
            samples,
            total: summary.total,
            points: summary.points,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub metrics: DashboardMetrics,
    pub trend: TrendResponse,
}

#[derive(Debug, Serialize)]
pub struct JobsResponse {
    pub total: usize,
    pub finished: usize,
    pub in_progress: usize,
    pub jobs: Vec<JobRecord>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

// Forms send numbers as text and leave untouched inputs blank.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(value)) => Ok(Some(value)),
        Some(NumberOrText::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(NumberOrText::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn inventory_row_tolerates_null_columns() {
        let row = json!({
            "id": 7,
            "model": "X100",
            "part_name": "Hinge",
            "color": null,
            "location": null,
            "quantity": 3,
            "part_cost": 2.5,
            "part_shipping_cost": null,
            "created_at": "2025-03-01T10:00:00+00:00"
        });
        let record: InventoryRecord = serde_json::from_value(row).expect("valid row");
        assert_eq!(record.color, None);
        assert_eq!(record.sku, None);
        assert_eq!(record.location, None);
        assert_eq!(record.unit_cost(), 2.5);
        assert!(record.added_at.is_some());
    }

    #[test]
    fn job_row_uses_wire_column_names() {
        let row = json!({
            "id": 1,
            "part_used": "Hinge",
            "job_length": 4,
            "sale_price": 120.0,
            "finished": true,
            "created_at": "2025-03-01T10:00:00Z"
        });
        let job: JobRecord = serde_json::from_value(row).expect("valid row");
        assert_eq!(job.job_length_days, 4);
        assert!(job.finished);
    }

    #[test]
    fn null_text_columns_read_as_empty() {
        let row = json!({ "id": 2, "model": null, "part_name": "Hinge", "quantity": null });
        let record: InventoryRecord = serde_json::from_value(row).expect("valid row");
        assert_eq!(record.model, "");
        assert_eq!(record.quantity, 0);
    }

    #[test]
    fn new_jobs_start_unfinished() {
        let job = NewJob::from(JobForm {
            part_used: "  Hinge ".to_string(),
            job_length_days: 2,
            sale_price: 80.0,
        });
        assert!(!job.finished);
        assert_eq!(job.part_used, "Hinge");
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["job_length"], 2);
    }

    #[test]
    fn blank_form_fields_become_null() {
        let fields: InventoryFields = serde_json::from_value(json!({
            "model": "X100",
            "part_name": "Hinge",
            "sku": "  ",
            "quantity": 1
        }))
        .unwrap();
        assert_eq!(fields.sku, None);
        let value = serde_json::to_value(&fields).unwrap();
        assert!(value["sku"].is_null());
        assert!(value.get("part_shipping_cost").is_some());
    }

    #[test]
    fn costs_accept_text_and_numbers() {
        let fields: InventoryFields = serde_json::from_value(json!({
            "model": "X100",
            "part_name": "Hinge",
            "quantity": 1,
            "part_cost": "4.25",
            "shipping_cost": 1.5
        }))
        .unwrap();
        assert_eq!(fields.part_cost, Some(4.25));
        assert_eq!(fields.shipping_cost, Some(1.5));
    }

    #[test]
    fn trend_kind_parses_leniently() {
        assert_eq!(TrendKind::parse("PROFIT"), TrendKind::Profit);
        assert_eq!(TrendKind::parse("nonsense"), TrendKind::Revenue);
    }
}
