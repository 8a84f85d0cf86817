use crate::models::{InventoryRecord, JobRecord};
use std::collections::{BTreeMap, BTreeSet};

/// A record type the filter can look into by field name.
pub trait Searchable {
    /// Fields joined together for free-text search.
    const SEARCH_FIELDS: &'static [&'static str];

    /// Text value of `field`, or `None` when the record has no such field or
    /// the column is null.
    fn field(&self, field: &str) -> Option<&str>;
}

impl Searchable for InventoryRecord {
    const SEARCH_FIELDS: &'static [&'static str] = &["model", "part_name", "sku", "color", "location"];

    fn field(&self, field: &str) -> Option<&str> {
        match field {
            "model" => Some(self.model.as_str()),
            "part_name" => Some(self.part_name.as_str()),
            "sku" => self.sku.as_deref(),
            "color" => self.color.as_deref(),
            "location" => self.location.as_deref(),
            _ => None,
        }
    }
}

impl Searchable for JobRecord {
    const SEARCH_FIELDS: &'static [&'static str] = &["part_used"];

    fn field(&self, field: &str) -> Option<&str> {
        match field {
            "part_used" => Some(self.part_used.as_str()),
            _ => None,
        }
    }
}

/// Keeps records whose every predicate field contains its needle and whose
/// searchable text contains `free_text`. Matching is case-insensitive and
/// missing fields compare as empty strings. Input order is preserved.
pub fn filter_records<'a, R: Searchable>(
    records: &'a [R],
    predicates: &BTreeMap<String, String>,
    free_text: &str,
) -> Vec<&'a R> {
    let predicates: Vec<(&str, String)> = predicates
        .iter()
        .filter(|(_, needle)| !needle.is_empty())
        .map(|(field, needle)| (field.as_str(), needle.to_lowercase()))
        .collect();
    let free_text = free_text.to_lowercase();

    records
        .iter()
        .filter(|record| {
            predicates.iter().all(|(field, needle)| {
                record
                    .field(field)
                    .unwrap_or_default()
                    .to_lowercase()
                    .contains(needle.as_str())
            })
        })
        .filter(|record| free_text.is_empty() || search_text(*record).contains(&free_text))
        .collect()
}

fn search_text<R: Searchable>(record: &R) -> String {
    R::SEARCH_FIELDS
        .iter()
        .map(|field| record.field(field).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Sorted distinct non-empty values of `field`, for dropdown options.
pub fn distinct_values<R: Searchable>(records: &[R], field: &str) -> Vec<String> {
    records
        .iter()
        .filter_map(|record| record.field(field))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobStatusFilter {
    #[default]
    All,
    Finished,
    InProgress,
}

impl JobStatusFilter {
    pub const ALL: [JobStatusFilter; 3] = [Self::All, Self::Finished, Self::InProgress];

    /// Unknown values fall back to `All`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "finished" => Self::Finished,
            "inprogress" | "in_progress" | "in-progress" => Self::InProgress,
            _ => Self::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Finished => "finished",
            Self::InProgress => "inprogress",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Finished => "Finished",
            Self::InProgress => "In Progress",
        }
    }

    pub fn matches(self, job: &JobRecord) -> bool {
        match self {
            Self::All => true,
            Self::Finished => job.finished,
            Self::InProgress => !job.finished,
        }
    }
}
