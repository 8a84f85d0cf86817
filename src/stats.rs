use crate::config::TREND_DAYS;
use crate::models::{DashboardMetrics, DashboardResponse, InventoryRecord, JobRecord, TrendKind, TrendResponse};
use crate::summary::MetricSeries;
use chrono::{Duration, NaiveDate, Utc};
use std::collections::HashMap;

pub fn build_dashboard(jobs: &[JobRecord], inventory: &[InventoryRecord], kind: TrendKind) -> DashboardResponse {
    build_dashboard_at(Utc::now().date_naive(), jobs, inventory, kind)
}

pub fn build_dashboard_at(
    today: NaiveDate,
    jobs: &[JobRecord],
    inventory: &[InventoryRecord],
    kind: TrendKind,
) -> DashboardResponse {
    let costs = PartCosts::new(inventory);
    let series = build_trend_at(today, jobs, &costs, kind);
    let summary = series.summarize();

    DashboardResponse {
        metrics: build_metrics(jobs, inventory, &costs),
        trend: TrendResponse::new(kind, series.labels().to_vec(), series.samples().to_vec(), summary),
    }
}

fn build_metrics(jobs: &[JobRecord], inventory: &[InventoryRecord], costs: &PartCosts) -> DashboardMetrics {
    let finished_jobs = jobs.iter().filter(|job| job.finished).count();
    let revenue: f64 = jobs.iter().map(job_revenue).sum();
    let profit: f64 = jobs.iter().map(|job| job_profit(job, costs)).sum();

    DashboardMetrics {
        total_jobs: jobs.len(),
        finished_jobs,
        in_progress_jobs: jobs.len() - finished_jobs,
        revenue,
        profit,
        inventory_units: inventory.iter().map(|item| item.quantity).sum(),
        inventory_value: inventory
            .iter()
            .map(|item| item.quantity as f64 * item.unit_cost())
            .sum(),
    }
}

/// One sample per day for the last `TREND_DAYS` days, oldest first. Jobs are
/// bucketed by their `created_at` date; jobs without a timestamp are skipped.
pub fn build_trend_at(today: NaiveDate, jobs: &[JobRecord], costs: &PartCosts, kind: TrendKind) -> MetricSeries {
    let mut series = MetricSeries::with_capacity(TREND_DAYS);
    for offset in (0..TREND_DAYS).rev() {
        let date = today - Duration::days(offset as i64);
        let day_jobs = jobs
            .iter()
            .filter(|job| job.created_at.map(|at| at.date_naive()) == Some(date));

        let sample: f64 = match kind {
            TrendKind::Revenue => day_jobs.map(job_revenue).sum(),
            TrendKind::Profit => day_jobs.map(|job| job_profit(job, costs)).sum(),
            TrendKind::Jobs => day_jobs.count() as f64,
        };
        series.push(date.format("%m-%d").to_string(), sample);
    }
    series
}

fn job_revenue(job: &JobRecord) -> f64 {
    if job.finished { job.sale_price.unwrap_or(0.0) } else { 0.0 }
}

fn job_profit(job: &JobRecord, costs: &PartCosts) -> f64 {
    if job.finished {
        job.sale_price.unwrap_or(0.0) - costs.cost_of(&job.part_used)
    } else {
        0.0
    }
}

/// Unit cost lookup for the part a job used, by part name first and then SKU,
/// ignoring case. Unknown parts cost nothing.
pub struct PartCosts {
    by_name: HashMap<String, f64>,
    by_sku: HashMap<String, f64>,
}

impl PartCosts {
    pub fn new(inventory: &[InventoryRecord]) -> Self {
        let mut by_name = HashMap::new();
        let mut by_sku = HashMap::new();
        for item in inventory {
            by_name
                .entry(item.part_name.trim().to_lowercase())
                .or_insert_with(|| item.unit_cost());
            if let Some(sku) = item.sku.as_deref() {
                by_sku.entry(sku.trim().to_lowercase()).or_insert_with(|| item.unit_cost());
            }
        }
        Self { by_name, by_sku }
    }

    pub fn cost_of(&self, part: &str) -> f64 {
        let key = part.trim().to_lowercase();
        self.by_name
            .get(&key)
            .or_else(|| self.by_sku.get(&key))
            .copied()
            .unwrap_or(0.0)
    }
}
