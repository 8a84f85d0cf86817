use crate::errors::AppError;
use crate::filter::{JobStatusFilter, distinct_values, filter_records};
use crate::models::{
    DashboardQuery, DashboardResponse, InventoryFields, InventoryQuery, InventoryRecord, JobForm, JobRecord, JobsQuery,
    JobsResponse, NewJob, TrendKind,
};
use crate::state::AppState;
use crate::stats::build_dashboard;
use crate::tables;
use crate::ui::{InventoryView, JobsView, render_dashboard, render_inventory, render_jobs};
use axum::{
    Form, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use tracing::{error, info, warn};

pub async fn index(State(state): State<AppState>, Query(query): Query<DashboardQuery>) -> Html<String> {
    let kind = TrendKind::parse(&query.trend);
    let dashboard = match load_dashboard(&state, kind).await {
        Ok(dashboard) => Some(dashboard),
        Err(err) => {
            error!("failed to load dashboard: {}", err.message);
            None
        }
    };
    Html(render_dashboard(dashboard.as_ref(), kind))
}

pub async fn inventory_page(State(state): State<AppState>, Query(query): Query<InventoryQuery>) -> Html<String> {
    Html(inventory_html(&state, &query, None).await)
}

pub async fn inventory_create(State(state): State<AppState>, Form(fields): Form<InventoryFields>) -> Response {
    match tables::add_inventory(state.store.as_ref(), &fields).await {
        Ok(()) => {
            info!(part = %fields.part_name, "inventory item added");
            Redirect::to("/inventory").into_response()
        }
        Err(err) => inventory_write_failed(&state, format!("Failed to add item: {err}")).await,
    }
}

pub async fn inventory_update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(fields): Form<InventoryFields>,
) -> Response {
    match tables::replace_inventory(state.store.as_ref(), id, &fields).await {
        Ok(()) => {
            info!(id, "inventory item updated");
            Redirect::to("/inventory").into_response()
        }
        Err(err) => inventory_write_failed(&state, format!("Failed to update item: {err}")).await,
    }
}

pub async fn inventory_delete(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match tables::delete_inventory(state.store.as_ref(), id).await {
        Ok(()) => {
            info!(id, "inventory item deleted");
            Redirect::to("/inventory").into_response()
        }
        Err(err) => inventory_write_failed(&state, format!("Failed to delete item: {err}")).await,
    }
}

pub async fn jobs_page(State(state): State<AppState>, Query(query): Query<JobsQuery>) -> Html<String> {
    Html(jobs_html(&state, &query, None).await)
}

pub async fn jobs_create(State(state): State<AppState>, Form(form): Form<JobForm>) -> Response {
    let job = NewJob::from(form);
    match tables::add_job(state.store.as_ref(), &job).await {
        Ok(()) => {
            info!(part = %job.part_used, "job added");
            Redirect::to("/jobs").into_response()
        }
        Err(err) => jobs_write_failed(&state, format!("Failed to add job: {err}")).await,
    }
}

pub async fn jobs_toggle(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match tables::toggle_job(state.store.as_ref(), id).await {
        Ok(Some(finished)) => {
            info!(id, finished, "job toggled");
            Redirect::to("/jobs").into_response()
        }
        Ok(None) => {
            warn!(id, "toggle requested for missing job");
            Redirect::to("/jobs").into_response()
        }
        Err(err) => jobs_write_failed(&state, format!("Failed to update job: {err}")).await,
    }
}

pub async fn jobs_delete(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match tables::delete_job(state.store.as_ref(), id).await {
        Ok(()) => {
            info!(id, "job deleted");
            Redirect::to("/jobs").into_response()
        }
        Err(err) => jobs_write_failed(&state, format!("Failed to delete job: {err}")).await,
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    Ok(Json(load_dashboard(&state, TrendKind::parse(&query.trend)).await?))
}

pub async fn get_inventory(
    State(state): State<AppState>,
    Query(query): Query<InventoryQuery>,
) -> Result<Json<Vec<InventoryRecord>>, AppError> {
    let items = tables::fetch_inventory(state.store.as_ref(), state.row_limit()).await?;
    let matched = filter_records(&items, &inventory_predicates(&query), &query.q)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(matched))
}

pub async fn create_inventory(
    State(state): State<AppState>,
    Json(fields): Json<InventoryFields>,
) -> Result<StatusCode, AppError> {
    validate_inventory(&fields)?;
    tables::add_inventory(state.store.as_ref(), &fields).await?;
    Ok(StatusCode::CREATED)
}

pub async fn update_inventory(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(fields): Json<InventoryFields>,
) -> Result<StatusCode, AppError> {
    validate_inventory(&fields)?;
    tables::replace_inventory(state.store.as_ref(), id, &fields).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_inventory(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode, AppError> {
    tables::delete_inventory(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobsQuery>,
) -> Result<Json<JobsResponse>, AppError> {
    let jobs = tables::fetch_jobs(state.store.as_ref(), state.row_limit()).await?;
    let finished = jobs.iter().filter(|job| job.finished).count();
    let visible = visible_jobs(&jobs, &query).into_iter().cloned().collect();

    Ok(Json(JobsResponse {
        total: jobs.len(),
        finished,
        in_progress: jobs.len() - finished,
        jobs: visible,
    }))
}

pub async fn create_job(State(state): State<AppState>, Json(form): Json<JobForm>) -> Result<StatusCode, AppError> {
    if form.part_used.trim().is_empty() {
        return Err(AppError::bad_request("part_used must not be empty"));
    }
    tables::add_job(state.store.as_ref(), &NewJob::from(form)).await?;
    Ok(StatusCode::CREATED)
}

pub async fn toggle_job(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<JobRecord>, AppError> {
    if tables::toggle_job(state.store.as_ref(), id).await?.is_none() {
        return Err(AppError::not_found(format!("job {id} not found")));
    }
    tables::fetch_job(state.store.as_ref(), id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("job {id} not found")))
}

pub async fn remove_job(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode, AppError> {
    tables::delete_job(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn load_dashboard(state: &AppState, kind: TrendKind) -> Result<DashboardResponse, AppError> {
    let store = state.store.as_ref();
    let (jobs, inventory) = tokio::join!(
        tables::fetch_jobs(store, state.row_limit()),
        tables::fetch_inventory(store, state.row_limit())
    );
    Ok(build_dashboard(&jobs?, &inventory?, kind))
}

// Reads fail quietly: the error is logged and the page stays in its loading state.
async fn inventory_html(state: &AppState, query: &InventoryQuery, alert: Option<String>) -> String {
    let items = match tables::fetch_inventory(state.store.as_ref(), state.row_limit()).await {
        Ok(items) => Some(items),
        Err(err) => {
            error!("failed to load inventory: {err}");
            None
        }
    };

    let view = InventoryView {
        items: items
            .as_deref()
            .map(|items| filter_records(items, &inventory_predicates(query), &query.q)),
        models: items
            .as_deref()
            .map(|items| distinct_values(items, "model"))
            .unwrap_or_default(),
        locations: items
            .as_deref()
            .map(|items| distinct_values(items, "location"))
            .unwrap_or_default(),
        query,
        editing: query.edit,
        alert,
    };
    render_inventory(&view)
}

async fn jobs_html(state: &AppState, query: &JobsQuery, alert: Option<String>) -> String {
    let jobs = match tables::fetch_jobs(state.store.as_ref(), state.row_limit()).await {
        Ok(jobs) => Some(jobs),
        Err(err) => {
            error!("failed to load jobs: {err}");
            None
        }
    };

    let view = JobsView {
        all: jobs.as_deref(),
        visible: jobs
            .as_deref()
            .map(|jobs| visible_jobs(jobs, query))
            .unwrap_or_default(),
        status: JobStatusFilter::parse(&query.status),
        search: &query.q,
        alert,
    };
    render_jobs(&view)
}

// Writes fail loudly: the page is re-rendered with a blocking alert.
async fn inventory_write_failed(state: &AppState, message: String) -> Response {
    error!("{message}");
    let page = inventory_html(state, &InventoryQuery::default(), Some(message)).await;
    (StatusCode::BAD_GATEWAY, Html(page)).into_response()
}

async fn jobs_write_failed(state: &AppState, message: String) -> Response {
    error!("{message}");
    let page = jobs_html(state, &JobsQuery::default(), Some(message)).await;
    (StatusCode::BAD_GATEWAY, Html(page)).into_response()
}

fn inventory_predicates(query: &InventoryQuery) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("model".to_string(), query.model.clone()),
        ("part_name".to_string(), query.part_name.clone()),
        ("location".to_string(), query.location.clone()),
    ])
}

fn visible_jobs<'a>(jobs: &'a [JobRecord], query: &JobsQuery) -> Vec<&'a JobRecord> {
    let status = JobStatusFilter::parse(&query.status);
    filter_records(jobs, &BTreeMap::new(), &query.q)
        .into_iter()
        .filter(|job| status.matches(job))
        .collect()
}

fn validate_inventory(fields: &InventoryFields) -> Result<(), AppError> {
    if fields.model.trim().is_empty() || fields.part_name.trim().is_empty() {
        return Err(AppError::bad_request("model and part_name must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::app::router;
    use crate::config::Config;
    use crate::errors::StoreError;
    use crate::state::AppState;
    use crate::store::{Query, RemoteStore, Row, Table};
    use async_trait::async_trait;
    use reqwest::{Client, StatusCode, redirect::Policy};
    use std::sync::Arc;

    struct OfflineStore;

    fn offline() -> StoreError {
        StoreError::Rejected {
            status: 503,
            message: "store offline".to_string(),
        }
    }

    #[async_trait]
    impl RemoteStore for OfflineStore {
        async fn select(&self, _table: Table, _query: &Query) -> Result<Vec<Row>, StoreError> {
            Err(offline())
        }

        async fn insert(&self, _table: Table, _record: Row) -> Result<(), StoreError> {
            Err(offline())
        }

        async fn update(&self, _table: Table, _fields: Row, _id: i64) -> Result<(), StoreError> {
            Err(offline())
        }

        async fn delete(&self, _table: Table, _id: i64) -> Result<(), StoreError> {
            Err(offline())
        }
    }

    async fn serve_offline() -> String {
        let app = router(AppState::new(Arc::new(OfflineStore), Config::default()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client() -> Client {
        Client::builder().redirect(Policy::none()).build().unwrap()
    }

    #[tokio::test]
    async fn failed_reads_render_loading_pages() {
        let base_url = serve_offline().await;
        let client = client();

        for path in ["/", "/inventory", "/jobs"] {
            let response = client.get(format!("{base_url}{path}")).send().await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{path}");
            let page = response.text().await.unwrap();
            assert!(page.contains("Loading..."), "{path}");
            assert!(!page.contains("window.alert("), "{path}");
        }
    }

    #[tokio::test]
    async fn failed_writes_alert_with_bad_gateway() {
        let base_url = serve_offline().await;
        let client = client();

        let job = client
            .post(format!("{base_url}/jobs"))
            .form(&[("part_used", "Hinge"), ("job_length_days", "2"), ("sale_price", "80")])
            .send()
            .await
            .unwrap();
        assert_eq!(job.status(), StatusCode::BAD_GATEWAY);
        let page = job.text().await.unwrap();
        assert!(page.contains(r#"<div class="alert" role="alert">Failed to add job"#));
        assert!(page.contains("window.alert("));
        assert!(page.contains("store offline"));

        let item = client
            .post(format!("{base_url}/inventory"))
            .form(&[("model", "Falcon"), ("part_name", "Hinge"), ("quantity", "1")])
            .send()
            .await
            .unwrap();
        assert_eq!(item.status(), StatusCode::BAD_GATEWAY);
        assert!(item.text().await.unwrap().contains("window.alert("));

        let toggle = client
            .post(format!("{base_url}/jobs/1/toggle"))
            .send()
            .await
            .unwrap();
        assert_eq!(toggle.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn api_reports_store_failures_as_bad_gateway() {
        let base_url = serve_offline().await;
        let client = client();

        let jobs = client.get(format!("{base_url}/api/jobs")).send().await.unwrap();
        assert_eq!(jobs.status(), StatusCode::BAD_GATEWAY);

        let toggle = client
            .post(format!("{base_url}/api/jobs/1/toggle"))
            .send()
            .await
            .unwrap();
        assert_eq!(toggle.status(), StatusCode::BAD_GATEWAY);

        let dashboard = client.get(format!("{base_url}/api/dashboard")).send().await.unwrap();
        assert_eq!(dashboard.status(), StatusCode::BAD_GATEWAY);

        let health = client.get(format!("{base_url}/api/health")).send().await.unwrap();
        assert_eq!(health.status(), StatusCode::OK);
    }
}
