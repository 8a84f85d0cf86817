use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/inventory", get(handlers::inventory_page).post(handlers::inventory_create))
        .route("/inventory/:id", post(handlers::inventory_update))
        .route("/inventory/:id/delete", post(handlers::inventory_delete))
        .route("/jobs", get(handlers::jobs_page).post(handlers::jobs_create))
        .route("/jobs/:id/toggle", post(handlers::jobs_toggle))
        .route("/jobs/:id/delete", post(handlers::jobs_delete))
        .route("/api/health", get(handlers::health))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/inventory", get(handlers::get_inventory).post(handlers::create_inventory))
        .route(
            "/api/inventory/:id",
            axum::routing::put(handlers::update_inventory).delete(handlers::remove_inventory),
        )
        .route("/api/jobs", get(handlers::get_jobs).post(handlers::create_job))
        .route("/api/jobs/:id", axum::routing::delete(handlers::remove_job))
        .route("/api/jobs/:id/toggle", post(handlers::toggle_job))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
