//! roster-api library - person registration and dashboard statistics
//!
//! Accepts registrations (with an optional photo), lists stored persons, and
//! serves per-dimension counts for the dashboard.

use axum::{extract::DefaultBodyLimit, http::Uri, Router};
use sqlx::SqlitePool;
use std::path::PathBuf;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod ingest;

use error::ApiError;

/// Request body ceiling; above the photo limit so oversized photos get a
/// validation message instead of a bare 413
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Directory holding stored photos
    pub uploads_dir: PathBuf,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, uploads_dir: PathBuf) -> Self {
        Self { db, uploads_dir }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let uploads = ServeDir::new(&state.uploads_dir);

    Router::new()
        .route(
            "/api/persons",
            get(api::list_persons).post(api::create_person),
        )
        .route("/api/dashboard/stats", get(api::get_dashboard_stats))
        .route("/api/professions", get(api::list_professions))
        .merge(api::health_routes())
        .nest_service(ingest::UPLOADS_URL_PREFIX, uploads)
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Route {} not found", uri.path()))
}
