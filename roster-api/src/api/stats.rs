//! Dashboard statistics endpoint

use axum::{extract::State, Json};
use roster_common::StatisticsSummary;
use tracing::debug;

use crate::{db, error::ApiResult, AppState};

/// GET /api/dashboard/stats
///
/// Recomputed from the whole table on every call; nothing is cached.
pub async fn get_dashboard_stats(
    State(state): State<AppState>,
) -> ApiResult<Json<StatisticsSummary>> {
    let summary = db::statistics_summary(&state.db).await?;

    debug!(
        professions = summary.profession_stats.len(),
        age_ranges = summary.age_range_stats.len(),
        months = summary.monthly_stats.len(),
        "Computed dashboard statistics"
    );

    Ok(Json(summary))
}
