//! Suggested professions

use axum::Json;
use roster_common::person::PROFESSIONS;

/// GET /api/professions
///
/// Fixed list for the registration form; not derived from stored records.
pub async fn list_professions() -> Json<Vec<&'static str>> {
    Json(PROFESSIONS.to_vec())
}
