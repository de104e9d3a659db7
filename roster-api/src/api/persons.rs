//! Person listing and registration

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use roster_common::{time, PersonRecord};
use tracing::info;

use crate::{
    db,
    error::{ApiError, ApiResult},
    ingest, AppState,
};

/// GET /api/persons
///
/// Every record, newest first.
pub async fn list_persons(State(state): State<AppState>) -> ApiResult<Json<Vec<PersonRecord>>> {
    let persons = db::list_persons(&state.db).await?;
    Ok(Json(persons))
}

/// POST /api/persons
///
/// Multipart form with the registration fields and an optional `photo`.
/// Fields are validated first, then the photo; nothing is written unless
/// both pass. A body that is not multipart gets the JSON 400 like any other
/// malformed request.
pub async fn create_person(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<(StatusCode, Json<PersonRecord>)> {
    let submission = ingest::read_submission(multipart?).await?;

    let person = submission
        .input
        .validate(time::today())
        .map_err(|errors| ApiError::Validation(errors.iter().map(ToString::to_string).collect()))?;

    let photo = match &submission.photo {
        Some(attachment) => Some((attachment, attachment.validate()?)),
        None => None,
    };

    let person = match photo {
        Some((attachment, extension)) => {
            let url = ingest::store_attachment(&state.uploads_dir, attachment, &extension).await?;
            person.with_photo_url(url)
        }
        None => person,
    };

    let record = db::insert_person(&state.db, &person, time::now()).await?;

    info!(
        id = record.id,
        profession = %record.profession,
        has_photo = record.photo_url.is_some(),
        "Registered person"
    );

    Ok((StatusCode::CREATED, Json(record)))
}
