//! Registration form intake and photo storage
//!
//! The multipart body is read completely before anything is written: text
//! fields go into a [`PersonInput`], the optional `photo` part is kept in
//! memory until both the fields and the image have been validated.
//!
//! The photo file and the database row are not written atomically. If the
//! insert fails after the file was stored, the file stays behind.

use axum::body::Bytes;
use axum::extract::Multipart;
use roster_common::PersonInput;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{ApiError, ApiResult};

/// Form field carrying the photo
pub const PHOTO_FIELD: &str = "photo";

/// URL prefix under which stored photos are served
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Size ceiling for a photo
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// Accepted file extensions (lowercase)
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["jpeg", "jpg", "png", "gif"];

const ALLOWED_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/gif"];

/// Uploaded photo held in memory
#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Parsed registration form
#[derive(Debug, Default)]
pub struct Submission {
    pub input: PersonInput,
    pub photo: Option<Attachment>,
}

/// Read every part of the multipart body
///
/// Unknown text fields are ignored. An empty `photo` part (a form submitted
/// without choosing a file) counts as no photo.
pub async fn read_submission(mut multipart: Multipart) -> ApiResult<Submission> {
    let mut submission = Submission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        if name == PHOTO_FIELD {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await?;

            if file_name.is_empty() && bytes.is_empty() {
                debug!("Empty photo part, treating as no photo");
                continue;
            }

            submission.photo = Some(Attachment {
                file_name,
                content_type,
                bytes,
            });
            continue;
        }

        let value = field.text().await?;
        if !submission.input.set_field(&name, value) {
            debug!("Ignoring unknown form field '{}'", name);
        }
    }

    Ok(submission)
}

impl Attachment {
    /// Check size and image type, returning the lowercase extension to keep
    ///
    /// The extension, the declared content type (when sent), and the sniffed
    /// content must all name an accepted image type.
    pub fn validate(&self) -> ApiResult<String> {
        if self.bytes.len() > MAX_PHOTO_BYTES {
            return Err(ApiError::Attachment(format!(
                "File too large: {} bytes (max {} MB)",
                self.bytes.len(),
                MAX_PHOTO_BYTES / 1024 / 1024
            )));
        }

        let extension = Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .filter(|e| ALLOWED_EXTENSIONS.contains(&e.as_str()))
            .ok_or_else(|| not_an_image(&self.file_name))?;

        if let Some(declared) = &self.content_type {
            let declared = declared.to_ascii_lowercase();
            let accepted =
                declared == "image/jpg" || ALLOWED_MIME_TYPES.contains(&declared.as_str());
            if !accepted {
                return Err(not_an_image(&self.file_name));
            }
        }

        match infer::get(&self.bytes) {
            Some(kind) if ALLOWED_MIME_TYPES.contains(&kind.mime_type()) => Ok(extension),
            _ => Err(not_an_image(&self.file_name)),
        }
    }
}

fn not_an_image(file_name: &str) -> ApiError {
    ApiError::Attachment(format!(
        "Only image files are allowed (jpeg, jpg, png, gif): '{}'",
        file_name
    ))
}

/// Name for a stored photo: a fresh UUID plus the original extension
pub fn generate_file_name(extension: &str) -> String {
    format!("{}.{}", uuid::Uuid::new_v4(), extension)
}

/// Write a validated photo into `uploads_dir`, returning its URL path
pub async fn store_attachment(
    uploads_dir: &Path,
    attachment: &Attachment,
    extension: &str,
) -> ApiResult<String> {
    tokio::fs::create_dir_all(uploads_dir).await?;

    let file_name = generate_file_name(extension);
    let path = uploads_dir.join(&file_name);

    if let Err(e) = tokio::fs::write(&path, &attachment.bytes).await {
        warn!("Failed to write photo {}: {}", path.display(), e);
        return Err(e.into());
    }

    info!(
        "Stored photo '{}' as {} ({} bytes)",
        attachment.file_name,
        path.display(),
        attachment.bytes.len()
    );

    Ok(format!("{}/{}", UPLOADS_URL_PREFIX, file_name))
}
