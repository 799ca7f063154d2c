//! Multipart upload pipeline stage.
//!
//! `parse_upload` consumes the whole multipart body before the handler's
//! domain logic runs, yielding either a typed [`UploadForm`] (stored file
//! metadata plus the accompanying text fields) or a typed validation error.
//! One named file per request; MIME/extension allow-lists and the size
//! ceiling are enforced per field kind.

use axum::extract::Multipart;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use util::config;
use uuid::Uuid;

use crate::response::ApiError;

/// Hard ceiling on a single uploaded file.
pub const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

const SUBMISSION_EXTENSIONS: [&str; 5] = ["pdf", "doc", "docx", "txt", "zip"];

/// Which upload field a route accepts, deciding its allow-list and directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    ProfilePicture,
    Video,
    Submission,
}

impl UploadKind {
    /// The multipart field name carrying the file.
    pub fn field_name(&self) -> &'static str {
        match self {
            UploadKind::ProfilePicture => "profile_picture",
            UploadKind::Video => "video",
            UploadKind::Submission => "submission",
        }
    }

    fn subdir(&self) -> &'static str {
        match self {
            UploadKind::ProfilePicture => "profiles",
            UploadKind::Video => "videos",
            UploadKind::Submission => "submissions",
        }
    }

    fn accepts(&self, content_type: Option<&str>, filename: &str) -> bool {
        match self {
            UploadKind::ProfilePicture => {
                content_type.is_some_and(|ct| ct.starts_with("image/"))
            }
            UploadKind::Video => content_type.is_some_and(|ct| ct.starts_with("video/")),
            UploadKind::Submission => extension_of(filename)
                .is_some_and(|ext| SUBMISSION_EXTENSIONS.contains(&ext.as_str())),
        }
    }

    fn rejection(&self) -> &'static str {
        match self {
            UploadKind::ProfilePicture => "Only image files are allowed",
            UploadKind::Video => "Only video files are allowed",
            UploadKind::Submission => "Invalid file type for submission",
        }
    }

    fn missing(&self) -> &'static str {
        match self {
            UploadKind::ProfilePicture => "No image file uploaded",
            UploadKind::Video => "No video file uploaded",
            UploadKind::Submission => "No submission file uploaded",
        }
    }
}

/// Metadata of a file written to upload storage.
#[derive(Debug, Clone, Serialize)]
pub struct StoredFile {
    /// The original filename as uploaded.
    pub filename: String,
    /// Path on disk, relative to the storage root's parent.
    pub path: String,
    /// URL the file is reachable at.
    pub url: String,
}

/// Result of the upload stage: at most one stored file plus the text fields.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<StoredFile>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Unwraps the stored file, failing with the kind's missing-file message.
    pub fn require_file(&self, kind: UploadKind) -> Result<&StoredFile, ApiError> {
        self.file
            .as_ref()
            .ok_or_else(|| ApiError::bad_request(kind.missing()))
    }
}

/// Drains a multipart request, validating and storing the file named by
/// `kind` and collecting every other part as a text field.
pub async fn parse_upload(
    mut multipart: Multipart,
    kind: UploadKind,
) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::bad_request("Malformed multipart request"))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == kind.field_name() {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().map(str::to_string);

            if !kind.accepts(content_type.as_deref(), &filename) {
                return Err(ApiError::bad_request(kind.rejection()));
            }

            let data = field
                .bytes()
                .await
                .map_err(|_| ApiError::bad_request("Failed to read uploaded file"))?;

            if data.len() > MAX_UPLOAD_BYTES {
                return Err(ApiError::bad_request("File exceeds the 100MB upload limit"));
            }

            form.file = Some(store(kind, &filename, &data).await?);
        } else {
            let value = field
                .text()
                .await
                .map_err(|_| ApiError::bad_request("Malformed multipart request"))?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

async fn store(kind: UploadKind, filename: &str, data: &[u8]) -> Result<StoredFile, ApiError> {
    let dir = PathBuf::from(config::upload_storage_root()).join(kind.subdir());
    tokio::fs::create_dir_all(&dir).await?;

    let stored_name = match extension_of(filename) {
        Some(ext) => format!("{}-{}.{}", kind.field_name(), Uuid::new_v4(), ext),
        None => format!("{}-{}", kind.field_name(), Uuid::new_v4()),
    };

    let path = dir.join(&stored_name);
    tokio::fs::write(&path, data).await?;

    Ok(StoredFile {
        filename: filename.to_string(),
        path: path.to_string_lossy().into_owned(),
        url: format!("/uploads/{}/{}", kind.subdir(), stored_name),
    })
}

fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}
