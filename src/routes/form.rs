//! Multipart form extraction shared by the upload endpoints

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;

use crate::error::ApiError;

/// Name of the multipart field carrying the PDF
pub const FILE_FIELD: &str = "file";

/// Fields collected from a multipart upload
#[derive(Debug, Default)]
pub struct UploadForm {
    file: Option<Bytes>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    /// Drain a multipart body. The `file` field is kept as bytes, every other
    /// field as text; a repeated field keeps its last value.
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error("Failed to read multipart body", e))?
        {
            let name = field.name().unwrap_or("").to_string();

            if name == FILE_FIELD {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error("Failed to read file data", e))?;
                tracing::debug!("Read {} bytes of file data", data.len());
                form.file = Some(data);
            } else if !name.is_empty() {
                let value = field.text().await.map_err(|e| {
                    multipart_error(&format!("Failed to read field '{}'", name), e)
                })?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Take the uploaded file, which every endpoint requires
    pub fn take_file(&mut self) -> Result<Bytes, ApiError> {
        self.file
            .take()
            .ok_or_else(|| ApiError::InvalidForm(format!("Field required: {}", FILE_FIELD)))
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn require_text(&self, name: &str) -> Result<&str, ApiError> {
        self.text(name)
            .ok_or_else(|| ApiError::InvalidForm(format!("Field required: {}", name)))
    }

    /// Optional integer field. Blank values count as absent.
    pub fn integer(&self, name: &str) -> Result<Option<i64>, ApiError> {
        match self.text(name).map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => value.parse().map(Some).map_err(|_| {
                ApiError::InvalidForm(format!(
                    "Field '{}' must be a valid integer, got '{}'",
                    name, value
                ))
            }),
        }
    }
}

/// Oversized bodies keep their 413; anything else is a malformed form
fn multipart_error(context: &str, e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(format!("{}: {}", context, e.body_text()))
    } else {
        ApiError::InvalidForm(format!("{}: {}", context, e))
    }
}
