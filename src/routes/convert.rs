//! PDF to image conversion endpoint
//!
//! POST /convert with multipart fields:
//! - `file`: the PDF (required)
//! - `image_format`: PNG, JPEG, TIFF or BMP, any case (required)
//! - `quality`: JPEG quality (default 100)
//! - `width` / `height`: optional target size in pixels

use axum::{
    body::Body,
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::Response,
};

use crate::convert::{self, ConversionRequest, OutputFormat, DEFAULT_QUALITY};
use crate::error::ApiError;
use crate::state::AppState;

use super::form::UploadForm;
use super::{rasterize_upload, run_blocking};

/// Convert the first page of the uploaded PDF
pub async fn convert_pdf(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut form = UploadForm::read(multipart).await?;

    let image_format = form.require_text("image_format")?.to_string();
    let quality = form.integer("quality")?.unwrap_or(DEFAULT_QUALITY);
    let width = form.integer("width")?;
    let height = form.integer("height")?;
    let data = form.take_file()?;

    // Reject unknown formats before any rendering work
    let format: OutputFormat = image_format.parse()?;
    let request = ConversionRequest::new(format)
        .with_quality(quality)
        .with_size(width, height);

    tracing::debug!(
        format = %format,
        quality = request.quality,
        width = ?request.width,
        height = ?request.height,
        "Converting PDF ({} bytes)",
        data.len()
    );

    let sequence = rasterize_upload(&state, data).await?;
    let page_count = sequence.page_count;
    let page = sequence.into_first()?;

    let result = run_blocking(move || convert::convert_page(page.image, &request)).await??;

    tracing::info!(
        "Converted page 1 of {} to {} ({} bytes)",
        page_count,
        format,
        result.data.len()
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, result.content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", result.filename),
        )
        .body(Body::from(result.data))
        .map_err(|e| ApiError::Processing(format!("Failed to build response: {}", e)))
}
