//! PDF metadata endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::error::ApiError;
use crate::raster::PageSequence;
use crate::state::AppState;

use super::form::UploadForm;
use super::rasterize_upload;

/// Snapshot of a document's first page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentInfo {
    /// Total page count of the document
    pub pages: usize,
    pub width: u32,
    pub height: u32,
    pub dpi: [u32; 2],
    pub format: String,
}

impl DocumentInfo {
    /// Describe the first page of `sequence`. `pages` still counts the
    /// whole document.
    pub fn from_sequence(sequence: PageSequence) -> Result<Self, ApiError> {
        let pages = sequence.page_count;
        let first = sequence.into_first()?;
        let (dpi_x, dpi_y) = first.dpi_or_default();

        Ok(DocumentInfo {
            pages,
            width: first.width(),
            height: first.height(),
            dpi: [dpi_x, dpi_y],
            format: first.format_or_unknown().to_string(),
        })
    }
}

/// POST /pdf-info
pub async fn pdf_info(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<DocumentInfo>, ApiError> {
    let mut form = UploadForm::read(multipart).await?;
    let data = form.take_file()?;

    let sequence = rasterize_upload(&state, data).await?;
    let info = DocumentInfo::from_sequence(sequence)?;

    tracing::info!(
        pages = info.pages,
        width = info.width,
        height = info.height,
        "Inspected PDF"
    );

    Ok(Json(info))
}
