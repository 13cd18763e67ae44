//! Rasterizer output types

use image::DynamicImage;
use thiserror::Error;

/// Resolution reported for pages that carry no resolution metadata
pub const DEFAULT_DPI: (u32, u32) = (72, 72);

/// Rasterization errors
#[derive(Error, Debug)]
pub enum RasterError {
    #[error("empty input, expected PDF data")]
    EmptyInput,
    #[error("The PDF does not contain any pages.")]
    NoPages,
    #[error("{0}")]
    MuPdf(String),
    #[error("page {page} could not be rendered: {message}")]
    Render { page: usize, message: String },
}

impl From<mupdf::Error> for RasterError {
    fn from(e: mupdf::Error) -> Self {
        RasterError::MuPdf(e.to_string())
    }
}

/// A single rendered page
#[derive(Debug, Clone)]
pub struct PageImage {
    pub image: DynamicImage,
    /// Horizontal and vertical resolution, when known
    pub dpi: Option<(u32, u32)>,
    /// Source format tag, when known
    pub format: Option<String>,
}

impl PageImage {
    pub fn new(image: DynamicImage) -> Self {
        Self {
            image,
            dpi: None,
            format: None,
        }
    }

    pub fn with_dpi(mut self, dpi: (u32, u32)) -> Self {
        self.dpi = Some(dpi);
        self
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dpi_or_default(&self) -> (u32, u32) {
        self.dpi.unwrap_or(DEFAULT_DPI)
    }

    pub fn format_or_unknown(&self) -> &str {
        self.format.as_deref().unwrap_or("Unknown")
    }
}

/// Rendered pages of one document, in document order.
///
/// `pages` may hold fewer entries than `page_count` when the rasterizer was
/// asked to stop early.
#[derive(Debug, Clone, Default)]
pub struct PageSequence {
    /// Total number of pages in the document
    pub page_count: usize,
    pub pages: Vec<PageImage>,
}

impl PageSequence {
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Take the first page, discarding the rest
    pub fn into_first(self) -> Result<PageImage, RasterError> {
        self.pages.into_iter().next().ok_or(RasterError::NoPages)
    }
}
