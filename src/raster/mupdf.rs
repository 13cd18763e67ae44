//! MuPDF-backed rasterizer
//!
//! Each call opens a fresh `Document` from the uploaded bytes. MuPDF's
//! context is not shared between threads, so nothing outlives the call.

use image::{DynamicImage, RgbImage};
use mupdf::{Colorspace, Document, Matrix, Pixmap};

use super::types::{PageImage, PageSequence, RasterError};
use super::Rasterizer;

/// PDF user space is 72 points per inch
const POINTS_PER_INCH: f32 = 72.0;

/// Renders PDF pages with MuPDF at a fixed resolution
#[derive(Debug, Clone)]
pub struct MupdfRasterizer {
    dpi: u32,
    /// Maximum number of pages rendered per document
    page_limit: usize,
}

impl MupdfRasterizer {
    pub fn new(dpi: u32) -> Self {
        Self {
            dpi: dpi.max(1),
            page_limit: usize::MAX,
        }
    }

    /// Stop rendering after `limit` pages. The page count still reflects the
    /// whole document.
    pub fn with_page_limit(mut self, limit: usize) -> Self {
        self.page_limit = limit;
        self
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    fn render_page(
        &self,
        doc: &Document,
        index: usize,
        matrix: &Matrix,
        colorspace: &Colorspace,
    ) -> Result<PageImage, RasterError> {
        let render_error = |e: mupdf::Error| RasterError::Render {
            page: index + 1,
            message: e.to_string(),
        };

        let page = doc.load_page(index as i32).map_err(render_error)?;
        // to_pixmap signature: (ctm, colorspace, alpha, show_extras) -> Pixmap
        let pixmap = page
            .to_pixmap(matrix, colorspace, false, true)
            .map_err(render_error)?;

        let image = pixmap_to_image(&pixmap).ok_or_else(|| RasterError::Render {
            page: index + 1,
            message: "pixmap does not match its dimensions".to_string(),
        })?;

        Ok(PageImage::new(image).with_dpi((self.dpi, self.dpi)))
    }
}

impl Rasterizer for MupdfRasterizer {
    fn rasterize(&self, data: &[u8]) -> Result<PageSequence, RasterError> {
        if data.is_empty() {
            return Err(RasterError::EmptyInput);
        }

        let doc = Document::from_bytes(data, "application/pdf")?;
        let page_count = doc.page_count()?.max(0) as usize;
        let to_render = page_count.min(self.page_limit);

        tracing::debug!(
            page_count,
            to_render,
            dpi = self.dpi,
            "Rasterizing PDF ({} bytes)",
            data.len()
        );

        let scale = self.dpi as f32 / POINTS_PER_INCH;
        let matrix = Matrix::new_scale(scale, scale);
        let colorspace = Colorspace::device_rgb();

        let pages = (0..to_render)
            .map(|index| self.render_page(&doc, index, &matrix, &colorspace))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PageSequence { page_count, pages })
    }
}

/// Copy an RGB(A) pixmap into an RGB image, dropping any alpha channel
fn pixmap_to_image(pixmap: &Pixmap) -> Option<DynamicImage> {
    let width = pixmap.width() as u32;
    let height = pixmap.height() as u32;
    let samples = pixmap.samples();
    let n = pixmap.n() as usize; // components per pixel

    if n < 3 {
        return None;
    }

    let mut rgb_buffer = Vec::with_capacity((width as usize) * (height as usize) * 3);
    for y in 0..height as usize {
        for x in 0..width as usize {
            let offset = (y * width as usize + x) * n;
            rgb_buffer.extend_from_slice(samples.get(offset..offset + 3)?);
        }
    }

    RgbImage::from_raw(width, height, rgb_buffer).map(DynamicImage::ImageRgb8)
}
